//! # docread-pdf2md
//!
//! Parse PDF byte content into Markdown plus a map of hosted images.
//!
//! ## Why this crate?
//!
//! Document-ingestion services receive PDFs as byte blobs and need two
//! things back: clean Markdown for downstream indexing, and the embedded
//! images published somewhere a browser can reach. The conversion problem
//! itself — layout analysis, reading order, tables, image extraction — is
//! solved by dedicated libraries; what keeps getting rewritten per service
//! is the glue around them. This crate is that glue, done once: temp-file
//! lifecycle, driving the converter, rewriting the converter's local image
//! paths into uploaded URLs, and guaranteed cleanup.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF bytes
//!  │
//!  ├─ 1. Spool    bytes → self-removing temp file (converter wants a path)
//!  ├─ 2. Convert  external MarkdownConverter, images into a scoped temp dir
//!  ├─ 3. Scan     find local ![alt](path) references (remote URLs skipped)
//!  ├─ 4. Publish  upload each image, open it into memory
//!  └─ 5. Rewrite  pure text pass: local paths → uploaded URLs
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use docread_pdf2md::{HttpUploader, PdfParser};
//! use std::sync::Arc;
//!
//! # struct MuPdfConverter;
//! # impl docread_pdf2md::MarkdownConverter for MuPdfConverter {
//! #     fn to_markdown(
//! #         &self,
//! #         _request: &docread_pdf2md::ConvertRequest,
//! #     ) -> Result<String, docread_pdf2md::BoxError> {
//! #         unimplemented!()
//! #     }
//! # }
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let parser = PdfParser::new(
//!         Arc::new(MuPdfConverter),
//!         Arc::new(HttpUploader::new("https://assets.example.net/uploads")),
//!     );
//!
//!     let bytes = std::fs::read("document.pdf")?;
//!     let output = parser.parse_into_text(&bytes).await?;
//!     println!("{}", output.markdown);
//!     eprintln!("{} images published", output.images.len());
//!     Ok(())
//! }
//! ```
//!
//! ## The two seams
//!
//! | Seam | Trait | Who implements it |
//! |------|-------|-------------------|
//! | Conversion | [`MarkdownConverter`] | a binding to your PDF library |
//! | Publishing | [`ImageUploader`] | your storage layer ([`HttpUploader`] bundled) |
//!
//! Failures on either seam surface as structured [`ParseError`] variants —
//! an empty document and a failed parse are never conflated.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod converter;
pub mod error;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod progress;
pub mod uploader;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ParseConfig, ParseConfigBuilder, TableStrategy};
pub use converter::{ConvertRequest, MarkdownConverter};
pub use error::{BoxError, ParseError};
pub use output::{ImageMap, ParseOutput, ParseStats};
pub use parser::PdfParser;
pub use progress::{NoopProgressCallback, ParseProgressCallback, ProgressCallback};
pub use uploader::{HttpUploader, ImageUploader};
