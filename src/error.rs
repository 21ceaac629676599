//! Error types for the docread-pdf2md adapter.
//!
//! The service this adapter grew out of signalled failure by returning an
//! empty string, which made "the parse failed" indistinguishable from "the
//! document was genuinely empty". [`ParseError`] carries the failure cause
//! instead: callers match on the variant when they need to tell bad input
//! apart from a broken collaborator.
//!
//! The two collaborator seams — the converter and the uploader — are external
//! code whose failure modes this crate does not model. Their errors travel
//! through as [`BoxError`] sources on the corresponding variants.

use std::path::PathBuf;
use thiserror::Error;

/// Opaque error type used at the converter and uploader seams.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// All errors returned by [`crate::PdfParser::parse_into_text`].
#[derive(Debug, Error)]
pub enum ParseError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The input bytes do not start with the `%PDF` magic.
    ///
    /// Empty input lands here too: a zero-length byte sequence has no magic.
    #[error("input is not a PDF (first bytes: {magic:?})")]
    NotAPdf { magic: Vec<u8> },

    /// Could not create or write the temporary PDF file.
    #[error("failed to spool PDF bytes to a temporary file: {source}")]
    Spool {
        #[source]
        source: std::io::Error,
    },

    // ── Collaborator errors ───────────────────────────────────────────────
    /// The external converter failed.
    #[error("PDF-to-Markdown conversion failed: {source}")]
    ConversionFailed {
        #[source]
        source: BoxError,
    },

    /// The upload capability failed for an extracted image.
    #[error("failed to upload extracted image '{}': {source}", .path.display())]
    UploadFailed {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    /// An extracted image existed on disk but could not be decoded.
    #[error("failed to open extracted image '{}': {source}", .path.display())]
    ImageOpenFailed {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error (blocking-task join, runtime construction).
    #[error("internal error: {0}")]
    Internal(String),
}
