//! The conversion seam: everything this crate does *not* do.
//!
//! Layout analysis, reading order, table recovery, and image extraction are
//! the hard part of the PDF problem, and they live entirely behind
//! [`MarkdownConverter`]. The adapter hands the converter a PDF on disk and a
//! directory to drop extracted images into, and gets Markdown back — nothing
//! else crosses the boundary.
//!
//! The trait is synchronous by contract. Conversion is CPU-bound, and the
//! adapter always invokes it through `tokio::task::spawn_blocking`, so
//! implementations are free to block for as long as a document takes.

use crate::config::TableStrategy;
use crate::error::BoxError;
use crate::progress::ParseProgressCallback;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// One conversion call, fully described.
#[derive(Clone)]
pub struct ConvertRequest {
    /// Path of the spooled PDF file.
    pub pdf_path: PathBuf,

    /// Directory the converter writes extracted images into.
    ///
    /// The markdown must reference those images by paths that resolve from
    /// the running process; absolute paths under this directory are the
    /// expected form. The directory is discarded when the parse call ends.
    pub image_dir: PathBuf,

    /// Table-detection strategy to apply.
    pub table_strategy: TableStrategy,

    /// When true, fenced code blocks are flattened to plain text.
    pub ignore_code: bool,

    /// When false, the converter must not write image files.
    pub extract_images: bool,

    /// Progress sink; converters that track pages report through
    /// [`ParseProgressCallback::on_convert_page`].
    pub progress: Arc<dyn ParseProgressCallback>,
}

impl fmt::Debug for ConvertRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConvertRequest")
            .field("pdf_path", &self.pdf_path)
            .field("image_dir", &self.image_dir)
            .field("table_strategy", &self.table_strategy)
            .field("ignore_code", &self.ignore_code)
            .field("extract_images", &self.extract_images)
            .finish()
    }
}

/// An external PDF-to-Markdown conversion library.
///
/// Implementations own the entire extraction problem. The adapter treats the
/// returned string as opaque Markdown and only post-processes its
/// `![alt](path)` image markers.
pub trait MarkdownConverter: Send + Sync {
    /// Convert the PDF at `request.pdf_path` to Markdown, writing any
    /// extracted images under `request.image_dir`.
    fn to_markdown(&self, request: &ConvertRequest) -> Result<String, BoxError>;
}
