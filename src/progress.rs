//! Progress-callback trait for parse events.
//!
//! Inject an `Arc<dyn ParseProgressCallback>` via
//! [`crate::config::ParseConfigBuilder::progress_callback`] to observe a
//! parse as it runs. The same sink is handed to the converter through
//! [`crate::converter::ConvertRequest`], so converters that track pages can
//! report them without the adapter knowing how many pages exist.
//!
//! All methods have default no-op bodies; implementors override only what
//! they care about. The trait is `Send + Sync` because the conversion step
//! runs on a blocking thread while uploads run on the async task.

use std::sync::Arc;

/// Called by the adapter (and, for page events, by the converter) during a
/// parse.
pub trait ParseProgressCallback: Send + Sync {
    /// Called once at the start of a parse call.
    ///
    /// # Arguments
    /// * `content_bytes` — size of the incoming PDF byte sequence
    fn on_parse_start(&self, content_bytes: usize) {
        let _ = content_bytes;
    }

    /// Fired by converters that report per-page progress.
    ///
    /// # Arguments
    /// * `page`  — 1-indexed page just finished
    /// * `total` — total pages in the document
    fn on_convert_page(&self, page: usize, total: usize) {
        let _ = (page, total);
    }

    /// Called when the converter has returned Markdown.
    ///
    /// # Arguments
    /// * `markdown_len` — byte length of the raw converter output
    fn on_convert_complete(&self, markdown_len: usize) {
        let _ = markdown_len;
    }

    /// Called after each extracted image has been uploaded and opened.
    ///
    /// # Arguments
    /// * `index` — 1-indexed position among the local references found
    /// * `total` — number of local references found in the markdown
    /// * `url`   — the public URL the image now lives at
    fn on_image_uploaded(&self, index: usize, total: usize, url: &str) {
        let _ = (index, total, url);
    }

    /// Called once when the parse has produced its output.
    ///
    /// # Arguments
    /// * `image_count` — entries in the returned image map
    fn on_parse_complete(&self, image_count: usize) {
        let _ = image_count;
    }
}

/// A no-op implementation used when no callback is configured.
pub struct NoopProgressCallback;

impl ParseProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ParseConfig`].
pub type ProgressCallback = Arc<dyn ParseProgressCallback>;
