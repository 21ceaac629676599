//! Output types returned by a successful parse.

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Uploaded-image URL → opened RGBA image.
///
/// Keys are exactly the URLs substituted into the returned markdown's image
/// references; insertion order carries no meaning.
pub type ImageMap = HashMap<String, RgbaImage>;

/// The result of one successful parse call.
pub struct ParseOutput {
    /// Markdown with local image references rewritten to hosted URLs.
    pub markdown: String,
    /// The images behind those URLs, decoded into memory.
    pub images: ImageMap,
    /// Timing and counting facts about the call.
    pub stats: ParseStats,
}

impl fmt::Debug for ParseOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseOutput")
            .field("markdown_bytes", &self.markdown.len())
            .field("images", &self.images.keys().collect::<Vec<_>>())
            .field("stats", &self.stats)
            .finish()
    }
}

/// Statistics for a single parse call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParseStats {
    /// Size of the incoming PDF byte sequence.
    pub content_bytes: usize,
    /// Size of the rewritten markdown.
    pub markdown_bytes: usize,
    /// Images uploaded, opened, and substituted into the text.
    pub images_uploaded: usize,
    /// Local references whose file was missing on disk; their markers were
    /// left untouched.
    pub images_missing: usize,
    /// Wall-clock time spent inside the external converter.
    pub convert_duration_ms: u64,
    /// Wall-clock time for the whole call.
    pub total_duration_ms: u64,
}
