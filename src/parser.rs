//! The adapter itself: spool, convert, upload, rewrite, clean up.
//!
//! [`PdfParser`] orchestrates one parse call end to end. Nothing here
//! understands PDF: the byte sequence is spooled to disk for the converter,
//! and the converter's markdown is post-processed so its local image
//! references become hosted URLs. All temp resources are owned by RAII
//! handles scoped to the call, so cleanup is identical on success, error,
//! and panic.

use crate::config::ParseConfig;
use crate::converter::{ConvertRequest, MarkdownConverter};
use crate::error::ParseError;
use crate::output::{ImageMap, ParseOutput, ParseStats};
use crate::pipeline::rewrite;
use crate::pipeline::spool::SpooledPdf;
use crate::progress::{NoopProgressCallback, ParseProgressCallback};
use crate::uploader::ImageUploader;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tempfile::TempDir;
use tracing::{debug, info, warn};

/// Parses PDF byte content into Markdown plus a hosted-image map.
///
/// Construction takes the two collaborators the adapter delegates to: the
/// conversion library and the upload capability. The parser itself is
/// stateless across calls and can be shared behind an `Arc`.
pub struct PdfParser {
    converter: Arc<dyn MarkdownConverter>,
    uploader: Arc<dyn ImageUploader>,
    config: ParseConfig,
}

impl PdfParser {
    /// Create a parser with the default [`ParseConfig`].
    pub fn new(converter: Arc<dyn MarkdownConverter>, uploader: Arc<dyn ImageUploader>) -> Self {
        Self::with_config(converter, uploader, ParseConfig::default())
    }

    /// Create a parser with an explicit configuration.
    pub fn with_config(
        converter: Arc<dyn MarkdownConverter>,
        uploader: Arc<dyn ImageUploader>,
        config: ParseConfig,
    ) -> Self {
        Self {
            converter,
            uploader,
            config,
        }
    }

    /// Parse a PDF byte sequence into markdown text and an image map.
    ///
    /// # Steps
    /// 1. Reject input without the `%PDF` magic (covers empty input).
    /// 2. Spool the bytes to a temporary `.pdf` file.
    /// 3. Run the converter on a blocking thread, extracting images into a
    ///    call-scoped temp directory.
    /// 4. Scan the markdown for local image references; upload and open each
    ///    existing file; rewrite the references to the returned URLs.
    ///
    /// # Guarantees
    /// The temporary PDF file and image directory are removed on every exit
    /// path. Removal failures are logged, never raised.
    ///
    /// # Errors
    /// * [`ParseError::NotAPdf`] — input failed the magic check
    /// * [`ParseError::Spool`] — temp-file creation or write failed
    /// * [`ParseError::ConversionFailed`] — the converter raised
    /// * [`ParseError::UploadFailed`] / [`ParseError::ImageOpenFailed`] — an
    ///   image that exists on disk could not be published or decoded
    ///
    /// A local reference whose file is *missing* is not an error: the marker
    /// is left untouched, a warning is logged, and the rest of the document
    /// is returned.
    pub async fn parse_into_text(&self, content: &[u8]) -> Result<ParseOutput, ParseError> {
        let total_start = Instant::now();
        let progress: Arc<dyn ParseProgressCallback> = self
            .config
            .progress_callback
            .clone()
            .unwrap_or_else(|| Arc::new(NoopProgressCallback));

        info!("parsing PDF, content size: {} bytes", content.len());
        progress.on_parse_start(content.len());

        check_pdf_magic(content)?;

        let spooled = SpooledPdf::write(content)?;
        // Extracted images live in a directory scoped to this call.
        let image_dir = TempDir::new().map_err(|source| ParseError::Spool { source })?;

        let request = ConvertRequest {
            pdf_path: spooled.path().to_path_buf(),
            image_dir: image_dir.path().to_path_buf(),
            table_strategy: self.config.table_strategy,
            ignore_code: self.config.ignore_code,
            extract_images: self.config.extract_images,
            progress: Arc::clone(&progress),
        };

        let convert_start = Instant::now();
        let converter = Arc::clone(&self.converter);
        let markdown = tokio::task::spawn_blocking(move || converter.to_markdown(&request))
            .await
            .map_err(|e| ParseError::Internal(format!("conversion task panicked: {e}")))?
            .map_err(|source| ParseError::ConversionFailed { source })?;
        let convert_duration_ms = convert_start.elapsed().as_millis() as u64;
        debug!(
            "converter produced {} bytes of markdown in {}ms",
            markdown.len(),
            convert_duration_ms
        );
        progress.on_convert_complete(markdown.len());

        let (markdown, images, images_missing) =
            self.publish_images(markdown, progress.as_ref()).await?;

        let stats = ParseStats {
            content_bytes: content.len(),
            markdown_bytes: markdown.len(),
            images_uploaded: images.len(),
            images_missing,
            convert_duration_ms,
            total_duration_ms: total_start.elapsed().as_millis() as u64,
        };
        info!(
            "PDF parsing complete: {} images uploaded, {} missing, {}ms",
            stats.images_uploaded, stats.images_missing, stats.total_duration_ms
        );
        progress.on_parse_complete(images.len());

        // `spooled` and `image_dir` drop here; the same drops run on every
        // `?` above.
        Ok(ParseOutput {
            markdown,
            images,
            stats,
        })
    }

    /// Synchronous wrapper around [`parse_into_text`](Self::parse_into_text).
    ///
    /// Creates a temporary tokio runtime internally. Must not be called from
    /// inside an async context.
    pub fn parse_into_text_sync(&self, content: &[u8]) -> Result<ParseOutput, ParseError> {
        tokio::runtime::Runtime::new()
            .map_err(|e| ParseError::Internal(format!("failed to create tokio runtime: {e}")))?
            .block_on(self.parse_into_text(content))
    }

    /// Upload every existing local image referenced by `markdown`, open it
    /// into memory, and rewrite the references to the upload URLs.
    ///
    /// Phase split: scan (pure) → upload/open (all side effects live here) →
    /// rewrite (pure). Returns the rewritten markdown, the URL-keyed image
    /// map, and the count of references whose file was missing.
    async fn publish_images(
        &self,
        markdown: String,
        progress: &dyn ParseProgressCallback,
    ) -> Result<(String, ImageMap, usize), ParseError> {
        let local_paths = rewrite::scan_local_images(&markdown);
        if local_paths.is_empty() {
            return Ok((markdown, ImageMap::new(), 0));
        }

        let mut replacements: HashMap<String, String> = HashMap::new();
        let mut images = ImageMap::new();
        let mut images_missing = 0usize;
        let total = local_paths.len();

        for (index, path_str) in local_paths.iter().enumerate() {
            let path = Path::new(path_str);
            if !path.exists() {
                warn!("image does not exist, leaving reference untouched: {path_str}");
                images_missing += 1;
                continue;
            }

            let url = self.uploader.upload(path).await.map_err(|source| {
                ParseError::UploadFailed {
                    path: path.to_path_buf(),
                    source,
                }
            })?;
            let opened = image::open(path).map_err(|source| ParseError::ImageOpenFailed {
                path: path.to_path_buf(),
                source,
            })?;

            progress.on_image_uploaded(index + 1, total, &url);
            replacements.insert(path_str.clone(), url.clone());
            images.insert(url, opened.into_rgba8());
        }

        let markdown = rewrite::rewrite_image_links(&markdown, &replacements);
        Ok((markdown, images, images_missing))
    }
}

/// Cheap validity gate before anything touches the filesystem.
fn check_pdf_magic(content: &[u8]) -> Result<(), ParseError> {
    if content.len() < 4 || &content[..4] != b"%PDF" {
        return Err(ParseError::NotAPdf {
            magic: content.iter().take(4).copied().collect(),
        });
    }
    Ok(())
}
