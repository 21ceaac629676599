//! Integration tests for the full parse pipeline.
//!
//! The two collaborator seams are filled with test doubles: a closure-backed
//! converter that writes real PNG files into the request's image directory,
//! and a recording uploader that hands out deterministic URLs. No network,
//! no real PDF library.

use async_trait::async_trait;
use docread_pdf2md::{
    BoxError, ConvertRequest, ImageUploader, MarkdownConverter, ParseConfig, ParseError,
    ParseProgressCallback, PdfParser, TableStrategy,
};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// ── Test doubles ─────────────────────────────────────────────────────────────

/// Closure-backed converter so each test states its behaviour inline.
struct FnConverter(Box<dyn Fn(&ConvertRequest) -> Result<String, BoxError> + Send + Sync>);

impl FnConverter {
    fn new(
        f: impl Fn(&ConvertRequest) -> Result<String, BoxError> + Send + Sync + 'static,
    ) -> Self {
        Self(Box::new(f))
    }
}

impl MarkdownConverter for FnConverter {
    fn to_markdown(&self, request: &ConvertRequest) -> Result<String, BoxError> {
        (self.0)(request)
    }
}

/// Hands out `https://assets.test/img-N.png` URLs and records what it saw.
#[derive(Default)]
struct RecordingUploader {
    counter: AtomicUsize,
    uploaded: Mutex<Vec<PathBuf>>,
}

#[async_trait]
impl ImageUploader for RecordingUploader {
    async fn upload(&self, path: &Path) -> Result<String, BoxError> {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        self.uploaded.lock().unwrap().push(path.to_path_buf());
        Ok(format!("https://assets.test/img-{n}.png"))
    }
}

/// Always fails, standing in for a broken storage backend.
struct FailingUploader;

#[async_trait]
impl ImageUploader for FailingUploader {
    async fn upload(&self, _path: &Path) -> Result<String, BoxError> {
        Err("bucket unavailable".into())
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn pdf_bytes() -> Vec<u8> {
    b"%PDF-1.7\n1 0 obj\n<<>>\nendobj\ntrailer\n<<>>\n%%EOF\n".to_vec()
}

fn write_png(path: &Path) {
    image::RgbaImage::from_pixel(2, 2, image::Rgba([10, 20, 30, 255]))
        .save(path)
        .expect("write test png");
}

/// Converter double: writes one PNG into the image dir and references it,
/// alongside a pre-existing remote link. Records the pdf path it was given.
fn one_image_converter(
    seen_pdf: Arc<Mutex<Option<PathBuf>>>,
) -> Arc<dyn MarkdownConverter> {
    Arc::new(FnConverter::new(move |req: &ConvertRequest| {
        *seen_pdf.lock().unwrap() = Some(req.pdf_path.clone());
        let img = req.image_dir.join("fig-0.png");
        write_png(&img);
        Ok(format!(
            "# Report\n\n![Figure 1]({})\n\n![Logo](https://example.net/logo.png)\n",
            img.display()
        ))
    }))
}

// ── Success path ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn single_image_is_uploaded_rewritten_and_mapped() {
    let uploader = Arc::new(RecordingUploader::default());
    let parser = PdfParser::new(
        one_image_converter(Arc::new(Mutex::new(None))),
        uploader.clone(),
    );

    let output = parser.parse_into_text(&pdf_bytes()).await.expect("parse");

    assert_eq!(output.images.len(), 1);
    let url = output.images.keys().next().expect("one key").clone();
    assert!(
        output.markdown.contains(&format!("![Figure 1]({url})")),
        "markdown must reference the uploaded URL, got:\n{}",
        output.markdown
    );
    assert!(
        !output.markdown.contains("fig-0.png"),
        "local path must not survive the rewrite:\n{}",
        output.markdown
    );

    let img = &output.images[&url];
    assert_eq!((img.width(), img.height()), (2, 2));

    assert_eq!(output.stats.images_uploaded, 1);
    assert_eq!(output.stats.images_missing, 0);
    assert_eq!(output.stats.content_bytes, pdf_bytes().len());
}

#[tokio::test]
async fn remote_links_pass_through_untouched() {
    let parser = PdfParser::new(
        one_image_converter(Arc::new(Mutex::new(None))),
        Arc::new(RecordingUploader::default()),
    );

    let output = parser.parse_into_text(&pdf_bytes()).await.expect("parse");

    assert!(
        output
            .markdown
            .contains("![Logo](https://example.net/logo.png)"),
        "remote reference must be unchanged:\n{}",
        output.markdown
    );
    assert!(
        !output.images.contains_key("https://example.net/logo.png"),
        "remote reference must not enter the image map"
    );
}

#[tokio::test]
async fn map_keys_equal_substituted_urls() {
    let converter = Arc::new(FnConverter::new(|req: &ConvertRequest| {
        let a = req.image_dir.join("a.png");
        let b = req.image_dir.join("b.png");
        write_png(&a);
        write_png(&b);
        Ok(format!(
            "![a]({})\n![b]({})\n",
            a.display(),
            b.display()
        ))
    }));
    let parser = PdfParser::new(converter, Arc::new(RecordingUploader::default()));

    let output = parser.parse_into_text(&pdf_bytes()).await.expect("parse");

    assert_eq!(output.images.len(), 2);
    for url in output.images.keys() {
        assert!(
            output.markdown.contains(url.as_str()),
            "every map key must appear in the text: {url}"
        );
    }
}

#[tokio::test]
async fn repeated_path_uploads_once_and_rewrites_both_markers() {
    let uploader = Arc::new(RecordingUploader::default());
    let converter = Arc::new(FnConverter::new(|req: &ConvertRequest| {
        let img = req.image_dir.join("shared.png");
        write_png(&img);
        Ok(format!(
            "![first]({p})\n\n![second]({p})\n",
            p = img.display()
        ))
    }));
    let parser = PdfParser::new(converter, uploader.clone());

    let output = parser.parse_into_text(&pdf_bytes()).await.expect("parse");

    assert_eq!(uploader.uploaded.lock().unwrap().len(), 1);
    assert_eq!(output.images.len(), 1);
    let url = output.images.keys().next().expect("one key");
    assert_eq!(output.markdown.matches(url.as_str()).count(), 2);
}

// ── Failure paths ────────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_bytes_are_rejected_before_the_converter_runs() {
    let called = Arc::new(AtomicUsize::new(0));
    let called_inner = called.clone();
    let converter = Arc::new(FnConverter::new(move |_req: &ConvertRequest| {
        called_inner.fetch_add(1, Ordering::SeqCst);
        Ok(String::new())
    }));
    let parser = PdfParser::new(converter, Arc::new(RecordingUploader::default()));

    let err = parser.parse_into_text(b"").await.expect_err("must fail");
    assert!(matches!(err, ParseError::NotAPdf { .. }), "got: {err}");
    assert_eq!(called.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn converter_failure_surfaces_and_temp_pdf_is_removed() {
    let seen_pdf = Arc::new(Mutex::new(None::<PathBuf>));
    let seen_inner = seen_pdf.clone();
    let converter = Arc::new(FnConverter::new(move |req: &ConvertRequest| {
        *seen_inner.lock().unwrap() = Some(req.pdf_path.clone());
        Err::<String, BoxError>("cannot read xref table".into())
    }));
    let parser = PdfParser::new(converter, Arc::new(RecordingUploader::default()));

    let err = parser
        .parse_into_text(&pdf_bytes())
        .await
        .expect_err("must fail");
    assert!(
        matches!(err, ParseError::ConversionFailed { .. }),
        "got: {err}"
    );
    assert!(err.to_string().contains("cannot read xref table"));

    let pdf_path = seen_pdf.lock().unwrap().clone().expect("converter ran");
    assert!(
        !pdf_path.exists(),
        "temp pdf must be removed on the failure path"
    );
}

#[tokio::test]
async fn upload_failure_aborts_the_parse() {
    let parser = PdfParser::new(
        one_image_converter(Arc::new(Mutex::new(None))),
        Arc::new(FailingUploader),
    );

    let err = parser
        .parse_into_text(&pdf_bytes())
        .await
        .expect_err("must fail");
    assert!(matches!(err, ParseError::UploadFailed { .. }), "got: {err}");
    assert!(err.to_string().contains("bucket unavailable"));
}

#[tokio::test]
async fn missing_image_is_skipped_not_fatal() {
    let converter = Arc::new(FnConverter::new(|req: &ConvertRequest| {
        // Reference a file that was never written.
        let ghost = req.image_dir.join("ghost.png");
        Ok(format!("intro\n\n![lost]({})\n\noutro\n", ghost.display()))
    }));
    let parser = PdfParser::new(converter, Arc::new(RecordingUploader::default()));

    let output = parser.parse_into_text(&pdf_bytes()).await.expect("parse");

    assert!(output.images.is_empty());
    assert_eq!(output.stats.images_missing, 1);
    assert!(
        output.markdown.contains("![lost]("),
        "dangling marker must be preserved verbatim:\n{}",
        output.markdown
    );
    assert!(output.markdown.contains("outro"));
}

// ── Lifecycle and idempotence ────────────────────────────────────────────────

#[tokio::test]
async fn temp_pdf_is_removed_after_success() {
    let seen_pdf = Arc::new(Mutex::new(None::<PathBuf>));
    let parser = PdfParser::new(
        one_image_converter(seen_pdf.clone()),
        Arc::new(RecordingUploader::default()),
    );

    parser.parse_into_text(&pdf_bytes()).await.expect("parse");

    let pdf_path = seen_pdf.lock().unwrap().clone().expect("converter ran");
    assert!(!pdf_path.exists(), "temp pdf must be gone after the call");
}

#[tokio::test]
async fn image_dir_is_removed_after_the_call() {
    let seen_dir = Arc::new(Mutex::new(None::<PathBuf>));
    let seen_inner = seen_dir.clone();
    let converter = Arc::new(FnConverter::new(move |req: &ConvertRequest| {
        *seen_inner.lock().unwrap() = Some(req.image_dir.clone());
        let img = req.image_dir.join("fig.png");
        write_png(&img);
        Ok(format!("![f]({})\n", img.display()))
    }));
    let parser = PdfParser::new(converter, Arc::new(RecordingUploader::default()));

    parser.parse_into_text(&pdf_bytes()).await.expect("parse");

    let dir = seen_dir.lock().unwrap().clone().expect("converter ran");
    assert!(!dir.exists(), "image temp dir must be gone after the call");
}

#[tokio::test]
async fn identical_input_parses_identically_modulo_urls() {
    let parser = PdfParser::new(
        one_image_converter(Arc::new(Mutex::new(None))),
        Arc::new(RecordingUploader::default()),
    );

    let first = parser.parse_into_text(&pdf_bytes()).await.expect("first");
    let second = parser.parse_into_text(&pdf_bytes()).await.expect("second");

    assert_eq!(first.images.len(), second.images.len());

    let normalise = |md: &str, urls: Vec<&String>| {
        let mut out = md.to_string();
        for url in urls {
            out = out.replace(url.as_str(), "<URL>");
        }
        out
    };
    assert_eq!(
        normalise(&first.markdown, first.images.keys().collect()),
        normalise(&second.markdown, second.images.keys().collect()),
    );
}

// ── Configuration and progress ───────────────────────────────────────────────

#[tokio::test]
async fn config_is_forwarded_to_the_converter() {
    let converter = Arc::new(FnConverter::new(|req: &ConvertRequest| {
        assert_eq!(req.table_strategy, TableStrategy::Text);
        assert!(req.ignore_code);
        assert!(!req.extract_images);
        Ok("just text\n".to_string())
    }));
    let config = ParseConfig::builder()
        .table_strategy(TableStrategy::Text)
        .ignore_code(true)
        .extract_images(false)
        .build();
    let parser = PdfParser::with_config(converter, Arc::new(RecordingUploader::default()), config);

    let output = parser.parse_into_text(&pdf_bytes()).await.expect("parse");
    assert!(output.images.is_empty());
}

#[derive(Default)]
struct CountingProgress {
    started: AtomicUsize,
    pages: AtomicUsize,
    converted: AtomicUsize,
    uploads: AtomicUsize,
    completed_with: AtomicUsize,
}

impl ParseProgressCallback for CountingProgress {
    fn on_parse_start(&self, _content_bytes: usize) {
        self.started.fetch_add(1, Ordering::SeqCst);
    }
    fn on_convert_page(&self, _page: usize, _total: usize) {
        self.pages.fetch_add(1, Ordering::SeqCst);
    }
    fn on_convert_complete(&self, _markdown_len: usize) {
        self.converted.fetch_add(1, Ordering::SeqCst);
    }
    fn on_image_uploaded(&self, _index: usize, _total: usize, _url: &str) {
        self.uploads.fetch_add(1, Ordering::SeqCst);
    }
    fn on_parse_complete(&self, image_count: usize) {
        self.completed_with.store(image_count, Ordering::SeqCst);
    }
}

#[tokio::test]
async fn progress_events_fire_across_the_pipeline() {
    let progress = Arc::new(CountingProgress::default());
    let converter = Arc::new(FnConverter::new(|req: &ConvertRequest| {
        // A converter that reports its (single) page.
        req.progress.on_convert_page(1, 1);
        let img = req.image_dir.join("fig.png");
        write_png(&img);
        Ok(format!("![f]({})\n", img.display()))
    }));
    let config = ParseConfig::builder()
        .progress_callback(progress.clone())
        .build();
    let parser = PdfParser::with_config(converter, Arc::new(RecordingUploader::default()), config);

    parser.parse_into_text(&pdf_bytes()).await.expect("parse");

    assert_eq!(progress.started.load(Ordering::SeqCst), 1);
    assert_eq!(progress.pages.load(Ordering::SeqCst), 1);
    assert_eq!(progress.converted.load(Ordering::SeqCst), 1);
    assert_eq!(progress.uploads.load(Ordering::SeqCst), 1);
    assert_eq!(progress.completed_with.load(Ordering::SeqCst), 1);
}

// ── Sync wrapper ─────────────────────────────────────────────────────────────

#[test]
fn sync_wrapper_round_trips() {
    let parser = PdfParser::new(
        one_image_converter(Arc::new(Mutex::new(None))),
        Arc::new(RecordingUploader::default()),
    );

    let output = parser.parse_into_text_sync(&pdf_bytes()).expect("parse");
    assert_eq!(output.images.len(), 1);

    let err = parser.parse_into_text_sync(b"").expect_err("must fail");
    assert!(matches!(err, ParseError::NotAPdf { .. }));
}
