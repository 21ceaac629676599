//! Configuration for a parse call.
//!
//! Every knob lives in [`ParseConfig`], built via [`ParseConfigBuilder`].
//! The fields mirror the options the external converter is driven with, so a
//! logged config is enough to reproduce a conversion.

use crate::progress::ParseProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Configuration for [`crate::PdfParser`].
///
/// # Example
/// ```rust
/// use docread_pdf2md::{ParseConfig, TableStrategy};
///
/// let config = ParseConfig::builder()
///     .table_strategy(TableStrategy::Lines)
///     .ignore_code(false)
///     .build();
/// ```
#[derive(Clone)]
pub struct ParseConfig {
    /// Table-detection strategy passed to the converter. Default: [`TableStrategy::LinesStrict`].
    ///
    /// The strict variant only recognises tables whose cell borders are drawn
    /// with ruling lines, which avoids false positives on multi-column text.
    pub table_strategy: TableStrategy,

    /// Flatten fenced code blocks to plain text. Default: `false`.
    ///
    /// Off by default so code listings survive the conversion verbatim.
    pub ignore_code: bool,

    /// Ask the converter to write extracted images to disk. Default: `true`.
    ///
    /// With this off the converter emits text only; the image map of the
    /// result is always empty and no uploads happen.
    pub extract_images: bool,

    /// Progress sink for parse and conversion events. Default: `None` (no-op).
    pub progress_callback: Option<Arc<dyn ParseProgressCallback>>,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            table_strategy: TableStrategy::LinesStrict,
            ignore_code: false,
            extract_images: true,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ParseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseConfig")
            .field("table_strategy", &self.table_strategy)
            .field("ignore_code", &self.ignore_code)
            .field("extract_images", &self.extract_images)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn ParseProgressCallback>"),
            )
            .finish()
    }
}

impl ParseConfig {
    /// Create a new builder for `ParseConfig`.
    pub fn builder() -> ParseConfigBuilder {
        ParseConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ParseConfig`].
#[derive(Debug)]
pub struct ParseConfigBuilder {
    config: ParseConfig,
}

impl ParseConfigBuilder {
    pub fn table_strategy(mut self, strategy: TableStrategy) -> Self {
        self.config.table_strategy = strategy;
        self
    }

    pub fn ignore_code(mut self, v: bool) -> Self {
        self.config.ignore_code = v;
        self
    }

    pub fn extract_images(mut self, v: bool) -> Self {
        self.config.extract_images = v;
        self
    }

    pub fn progress_callback(mut self, cb: Arc<dyn ParseProgressCallback>) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ParseConfig {
        self.config
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// How the converter should detect tables.
///
/// These map one-to-one onto the strategies of the underlying conversion
/// library; the adapter only forwards the choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TableStrategy {
    /// Tables are recognised only where full ruling lines delimit the cells. (default)
    #[default]
    LinesStrict,
    /// Ruling lines, with looser tolerance for partially drawn borders.
    Lines,
    /// Whitespace-alignment heuristics; catches borderless tables but can
    /// misfire on columnar text.
    Text,
    /// Table detection disabled.
    None,
}
