//! Spooling: persist incoming PDF bytes to a uniquely named temp file.
//!
//! ## Why a file at all?
//!
//! Conversion libraries take file paths, not byte buffers — the same
//! constraint pdfium-style renderers have. Spooling to a `NamedTempFile`
//! gives the converter a path while tying the file's lifetime to a handle
//! the parse call owns.
//!
//! ## Cleanup discipline
//!
//! `NamedTempFile` already deletes on drop, but silently. [`SpooledPdf`]
//! wraps it so a removal failure is logged at error level instead of
//! vanishing; it is never raised. Dropping the handle is the only cleanup
//! path, which makes it the same on normal return, early `?` return, and
//! panic.

use crate::error::ParseError;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, error};

/// An owned temporary PDF file, removed when the handle drops.
pub struct SpooledPdf {
    // Some(..) for the whole public lifetime; taken exactly once, in drop.
    inner: Option<NamedTempFile>,
}

impl SpooledPdf {
    /// Write `content` to a fresh `*.pdf` temp file.
    pub fn write(content: &[u8]) -> Result<Self, ParseError> {
        let mut file = tempfile::Builder::new()
            .prefix("docread-")
            .suffix(".pdf")
            .tempfile()
            .map_err(|source| ParseError::Spool { source })?;

        file.write_all(content)
            .map_err(|source| ParseError::Spool { source })?;
        file.flush().map_err(|source| ParseError::Spool { source })?;

        debug!(
            "PDF content written to temporary file: {}",
            file.path().display()
        );
        Ok(Self { inner: Some(file) })
    }

    /// Path of the spooled file, valid until the handle drops.
    pub fn path(&self) -> &Path {
        self.inner
            .as_ref()
            .expect("SpooledPdf invariant: file present until drop")
            .path()
    }
}

impl Drop for SpooledPdf {
    fn drop(&mut self) {
        if let Some(file) = self.inner.take() {
            let path = file.path().to_path_buf();
            match file.close() {
                Ok(()) => debug!("temporary file cleaned up: {}", path.display()),
                Err(err) => error!(
                    "error removing temporary file {}: {err}",
                    path.display()
                ),
            }
        }
    }
}
