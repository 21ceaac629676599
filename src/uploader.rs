//! The upload seam: turning extracted image files into public URLs.
//!
//! The adapter only needs one capability from its host: "take this file,
//! give me a URL the rewritten markdown can point at". [`ImageUploader`]
//! captures that. Failure behaviour belongs to the implementation; the
//! adapter propagates whatever comes back as
//! [`crate::error::ParseError::UploadFailed`].
//!
//! [`HttpUploader`] is the bundled implementation for hosts that expose a
//! plain HTTP PUT namespace (an object-store bucket behind a gateway, a CDN
//! origin). Hosts with richer storage APIs implement the trait themselves.

use crate::error::BoxError;
use async_trait::async_trait;
use std::path::Path;
use tracing::debug;
use uuid::Uuid;

/// An externally supplied upload capability.
#[async_trait]
pub trait ImageUploader: Send + Sync {
    /// Upload the file at `path` and return its publicly addressable URL.
    ///
    /// Each call must yield a distinct URL; the image map returned by a parse
    /// is keyed by it.
    async fn upload(&self, path: &Path) -> Result<String, BoxError>;
}

/// Uploads images with HTTP PUT into a flat namespace under a base endpoint.
///
/// The object key is `{uuid}-{filename}`, so every upload gets a fresh URL
/// even when the converter reuses image file names across documents.
pub struct HttpUploader {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpUploader {
    /// Create an uploader targeting `endpoint` (trailing slash ignored).
    pub fn new(endpoint: impl Into<String>) -> Self {
        let endpoint: String = endpoint.into();
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    fn object_url(&self, path: &Path) -> String {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        format!("{}/{}-{}", self.endpoint, Uuid::new_v4(), name)
    }
}

#[async_trait]
impl ImageUploader for HttpUploader {
    async fn upload(&self, path: &Path) -> Result<String, BoxError> {
        let bytes = tokio::fs::read(path).await?;
        let url = self.object_url(path);

        let response = self.client.put(&url).body(bytes).send().await?;
        if !response.status().is_success() {
            return Err(format!("upload endpoint returned HTTP {}", response.status()).into());
        }

        debug!("uploaded {} -> {}", path.display(), url);
        Ok(url)
    }
}
