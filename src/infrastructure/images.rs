//! Image resource collaborator: fetches remote images and reads bundled assets

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::debug;

use crate::domain::{ImageSource, ResourceLoadFailure};

/// Loads the bytes behind an [`ImageSource`]
#[async_trait::async_trait]
pub trait ImageLoader: Send + Sync + 'static {
    /// Returns the payload size on success
    async fn load(&self, source: &ImageSource) -> Result<usize, ResourceLoadFailure>;
}

/// HTTP for remote sources, filesystem for bundled ones
pub struct ImageFetcher {
    http: reqwest::Client,
    asset_dir: PathBuf,
}

impl ImageFetcher {
    pub fn new(asset_dir: PathBuf, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("create HTTP client")?;
        Ok(Self { http, asset_dir })
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.asset_dir.join(path)
        }
    }

    async fn fetch_remote(&self, url: &str) -> Result<usize, ResourceLoadFailure> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| ResourceLoadFailure::new(format!("request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResourceLoadFailure::new(format!("HTTP {status}")));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| ResourceLoadFailure::new(format!("read body: {err}")))?;
        if body.is_empty() {
            return Err(ResourceLoadFailure::new("empty response body"));
        }
        Ok(body.len())
    }

    async fn read_bundled(&self, path: &Path) -> Result<usize, ResourceLoadFailure> {
        let resolved = self.resolve(path);
        let bytes = tokio::fs::read(&resolved).await.map_err(|err| {
            ResourceLoadFailure::new(format!("{} not found ({err})", resolved.display()))
        })?;
        if bytes.is_empty() {
            return Err(ResourceLoadFailure::new(format!(
                "{} is empty",
                resolved.display()
            )));
        }
        Ok(bytes.len())
    }
}

#[async_trait::async_trait]
impl ImageLoader for ImageFetcher {
    async fn load(&self, source: &ImageSource) -> Result<usize, ResourceLoadFailure> {
        debug!(%source, "probing image");
        match source {
            ImageSource::Remote(url) => self.fetch_remote(url).await,
            ImageSource::Bundled(path) => self.read_bundled(path).await,
        }
    }
}
