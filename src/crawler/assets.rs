//! Asset downloads for accepted pages
//!
//! Each asset is probed with HEAD first so oversized files are refused
//! without transferring them. The body is then streamed with the same limit,
//! its length checked again, and written to `asset_dir` under a name derived from the SHA-256 of
//! its URL. Asset transfers do not pass through the rate gate.
//!
//! Failures never abort the page: they are reported on the returned
//! [`Asset`] with `downloaded == false`.

use crate::crawler::{Asset, PageFetcher};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

const UNKNOWN_CONTENT_TYPE: &str = "application/octet-stream";

pub struct AssetManager<F: ?Sized> {
    fetcher: Arc<F>,
    asset_dir: PathBuf,
    max_asset_size: u64,
    timeout: Duration,
}

impl<F: PageFetcher + ?Sized> AssetManager<F> {
    pub fn new(fetcher: Arc<F>, asset_dir: PathBuf, max_asset_size: u64, timeout: Duration) -> Self {
        Self {
            fetcher,
            asset_dir,
            max_asset_size,
            timeout,
        }
    }

    pub fn asset_dir(&self) -> &Path {
        &self.asset_dir
    }

    /// Downloads every referenced asset, one after another
    pub async fn process(&self, refs: &[Url]) -> Vec<Asset> {
        let mut assets = Vec::with_capacity(refs.len());
        for url in refs {
            assets.push(self.process_one(url).await);
        }
        assets
    }

    pub async fn process_one(&self, url: &Url) -> Asset {
        let file_type = file_extension(url);

        let probe = match self.fetcher.probe(url, self.timeout).await {
            Ok(probe) => probe,
            Err(e) => {
                tracing::warn!("Asset probe failed for {}: {}", url, e);
                return Asset::failed(url.clone(), file_type, UNKNOWN_CONTENT_TYPE.to_string(), e.to_string());
            }
        };

        let probed_type = probe.content_type.clone();
        if let Some(length) = probe.content_length {
            if length > self.max_asset_size {
                tracing::info!(
                    "Skipping asset {}: {} bytes exceeds limit of {}",
                    url,
                    length,
                    self.max_asset_size
                );
                return Asset::failed(
                    url.clone(),
                    file_type,
                    content_type_or_default(probed_type),
                    format!("too large ({} bytes, limit {})", length, self.max_asset_size),
                );
            }
        }

        let body = match self
            .fetcher
            .download(url, self.timeout, self.max_asset_size)
            .await
        {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Asset download failed for {}: {}", url, e);
                return Asset::failed(url.clone(), file_type, content_type_or_default(probed_type), e.to_string());
            }
        };

        let content_type = content_type_or_default(probed_type.or(body.content_type.clone()));

        if !body.is_success() {
            return Asset::failed(url.clone(), file_type, content_type, format!("HTTP {}", body.status));
        }

        if body.over_limit {
            tracing::info!("Skipping asset {}: body exceeds limit of {}", url, self.max_asset_size);
            return Asset::failed(
                url.clone(),
                file_type,
                content_type,
                format!("too large (over {} bytes)", self.max_asset_size),
            );
        }

        let size = body.bytes.len() as u64;
        if size > self.max_asset_size {
            return Asset::failed(
                url.clone(),
                file_type,
                content_type,
                format!("too large ({} bytes, limit {})", size, self.max_asset_size),
            );
        }

        let path = self.asset_dir.join(asset_file_name(url));
        if let Err(e) = write_asset(&path, &body.bytes).await {
            tracing::warn!("Failed to write asset {} to {}: {}", url, path.display(), e);
            return Asset::failed(url.clone(), file_type, content_type, e.to_string());
        }

        tracing::debug!("Saved asset {} ({} bytes) to {}", url, size, path.display());
        Asset {
            url: url.clone(),
            file_type,
            content_type,
            size,
            local_path: Some(path),
            downloaded: true,
            error: None,
        }
    }
}

async fn write_asset(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, bytes).await
}

fn content_type_or_default(content_type: Option<String>) -> String {
    content_type.unwrap_or_else(|| UNKNOWN_CONTENT_TYPE.to_string())
}

/// Lowercase extension of the last path segment, including the dot
///
/// Returns an empty string when the segment has no extension.
pub fn file_extension(url: &Url) -> String {
    let segment = url.path().rsplit('/').next().unwrap_or("");
    match segment.rfind('.') {
        Some(idx) if idx + 1 < segment.len() => segment[idx..].to_lowercase(),
        _ => String::new(),
    }
}

/// Content-addressed file name: hex SHA-256 of the URL plus its extension
pub fn asset_file_name(url: &Url) -> String {
    let digest = Sha256::digest(url.as_str().as_bytes());
    format!("{}{}", hex::encode(digest), file_extension(url))
}
