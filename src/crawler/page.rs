//! Records handed to a result sink

use crate::crawler::classify::ContentClassification;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use url::Url;

/// An accepted page
#[derive(Debug, Clone, Serialize)]
pub struct PageResult {
    /// Normalized URL the page was requested under
    pub url: Url,

    /// URL that answered after redirects
    pub final_url: Url,

    pub depth: u32,
    pub title: Option<String>,
    pub text: String,

    /// Raw markup; `None` when `store_html` is off
    pub html: Option<String>,

    pub metadata: BTreeMap<String, String>,
    pub classification: ContentClassification,

    /// Every absolute link found on the page, before domain filtering
    pub links: Vec<Url>,

    pub assets: Vec<Asset>,
    pub crawled_at: DateTime<Utc>,
}

/// A downloaded (or attempted) asset referenced by a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Asset {
    pub url: Url,

    /// Lowercase extension with its leading dot, e.g. `.pdf`
    pub file_type: String,

    pub content_type: String,

    /// Bytes written to disk; 0 when nothing was written
    pub size: u64,

    pub local_path: Option<PathBuf>,
    pub downloaded: bool,
    pub error: Option<String>,
}

impl Asset {
    pub(crate) fn failed(url: Url, file_type: String, content_type: String, error: impl Into<String>) -> Self {
        Self {
            url,
            file_type,
            content_type,
            size: 0,
            local_path: None,
            downloaded: false,
            error: Some(error.into()),
        }
    }
}
