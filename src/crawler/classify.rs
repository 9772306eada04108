//! Heuristic content classification
//!
//! Three independent signals are checked:
//! - `url_pattern`: a path segment such as `/docs/` or `/wiki/`
//! - `metadata_tag`: a `<meta>` key mentioning "documentation"
//! - `content_markers`: phrases typical of documentation in the text
//!
//! Confidence is the fraction of signals present. Two signals make a page a
//! guide, all three make it documentation.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use url::Url;

pub const FEATURE_URL_PATTERN: &str = "url_pattern";
pub const FEATURE_METADATA_TAG: &str = "metadata_tag";
pub const FEATURE_CONTENT_MARKERS: &str = "content_markers";

const SIGNAL_COUNT: f64 = 3.0;
const DOCUMENTATION_THRESHOLD: f64 = 0.7;
const GUIDE_THRESHOLD: f64 = 0.4;

/// Directory names that mark documentation URLs
const DOC_PATH_SEGMENTS: &[&str] = &["docs", "documentation", "wiki", "guide", "manual"];

/// Lowercase phrases that mark documentation text
const CONTENT_MARKERS: &[&str] = &[
    "installation",
    "getting started",
    "api reference",
    "usage",
    "example",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Documentation,
    Guide,
    Unknown,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Documentation => "documentation",
            Self::Guide => "guide",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentClassification {
    pub kind: ContentKind,

    /// Share of signals present, in `[0, 1]`
    pub confidence: f64,

    /// Names of the signals that fired
    pub features: BTreeSet<String>,
}

/// Classifies a page from its final URL, metadata, and main text
pub fn classify(url: &Url, metadata: &BTreeMap<String, String>, text: &str) -> ContentClassification {
    let mut features = BTreeSet::new();

    if has_doc_path_segment(url) {
        features.insert(FEATURE_URL_PATTERN.to_string());
    }

    if metadata
        .keys()
        .any(|key| key.to_lowercase().contains("documentation"))
    {
        features.insert(FEATURE_METADATA_TAG.to_string());
    }

    let text = text.to_lowercase();
    if CONTENT_MARKERS.iter().any(|marker| text.contains(marker)) {
        features.insert(FEATURE_CONTENT_MARKERS.to_string());
    }

    let confidence = (features.len() as f64 / SIGNAL_COUNT).min(1.0);
    let kind = if confidence >= DOCUMENTATION_THRESHOLD {
        ContentKind::Documentation
    } else if confidence >= GUIDE_THRESHOLD {
        ContentKind::Guide
    } else {
        ContentKind::Unknown
    };

    ContentClassification {
        kind,
        confidence,
        features,
    }
}

/// True if a documentation directory appears in the path with a `/` after it
fn has_doc_path_segment(url: &Url) -> bool {
    let path = url.path().to_lowercase();
    let segments: Vec<&str> = path.split('/').collect();

    // The last segment is never followed by a slash
    segments
        .iter()
        .take(segments.len().saturating_sub(1))
        .any(|segment| DOC_PATH_SEGMENTS.contains(segment))
}
