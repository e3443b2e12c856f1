use chrono::{DateTime, Utc};
use ego_tree::NodeId;
use serde::{Deserialize, Serialize};

use super::scores::ToxicityScores;

/// Author sentinel used whenever platform attribution fails.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Toxic,
    Medium,
    Safe,
}

impl Severity {
    pub fn is_flagged(&self) -> bool {
        matches!(self, Severity::Toxic | Severity::Medium)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Toxic => "toxic",
            Severity::Medium => "medium",
            Severity::Safe => "safe",
        }
    }
}

/// One extracted candidate: a reference into the page tree, its trimmed
/// text, and the resolved author label. Node ids are only meaningful for
/// the document the entry was extracted from.
#[derive(Debug, Clone)]
pub struct CommentEntry {
    pub node: NodeId,
    pub text: String,
    pub author: String,
}

/// Per-comment classification as returned by the remote service, with the
/// author attached locally during the merge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResult {
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub scores: ToxicityScores,
    #[serde(default)]
    pub is_toxic: bool,
    #[serde(default)]
    pub severity: Option<Severity>,
    #[serde(default)]
    pub flagged_categories: u32,
}

impl ClassificationResult {
    /// Severity as supplied by the classifier, or the local fallback when
    /// absent: `is_toxic` maps to Toxic, otherwise Safe. The fallback never
    /// produces Medium.
    pub fn effective_severity(&self) -> Severity {
        self.severity.unwrap_or(if self.is_toxic {
            Severity::Toxic
        } else {
            Severity::Safe
        })
    }
}

/// Aggregate state for one completed scan. Exactly one session is live at a
/// time; a new scan or an explicit clear supersedes it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanSession {
    pub total_comments: usize,
    pub toxic_comments: usize,
    pub medium_comments: usize,
    pub results: Vec<ClassificationResult>,
    pub started_at: DateTime<Utc>,
}

impl ScanSession {
    pub fn empty() -> Self {
        Self {
            total_comments: 0,
            toxic_comments: 0,
            medium_comments: 0,
            results: Vec::new(),
            started_at: Utc::now(),
        }
    }

    pub fn safe_count(&self) -> usize {
        self.total_comments - self.toxic_comments - self.medium_comments
    }

    pub fn flagged_count(&self) -> usize {
        self.toxic_comments + self.medium_comments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_result(is_toxic: bool) -> ClassificationResult {
        ClassificationResult {
            text: String::new(),
            author: None,
            scores: ToxicityScores::default(),
            is_toxic,
            severity: None,
            flagged_categories: 0,
        }
    }

    #[test]
    fn severity_fallback_maps_toxic_flag() {
        assert_eq!(bare_result(true).effective_severity(), Severity::Toxic);
        assert_eq!(bare_result(false).effective_severity(), Severity::Safe);
    }

    #[test]
    fn severity_fallback_never_yields_medium() {
        for is_toxic in [true, false] {
            assert_ne!(bare_result(is_toxic).effective_severity(), Severity::Medium);
        }
    }

    #[test]
    fn supplied_severity_wins_over_fallback() {
        let mut result = bare_result(false);
        result.severity = Some(Severity::Medium);
        assert_eq!(result.effective_severity(), Severity::Medium);
    }

    #[test]
    fn severity_deserializes_lowercase() {
        let severity: Severity = serde_json::from_str("\"medium\"").unwrap();
        assert_eq!(severity, Severity::Medium);
    }
}
