use ego_tree::NodeId;

use crate::domain::{ClassificationResult, CommentEntry, ScanSession, Severity, UNKNOWN_AUTHOR};

use super::styles::{MEDIUM_CLASS, SAFE_CLASS, TOXIC_CLASS};

const TOXIC_COLOR: &str = "#f87171";
const TOXIC_BORDER: &str = "rgba(248, 113, 113, 0.3)";
const MEDIUM_COLOR: &str = "#eab308";
const MEDIUM_BORDER: &str = "rgba(234, 179, 8, 0.3)";
const SAFE_COLOR: &str = "#34d399";
const SAFE_BORDER: &str = "rgba(52, 211, 153, 0.3)";

#[derive(Debug, Clone)]
pub struct TooltipSpec {
    pub text: String,
    pub color: &'static str,
    pub border: &'static str,
}

/// One element's worth of severity styling: the class to apply, the hover
/// tooltip, and the ordinal index recorded on the element so the report can
/// scroll back to it.
#[derive(Debug, Clone)]
pub struct Annotation {
    pub ordinal: usize,
    pub node: NodeId,
    pub severity: Severity,
    pub tooltip: TooltipSpec,
}

pub fn severity_class(severity: Severity) -> &'static str {
    match severity {
        Severity::Toxic => TOXIC_CLASS,
        Severity::Medium => MEDIUM_CLASS,
        Severity::Safe => SAFE_CLASS,
    }
}

pub fn tooltip_spec(result: &ClassificationResult) -> TooltipSpec {
    let severity = result.effective_severity();
    match severity {
        Severity::Safe => TooltipSpec {
            text: "✅ Safe".to_string(),
            color: SAFE_COLOR,
            border: SAFE_BORDER,
        },
        flagged => {
            let (category, score) = result.scores.top_category();
            let author = result.author.as_deref().unwrap_or(UNKNOWN_AUTHOR);
            let (color, border) = if flagged == Severity::Toxic {
                (TOXIC_COLOR, TOXIC_BORDER)
            } else {
                (MEDIUM_COLOR, MEDIUM_BORDER)
            };
            TooltipSpec {
                text: format!(
                    "⚠️ {author} — {} ({:.0}%)",
                    category.label(),
                    score * 100.0
                ),
                color,
                border,
            }
        }
    }
}

/// Builds the per-element annotations for a merged session. Entries and
/// results are aligned by index; the index doubles as the ordinal.
pub fn build_annotations(entries: &[CommentEntry], session: &ScanSession) -> Vec<Annotation> {
    entries
        .iter()
        .zip(session.results.iter())
        .enumerate()
        .map(|(ordinal, (entry, result))| Annotation {
            ordinal,
            node: entry.node,
            severity: result.effective_severity(),
            tooltip: tooltip_spec(result),
        })
        .collect()
}
