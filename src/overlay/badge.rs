use crate::domain::ScanSession;

use super::escape_html;
use super::styles::BADGE_ID;

/// Floating summary pill. Absent entirely when nothing is flagged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub count: usize,
}

impl Badge {
    pub fn from_session(session: &ScanSession) -> Option<Badge> {
        let count = session.flagged_count();
        (count > 0).then_some(Badge { count })
    }

    pub fn label(&self) -> String {
        let plural = if self.count == 1 { "" } else { "s" };
        format!("{} toxic comment{plural} found", self.count)
    }

    pub fn to_html(&self) -> String {
        format!(
            r#"<div id="{BADGE_ID}"><span class="ts-badge-icon">🛡️</span> {}</div>"#,
            escape_html(&self.label())
        )
    }
}
