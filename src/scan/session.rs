use chrono::Utc;

use crate::domain::{ClassificationResult, CommentEntry, ScanSession, Severity};

/// Folds the classifier's aligned results into a session: attaches the
/// resolved author per index, pins the severity (applying the local
/// fallback when the service omitted it), and computes the aggregate
/// counts. This is the only place counts are derived from raw results.
pub fn merge(entries: &[CommentEntry], mut results: Vec<ClassificationResult>) -> ScanSession {
    debug_assert_eq!(entries.len(), results.len());

    let mut toxic_comments = 0;
    let mut medium_comments = 0;

    for (entry, result) in entries.iter().zip(results.iter_mut()) {
        result.author = Some(entry.author.clone());
        if result.text.is_empty() {
            result.text = entry.text.clone();
        }
        let severity = result.effective_severity();
        result.severity = Some(severity);
        match severity {
            Severity::Toxic => toxic_comments += 1,
            Severity::Medium => medium_comments += 1,
            Severity::Safe => {}
        }
    }

    ScanSession {
        total_comments: entries.len(),
        toxic_comments,
        medium_comments,
        results,
        started_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ToxicityScores;
    use scraper::Html;

    fn entry(text: &str, author: &str) -> CommentEntry {
        // Node ids must come from a real tree; the content is irrelevant here.
        let doc = Html::parse_document("<p>x</p>");
        CommentEntry {
            node: doc.tree.root().id(),
            text: text.to_string(),
            author: author.to_string(),
        }
    }

    fn result(severity: Option<Severity>, is_toxic: bool) -> ClassificationResult {
        ClassificationResult {
            text: String::new(),
            author: None,
            scores: ToxicityScores::default(),
            is_toxic,
            severity,
            flagged_categories: 0,
        }
    }

    #[test]
    fn counts_follow_severity_buckets() {
        let entries = vec![
            entry("a toxic one", "u/a"),
            entry("a medium one", "u/b"),
            entry("a safe one", "u/c"),
        ];
        let results = vec![
            result(Some(Severity::Toxic), true),
            result(Some(Severity::Medium), true),
            result(Some(Severity::Safe), false),
        ];
        let session = merge(&entries, results);
        assert_eq!(session.total_comments, 3);
        assert_eq!(session.toxic_comments, 1);
        assert_eq!(session.medium_comments, 1);
        assert_eq!(session.safe_count(), 1);
        assert!(session.toxic_comments + session.medium_comments <= session.total_comments);
        assert_eq!(session.results.len(), session.total_comments);
    }

    #[test]
    fn authors_and_texts_are_attached_per_index() {
        let entries = vec![entry("first text body", "u/alice"), entry("second text", "Unknown")];
        let results = vec![result(Some(Severity::Safe), false); 2];
        let session = merge(&entries, results);
        assert_eq!(session.results[0].author.as_deref(), Some("u/alice"));
        assert_eq!(session.results[0].text, "first text body");
        assert_eq!(session.results[1].author.as_deref(), Some("Unknown"));
    }

    #[test]
    fn fallback_severity_is_pinned_onto_results() {
        let entries = vec![entry("needs fallback", "u/x")];
        let session = merge(&entries, vec![result(None, true)]);
        assert_eq!(session.results[0].severity, Some(Severity::Toxic));
        assert_eq!(session.toxic_comments, 1);
    }

    #[test]
    fn server_text_wins_when_present() {
        let entries = vec![entry("local extraction text", "u/x")];
        let mut r = result(Some(Severity::Safe), false);
        r.text = "server truncated text".to_string();
        let session = merge(&entries, vec![r]);
        assert_eq!(session.results[0].text, "server truncated text");
    }
}
