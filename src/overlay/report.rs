use std::fmt::Write;

use serde::Serialize;

use crate::domain::{Category, ScanSession, Severity, UNKNOWN_AUTHOR};

use super::escape_html;
use super::styles::{MODAL_ID, OVERLAY_ID, REF_ATTR};

/// A category's score must reach this floor to count toward the breakdown.
pub const CATEGORY_SCORE_FLOOR: f64 = 0.3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStat {
    pub category: Category,
    pub count: usize,
    /// Bar width as a percentage of the most frequent category.
    pub width_pct: f64,
}

/// Category-frequency rollup over flagged results only. Sorted descending
/// by count; categories that never reach the floor are omitted.
pub fn category_breakdown(session: &ScanSession) -> Vec<CategoryStat> {
    let mut counts = [0usize; Category::ALL.len()];
    for result in &session.results {
        if !result.effective_severity().is_flagged() {
            continue;
        }
        for (i, category) in Category::ALL.iter().enumerate() {
            if result.scores.score(*category) >= CATEGORY_SCORE_FLOOR {
                counts[i] += 1;
            }
        }
    }

    let max = counts.iter().copied().max().unwrap_or(0);
    let mut stats: Vec<CategoryStat> = Category::ALL
        .iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(category, count)| CategoryStat {
            category: *category,
            count,
            width_pct: count as f64 / max as f64 * 100.0,
        })
        .collect();
    stats.sort_by(|a, b| b.count.cmp(&a.count));
    stats
}

#[derive(Debug, Clone)]
pub struct FlaggedItem {
    pub ordinal: usize,
    pub severity: Severity,
    pub author: Option<String>,
    pub top_category: Category,
    pub top_score: f64,
    pub text: String,
}

/// All flagged results, in scan order, carrying the ordinal reference used
/// for scroll-back.
pub fn flagged_items(session: &ScanSession) -> Vec<FlaggedItem> {
    session
        .results
        .iter()
        .enumerate()
        .filter(|(_, r)| r.effective_severity().is_flagged())
        .map(|(ordinal, r)| {
            let (top_category, top_score) = r.scores.top_category();
            FlaggedItem {
                ordinal,
                severity: r.effective_severity(),
                author: r
                    .author
                    .clone()
                    .filter(|a| a.as_str() != UNKNOWN_AUTHOR),
                top_category,
                top_score,
                text: r.text.clone(),
            }
        })
        .collect()
}

fn severity_bar_color(category: Category) -> &'static str {
    match category {
        Category::Toxic | Category::SevereToxic => "#f87171",
        Category::Obscene | Category::Threat => "#fb923c",
        Category::Insult | Category::IdentityHate => "#fbbf24",
    }
}

/// Full report modal markup: overlay, header, stat cards, category bars,
/// and the flagged-comment list. Hidden until the badge opens it.
pub fn render_modal(session: &ScanSession) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        r#"<div id="{OVERLAY_ID}" style="display:none"></div><div id="{MODAL_ID}" style="display:none">"#
    );
    let _ = write!(
        html,
        r#"<div class="ts-modal-header"><div class="ts-modal-title">🛡️ Toxicity Report</div><button class="ts-modal-close" type="button">✕</button></div><div class="ts-modal-body">"#
    );

    // Stat cards.
    let _ = write!(
        html,
        r#"<div class="ts-stat-row"><div class="ts-stat-card"><div class="ts-stat-number">{}</div><div class="ts-stat-label">Scanned</div></div><div class="ts-stat-card"><div class="ts-stat-number toxic">{}</div><div class="ts-stat-label">Toxic</div></div><div class="ts-stat-card"><div class="ts-stat-number medium">{}</div><div class="ts-stat-label">Medium</div></div><div class="ts-stat-card"><div class="ts-stat-number safe">{}</div><div class="ts-stat-label">Safe</div></div></div>"#,
        session.total_comments,
        session.toxic_comments,
        session.medium_comments,
        session.safe_count()
    );

    // Category bars.
    let breakdown = category_breakdown(session);
    if !breakdown.is_empty() {
        html.push_str(r#"<div class="ts-section-title">Category breakdown</div><div class="ts-category-list">"#);
        for stat in &breakdown {
            let _ = write!(
                html,
                r#"<div class="ts-category-item"><span class="ts-cat-name">{}</span><div class="ts-cat-bar-bg"><div class="ts-cat-bar-fill" data-width="{:.0}" style="background:{}"></div></div><span class="ts-cat-count">{}</span></div>"#,
                escape_html(stat.category.label()),
                stat.width_pct,
                severity_bar_color(stat.category),
                stat.count
            );
        }
        html.push_str("</div>");
    }

    // Flagged rows.
    let items = flagged_items(session);
    if !items.is_empty() {
        html.push_str(r#"<div class="ts-section-title">Flagged comments</div><div class="ts-comment-list">"#);
        for item in &items {
            let _ = write!(
                html,
                r#"<div class="ts-comment-item ts-item-{sev}" {REF_ATTR}="{ordinal}"><div class="ts-comment-header"><span class="ts-comment-severity {sev}">{sev}</span><span class="ts-comment-category">{category} ({score:.0}%)</span></div>"#,
                sev = item.severity.as_str(),
                ordinal = item.ordinal,
                category = escape_html(item.top_category.label()),
                score = item.top_score * 100.0
            );
            if let Some(author) = &item.author {
                let _ = write!(
                    html,
                    r#"<div class="ts-comment-author">{}</div>"#,
                    escape_html(author)
                );
            }
            let _ = write!(
                html,
                r#"<div class="ts-comment-text">{}</div></div>"#,
                escape_html(&item.text)
            );
        }
        html.push_str("</div>");
    }

    html.push_str("</div></div>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClassificationResult, ToxicityScores};
    use chrono::Utc;

    fn result(severity: Severity, scores: ToxicityScores, author: Option<&str>) -> ClassificationResult {
        ClassificationResult {
            text: "some comment text".to_string(),
            author: author.map(str::to_string),
            scores,
            is_toxic: severity.is_flagged(),
            severity: Some(severity),
            flagged_categories: 0,
        }
    }

    fn session(results: Vec<ClassificationResult>) -> ScanSession {
        let toxic = results
            .iter()
            .filter(|r| r.effective_severity() == Severity::Toxic)
            .count();
        let medium = results
            .iter()
            .filter(|r| r.effective_severity() == Severity::Medium)
            .count();
        ScanSession {
            total_comments: results.len(),
            toxic_comments: toxic,
            medium_comments: medium,
            results,
            started_at: Utc::now(),
        }
    }

    #[test]
    fn breakdown_counts_only_flagged_results_above_floor() {
        let s = session(vec![
            result(
                Severity::Toxic,
                ToxicityScores {
                    toxic: 0.9,
                    insult: 0.8,
                    threat: 0.1,
                    ..Default::default()
                },
                None,
            ),
            result(
                Severity::Medium,
                ToxicityScores {
                    insult: 0.4,
                    ..Default::default()
                },
                None,
            ),
            // Safe result scores must not count even above the floor.
            result(
                Severity::Safe,
                ToxicityScores {
                    toxic: 0.9,
                    ..Default::default()
                },
                None,
            ),
        ]);
        let stats = category_breakdown(&s);
        assert_eq!(stats[0].category, Category::Insult);
        assert_eq!(stats[0].count, 2);
        assert_eq!(stats[0].width_pct, 100.0);
        assert!(stats.iter().all(|st| st.category != Category::Threat));
        let toxic = stats.iter().find(|st| st.category == Category::Toxic).unwrap();
        assert_eq!(toxic.count, 1);
        assert_eq!(toxic.width_pct, 50.0);
    }

    #[test]
    fn breakdown_is_sorted_descending() {
        let s = session(vec![
            result(
                Severity::Toxic,
                ToxicityScores {
                    obscene: 0.5,
                    insult: 0.5,
                    ..Default::default()
                },
                None,
            ),
            result(
                Severity::Toxic,
                ToxicityScores {
                    insult: 0.5,
                    ..Default::default()
                },
                None,
            ),
        ]);
        let stats = category_breakdown(&s);
        let counts: Vec<usize> = stats.iter().map(|st| st.count).collect();
        let mut sorted = counts.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(counts, sorted);
    }

    #[test]
    fn empty_session_has_no_breakdown() {
        assert!(category_breakdown(&session(vec![])).is_empty());
    }

    #[test]
    fn flagged_items_skip_safe_and_keep_ordinals() {
        let s = session(vec![
            result(Severity::Safe, ToxicityScores::default(), None),
            result(
                Severity::Toxic,
                ToxicityScores {
                    insult: 0.9,
                    ..Default::default()
                },
                Some("u/troll"),
            ),
        ]);
        let items = flagged_items(&s);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].ordinal, 1);
        assert_eq!(items[0].top_category, Category::Insult);
        assert_eq!(items[0].author.as_deref(), Some("u/troll"));
    }

    #[test]
    fn unknown_author_is_omitted_from_rows() {
        let s = session(vec![result(
            Severity::Medium,
            ToxicityScores {
                toxic: 0.4,
                ..Default::default()
            },
            Some(UNKNOWN_AUTHOR),
        )]);
        let items = flagged_items(&s);
        assert_eq!(items[0].author, None);
    }

    #[test]
    fn modal_markup_references_ordinals_and_escapes_text() {
        let mut r = result(
            Severity::Toxic,
            ToxicityScores {
                toxic: 0.9,
                ..Default::default()
            },
            Some("u/x"),
        );
        r.text = "<script>alert(1)</script>".to_string();
        let html = render_modal(&session(vec![r]));
        assert!(html.contains(&format!("{REF_ATTR}=\"0\"")));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>alert"));
        assert!(html.contains(MODAL_ID));
    }
}
