use std::collections::HashSet;

use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};

use crate::{config::ScanConfig, page::Page};

/// Ordered, data-driven selector table for candidate comment bodies.
/// Extend coverage here; the traversal below never changes.
const COMMENT_SELECTORS: &[&str] = &[
    // YouTube
    "#content-text",
    "yt-formatted-string#content-text",
    // Reddit
    "[data-testid='comment'] p",
    ".Comment p",
    ".md p",
    // Twitter/X
    "[data-testid='tweetText']",
    // General comment sections
    ".comment-body",
    ".comment-text",
    ".comment-content",
    ".comment p",
    ".comments p",
    "[class*='comment'] p",
    "[class*='Comment'] p",
    // Forum-style
    ".post-body",
    ".post-content",
    ".message-body",
    ".reply-body",
    ".reply-content",
    // News sites
    ".article-comment",
    ".user-comment",
    // Generic text containers that might be comments
    "article p",
    ".feed-item p",
];

static COMMENT_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(&COMMENT_SELECTORS.join(", ")).expect("static comment selector list")
});

static FALLBACK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p, span, div, li, td, blockquote").expect("static fallback selector"));

const EXCLUDED_ANCESTORS: &[&str] = &["nav", "header", "footer", "script", "style", "noscript"];

/// Whole text of an element subtree, trimmed.
pub fn element_text(el: &ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

pub struct CommentExtractor {
    min_text_len: usize,
    max_text_len: usize,
}

impl CommentExtractor {
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            min_text_len: config.min_text_len,
            max_text_len: config.max_text_len,
        }
    }

    /// Candidate comment elements in document order, containment-deduplicated.
    /// An empty page yields an empty vector, not an error.
    pub fn extract<'a>(&self, page: &'a Page) -> Vec<ElementRef<'a>> {
        let mut candidates: Vec<ElementRef<'a>> = page
            .document()
            .select(&COMMENT_SELECTOR)
            .filter(|el| self.text_in_bounds(el))
            .collect();

        if candidates.is_empty() {
            candidates = page
                .document()
                .select(&FALLBACK_SELECTOR)
                .filter(|el| self.text_in_bounds(el))
                .filter(|el| leafish(el) && !inside_excluded(el))
                .collect();
        }

        dedupe_by_containment(candidates)
    }

    fn text_in_bounds(&self, el: &ElementRef) -> bool {
        let len = element_text(el).chars().count();
        len >= self.min_text_len && len <= self.max_text_len
    }
}

/// Containers with many element children are navigation or layout, not a
/// single comment.
fn leafish(el: &ElementRef) -> bool {
    el.children().filter(|c| c.value().is_element()).count() <= 3
}

fn inside_excluded(el: &ElementRef) -> bool {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .any(|a| EXCLUDED_ANCESTORS.contains(&a.value().name()))
}

/// Drops every element that has another retained element among its tree
/// ancestors, so no two retained elements overlap in text content.
fn dedupe_by_containment(candidates: Vec<ElementRef>) -> Vec<ElementRef> {
    let ids: HashSet<_> = candidates.iter().map(|el| el.id()).collect();
    candidates
        .into_iter()
        .filter(|el| !el.ancestors().any(|a| ids.contains(&a.id())))
        .collect()
}
