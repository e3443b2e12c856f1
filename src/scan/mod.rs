pub mod author;
pub mod extract;
pub mod platform;
pub mod session;

use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;

use crate::{
    classifier::{ClassificationBridge, ClassifierError},
    config::ScanConfig,
    domain::{CommentEntry, ScanSession},
    overlay::{build_annotations, Annotation},
    page::Page,
};

use author::resolve_author;
use extract::{element_text, CommentExtractor};
use platform::Platform;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("a scan is already in progress")]
    Busy,
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Idle,
    Scanning,
}

/// Everything one completed scan produced: the merged session plus the
/// element annotations that render it.
#[derive(Debug, Clone)]
pub struct ScanOutput {
    pub platform: Platform,
    pub session: ScanSession,
    pub annotations: Vec<Annotation>,
}

/// Owns the scan pipeline and the single live session. Only one scan may
/// be in flight at a time; a second trigger while scanning is rejected
/// rather than raced.
pub struct Scanner {
    bridge: Arc<dyn ClassificationBridge>,
    extractor: CommentExtractor,
    state: Mutex<ScanState>,
    last: Mutex<Option<ScanOutput>>,
}

impl Scanner {
    pub fn new(bridge: Arc<dyn ClassificationBridge>, config: &ScanConfig) -> Self {
        Self {
            bridge,
            extractor: CommentExtractor::new(config),
            state: Mutex::new(ScanState::Idle),
            last: Mutex::new(None),
        }
    }

    /// Runs the full pipeline against one parsed page. The previous session
    /// is cleared up front; nothing is stored until the whole batch has
    /// classified, so a transport failure leaves no partial annotations.
    pub async fn scan(&self, page: &Page, threshold: f64) -> Result<ScanOutput, ScanError> {
        let _guard = self.begin()?;
        self.clear();

        let platform = Platform::detect(page.host());
        let entries: Vec<CommentEntry> = self
            .extractor
            .extract(page)
            .iter()
            .map(|el| CommentEntry {
                node: el.id(),
                text: element_text(el),
                author: resolve_author(platform, el),
            })
            .collect();

        if entries.is_empty() {
            tracing::info!(target: "scan", %platform, "no candidate comments found");
            let output = ScanOutput {
                platform,
                session: ScanSession::empty(),
                annotations: Vec::new(),
            };
            *self.last.lock() = Some(output.clone());
            return Ok(output);
        }

        let texts: Vec<String> = entries.iter().map(|e| e.text.clone()).collect();
        tracing::info!(target: "scan", total = texts.len(), %platform, threshold, "classifying batch");
        let results = self.bridge.classify(&texts, threshold).await?;

        let session = session::merge(&entries, results);
        let annotations = build_annotations(&entries, &session);
        tracing::info!(
            target: "scan",
            total = session.total_comments,
            toxic = session.toxic_comments,
            medium = session.medium_comments,
            "scan complete"
        );

        let output = ScanOutput {
            platform,
            session,
            annotations,
        };
        *self.last.lock() = Some(output.clone());
        Ok(output)
    }

    /// Discards the live session and all annotations tied to it. Safe to
    /// call with nothing to clear.
    pub fn clear(&self) {
        *self.last.lock() = None;
    }

    pub fn last_scan(&self) -> Option<ScanOutput> {
        self.last.lock().clone()
    }

    fn begin(&self) -> Result<ScanGuard<'_>, ScanError> {
        let mut state = self.state.lock();
        if *state == ScanState::Scanning {
            return Err(ScanError::Busy);
        }
        *state = ScanState::Scanning;
        Ok(ScanGuard { state: &self.state })
    }
}

#[derive(Debug)]
struct ScanGuard<'a> {
    state: &'a Mutex<ScanState>,
}

impl Drop for ScanGuard<'_> {
    fn drop(&mut self) {
        *self.state.lock() = ScanState::Idle;
    }
}
