mod client;
pub mod protocol;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::ClassificationResult;

pub use client::ClassifierClient;

/// Seam to the remote scorer. The scan pipeline only ever talks to this
/// trait; tests substitute a stub.
#[async_trait]
pub trait ClassificationBridge: Send + Sync {
    /// Scores a batch of comment texts. The returned vector is aligned by
    /// index with `comments`.
    async fn classify(
        &self,
        comments: &[String],
        threshold: f64,
    ) -> Result<Vec<ClassificationResult>, ClassifierError>;

    /// True when the remote service reports itself healthy.
    async fn health(&self) -> Result<bool, ClassifierError>;
}

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("classification request to {url} timed out after {seconds}s")]
    Timeout { url: String, seconds: u64 },

    #[error("classification service at {url} is unreachable: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("classification service at {url} returned HTTP {status}")]
    Http {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error(
        "classification service at {url} rejected the request: missing or invalid API key; \
         set TOXSCAN_API_KEY in your environment"
    )]
    MissingCredential { url: String },

    #[error("classification service at {url} returned a malformed response: {source}")]
    Malformed {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("classification service returned {got} results for {expected} comments")]
    Misaligned { expected: usize, got: usize },

    #[error("cannot build endpoint URL from {base} and {path}")]
    BadEndpoint { base: String, path: String },
}
