pub mod scores;
pub mod types;

pub use scores::{Category, ToxicityScores};
pub use types::{
    ClassificationResult, CommentEntry, ScanSession, Severity, UNKNOWN_AUTHOR,
};
