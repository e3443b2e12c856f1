use serde::{Deserialize, Serialize};

use crate::domain::ClassificationResult;

/// Body of `POST /predict`. Results come back aligned by index with
/// `comments`.
#[derive(Debug, Serialize)]
pub struct PredictRequest<'a> {
    pub comments: &'a [String],
    pub threshold: f64,
}

#[derive(Debug, Deserialize)]
pub struct PredictResponse {
    pub results: Vec<ClassificationResult>,
}

#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}
