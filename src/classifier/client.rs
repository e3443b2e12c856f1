use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use url::Url;

use crate::{config::ClassifierConfig, domain::ClassificationResult};

use super::protocol::{HealthResponse, PredictRequest, PredictResponse};
use super::{ClassificationBridge, ClassifierError};

const API_KEY_HEADER: &str = "X-API-Key";

/// HTTP bridge to the remote toxicity classification service.
#[derive(Clone)]
pub struct ClassifierClient {
    http: Client,
    config: ClassifierConfig,
}

impl ClassifierClient {
    pub fn new(http: Client, config: ClassifierConfig) -> Self {
        Self { http, config }
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClassifierError> {
        self.config
            .base_url
            .join(path)
            .map_err(|_| ClassifierError::BadEndpoint {
                base: self.config.base_url.to_string(),
                path: path.to_string(),
            })
    }
}

#[async_trait]
impl ClassificationBridge for ClassifierClient {
    async fn classify(
        &self,
        comments: &[String],
        threshold: f64,
    ) -> Result<Vec<ClassificationResult>, ClassifierError> {
        let url = self.endpoint("predict")?;
        let body = PredictRequest {
            comments,
            threshold,
        };

        let mut request = self
            .http
            .post(url.clone())
            .timeout(self.config.classify_timeout)
            .json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request.send().await.map_err(|err| {
            if err.is_timeout() {
                ClassifierError::Timeout {
                    url: url.to_string(),
                    seconds: self.config.classify_timeout.as_secs(),
                }
            } else {
                ClassifierError::Transport {
                    url: url.to_string(),
                    source: err,
                }
            }
        })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ClassifierError::MissingCredential {
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            return Err(ClassifierError::Http {
                url: url.to_string(),
                status,
            });
        }

        let parsed: PredictResponse =
            response
                .json()
                .await
                .map_err(|err| ClassifierError::Malformed {
                    url: url.to_string(),
                    source: err,
                })?;

        if parsed.results.len() != comments.len() {
            return Err(ClassifierError::Misaligned {
                expected: comments.len(),
                got: parsed.results.len(),
            });
        }
        Ok(parsed.results)
    }

    async fn health(&self) -> Result<bool, ClassifierError> {
        let url = self.endpoint("health")?;
        let response = self
            .http
            .get(url.clone())
            .timeout(self.config.health_timeout)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    ClassifierError::Timeout {
                        url: url.to_string(),
                        seconds: self.config.health_timeout.as_secs(),
                    }
                } else {
                    ClassifierError::Transport {
                        url: url.to_string(),
                        source: err,
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClassifierError::Http {
                url: url.to_string(),
                status,
            });
        }
        let health: HealthResponse =
            response
                .json()
                .await
                .map_err(|err| ClassifierError::Malformed {
                    url: url.to_string(),
                    source: err,
                })?;
        Ok(health.is_ok())
    }
}
