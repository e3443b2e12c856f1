use std::time::Duration;

use thiserror::Error;
use url::Url;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub classifier: ClassifierConfig,
    pub scan: ScanConfig,
    pub fetch: FetchConfig,
    pub logging: LoggingConfig,
    pub theme: Theme,
}

#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub base_url: Url,
    pub api_key: Option<String>,
    pub classify_timeout: Duration,
    pub health_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub default_threshold: f64,
    pub min_text_len: usize,
    pub max_text_len: usize,
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub timeout: Duration,
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub logs_dir: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn parse(value: &str) -> Option<Theme> {
        match value.to_ascii_lowercase().as_str() {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}
