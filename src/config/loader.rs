use std::env;
use std::time::Duration;

use url::Url;

use super::env::{
    AppConfig, ClassifierConfig, ConfigError, FetchConfig, LoggingConfig, ScanConfig, Theme,
};

pub const DEFAULT_API_BASE: &str = "http://localhost:4000";
pub const DEFAULT_THRESHOLD: f64 = 0.5;

pub fn load_config() -> Result<AppConfig, ConfigError> {
    AppConfig::from_env()
}

impl AppConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = match env::var("TOXSCAN_API_BASE") {
            Ok(raw) if !raw.trim().is_empty() => {
                Url::parse(raw.trim()).map_err(|_| ConfigError::Invalid {
                    key: "TOXSCAN_API_BASE",
                    value: raw,
                })?
            }
            _ => Url::parse(DEFAULT_API_BASE).map_err(|_| ConfigError::Invalid {
                key: "TOXSCAN_API_BASE",
                value: DEFAULT_API_BASE.to_string(),
            })?,
        };

        let classifier = ClassifierConfig {
            base_url,
            api_key: env::var("TOXSCAN_API_KEY").ok().filter(|v| !v.is_empty()),
            classify_timeout: duration_ms("TOXSCAN_CLASSIFY_TIMEOUT_MS", 30_000),
            health_timeout: duration_ms("TOXSCAN_HEALTH_TIMEOUT_MS", 3_000),
        };

        let scan = ScanConfig {
            default_threshold: parse_f64("TOXSCAN_THRESHOLD")
                .unwrap_or(DEFAULT_THRESHOLD)
                .clamp(0.0, 1.0),
            min_text_len: parse_usize("TOXSCAN_MIN_TEXT_LEN").unwrap_or(10),
            max_text_len: parse_usize("TOXSCAN_MAX_TEXT_LEN").unwrap_or(1_000),
        };

        let fetch = FetchConfig {
            timeout: duration_ms("TOXSCAN_FETCH_TIMEOUT_MS", 10_000),
            max_body_bytes: parse_usize("TOXSCAN_FETCH_MAX_BYTES").unwrap_or(8 * 1024 * 1024),
        };

        let logging = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            logs_dir: env::var("LOGS_DIR").unwrap_or_else(|_| "logs".to_string()),
        };

        let theme = env::var("TOXSCAN_THEME")
            .ok()
            .and_then(|v| Theme::parse(&v))
            .unwrap_or(Theme::Dark);

        Ok(Self {
            classifier,
            scan,
            fetch,
            logging,
            theme,
        })
    }
}

fn duration_ms(key: &str, default: u64) -> Duration {
    Duration::from_millis(
        env::var(key)
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(default),
    )
}

fn parse_usize(key: &str) -> Option<usize> {
    env::var(key).ok().and_then(|v| v.parse::<usize>().ok())
}

fn parse_f64(key: &str) -> Option<f64> {
    env::var(key).ok().and_then(|v| v.parse::<f64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_parse_accepts_known_values() {
        assert_eq!(Theme::parse("dark"), Some(Theme::Dark));
        assert_eq!(Theme::parse("Light"), Some(Theme::Light));
        assert_eq!(Theme::parse("solarized"), None);
    }

    #[test]
    fn duration_fallback_applies_for_absent_key() {
        assert_eq!(
            duration_ms("TOXSCAN_TEST_ABSENT_TIMEOUT", 1234),
            Duration::from_millis(1234)
        );
    }

    #[test]
    fn default_base_url_parses() {
        assert!(Url::parse(DEFAULT_API_BASE).is_ok());
    }
}
