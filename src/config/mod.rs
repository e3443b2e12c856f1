pub mod env;
mod loader;

pub use env::{AppConfig, ClassifierConfig, FetchConfig, LoggingConfig, ScanConfig, Theme};
pub use loader::{load_config, DEFAULT_THRESHOLD};
