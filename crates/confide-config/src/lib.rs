mod backend_config;
mod config;
mod error;
mod log_level;
mod logging_config;
mod storage_config;

#[cfg(test)]
mod tests;

pub use backend_config::BackendConfig;
pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use storage_config::StorageConfig;

const CONFIG_DIR_ENV: &str = "CONFIDE_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = ".confide";
const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:54321";
const DEFAULT_STORAGE_DIR: &str = "data";
const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_COLORED: bool = true;
const DEFAULT_LOG_DIRECTORY: &str = "log";
