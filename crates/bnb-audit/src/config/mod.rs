use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_RENTAL_ENDPOINT: &str = "https://data.seattle.gov/resource/s7df-xba4.json";
pub const DEFAULT_BUSINESS_ENDPOINT: &str = "https://data.seattle.gov/resource/wnbq-64tb.json";
pub const DEFAULT_RESULT_LIMIT: usize = 5000;
pub const DEFAULT_REPORT_PATH: &str = "bnbreport.csv";

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration, built once and handed to each component.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub datasets: DatasetConfig,
    pub report: ReportConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let app_token = env::var("APP_TOKEN")
            .ok()
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());

        let rental_endpoint = endpoint_var("APP_RENTAL_ENDPOINT", DEFAULT_RENTAL_ENDPOINT)?;
        let business_endpoint = endpoint_var("APP_BUSINESS_ENDPOINT", DEFAULT_BUSINESS_ENDPOINT)?;

        let result_limit = env::var("APP_RESULT_LIMIT")
            .unwrap_or_else(|_| DEFAULT_RESULT_LIMIT.to_string())
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|limit| *limit > 0)
            .ok_or(ConfigError::InvalidLimit)?;

        let timeout_secs = env::var("APP_HTTP_TIMEOUT_SECS")
            .unwrap_or_else(|_| "60".to_string())
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or(ConfigError::InvalidTimeout)?;

        let output_path = PathBuf::from(
            env::var("APP_REPORT_PATH").unwrap_or_else(|_| DEFAULT_REPORT_PATH.to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            datasets: DatasetConfig {
                rental_endpoint,
                business_endpoint,
                app_token,
                result_limit,
                timeout: Duration::from_secs(timeout_secs),
            },
            report: ReportConfig { output_path },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

fn endpoint_var(name: &'static str, default: &str) -> Result<String, ConfigError> {
    let value = env::var(name).unwrap_or_else(|_| default.to_string());
    let value = value.trim();
    if value.starts_with("https://") || value.starts_with("http://") {
        Ok(value.to_string())
    } else {
        Err(ConfigError::InvalidEndpoint { variable: name })
    }
}

/// Where the two registries live and how to talk to them.
#[derive(Clone)]
pub struct DatasetConfig {
    pub rental_endpoint: String,
    pub business_endpoint: String,
    /// One Socrata app token, shared by both dataset requests.
    pub app_token: Option<String>,
    /// Per-dataset row cap. Rows past it are reported as truncated.
    pub result_limit: usize,
    pub timeout: Duration,
}

impl fmt::Debug for DatasetConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatasetConfig")
            .field("rental_endpoint", &self.rental_endpoint)
            .field("business_endpoint", &self.business_endpoint)
            .field("app_token", &self.app_token.as_ref().map(|_| "<redacted>"))
            .field("result_limit", &self.result_limit)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Settings for the CSV sink.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub output_path: PathBuf,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidLimit,
    InvalidTimeout,
    InvalidEndpoint { variable: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidLimit => write!(f, "APP_RESULT_LIMIT must be a positive integer"),
            ConfigError::InvalidTimeout => {
                write!(f, "APP_HTTP_TIMEOUT_SECS must be a positive integer")
            }
            ConfigError::InvalidEndpoint { variable } => {
                write!(f, "{variable} must be an http(s) URL")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "APP_ENV",
            "APP_TOKEN",
            "APP_RENTAL_ENDPOINT",
            "APP_BUSINESS_ENDPOINT",
            "APP_RESULT_LIMIT",
            "APP_HTTP_TIMEOUT_SECS",
            "APP_REPORT_PATH",
            "APP_LOG_LEVEL",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.datasets.rental_endpoint, DEFAULT_RENTAL_ENDPOINT);
        assert_eq!(config.datasets.business_endpoint, DEFAULT_BUSINESS_ENDPOINT);
        assert_eq!(config.datasets.result_limit, 5000);
        assert_eq!(config.datasets.timeout, Duration::from_secs(60));
        assert!(config.datasets.app_token.is_none());
        assert_eq!(config.report.output_path, PathBuf::from("bnbreport.csv"));
        assert_eq!(config.telemetry.log_level, "info");
    }

    #[test]
    fn single_token_is_shared_and_redacted_in_debug_output() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_TOKEN", " secret-token ");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.datasets.app_token.as_deref(), Some("secret-token"));
        let debug = format!("{:?}", config.datasets);
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("<redacted>"));
        reset_env();
    }

    #[test]
    fn rejects_zero_or_garbage_limits() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_RESULT_LIMIT", "0");
        assert!(matches!(AppConfig::load(), Err(ConfigError::InvalidLimit)));
        env::set_var("APP_RESULT_LIMIT", "lots");
        assert!(matches!(AppConfig::load(), Err(ConfigError::InvalidLimit)));
        reset_env();
    }

    #[test]
    fn rejects_non_http_endpoints() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_BUSINESS_ENDPOINT", "ftp://data.seattle.gov/x");
        match AppConfig::load() {
            Err(ConfigError::InvalidEndpoint { variable }) => {
                assert_eq!(variable, "APP_BUSINESS_ENDPOINT")
            }
            other => panic!("expected invalid endpoint, got {other:?}"),
        }
        reset_env();
    }
}
