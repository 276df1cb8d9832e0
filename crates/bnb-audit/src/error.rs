use crate::config::ConfigError;
use crate::sources::{FetchError, FixtureError, TransportError};
use crate::telemetry::TelemetryError;
use crate::workflows::ReportError;
use std::fmt;

/// Terminal error for a run, tagged with the stage that failed.
#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Client(TransportError),
    Fixture(FixtureError),
    RentalFetch(FetchError),
    BusinessFetch(FetchError),
    ReportWrite(ReportError),
    Summary(serde_json::Error),
}

impl AppError {
    pub fn stage(&self) -> &'static str {
        match self {
            AppError::Config(_) => "configuration",
            AppError::Telemetry(_) => "telemetry",
            AppError::Client(_) => "http client setup",
            AppError::Fixture(_) => "fixture load",
            AppError::RentalFetch(_) => "rental license fetch",
            AppError::BusinessFetch(_) => "business license fetch",
            AppError::ReportWrite(_) => "report write",
            AppError::Summary(_) => "summary output",
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = self.stage();
        match self {
            AppError::Config(err) => write!(f, "{stage} error: {err}"),
            AppError::Telemetry(err) => write!(f, "{stage} error: {err}"),
            AppError::Client(err) => write!(f, "{stage} failed: {err}"),
            AppError::Fixture(err) => write!(f, "{stage} failed: {err}"),
            AppError::RentalFetch(err) => write!(f, "{stage} failed: {err}"),
            AppError::BusinessFetch(err) => write!(f, "{stage} failed: {err}"),
            AppError::ReportWrite(err) => write!(f, "{stage} failed: {err}"),
            AppError::Summary(err) => write!(f, "{stage} failed: {err}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Client(err) => Some(err),
            AppError::Fixture(err) => Some(err),
            AppError::RentalFetch(err) => Some(err),
            AppError::BusinessFetch(err) => Some(err),
            AppError::ReportWrite(err) => Some(err),
            AppError::Summary(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<FixtureError> for AppError {
    fn from(value: FixtureError) -> Self {
        Self::Fixture(value)
    }
}

impl From<ReportError> for AppError {
    fn from(value: ReportError) -> Self {
        Self::ReportWrite(value)
    }
}
