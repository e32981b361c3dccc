use std::fmt;

use crate::assessment::classify::ClassifyError;
use crate::assessment::domain::ValidationError;
use crate::assessment::repository::RepositoryError;
use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::progression::domain::JourneyError;
use crate::telemetry::TelemetryError;

/// Top-level error for hosts embedding the engine.
#[derive(Debug)]
pub enum CoreError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Validation(ValidationError),
    Classify(ClassifyError),
    Journey(JourneyError),
    Repository(RepositoryError),
    Catalog(CatalogError),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::Config(err) => write!(f, "configuration error: {}", err),
            CoreError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            CoreError::Validation(err) => write!(f, "validation error: {}", err),
            CoreError::Classify(err) => write!(f, "classification error: {}", err),
            CoreError::Journey(err) => write!(f, "journey error: {}", err),
            CoreError::Repository(err) => write!(f, "repository error: {}", err),
            CoreError::Catalog(err) => write!(f, "catalog error: {}", err),
        }
    }
}

impl std::error::Error for CoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CoreError::Config(err) => Some(err),
            CoreError::Telemetry(err) => Some(err),
            CoreError::Validation(err) => Some(err),
            CoreError::Classify(err) => Some(err),
            CoreError::Journey(err) => Some(err),
            CoreError::Repository(err) => Some(err),
            CoreError::Catalog(err) => Some(err),
        }
    }
}

impl From<ConfigError> for CoreError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for CoreError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<ValidationError> for CoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<ClassifyError> for CoreError {
    fn from(value: ClassifyError) -> Self {
        Self::Classify(value)
    }
}

impl From<JourneyError> for CoreError {
    fn from(value: JourneyError) -> Self {
        Self::Journey(value)
    }
}

impl From<RepositoryError> for CoreError {
    fn from(value: RepositoryError) -> Self {
        Self::Repository(value)
    }
}

impl From<CatalogError> for CoreError {
    fn from(value: CatalogError) -> Self {
        Self::Catalog(value)
    }
}
