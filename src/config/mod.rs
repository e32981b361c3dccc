use std::env;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::assessment::scoring::WeightConfig;
use crate::results::BlendConfig;

/// Distinguishes runtime behavior for different stages of the service.
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

/// Top-level configuration for the engine host.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub engine: EngineConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let ansi = env::var("APP_LOG_ANSI")
            .map(|value| value.trim() == "1" || value.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let journey_days = env::var("ARCANUM_JOURNEY_DAYS")
            .unwrap_or_else(|_| "7".to_string())
            .parse::<u32>()
            .ok()
            .filter(|days| *days >= 1)
            .ok_or(ConfigError::InvalidJourneyDays)?;

        let max_retained_uploads = env::var("ARCANUM_UPLOAD_CAP")
            .unwrap_or_else(|_| "24".to_string())
            .parse::<usize>()
            .ok()
            .filter(|cap| *cap >= 1)
            .ok_or(ConfigError::InvalidUploadCap)?;

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level, ansi },
            engine: EngineConfig {
                journey_days,
                max_retained_uploads,
                weights: WeightConfig::default(),
                blend: BlendConfig::default(),
            },
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub ansi: bool,
}

/// Engine tunables shared by the services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub journey_days: u32,
    pub max_retained_uploads: usize,
    pub weights: WeightConfig,
    pub blend: BlendConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            journey_days: 7,
            max_retained_uploads: 24,
            weights: WeightConfig::default(),
            blend: BlendConfig::default(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidJourneyDays,
    InvalidUploadCap,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidJourneyDays => {
                write!(f, "ARCANUM_JOURNEY_DAYS must be a positive integer")
            }
            ConfigError::InvalidUploadCap => {
                write!(f, "ARCANUM_UPLOAD_CAP must be a positive integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
