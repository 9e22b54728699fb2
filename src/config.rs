//! Configuration module
//!
//! Reads a TOML file (default: `<config dir>/reservation-service/config.toml`,
//! overridable with the `RESERVATION_CONFIG` env var). Missing sections fall
//! back to defaults, so an empty file is a valid configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::infrastructure::messaging::{PAYMENT_UPDATE_GROUP, PAYMENT_UPDATE_TOPIC};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSettings,
    pub logging: LoggingConfig,
    pub payments: PaymentsConfig,
    pub messaging: MessagingConfig,
    pub sweep: SweepConfig,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }
}

/// REST API server settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub api_host: String,
    pub api_port: u16,
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_host: "0.0.0.0".to_string(),
            api_port: 8080,
        }
    }
}

/// Database settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Database URL (e.g., "sqlite://./reservations.db?mode=rwc")
    pub url: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: "sqlite://./reservations.db?mode=rwc".to_string(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing filter (overridable with RUST_LOG)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Card-payment service settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PaymentsConfig {
    /// Payment-status endpoint of the external card-payment service
    pub card_service_url: String,
}

impl Default for PaymentsConfig {
    fn default() -> Self {
        Self {
            card_service_url: "http://localhost:8081/api/v1/payment-status".to_string(),
        }
    }
}

/// Kafka settings for the bank-transfer payment update listener
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MessagingConfig {
    pub enabled: bool,
    pub brokers: String,
    pub topic: String,
    pub group_id: String,
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            brokers: "localhost:9092".to_string(),
            topic: PAYMENT_UPDATE_TOPIC.to_string(),
            group_id: PAYMENT_UPDATE_GROUP.to_string(),
        }
    }
}

/// Overdue-cancellation sweep settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Seconds between sweep runs; the default runs once a day
    pub interval_secs: u64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            interval_secs: 24 * 60 * 60,
        }
    }
}

/// Default config file location
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("reservation-service")
        .join("config.toml")
}

// ── Tests ──────────────────────────────────────────────────────
