// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, typed sub-configs, and defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RecipeShare contributors

//! Environment-based configuration management for production deployment

use crate::constants::limits;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use tracing::warn;

/// Strongly typed log level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Environment type for deployment-dependent behavior
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Type-safe database location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// SQLite database with file path
    SQLite { path: PathBuf },
    /// In-memory SQLite (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from a connection string
    #[must_use]
    pub fn parse_url(s: &str) -> Self {
        let path_str = s.strip_prefix("sqlite:").unwrap_or(s);
        if path_str == ":memory:" {
            Self::Memory
        } else {
            Self::SQLite {
                path: PathBuf::from(path_str),
            }
        }
    }

    /// Render as a sqlx connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".into(),
        }
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from("data/recipeshare.db"),
        }
    }
}

/// Top-level server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Log level
    pub log_level: LogLevel,
    /// Deployment environment
    pub environment: Environment,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Authentication configuration
    pub auth: AuthConfig,
    /// Image host configuration
    pub image_service: ImageServiceConfig,
    /// Security settings
    pub security: SecurityConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL (SQLite path or `:memory:`)
    pub url: DatabaseUrl,
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared JWT signing secret; generated per-process when unset
    pub jwt_secret: Option<String>,
    /// JWT expiry time in hours
    pub jwt_expiry_hours: i64,
}

/// Cloudinary image host configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageServiceConfig {
    /// Cloudinary cloud name
    pub cloud_name: Option<String>,
    /// Cloudinary API key
    pub api_key: Option<String>,
    /// Cloudinary API secret
    pub api_secret: Option<String>,
    /// Folder to group uploads under
    pub folder: String,
}

impl ImageServiceConfig {
    /// Whether enough credentials are present to serve uploads
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.cloud_name.is_some() && self.api_key.is_some() && self.api_secret.is_some()
    }
}

/// Security settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// CORS allowed origins; `*` allows any
    pub cors_origins: Vec<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a present variable fails to parse
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        if dotenvy::dotenv().is_err() {
            warn!("No .env file found, using process environment only");
        }

        let config = Self {
            http_port: env_var_or("HTTP_PORT", "8080")?
                .parse()
                .context("Invalid HTTP_PORT value")?,
            log_level: LogLevel::from_str_or_default(&env_var_or("LOG_LEVEL", "info")?),
            environment: Environment::from_str_or_default(&env_var_or(
                "ENVIRONMENT",
                "development",
            )?),
            database: DatabaseConfig {
                url: DatabaseUrl::parse_url(&env_var_or(
                    "DATABASE_URL",
                    "sqlite:data/recipeshare.db",
                )?),
            },
            auth: AuthConfig {
                jwt_secret: env::var("JWT_SECRET").ok(),
                jwt_expiry_hours: env_var_or(
                    "JWT_EXPIRY_HOURS",
                    &limits::DEFAULT_JWT_EXPIRY_HOURS.to_string(),
                )?
                .parse()
                .context("Invalid JWT_EXPIRY_HOURS value")?,
            },
            image_service: ImageServiceConfig {
                cloud_name: env::var("CLOUDINARY_CLOUD_NAME").ok(),
                api_key: env::var("CLOUDINARY_API_KEY").ok(),
                api_secret: env::var("CLOUDINARY_API_SECRET").ok(),
                folder: env_var_or("CLOUDINARY_FOLDER", "recipeshare")?,
            },
            security: SecurityConfig {
                cors_origins: parse_origins(&env_var_or("CORS_ORIGINS", "*")?),
            },
        };

        Ok(config)
    }

    /// One-line startup summary for logging
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "port={} env={:?} db={} images={}",
            self.http_port,
            self.environment,
            self.database.url.to_connection_string(),
            if self.image_service.is_configured() {
                "configured"
            } else {
                "unconfigured"
            }
        )
    }
}

/// Read an environment variable with a fallback default
fn env_var_or(key: &str, default: &str) -> Result<String> {
    Ok(env::var(key).unwrap_or_else(|_| default.to_owned()))
}

/// Split a comma-separated origin list
fn parse_origins(origins: &str) -> Vec<String> {
    origins
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_url_parsing() {
        assert!(matches!(
            DatabaseUrl::parse_url("sqlite::memory:"),
            DatabaseUrl::Memory
        ));
        let file = DatabaseUrl::parse_url("sqlite:data/app.db");
        assert_eq!(file.to_connection_string(), "sqlite:data/app.db");
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str_or_default("DEBUG"), LogLevel::Debug);
        assert_eq!(LogLevel::from_str_or_default("bogus"), LogLevel::Info);
    }

    #[test]
    fn test_environment_parsing() {
        assert!(Environment::from_str_or_default("prod").is_production());
        assert!(!Environment::from_str_or_default("dev").is_production());
    }

    #[test]
    fn test_parse_origins() {
        let origins = parse_origins("https://a.example, https://b.example");
        assert_eq!(origins.len(), 2);
        assert_eq!(origins[0], "https://a.example");
    }

    #[test]
    fn test_image_service_configuration() {
        let unconfigured = ImageServiceConfig {
            cloud_name: None,
            api_key: None,
            api_secret: None,
            folder: "recipeshare".into(),
        };
        assert!(!unconfigured.is_configured());
    }
}
