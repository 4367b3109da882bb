// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides common database, auth, and server resource helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RecipeShare contributors

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

//! Shared test utilities for `recipeshare_server`
//!
//! Common setup functions to reduce duplication across integration tests.

use anyhow::Result;
use recipeshare_server::{
    auth::AuthManager,
    config::environment::{
        AuthConfig, DatabaseConfig, DatabaseUrl, Environment, ImageServiceConfig, LogLevel,
        SecurityConfig, ServerConfig,
    },
    database::Database,
    server::{HttpServer, ServerResources},
};
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard in-memory test database
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    let database = Database::connect("sqlite::memory:").await?;
    Ok(database)
}

/// Test authentication manager with a fixed secret and short expiry
pub fn create_test_auth_manager() -> AuthManager {
    AuthManager::new(b"test_jwt_secret_for_integration_tests", 24)
}

/// Test configuration built directly rather than from environment
/// variables, so tests do not race on the process environment.
///
/// Image host credentials are dummy values: endpoints that only build
/// delivery URLs work offline, and no test performs a real upload.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        http_port: 8080,
        log_level: LogLevel::Warn,
        environment: Environment::Testing,
        database: DatabaseConfig {
            url: DatabaseUrl::Memory,
        },
        auth: AuthConfig {
            jwt_secret: Some("test_jwt_secret_for_integration_tests".into()),
            jwt_expiry_hours: 24,
        },
        image_service: ImageServiceConfig {
            cloud_name: Some("test-cloud".into()),
            api_key: Some("test-api-key".into()),
            api_secret: Some("test-api-secret".into()),
            folder: "recipeshare-test".into(),
        },
        security: SecurityConfig {
            cors_origins: vec!["*".into()],
        },
    }
}

/// Test configuration without image host credentials
pub fn test_config_without_images() -> ServerConfig {
    let mut config = test_config();
    config.image_service = ImageServiceConfig {
        cloud_name: None,
        api_key: None,
        api_secret: None,
        folder: "recipeshare-test".into(),
    };
    config
}

/// Full server resources backed by an in-memory database
pub async fn create_test_resources() -> Result<Arc<ServerResources>> {
    create_test_resources_with_config(test_config()).await
}

/// Server resources with a caller-supplied configuration
pub async fn create_test_resources_with_config(
    config: ServerConfig,
) -> Result<Arc<ServerResources>> {
    let database = create_test_database().await?;
    let auth_manager = create_test_auth_manager();
    Ok(Arc::new(ServerResources::new(
        database,
        auth_manager,
        config,
    )))
}

/// The complete application router, middleware layers included
pub fn test_app(resources: Arc<ServerResources>) -> axum::Router {
    HttpServer::new(resources).router()
}
