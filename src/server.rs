// ABOUTME: HTTP server assembly wiring routes, shared resources, and middleware
// ABOUTME: Owns startup, layered tower-http middleware, and graceful shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RecipeShare contributors

//! HTTP server assembly
//!
//! [`ServerResources`] bundles the database handle, auth manager, and
//! the optional image host client. It is created once at startup and
//! shared across all handlers via `Arc`.

use crate::auth::AuthManager;
use crate::config::environment::ServerConfig;
use crate::constants::limits;
use crate::database::Database;
use crate::external::{CloudinaryClient, CloudinaryConfig};
use crate::routes::{
    AuthRoutes, CommentsRoutes, HealthRoutes, RecipesRoutes, UploadsRoutes,
};
use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Shared resources for all request handlers
pub struct ServerResources {
    /// Database handle
    pub database: Database,
    /// JWT authentication manager
    pub auth_manager: AuthManager,
    /// Image host client; `None` when credentials are not configured
    pub cloudinary: Option<CloudinaryClient>,
    /// Server configuration
    pub config: ServerConfig,
}

impl ServerResources {
    /// Assemble resources from configuration and a connected database
    #[must_use]
    pub fn new(database: Database, auth_manager: AuthManager, config: ServerConfig) -> Self {
        let cloudinary = CloudinaryConfig::from_image_service(&config.image_service)
            .map(CloudinaryClient::new);
        if cloudinary.is_none() {
            warn!("Image host credentials not set, upload endpoints will report unconfigured");
        }

        Self {
            database,
            auth_manager,
            cloudinary,
            config,
        }
    }
}

/// RecipeShare HTTP server
pub struct HttpServer {
    resources: Arc<ServerResources>,
}

impl HttpServer {
    /// Create a new server around shared resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Build the full application router with middleware layers
    #[must_use]
    pub fn router(&self) -> Router {
        let cors = build_cors_layer(&self.resources.config.security.cors_origins);

        Router::new()
            .merge(HealthRoutes::routes(self.resources.clone()))
            .merge(AuthRoutes::routes(self.resources.clone()))
            .merge(RecipesRoutes::routes(self.resources.clone()))
            .merge(CommentsRoutes::routes(self.resources.clone()))
            .merge(UploadsRoutes::routes(self.resources.clone()))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .layer(TimeoutLayer::new(Duration::from_secs(
                limits::REQUEST_TIMEOUT_SECS,
            )))
            .layer(RequestBodyLimitLayer::new(limits::MAX_BODY_BYTES))
    }

    /// Bind the listener and serve until shutdown
    ///
    /// # Errors
    ///
    /// Returns an error if binding or serving fails
    pub async fn run(self, port: u16) -> Result<()> {
        let app = self.router();

        let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
            .await
            .with_context(|| format!("Failed to bind HTTP server to port {port}"))?;

        info!(port = port, "HTTP server listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP server error")?;

        info!("HTTP server shut down");
        Ok(())
    }
}

/// Build the CORS layer from configured origins; `*` allows any origin
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let parsed: Vec<axum::http::HeaderValue> = origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(tower_http::cors::AllowOrigin::list(parsed))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Resolve on SIGINT or SIGTERM for graceful shutdown
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => warn!("Failed to install SIGTERM handler: {e}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
