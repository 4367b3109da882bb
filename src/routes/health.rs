// ABOUTME: Health check and ping route handlers for service monitoring
// ABOUTME: Reports service identity, database connectivity, and image host status
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RecipeShare contributors

//! Health check routes for service monitoring

use crate::constants::service_names;
use crate::server::ServerResources;
use axum::{extract::State, routing::get, Json, Router};
use std::env;
use std::sync::Arc;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/health", get(Self::handle_health))
            .route("/api/ping", get(Self::handle_ping))
            .with_state(resources)
    }

    /// Handle GET /health - Service status for load balancers
    async fn handle_health(
        State(resources): State<Arc<ServerResources>>,
    ) -> Json<serde_json::Value> {
        let database_ok = !resources.database.pool().is_closed();

        Json(serde_json::json!({
            "status": if database_ok { "healthy" } else { "degraded" },
            "service": service_names::RECIPESHARE_SERVER,
            "version": env!("CARGO_PKG_VERSION"),
            "database": if database_ok { "connected" } else { "closed" },
            "imageService": if resources.cloudinary.is_some() { "configured" } else { "unconfigured" },
            "timestamp": chrono::Utc::now().to_rfc3339(),
        }))
    }

    /// Handle GET /api/ping - Trivial liveness probe
    async fn handle_ping() -> Json<serde_json::Value> {
        let message = env::var("PING_MESSAGE").unwrap_or_else(|_| "ping".into());
        Json(serde_json::json!({ "message": message }))
    }
}
