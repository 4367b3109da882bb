// ABOUTME: Main server binary for the RecipeShare REST API
// ABOUTME: Loads configuration, connects the database, and serves HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RecipeShare contributors

//! # RecipeShare API Server Binary
//!
//! Starts the recipe-sharing REST API with JWT authentication, SQLite
//! storage, and Cloudinary-backed image uploads.

use anyhow::Result;
use clap::Parser;
use recipeshare_server::{
    auth::{generate_jwt_secret, AuthManager},
    config::environment::ServerConfig,
    database::Database,
    logging,
    server::{HttpServer, ServerResources},
};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "recipeshare-server")]
#[command(about = "RecipeShare API - recipe sharing backend with rated comments")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    logging::init_from_env()?;

    info!("Starting RecipeShare API server");
    info!("{}", config.summary());

    let database = Database::connect(&config.database.url.to_connection_string()).await?;

    let auth_manager = match &config.auth.jwt_secret {
        Some(secret) => AuthManager::new(secret.as_bytes(), config.auth.jwt_expiry_hours),
        None => {
            warn!("JWT_SECRET not set, generating an ephemeral secret; tokens will not survive a restart");
            AuthManager::new(&generate_jwt_secret(), config.auth.jwt_expiry_hours)
        }
    };

    let port = config.http_port;
    let resources = Arc::new(ServerResources::new(database, auth_manager, config));

    info!("API available at http://localhost:{port}/api");
    info!("  POST /api/auth/signup, /api/auth/login  GET /api/auth/me");
    info!("  GET/POST /api/recipes  GET/PUT/DELETE /api/recipes/:id");
    info!("  GET/POST /api/recipes/:id/comments");
    info!("  POST /api/upload, /api/upload/url");

    HttpServer::new(resources).run(port).await
}
