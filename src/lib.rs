// ABOUTME: Main library entry point for the RecipeShare API server
// ABOUTME: Provides REST endpoints for recipes, comments, authentication, and image uploads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RecipeShare contributors

#![deny(unsafe_code)]

//! # RecipeShare Server
//!
//! A REST API server for sharing, rating, and discovering recipes.
//! Users sign up, publish recipes with images, and leave rated comments;
//! every comment write recomputes the recipe's displayed rating from the
//! full set of approved comments.
//!
//! ## Architecture
//!
//! - **Database**: sqlx/SQLite store with per-entity managers
//! - **Auth**: HS256 JWT tokens plus bcrypt password hashing
//! - **Routes**: axum routers per resource (auth, recipes, comments, uploads)
//! - **External**: Cloudinary client for hosted image storage
//! - **Config**: environment-driven configuration with typed sections
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use recipeshare_server::config::environment::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("RecipeShare server configured for port {}", config.http_port);
//!     Ok(())
//! }
//! ```

/// JWT-based authentication and password verification
pub mod auth;

/// Environment-driven configuration management
pub mod config;

/// Application constants: limits and shared error messages
pub mod constants;

/// Database handle, migrations, and per-entity managers
pub mod database;

/// Unified error handling with standard error codes and HTTP responses
pub mod errors;

/// External service clients (Cloudinary image host)
pub mod external;

/// Production logging and structured output
pub mod logging;

/// Page/limit parsing and paged response envelopes
pub mod pagination;

/// HTTP route handlers for the REST API
pub mod routes;

/// Server resources and HTTP server composition
pub mod server;
