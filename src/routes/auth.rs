// ABOUTME: Route handlers for signup, login, and current-user lookup
// ABOUTME: Issues JWTs and verifies bcrypt password hashes off the async runtime
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RecipeShare contributors

//! Authentication routes
//!
//! Signup and login both return the same `{user, token}` shape so the
//! client can store the session immediately after either call.

use crate::constants::{error_messages, limits};
use crate::database::User;
use crate::errors::{AppError, AppResult};
use crate::routes::authenticate;
use crate::server::ServerResources;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

/// Request body for signup
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Request body for login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Authentication routes handler
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/auth/signup", post(Self::handle_signup))
            .route("/api/auth/login", post(Self::handle_login))
            .route("/api/auth/me", get(Self::handle_me))
            .with_state(resources)
    }

    /// Handle POST /api/auth/signup - Register a new account
    async fn handle_signup(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<SignupRequest>,
    ) -> Result<Response, AppError> {
        if body.email.trim().is_empty() || body.password.is_empty() || body.name.trim().is_empty() {
            return Err(AppError::invalid_input(
                "Email, password, and name are required",
            ));
        }
        if body.password.chars().count() < limits::MIN_PASSWORD_LENGTH {
            return Err(AppError::invalid_input(
                "Password must be at least 6 characters",
            ));
        }
        if body.name.trim().chars().count() < limits::MIN_NAME_LENGTH {
            return Err(AppError::invalid_input("Name must be at least 2 characters"));
        }

        let password_hash = hash_password(body.password).await?;
        let user = resources
            .database
            .users()
            .create(&body.email, body.name.trim(), &password_hash)
            .await?;

        let token = resources.auth_manager.generate_token(user.id, &user.email)?;
        info!(user.id = %user.id, "User signed up");

        Ok((StatusCode::CREATED, Json(session_response(&user, &token))).into_response())
    }

    /// Handle POST /api/auth/login - Authenticate an existing account
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<LoginRequest>,
    ) -> Result<Response, AppError> {
        if body.email.trim().is_empty() || body.password.is_empty() {
            return Err(AppError::invalid_input("Email and password are required"));
        }

        // Unknown email and wrong password return the same message so
        // account existence cannot be probed.
        let user = resources
            .database
            .users()
            .get_by_email(&body.email)
            .await?
            .ok_or_else(|| AppError::auth_invalid(error_messages::INVALID_CREDENTIALS))?;

        let valid = verify_password(body.password, user.password_hash.clone()).await?;
        if !valid {
            return Err(AppError::auth_invalid(error_messages::INVALID_CREDENTIALS));
        }

        let token = resources.auth_manager.generate_token(user.id, &user.email)?;
        info!(user.id = %user.id, "User logged in");

        Ok((StatusCode::OK, Json(session_response(&user, &token))).into_response())
    }

    /// Handle GET /api/auth/me - Return the authenticated user
    async fn handle_me(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources).await?;
        Ok((StatusCode::OK, Json(user.to_public_json())).into_response())
    }
}

/// Session payload returned by signup and login
fn session_response(user: &User, token: &str) -> serde_json::Value {
    json!({
        "user": user.to_public_json(),
        "token": token,
    })
}

/// Hash a password on the blocking pool
///
/// Bcrypt takes tens of milliseconds by design, too long to run on a
/// runtime worker thread.
async fn hash_password(password: String) -> AppResult<String> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
}

/// Verify a password against its hash on the blocking pool
async fn verify_password(password: String, hash: String) -> AppResult<bool> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?
        .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))
}
