// ABOUTME: REST API route handlers grouped per resource
// ABOUTME: Each submodule exposes an XRoutes struct with a routes() constructor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RecipeShare contributors

//! HTTP route handlers
//!
//! Each resource gets its own `XRoutes` struct whose `routes()` builds
//! an axum `Router` over the shared [`crate::server::ServerResources`].

pub mod auth;
pub mod comments;
pub mod health;
pub mod recipes;
pub mod uploads;

pub use auth::AuthRoutes;
pub use comments::CommentsRoutes;
pub use health::HealthRoutes;
pub use recipes::RecipesRoutes;
pub use uploads::UploadsRoutes;

use crate::database::User;
use crate::errors::{AppError, AppResult};
use crate::server::ServerResources;
use axum::http::HeaderMap;
use std::sync::Arc;

/// Authenticate a request from its `Authorization: Bearer` header
///
/// Resolves the token to a full user record so handlers can use the
/// display name without a second lookup.
///
/// # Errors
///
/// Returns 401 errors for missing or invalid tokens, and
/// `ResourceNotFound` if the token's user no longer exists
pub(crate) async fn authenticate(
    headers: &HeaderMap,
    resources: &Arc<ServerResources>,
) -> AppResult<User> {
    let auth_header = headers.get("authorization").and_then(|h| h.to_str().ok());
    let token = crate::auth::extract_bearer_token(auth_header)?;
    let user_id = resources.auth_manager.user_id_from_token(token)?;

    resources
        .database
        .users()
        .get_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User"))
}

/// Authenticate if a bearer token is present, degrading to anonymous
///
/// Invalid tokens also degrade to anonymous rather than failing, which
/// keeps comment posting open to logged-out readers.
pub(crate) async fn authenticate_optional(
    headers: &HeaderMap,
    resources: &Arc<ServerResources>,
) -> Option<User> {
    let auth_header = headers.get("authorization").and_then(|h| h.to_str().ok())?;
    if !auth_header.starts_with("Bearer ") {
        return None;
    }
    authenticate(headers, resources).await.ok()
}
