// ABOUTME: Route handlers for rated comments nested under recipes
// ABOUTME: Anonymous posting allowed, invalid bearer tokens degrade to anonymous
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RecipeShare contributors

//! Comment routes
//!
//! Comments live under `/api/recipes/:id/comments`. Posting works with
//! or without a session; a valid token attributes the comment, anything
//! else posts as "Anonymous".

use crate::database::CreateCommentRequest;
use crate::errors::AppError;
use crate::pagination::{PageQuery, PageWindow};
use crate::routes::authenticate_optional;
use crate::server::ServerResources;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

/// Comment routes handler
pub struct CommentsRoutes;

impl CommentsRoutes {
    /// Create all comment routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/recipes/:id/comments", get(Self::handle_list))
            .route("/api/recipes/:id/comments", post(Self::handle_add))
            .with_state(resources)
    }

    /// Handle GET /api/recipes/:id/comments - List approved comments
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
        Query(query): Query<PageQuery>,
    ) -> Result<Response, AppError> {
        // 404 before paging so a bad recipe ID is not an empty list
        resources
            .database
            .recipes()
            .get(&id)
            .await?
            .ok_or_else(|| AppError::not_found("Recipe"))?;

        let window = PageWindow::from_query(query);
        let (comments, total) = resources.database.comments().list(&id, &window).await?;

        Ok((
            StatusCode::OK,
            Json(json!({
                "comments": comments,
                "total": total,
                "page": window.page,
                "pages": window.pages(total),
            })),
        )
            .into_response())
    }

    /// Handle POST /api/recipes/:id/comments - Add a rated comment
    async fn handle_add(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        Json(mut body): Json<CreateCommentRequest>,
    ) -> Result<Response, AppError> {
        let author = authenticate_optional(&headers, &resources)
            .await
            .map(|user| (user.id, user.name));

        let rating = body.validate()?;
        let (comment, aggregate) = resources
            .database
            .comments()
            .add(&id, author, &body.content, rating)
            .await?;

        info!(
            recipe.id = %id,
            comment.rating = rating,
            recipe.rating = aggregate.rating,
            recipe.review_count = aggregate.review_count,
            "Comment added"
        );

        Ok((StatusCode::CREATED, Json(comment)).into_response())
    }
}
