// ABOUTME: Route handlers for the recipes REST API
// ABOUTME: Public listing and detail, owner-gated create/update/delete
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RecipeShare contributors

//! Recipe routes
//!
//! Listing and detail are public. Mutations require a valid JWT, and
//! update/delete additionally require ownership of the recipe.

use crate::database::{CreateRecipeRequest, ListRecipesFilter, UpdateRecipeRequest};
use crate::errors::AppError;
use crate::pagination::{PageQuery, PageWindow};
use crate::routes::authenticate;
use crate::server::ServerResources;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

/// Query parameters for listing recipes
#[derive(Debug, Deserialize, Default)]
pub struct ListRecipesQuery {
    /// Filter by category name; `All` matches everything
    pub category: Option<String>,
    /// Filter by difficulty name; `All` matches everything
    pub difficulty: Option<String>,
    /// Free-text search over title, description, and tags
    pub search: Option<String>,
    /// 1-based page number
    pub page: Option<u32>,
    /// Page size, clamped server-side
    pub limit: Option<u32>,
}

/// Recipe routes handler
pub struct RecipesRoutes;

impl RecipesRoutes {
    /// Create all recipe routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/recipes", get(Self::handle_list))
            .route("/api/recipes", post(Self::handle_create))
            .route("/api/recipes/user/:user_id", get(Self::handle_list_by_user))
            .route("/api/recipes/:id", get(Self::handle_get))
            .route("/api/recipes/:id", put(Self::handle_update))
            .route("/api/recipes/:id", delete(Self::handle_delete))
            .with_state(resources)
    }

    /// Handle GET /api/recipes - List published recipes
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<ListRecipesQuery>,
    ) -> Result<Response, AppError> {
        let window = PageWindow::from_query(PageQuery {
            page: query.page,
            limit: query.limit,
        });
        let filter = ListRecipesFilter {
            category: query.category,
            difficulty: query.difficulty,
            search: query.search,
        };

        let (recipes, total) = resources.database.recipes().list(&filter, &window).await?;

        Ok((
            StatusCode::OK,
            Json(json!({
                "recipes": recipes,
                "total": total,
                "page": window.page,
                "pages": window.pages(total),
                "hasMore": window.has_more(total),
            })),
        )
            .into_response())
    }

    /// Handle GET /api/recipes/:id - Get a single recipe
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let recipe = resources
            .database
            .recipes()
            .get(&id)
            .await?
            .ok_or_else(|| AppError::not_found("Recipe"))?;

        Ok((StatusCode::OK, Json(recipe)).into_response())
    }

    /// Handle POST /api/recipes - Create a recipe
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(mut body): Json<CreateRecipeRequest>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources).await?;
        body.validate()?;

        let recipe = resources
            .database
            .recipes()
            .create(user.id, &user.name, &body)
            .await?;

        info!(recipe.id = %recipe.id, user.id = %user.id, "Recipe created");
        Ok((StatusCode::CREATED, Json(recipe)).into_response())
    }

    /// Handle PUT /api/recipes/:id - Update an owned recipe
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        Json(body): Json<UpdateRecipeRequest>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources).await?;

        let manager = resources.database.recipes();
        let existing = manager
            .get(&id)
            .await?
            .ok_or_else(|| AppError::not_found("Recipe"))?;

        if existing.author != user.id {
            return Err(AppError::permission_denied(
                "Not authorized to update this recipe",
            ));
        }

        let merged = body.merge_into(&existing)?;
        let updated = manager
            .update(&id, &merged)
            .await?
            .ok_or_else(|| AppError::not_found("Recipe"))?;

        Ok((StatusCode::OK, Json(updated)).into_response())
    }

    /// Handle DELETE /api/recipes/:id - Delete an owned recipe
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources).await?;

        let manager = resources.database.recipes();
        let existing = manager
            .get(&id)
            .await?
            .ok_or_else(|| AppError::not_found("Recipe"))?;

        if existing.author != user.id {
            return Err(AppError::permission_denied(
                "Not authorized to delete this recipe",
            ));
        }

        manager.delete(&id).await?;
        info!(recipe.id = %id, user.id = %user.id, "Recipe deleted");

        // Stored image cleanup is best effort, the recipe row is gone either way
        if let (Some(client), Some(public_id)) =
            (&resources.cloudinary, &existing.image_public_id)
        {
            if let Err(e) = client.delete(public_id).await {
                warn!(public_id = %public_id, "Failed to delete recipe image: {e}");
            }
        }

        Ok((
            StatusCode::OK,
            Json(json!({ "message": "Recipe deleted successfully" })),
        )
            .into_response())
    }

    /// Handle GET /api/recipes/user/:user_id - List a user's recipes
    async fn handle_list_by_user(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
        Query(query): Query<PageQuery>,
    ) -> Result<Response, AppError> {
        let window = PageWindow::from_query(query);
        let (recipes, total) = resources
            .database
            .recipes()
            .list_by_user(&user_id, &window)
            .await?;

        Ok((
            StatusCode::OK,
            Json(json!({
                "recipes": recipes,
                "total": total,
                "page": window.page,
                "pages": window.pages(total),
            })),
        )
            .into_response())
    }
}
