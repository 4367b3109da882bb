// ABOUTME: Route handlers for image upload, import, deletion, and info
// ABOUTME: Validates multipart uploads locally before forwarding to the image host
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RecipeShare contributors

//! Image upload routes
//!
//! File content never touches disk; the multipart body is buffered and
//! forwarded straight to the image host.

use crate::constants::limits;
use crate::errors::AppError;
use crate::external::{CloudinaryClient, UploadedImage};
use crate::routes::authenticate;
use crate::server::ServerResources;
use axum::{
    extract::{Multipart, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use regex::Regex;
use serde::Deserialize;
use serde_json::json;
use std::sync::LazyLock;
use tracing::info;

/// Accepted remote image URL shape for URL imports
static IMAGE_URL_FORMAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^https?://.+\.(jpg|jpeg|png|webp|gif)(\?.*)?$")
        .unwrap_or_else(|_| unreachable!())
});

/// Request body for importing an image from a remote URL
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadFromUrlRequest {
    pub image_url: String,
}

/// Request body for deleting an image
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteImageRequest {
    pub public_id: String,
}

/// Upload routes handler
pub struct UploadsRoutes;

impl UploadsRoutes {
    /// Create all upload routes
    pub fn routes(resources: std::sync::Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/upload", post(Self::handle_upload))
            .route("/api/upload/url", post(Self::handle_upload_from_url))
            .route("/api/upload", delete(Self::handle_delete))
            .route("/api/upload/:public_id", get(Self::handle_image_info))
            .with_state(resources)
    }

    /// Get the image host client, or fail when credentials are absent
    fn client(resources: &ServerResources) -> Result<&CloudinaryClient, AppError> {
        resources.cloudinary.as_ref().ok_or_else(|| {
            AppError::config("Image upload service not configured. Please contact administrator.")
        })
    }

    /// Handle POST /api/upload - Upload an image file
    async fn handle_upload(
        State(resources): State<std::sync::Arc<ServerResources>>,
        headers: HeaderMap,
        mut multipart: Multipart,
    ) -> Result<Response, AppError> {
        authenticate(&headers, &resources).await?;
        let client = Self::client(&resources)?;

        let mut upload: Option<(Vec<u8>, String)> = None;
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::invalid_input(format!("Malformed multipart body: {e}")))?
        {
            if field.name() != Some("image") {
                continue;
            }

            let content_type = field.content_type().unwrap_or_default().to_owned();
            if !content_type.starts_with("image/") {
                return Err(AppError::invalid_input(
                    "Only image files (JPG, PNG, WebP) are allowed.",
                ));
            }

            let file_name = field.file_name().unwrap_or("upload").to_owned();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::invalid_input(format!("Failed to read upload: {e}")))?;
            if bytes.len() > limits::MAX_UPLOAD_BYTES {
                return Err(AppError::invalid_input(
                    "File too large. Maximum size is 5MB.",
                ));
            }

            upload = Some((bytes.to_vec(), file_name));
            break;
        }

        let (bytes, file_name) =
            upload.ok_or_else(|| AppError::invalid_input("No image file provided"))?;

        let image = client.upload_bytes(bytes, &file_name).await?;
        info!(public_id = %image.public_id, bytes = image.bytes, "Image uploaded");

        Ok((
            StatusCode::OK,
            Json(json!({
                "message": "Image uploaded successfully",
                "image": image_payload(client, &image),
            })),
        )
            .into_response())
    }

    /// Handle POST /api/upload/url - Import an image from a remote URL
    async fn handle_upload_from_url(
        State(resources): State<std::sync::Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<UploadFromUrlRequest>,
    ) -> Result<Response, AppError> {
        authenticate(&headers, &resources).await?;

        if body.image_url.is_empty() {
            return Err(AppError::invalid_input("Image URL is required"));
        }
        if !IMAGE_URL_FORMAT.is_match(&body.image_url) {
            return Err(AppError::invalid_input("Invalid image URL format"));
        }

        let client = Self::client(&resources)?;
        let image = client.upload_from_url(&body.image_url).await?;
        info!(public_id = %image.public_id, "Image imported from URL");

        Ok((
            StatusCode::OK,
            Json(json!({
                "message": "Image uploaded successfully from URL",
                "image": image_payload(client, &image),
            })),
        )
            .into_response())
    }

    /// Handle DELETE /api/upload - Delete an image by public ID
    async fn handle_delete(
        State(resources): State<std::sync::Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<DeleteImageRequest>,
    ) -> Result<Response, AppError> {
        authenticate(&headers, &resources).await?;

        if body.public_id.is_empty() {
            return Err(AppError::invalid_input("Image public ID is required"));
        }

        let client = Self::client(&resources)?;
        if client.delete(&body.public_id).await? {
            Ok((
                StatusCode::OK,
                Json(json!({ "message": "Image deleted successfully" })),
            )
                .into_response())
        } else {
            Err(AppError::not_found("Image"))
        }
    }

    /// Handle GET /api/upload/:public_id - Delivery URLs for one image
    async fn handle_image_info(
        State(resources): State<std::sync::Arc<ServerResources>>,
        Path(public_id): Path<String>,
    ) -> Result<Response, AppError> {
        let client = Self::client(&resources)?;

        Ok((
            StatusCode::OK,
            Json(json!({
                "publicId": public_id,
                "original": client.optimized_url(&public_id),
                "thumbnail": client.thumbnail_url(&public_id),
                "medium": client.delivery_url(&public_id, 500, 375),
                "large": client.delivery_url(&public_id, 1200, 900),
            })),
        )
            .into_response())
    }
}

/// Response payload for a stored image with derived delivery URLs
fn image_payload(client: &CloudinaryClient, image: &UploadedImage) -> serde_json::Value {
    json!({
        "url": image.url,
        "publicId": image.public_id,
        "width": image.width,
        "height": image.height,
        "format": image.format,
        "bytes": image.bytes,
        "thumbnail": client.thumbnail_url(&image.public_id),
        "optimized": client.optimized_url(&image.public_id),
    })
}
