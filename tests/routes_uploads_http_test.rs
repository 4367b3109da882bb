// ABOUTME: HTTP integration tests for image upload routes
// ABOUTME: Tests authentication, local validation, and delivery URL endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RecipeShare contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use helpers::axum_test::AxumTestRequest;
use serde_json::json;

async fn test_app() -> axum::Router {
    let resources = common::create_test_resources()
        .await
        .expect("Setup failed");
    common::test_app(resources)
}

async fn signup(app: &axum::Router) -> String {
    let response = AxumTestRequest::post("/api/auth/signup")
        .json(&json!({
            "email": "uploader@example.com",
            "password": "secret123",
            "name": "Uploader"
        }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 201);
    response.json()["token"].as_str().unwrap().to_owned()
}

// ============================================================================
// Authentication requirements
// ============================================================================

#[tokio::test]
async fn test_upload_endpoints_require_auth() {
    let app = test_app().await;

    let url_import = AxumTestRequest::post("/api/upload/url")
        .json(&json!({ "imageUrl": "https://images.example/cake.jpg" }))
        .send(app.clone())
        .await;
    assert_eq!(url_import.status(), 401);
    assert_eq!(url_import.error_message(), "No token provided");

    let delete = AxumTestRequest::delete("/api/upload")
        .json(&json!({ "publicId": "recipeshare/abc" }))
        .send(app)
        .await;
    assert_eq!(delete.status(), 401);
}

// ============================================================================
// POST /api/upload/url - local validation
// ============================================================================

#[tokio::test]
async fn test_upload_from_url_rejects_empty_url() {
    let app = test_app().await;
    let token = signup(&app).await;

    let response = AxumTestRequest::post("/api/upload/url")
        .bearer(&token)
        .json(&json!({ "imageUrl": "" }))
        .send(app)
        .await;

    assert_eq!(response.status(), 400);
    assert_eq!(response.error_message(), "Image URL is required");
}

#[tokio::test]
async fn test_upload_from_url_rejects_bad_format() {
    let app = test_app().await;
    let token = signup(&app).await;

    for bad in [
        "ftp://images.example/cake.jpg",
        "https://images.example/cake.bmp",
        "not a url at all",
    ] {
        let response = AxumTestRequest::post("/api/upload/url")
            .bearer(&token)
            .json(&json!({ "imageUrl": bad }))
            .send(app.clone())
            .await;
        assert_eq!(response.status(), 400, "url: {bad}");
        assert_eq!(response.error_message(), "Invalid image URL format");
    }
}

// ============================================================================
// DELETE /api/upload - local validation
// ============================================================================

#[tokio::test]
async fn test_delete_image_rejects_empty_public_id() {
    let app = test_app().await;
    let token = signup(&app).await;

    let response = AxumTestRequest::delete("/api/upload")
        .bearer(&token)
        .json(&json!({ "publicId": "" }))
        .send(app)
        .await;

    assert_eq!(response.status(), 400);
    assert_eq!(response.error_message(), "Image public ID is required");
}

// ============================================================================
// GET /api/upload/:public_id - delivery URLs
// ============================================================================

#[tokio::test]
async fn test_image_info_builds_delivery_urls() {
    let app = test_app().await;

    let response = AxumTestRequest::get("/api/upload/cake-abc123")
        .send(app)
        .await;

    assert_eq!(response.status(), 200);
    let body = response.json();
    assert_eq!(body["publicId"], "cake-abc123");
    assert_eq!(
        body["thumbnail"],
        "https://res.cloudinary.com/test-cloud/image/upload/w_300,h_200,c_fill,q_auto,f_auto/cake-abc123"
    );
    assert_eq!(
        body["medium"],
        "https://res.cloudinary.com/test-cloud/image/upload/w_500,h_375,c_fill,q_auto,f_auto/cake-abc123"
    );
    assert_eq!(
        body["large"],
        "https://res.cloudinary.com/test-cloud/image/upload/w_1200,h_900,c_fill,q_auto,f_auto/cake-abc123"
    );
    assert!(body["original"].as_str().unwrap().contains("w_800,h_600"));
}

// ============================================================================
// Unconfigured image host
// ============================================================================

#[tokio::test]
async fn test_unconfigured_service_reports_error() {
    let resources =
        common::create_test_resources_with_config(common::test_config_without_images())
            .await
            .expect("Setup failed");
    let app = common::test_app(resources);

    let response = AxumTestRequest::get("/api/upload/cake-abc123")
        .send(app)
        .await;

    assert_eq!(response.status(), 500);
    assert_eq!(
        response.error_message(),
        "Image upload service not configured. Please contact administrator."
    );
}
