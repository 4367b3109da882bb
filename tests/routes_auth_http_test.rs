// ABOUTME: HTTP integration tests for authentication routes
// ABOUTME: Tests signup, login, and current-user endpoints over the full router
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

// ============================================================================
// POST /api/auth/signup
// ============================================================================

#[tokio::test]
async fn test_signup_success() {
    let app = test_app().await;

    let response = AxumTestRequest::post("/api/auth/signup")
        .json(&json!({
            "email": "alice@example.com",
            "password": "secret123",
            "name": "Alice"
        }))
        .send(app)
        .await;

    assert_eq!(response.status(), 201);
    let body = response.json();
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["user"]["email"], "alice@example.com");
    assert_eq!(body["user"]["name"], "Alice");
    assert!(body["user"]["id"].as_str().is_some());
    assert!(body["user"]["createdAt"].as_str().is_some());
    // The password hash must never leave the server
    assert!(body["user"].get("password_hash").is_none());
    assert!(body["user"].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_signup_duplicate_email() {
    let app = test_app().await;

    let payload = json!({
        "email": "dupe@example.com",
        "password": "secret123",
        "name": "First"
    });
    let first = AxumTestRequest::post("/api/auth/signup")
        .json(&payload)
        .send(app.clone())
        .await;
    assert_eq!(first.status(), 201);

    // Same address with different case still collides
    let second = AxumTestRequest::post("/api/auth/signup")
        .json(&json!({
            "email": "DUPE@example.com",
            "password": "secret456",
            "name": "Second"
        }))
        .send(app)
        .await;
    assert_eq!(second.status(), 400);
    assert_eq!(
        second.error_message(),
        "User with this email already exists"
    );
}

#[tokio::test]
async fn test_signup_missing_fields() {
    let app = test_app().await;

    let response = AxumTestRequest::post("/api/auth/signup")
        .json(&json!({
            "email": "",
            "password": "secret123",
            "name": "Alice"
        }))
        .send(app)
        .await;

    assert_eq!(response.status(), 400);
    assert_eq!(
        response.error_message(),
        "Email, password, and name are required"
    );
}

#[tokio::test]
async fn test_signup_short_password() {
    let app = test_app().await;

    let response = AxumTestRequest::post("/api/auth/signup")
        .json(&json!({
            "email": "alice@example.com",
            "password": "12345",
            "name": "Alice"
        }))
        .send(app)
        .await;

    assert_eq!(response.status(), 400);
    assert_eq!(
        response.error_message(),
        "Password must be at least 6 characters"
    );
}

#[tokio::test]
async fn test_signup_short_name() {
    let app = test_app().await;

    let response = AxumTestRequest::post("/api/auth/signup")
        .json(&json!({
            "email": "alice@example.com",
            "password": "secret123",
            "name": "A"
        }))
        .send(app)
        .await;

    assert_eq!(response.status(), 400);
    assert_eq!(response.error_message(), "Name must be at least 2 characters");
}

// ============================================================================
// POST /api/auth/login
// ============================================================================

#[tokio::test]
async fn test_login_success() {
    let app = test_app().await;

    AxumTestRequest::post("/api/auth/signup")
        .json(&json!({
            "email": "bob@example.com",
            "password": "secret123",
            "name": "Bob"
        }))
        .send(app.clone())
        .await;

    let response = AxumTestRequest::post("/api/auth/login")
        .json(&json!({
            "email": "bob@example.com",
            "password": "secret123"
        }))
        .send(app)
        .await;

    assert_eq!(response.status(), 200);
    let body = response.json();
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["user"]["email"], "bob@example.com");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = test_app().await;

    AxumTestRequest::post("/api/auth/signup")
        .json(&json!({
            "email": "bob@example.com",
            "password": "secret123",
            "name": "Bob"
        }))
        .send(app.clone())
        .await;

    let response = AxumTestRequest::post("/api/auth/login")
        .json(&json!({
            "email": "bob@example.com",
            "password": "wrong-password"
        }))
        .send(app)
        .await;

    assert_eq!(response.status(), 401);
    assert_eq!(response.error_message(), "Invalid email or password");
}

#[tokio::test]
async fn test_login_unknown_email_same_message() {
    let app = test_app().await;

    // Unknown account must be indistinguishable from a wrong password
    let response = AxumTestRequest::post("/api/auth/login")
        .json(&json!({
            "email": "nobody@example.com",
            "password": "secret123"
        }))
        .send(app)
        .await;

    assert_eq!(response.status(), 401);
    assert_eq!(response.error_message(), "Invalid email or password");
}

#[tokio::test]
async fn test_login_missing_fields() {
    let app = test_app().await;

    let response = AxumTestRequest::post("/api/auth/login")
        .json(&json!({ "email": "bob@example.com", "password": "" }))
        .send(app)
        .await;

    assert_eq!(response.status(), 400);
    assert_eq!(response.error_message(), "Email and password are required");
}

// ============================================================================
// GET /api/auth/me
// ============================================================================

#[tokio::test]
async fn test_me_with_valid_token() {
    let app = test_app().await;

    let signup = AxumTestRequest::post("/api/auth/signup")
        .json(&json!({
            "email": "carol@example.com",
            "password": "secret123",
            "name": "Carol"
        }))
        .send(app.clone())
        .await;
    let token = signup.json()["token"].as_str().unwrap().to_owned();

    let response = AxumTestRequest::get("/api/auth/me")
        .bearer(&token)
        .send(app)
        .await;

    assert_eq!(response.status(), 200);
    let body = response.json();
    assert_eq!(body["email"], "carol@example.com");
    assert_eq!(body["name"], "Carol");
}

#[tokio::test]
async fn test_me_without_token() {
    let app = test_app().await;

    let response = AxumTestRequest::get("/api/auth/me").send(app).await;

    assert_eq!(response.status(), 401);
    assert_eq!(response.error_message(), "No token provided");
}

#[tokio::test]
async fn test_me_with_invalid_token() {
    let app = test_app().await;

    let response = AxumTestRequest::get("/api/auth/me")
        .bearer("definitely-not-a-jwt")
        .send(app)
        .await;

    assert_eq!(response.status(), 401);
    assert_eq!(response.error_message(), "Invalid token");
}
