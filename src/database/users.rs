// ABOUTME: Database operations for user accounts used by signup and login
// ABOUTME: Stores bcrypt password hashes and normalized lowercase emails
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RecipeShare contributors

use crate::constants::error_messages;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

/// A registered user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: Uuid,
    /// Email address, stored lowercase
    pub email: String,
    /// Display name
    pub name: String,
    /// Bcrypt password hash, never serialized in responses
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Public JSON shape without credential material
    #[must_use]
    pub fn to_public_json(&self) -> serde_json::Value {
        serde_json::json!({
            "id": self.id,
            "email": self.email,
            "name": self.name,
            "createdAt": self.created_at,
        })
    }
}

/// User database operations manager
pub struct UsersManager {
    pool: SqlitePool,
}

impl UsersManager {
    /// Create a new users manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user account
    ///
    /// The email is normalized to lowercase before storage. The caller
    /// supplies an already-hashed password.
    ///
    /// # Errors
    ///
    /// Returns an error if the email is already registered or the
    /// database operation fails
    pub async fn create(&self, email: &str, name: &str, password_hash: &str) -> AppResult<User> {
        let email = email.trim().to_lowercase();

        if self.get_by_email(&email).await?.is_some() {
            return Err(AppError::already_exists(error_messages::USER_ALREADY_EXISTS));
        }

        let now = Utc::now();
        let id = Uuid::new_v4();

        sqlx::query(
            r"
            INSERT INTO users (id, email, password_hash, name, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            ",
        )
        .bind(id.to_string())
        .bind(&email)
        .bind(password_hash)
        .bind(name)
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            // Unique constraint races with the pre-check under concurrency
            if e.to_string().contains("UNIQUE") {
                AppError::already_exists(error_messages::USER_ALREADY_EXISTS)
            } else {
                AppError::database(format!("Failed to create user: {e}"))
            }
        })?;

        Ok(User {
            id,
            email,
            name: name.to_owned(),
            password_hash: password_hash.to_owned(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Look up a user by email (case-insensitive)
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn get_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let row = sqlx::query(
            r"
            SELECT id, email, password_hash, name, created_at, updated_at
            FROM users
            WHERE email = $1
            ",
        )
        .bind(email.trim().to_lowercase())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get user by email: {e}")))?;

        row.map(|r| row_to_user(&r)).transpose()
    }

    /// Look up a user by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn get_by_id(&self, user_id: Uuid) -> AppResult<Option<User>> {
        let row = sqlx::query(
            r"
            SELECT id, email, password_hash, name, created_at, updated_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get user by id: {e}")))?;

        row.map(|r| row_to_user(&r)).transpose()
    }
}

/// Convert a database row to a `User`
fn row_to_user(row: &SqliteRow) -> AppResult<User> {
    let id_str: String = row.get("id");
    let created_at_str: String = row.get("created_at");
    let updated_at_str: String = row.get("updated_at");

    Ok(User {
        id: Uuid::parse_str(&id_str)
            .map_err(|e| AppError::internal(format!("Invalid UUID: {e}")))?,
        email: row.get("email"),
        name: row.get("name"),
        password_hash: row.get("password_hash"),
        created_at: DateTime::parse_from_rfc3339(&created_at_str)
            .map_err(|e| AppError::internal(format!("Invalid datetime: {e}")))?
            .with_timezone(&Utc),
        updated_at: DateTime::parse_from_rfc3339(&updated_at_str)
            .map_err(|e| AppError::internal(format!("Invalid datetime: {e}")))?
            .with_timezone(&Utc),
    })
}
