// ABOUTME: Database operations for rated comments on recipes
// ABOUTME: Inserting a comment recomputes the recipe rating aggregate in one transaction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RecipeShare contributors

use crate::constants::{error_messages::RATING_OUT_OF_RANGE, limits};
use crate::errors::{AppError, AppResult};
use crate::pagination::PageWindow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

/// A rated comment on a recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Unique identifier
    pub id: Uuid,
    /// Recipe the comment belongs to
    pub recipe: Uuid,
    /// Commenting user; `None` for anonymous comments
    pub author: Option<Uuid>,
    /// Display name shown with the comment
    pub author_name: String,
    /// Comment text
    pub content: String,
    /// Integer star rating, 1 to 5
    pub rating: u8,
    /// Whether the comment counts toward the rating aggregate
    pub is_approved: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Request body for adding a comment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
    /// Star rating; fractional values are rounded, out-of-range rejected
    pub rating: f64,
}

impl CreateCommentRequest {
    /// Validate and normalize, returning the integer rating
    ///
    /// # Errors
    ///
    /// Returns an `InvalidInput` error describing the first violation
    pub fn validate(&mut self) -> AppResult<u8> {
        self.content = self.content.trim().to_owned();

        if self.content.is_empty() || self.rating == 0.0 {
            return Err(AppError::invalid_input("Content and rating are required"));
        }
        if self.rating < f64::from(limits::RATING_MIN) || self.rating > f64::from(limits::RATING_MAX)
        {
            return Err(AppError::invalid_input(RATING_OUT_OF_RANGE));
        }
        if self.content.chars().count() < limits::COMMENT_MIN {
            return Err(AppError::invalid_input(
                "Comment must be at least 5 characters long",
            ));
        }
        if self.content.chars().count() > limits::COMMENT_MAX {
            return Err(AppError::invalid_input(
                "Comment cannot exceed 1000 characters",
            ));
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Ok(self.rating.round() as u8)
    }
}

/// Updated rating aggregate after a comment insert
#[derive(Debug, Clone, Copy)]
pub struct RatingAggregate {
    /// Mean rating over approved comments, one decimal place
    pub rating: f64,
    /// Number of approved comments
    pub review_count: u32,
}

/// Comment database operations manager
pub struct CommentsManager {
    pool: SqlitePool,
}

impl CommentsManager {
    /// Create a new comments manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Add a comment and recompute the recipe rating aggregate
    ///
    /// The insert, the aggregate query, and the recipe update run in a
    /// single transaction so concurrent comments cannot lose updates.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the recipe does not exist, or a
    /// database error if any step fails
    pub async fn add(
        &self,
        recipe_id: &str,
        author: Option<(Uuid, String)>,
        content: &str,
        rating: u8,
    ) -> AppResult<(Comment, RatingAggregate)> {
        if Uuid::parse_str(recipe_id).is_err() {
            return Err(AppError::not_found("Recipe"));
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        let recipe_row = sqlx::query("SELECT id FROM recipes WHERE id = $1")
            .bind(recipe_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to check recipe: {e}")))?;
        if recipe_row.is_none() {
            return Err(AppError::not_found("Recipe"));
        }

        let now = Utc::now();
        let id = Uuid::new_v4();
        let (author_id, author_name) = match &author {
            Some((user_id, name)) => (Some(user_id.to_string()), name.clone()),
            None => (None, "Anonymous".to_owned()),
        };

        sqlx::query(
            r"
            INSERT INTO comments (
                id, recipe_id, user_id, author_name, content, rating,
                is_approved, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, 1, $7, $7)
            ",
        )
        .bind(id.to_string())
        .bind(recipe_id)
        .bind(&author_id)
        .bind(&author_name)
        .bind(content)
        .bind(i64::from(rating))
        .bind(now.to_rfc3339())
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to add comment: {e}")))?;

        let aggregate_row = sqlx::query(
            r"
            SELECT AVG(rating) as mean, COUNT(*) as count
            FROM comments
            WHERE recipe_id = $1 AND is_approved = 1
            ",
        )
        .bind(recipe_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to compute rating: {e}")))?;

        let mean: Option<f64> = aggregate_row.get("mean");
        let count: i64 = aggregate_row.get("count");
        // Mean rounded to one decimal place, half away from zero
        let rounded = mean.map_or(0.0, |m| (m * 10.0).round() / 10.0);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let aggregate = RatingAggregate {
            rating: rounded,
            review_count: count as u32,
        };

        sqlx::query("UPDATE recipes SET rating = $1, review_count = $2 WHERE id = $3")
            .bind(aggregate.rating)
            .bind(i64::from(aggregate.review_count))
            .bind(recipe_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to update recipe rating: {e}")))?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit comment: {e}")))?;

        let comment = Comment {
            id,
            recipe: Uuid::parse_str(recipe_id)
                .map_err(|e| AppError::internal(format!("Invalid UUID: {e}")))?,
            author: author.map(|(user_id, _)| user_id),
            author_name,
            content: content.to_owned(),
            rating,
            is_approved: true,
            created_at: now,
            updated_at: now,
        };

        Ok((comment, aggregate))
    }

    /// List approved comments for a recipe, newest first
    ///
    /// Returns the page of comments plus the total approved count.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn list(
        &self,
        recipe_id: &str,
        window: &PageWindow,
    ) -> AppResult<(Vec<Comment>, u32)> {
        let rows = sqlx::query(
            r"
            SELECT id, recipe_id, user_id, author_name, content, rating,
                   is_approved, created_at, updated_at
            FROM comments
            WHERE recipe_id = $1 AND is_approved = 1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(recipe_id)
        .bind(i64::from(window.limit))
        .bind(i64::from(window.offset()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list comments: {e}")))?;

        let comments = rows.iter().map(row_to_comment).collect::<AppResult<_>>()?;

        let count_row = sqlx::query(
            "SELECT COUNT(*) as count FROM comments WHERE recipe_id = $1 AND is_approved = 1",
        )
        .bind(recipe_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to count comments: {e}")))?;

        let total: i64 = count_row.get("count");
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Ok((comments, total as u32))
    }
}

/// Convert a database row to a `Comment`
fn row_to_comment(row: &SqliteRow) -> AppResult<Comment> {
    let id_str: String = row.get("id");
    let recipe_id_str: String = row.get("recipe_id");
    let user_id_str: Option<String> = row.get("user_id");
    let rating: i64 = row.get("rating");
    let is_approved: i64 = row.get("is_approved");
    let created_at_str: String = row.get("created_at");
    let updated_at_str: String = row.get("updated_at");

    Ok(Comment {
        id: Uuid::parse_str(&id_str)
            .map_err(|e| AppError::internal(format!("Invalid UUID: {e}")))?,
        recipe: Uuid::parse_str(&recipe_id_str)
            .map_err(|e| AppError::internal(format!("Invalid UUID: {e}")))?,
        author: user_id_str.and_then(|s| Uuid::parse_str(&s).ok()),
        author_name: row.get("author_name"),
        content: row.get("content"),
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        rating: rating as u8,
        is_approved: is_approved == 1,
        created_at: DateTime::parse_from_rfc3339(&created_at_str)
            .map_err(|e| AppError::internal(format!("Invalid datetime: {e}")))?
            .with_timezone(&Utc),
        updated_at: DateTime::parse_from_rfc3339(&updated_at_str)
            .map_err(|e| AppError::internal(format!("Invalid datetime: {e}")))?
            .with_timezone(&Utc),
    })
}
