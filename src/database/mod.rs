// ABOUTME: Database connection handle, schema migrations, and manager accessors
// ABOUTME: Owns the SQLite pool and hands out per-entity operation managers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RecipeShare contributors

//! SQLite database layer built on `sqlx`
//!
//! The [`Database`] handle owns the connection pool. Callers obtain
//! per-entity managers ([`UsersManager`], [`RecipesManager`],
//! [`CommentsManager`]) which share the pool cheaply via clone.

pub mod comments;
pub mod recipes;
pub mod users;

pub use comments::{Comment, CommentsManager, CreateCommentRequest};
pub use recipes::{
    CreateRecipeRequest, ListRecipesFilter, Recipe, RecipesManager, UpdateRecipeRequest,
};
pub use users::{User, UsersManager};

use crate::errors::{AppError, AppResult};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::{debug, info};

/// Database handle owning the SQLite connection pool
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to the database and run schema migrations
    ///
    /// Accepts sqlx-style URLs (`sqlite:data/app.db`, `sqlite::memory:`).
    /// The database file is created when missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or migration fails
    pub async fn connect(database_url: &str) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::database(format!("Invalid database URL: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true);

        // An in-memory SQLite database exists per connection, so the
        // pool must hold exactly one connection and never retire it.
        let is_memory = database_url.ends_with(":memory:");
        let pool_options = if is_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(10)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect to database: {e}")))?;

        let database = Self { pool };
        database.migrate().await?;

        info!("Database connected and migrated");
        Ok(database)
    }

    /// Get a reference to the underlying pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Users operations manager
    #[must_use]
    pub fn users(&self) -> UsersManager {
        UsersManager::new(self.pool.clone())
    }

    /// Recipes operations manager
    #[must_use]
    pub fn recipes(&self) -> RecipesManager {
        RecipesManager::new(self.pool.clone())
    }

    /// Comments operations manager
    #[must_use]
    pub fn comments(&self) -> CommentsManager {
        CommentsManager::new(self.pool.clone())
    }

    /// Close the connection pool gracefully
    pub async fn close(&self) {
        self.pool.close().await;
        debug!("Database pool closed");
    }

    /// Create tables and indexes when absent
    ///
    /// # Errors
    ///
    /// Returns an error if a DDL statement fails
    async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                name TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create users table: {e}")))?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipes (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id),
                author_name TEXT NOT NULL,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                cook_time TEXT NOT NULL,
                prep_time TEXT NOT NULL,
                servings INTEGER NOT NULL,
                category TEXT NOT NULL,
                difficulty TEXT NOT NULL,
                tags TEXT NOT NULL,
                ingredients TEXT NOT NULL,
                instructions TEXT NOT NULL,
                tips TEXT NOT NULL,
                nutrition TEXT,
                image TEXT NOT NULL,
                image_public_id TEXT,
                rating REAL NOT NULL DEFAULT 0,
                review_count INTEGER NOT NULL DEFAULT 0,
                is_published INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create recipes table: {e}")))?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS comments (
                id TEXT PRIMARY KEY,
                recipe_id TEXT NOT NULL REFERENCES recipes(id),
                user_id TEXT,
                author_name TEXT NOT NULL,
                content TEXT NOT NULL,
                rating INTEGER NOT NULL,
                is_approved INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create comments table: {e}")))?;

        for ddl in [
            "CREATE INDEX IF NOT EXISTS idx_recipes_user_id ON recipes(user_id)",
            "CREATE INDEX IF NOT EXISTS idx_recipes_category ON recipes(category)",
            "CREATE INDEX IF NOT EXISTS idx_recipes_created_at ON recipes(created_at)",
            "CREATE INDEX IF NOT EXISTS idx_comments_recipe_id ON comments(recipe_id)",
            "CREATE INDEX IF NOT EXISTS idx_comments_created_at ON comments(created_at)",
        ] {
            sqlx::query(ddl)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to create index: {e}")))?;
        }

        Ok(())
    }
}
