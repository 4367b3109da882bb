// ABOUTME: Database operations and validation for recipes
// ABOUTME: Handles CRUD, filtered listing with search, and cascade delete of comments
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RecipeShare contributors

use crate::constants::{error_messages, limits};
use crate::errors::{AppError, AppResult};
use crate::pagination::PageWindow;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use std::sync::LazyLock;
use uuid::Uuid;

/// Accepted duration format, e.g. "30 min", "1 hour", "2 hrs"
static TIME_FORMAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\d+\s*(min|hour|hrs?)$").unwrap_or_else(|_| unreachable!())
});

/// Recipe category for browsing and filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RecipeCategory {
    Breakfast,
    Lunch,
    #[default]
    Dinner,
    Dessert,
    Snacks,
    Beverages,
    Appetizers,
}

impl RecipeCategory {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Breakfast => "Breakfast",
            Self::Lunch => "Lunch",
            Self::Dinner => "Dinner",
            Self::Dessert => "Dessert",
            Self::Snacks => "Snacks",
            Self::Beverages => "Beverages",
            Self::Appetizers => "Appetizers",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "Breakfast" => Self::Breakfast,
            "Lunch" => Self::Lunch,
            "Dessert" => Self::Dessert,
            "Snacks" => Self::Snacks,
            "Beverages" => Self::Beverages,
            "Appetizers" => Self::Appetizers,
            _ => Self::Dinner,
        }
    }
}

/// Recipe difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "Easy" => Self::Easy,
            "Hard" => Self::Hard,
            _ => Self::Medium,
        }
    }
}

/// Optional per-serving nutrition facts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: f64,
    pub protein: String,
    pub carbs: String,
    pub fat: String,
}

/// A published recipe with denormalized author name and rating aggregate
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Unique identifier
    pub id: Uuid,
    /// Display title
    pub title: String,
    /// Short description
    pub description: String,
    /// Hosted image URL
    pub image: String,
    /// Image host public ID, used for cleanup
    pub image_public_id: Option<String>,
    /// Owning user
    pub author: Uuid,
    /// Author display name, denormalized for list responses
    pub author_name: String,
    /// Cooking duration, e.g. "30 min"
    pub cook_time: String,
    /// Preparation duration, e.g. "15 min"
    pub prep_time: String,
    /// Number of servings
    pub servings: u32,
    /// Average rating over approved comments, one decimal place
    pub rating: f64,
    /// Number of approved rated comments
    pub review_count: u32,
    /// Category for browsing
    pub category: RecipeCategory,
    /// Difficulty level
    pub difficulty: Difficulty,
    /// Free-form tags
    pub tags: Vec<String>,
    /// Ingredient lines
    pub ingredients: Vec<String>,
    /// Instruction steps
    pub instructions: Vec<String>,
    /// Optional nutrition facts
    pub nutrition: Option<Nutrition>,
    /// Optional cooking tips
    pub tips: Vec<String>,
    /// Whether the recipe appears in public listings
    pub is_published: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Request to create a new recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecipeRequest {
    pub title: String,
    pub description: String,
    pub image: String,
    pub cook_time: String,
    pub prep_time: String,
    pub servings: u32,
    #[serde(default)]
    pub category: RecipeCategory,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub tags: Vec<String>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    #[serde(default)]
    pub nutrition: Option<Nutrition>,
    #[serde(default)]
    pub tips: Vec<String>,
}

impl CreateRecipeRequest {
    /// Validate field contents, trimming whitespace in place
    ///
    /// Reports the first violation found, matching the public API
    /// error contract.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidInput` error describing the first violation
    pub fn validate(&mut self) -> AppResult<()> {
        self.title = self.title.trim().to_owned();
        self.description = self.description.trim().to_owned();
        self.cook_time = self.cook_time.trim().to_owned();
        self.prep_time = self.prep_time.trim().to_owned();
        for tag in &mut self.tags {
            *tag = tag.trim().to_owned();
        }
        for ingredient in &mut self.ingredients {
            *ingredient = ingredient.trim().to_owned();
        }
        for instruction in &mut self.instructions {
            *instruction = instruction.trim().to_owned();
        }
        for tip in &mut self.tips {
            *tip = tip.trim().to_owned();
        }

        if self.title.is_empty() || self.description.is_empty() || self.image.is_empty() {
            return Err(AppError::invalid_input("Missing required fields"));
        }
        if self.ingredients.is_empty() {
            return Err(AppError::invalid_input(error_messages::INGREDIENT_REQUIRED));
        }
        if self.instructions.is_empty() {
            return Err(AppError::invalid_input(
                error_messages::INSTRUCTION_REQUIRED,
            ));
        }

        if self.title.chars().count() < limits::TITLE_MIN {
            return Err(AppError::invalid_input(
                "Title must be at least 3 characters long",
            ));
        }
        if self.title.chars().count() > limits::TITLE_MAX {
            return Err(AppError::invalid_input("Title cannot exceed 100 characters"));
        }
        if self.description.chars().count() < limits::DESCRIPTION_MIN {
            return Err(AppError::invalid_input(
                "Description must be at least 10 characters long",
            ));
        }
        if self.description.chars().count() > limits::DESCRIPTION_MAX {
            return Err(AppError::invalid_input(
                "Description cannot exceed 500 characters",
            ));
        }
        if !TIME_FORMAT.is_match(&self.cook_time) {
            return Err(AppError::invalid_input(
                "Cook time format is invalid (e.g., \"30 min\", \"1 hour\")",
            ));
        }
        if !TIME_FORMAT.is_match(&self.prep_time) {
            return Err(AppError::invalid_input(
                "Prep time format is invalid (e.g., \"15 min\", \"1 hour\")",
            ));
        }
        if self.servings < limits::SERVINGS_MIN {
            return Err(AppError::invalid_input("Servings must be at least 1"));
        }
        if self.servings > limits::SERVINGS_MAX {
            return Err(AppError::invalid_input("Servings cannot exceed 50"));
        }
        if self.tags.iter().any(|t| t.chars().count() > limits::TAG_MAX) {
            return Err(AppError::invalid_input("Tag cannot exceed 30 characters"));
        }
        if self.ingredients.iter().any(String::is_empty) {
            return Err(AppError::invalid_input("Ingredient cannot be empty"));
        }
        if self
            .ingredients
            .iter()
            .any(|i| i.chars().count() > limits::INGREDIENT_MAX)
        {
            return Err(AppError::invalid_input(
                "Ingredient cannot exceed 200 characters",
            ));
        }
        if self
            .instructions
            .iter()
            .any(|i| i.chars().count() < limits::INSTRUCTION_MIN)
        {
            return Err(AppError::invalid_input(
                "Instruction must be at least 5 characters long",
            ));
        }
        if self
            .instructions
            .iter()
            .any(|i| i.chars().count() > limits::INSTRUCTION_MAX)
        {
            return Err(AppError::invalid_input(
                "Instruction cannot exceed 1000 characters",
            ));
        }
        if self.tips.iter().any(|t| t.chars().count() > limits::TIP_MAX) {
            return Err(AppError::invalid_input("Tip cannot exceed 300 characters"));
        }

        Ok(())
    }
}

/// Request to update an existing recipe; absent fields are unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecipeRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub cook_time: Option<String>,
    pub prep_time: Option<String>,
    pub servings: Option<u32>,
    pub category: Option<RecipeCategory>,
    pub difficulty: Option<Difficulty>,
    pub tags: Option<Vec<String>>,
    pub ingredients: Option<Vec<String>>,
    pub instructions: Option<Vec<String>>,
    pub nutrition: Option<Nutrition>,
    pub tips: Option<Vec<String>>,
}

impl UpdateRecipeRequest {
    /// Merge onto an existing recipe, producing a validated full request
    ///
    /// # Errors
    ///
    /// Returns an `InvalidInput` error if the merged result violates a
    /// field constraint
    pub fn merge_into(&self, existing: &Recipe) -> AppResult<CreateRecipeRequest> {
        let mut merged = CreateRecipeRequest {
            title: self.title.clone().unwrap_or_else(|| existing.title.clone()),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| existing.description.clone()),
            image: self.image.clone().unwrap_or_else(|| existing.image.clone()),
            cook_time: self
                .cook_time
                .clone()
                .unwrap_or_else(|| existing.cook_time.clone()),
            prep_time: self
                .prep_time
                .clone()
                .unwrap_or_else(|| existing.prep_time.clone()),
            servings: self.servings.unwrap_or(existing.servings),
            category: self.category.unwrap_or(existing.category),
            difficulty: self.difficulty.unwrap_or(existing.difficulty),
            tags: self.tags.clone().unwrap_or_else(|| existing.tags.clone()),
            ingredients: self
                .ingredients
                .clone()
                .unwrap_or_else(|| existing.ingredients.clone()),
            instructions: self
                .instructions
                .clone()
                .unwrap_or_else(|| existing.instructions.clone()),
            nutrition: self.nutrition.clone().or_else(|| existing.nutrition.clone()),
            tips: self.tips.clone().unwrap_or_else(|| existing.tips.clone()),
        };
        merged.validate()?;
        Ok(merged)
    }
}

/// Filter options for listing recipes
#[derive(Debug, Clone, Default)]
pub struct ListRecipesFilter {
    /// Filter by category name; `All` or absent matches everything
    pub category: Option<String>,
    /// Filter by difficulty name; `All` or absent matches everything
    pub difficulty: Option<String>,
    /// Free-text search over title, description, and tags
    pub search: Option<String>,
}

impl ListRecipesFilter {
    fn category_param(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| *c != "All")
    }

    fn difficulty_param(&self) -> Option<&str> {
        self.difficulty.as_deref().filter(|d| *d != "All")
    }

    fn search_pattern(&self) -> Option<String> {
        self.search
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(|s| format!("%{}%", s.trim()))
    }
}

/// Recipe database operations manager
pub struct RecipesManager {
    pool: SqlitePool,
}

const RECIPE_COLUMNS: &str = "id, user_id, author_name, title, description, cook_time, prep_time, \
     servings, category, difficulty, tags, ingredients, instructions, tips, nutrition, \
     image, image_public_id, rating, review_count, is_published, created_at, updated_at";

impl RecipesManager {
    /// Create a new recipes manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new recipe owned by `user_id`
    ///
    /// The request must already be validated.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn create(
        &self,
        user_id: Uuid,
        author_name: &str,
        request: &CreateRecipeRequest,
    ) -> AppResult<Recipe> {
        let now = Utc::now();
        let id = Uuid::new_v4();
        let tags_json = serde_json::to_string(&request.tags)?;
        let ingredients_json = serde_json::to_string(&request.ingredients)?;
        let instructions_json = serde_json::to_string(&request.instructions)?;
        let tips_json = serde_json::to_string(&request.tips)?;
        let nutrition_json = request
            .nutrition
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        sqlx::query(
            r"
            INSERT INTO recipes (
                id, user_id, author_name, title, description, cook_time, prep_time,
                servings, category, difficulty, tags, ingredients, instructions, tips,
                nutrition, image, image_public_id, rating, review_count, is_published,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                      $15, $16, $17, 0, 0, 1, $18, $18)
            ",
        )
        .bind(id.to_string())
        .bind(user_id.to_string())
        .bind(author_name)
        .bind(&request.title)
        .bind(&request.description)
        .bind(&request.cook_time)
        .bind(&request.prep_time)
        .bind(i64::from(request.servings))
        .bind(request.category.as_str())
        .bind(request.difficulty.as_str())
        .bind(&tags_json)
        .bind(&ingredients_json)
        .bind(&instructions_json)
        .bind(&tips_json)
        .bind(&nutrition_json)
        .bind(&request.image)
        .bind(Option::<String>::None)
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create recipe: {e}")))?;

        Ok(Recipe {
            id,
            title: request.title.clone(),
            description: request.description.clone(),
            image: request.image.clone(),
            image_public_id: None,
            author: user_id,
            author_name: author_name.to_owned(),
            cook_time: request.cook_time.clone(),
            prep_time: request.prep_time.clone(),
            servings: request.servings,
            rating: 0.0,
            review_count: 0,
            category: request.category,
            difficulty: request.difficulty,
            tags: request.tags.clone(),
            ingredients: request.ingredients.clone(),
            instructions: request.instructions.clone(),
            nutrition: request.nutrition.clone(),
            tips: request.tips.clone(),
            is_published: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Get a recipe by ID
    ///
    /// A malformed ID yields `None`, which callers surface as not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn get(&self, recipe_id: &str) -> AppResult<Option<Recipe>> {
        if Uuid::parse_str(recipe_id).is_err() {
            return Ok(None);
        }

        let query = format!("SELECT {RECIPE_COLUMNS} FROM recipes WHERE id = $1");
        let row = sqlx::query(&query)
            .bind(recipe_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get recipe: {e}")))?;

        row.map(|r| row_to_recipe(&r)).transpose()
    }

    /// List published recipes with filtering and pagination
    ///
    /// Returns the page of recipes plus the total match count.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn list(
        &self,
        filter: &ListRecipesFilter,
        window: &PageWindow,
    ) -> AppResult<(Vec<Recipe>, u32)> {
        let category = filter.category_param();
        let difficulty = filter.difficulty_param();
        let search = filter.search_pattern();

        let query = format!(
            r"
            SELECT {RECIPE_COLUMNS} FROM recipes
            WHERE is_published = 1
              AND ($1 IS NULL OR category = $1)
              AND ($2 IS NULL OR difficulty = $2)
              AND ($3 IS NULL OR title LIKE $3 OR description LIKE $3 OR tags LIKE $3)
            ORDER BY created_at DESC
            LIMIT $4 OFFSET $5
            "
        );

        let rows = sqlx::query(&query)
            .bind(category)
            .bind(difficulty)
            .bind(&search)
            .bind(i64::from(window.limit))
            .bind(i64::from(window.offset()))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list recipes: {e}")))?;

        let recipes = rows.iter().map(row_to_recipe).collect::<AppResult<_>>()?;

        let count_row = sqlx::query(
            r"
            SELECT COUNT(*) as count FROM recipes
            WHERE is_published = 1
              AND ($1 IS NULL OR category = $1)
              AND ($2 IS NULL OR difficulty = $2)
              AND ($3 IS NULL OR title LIKE $3 OR description LIKE $3 OR tags LIKE $3)
            ",
        )
        .bind(category)
        .bind(difficulty)
        .bind(&search)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to count recipes: {e}")))?;

        let total: i64 = count_row.get("count");
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Ok((recipes, total as u32))
    }

    /// List published recipes by a specific author
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn list_by_user(
        &self,
        user_id: &str,
        window: &PageWindow,
    ) -> AppResult<(Vec<Recipe>, u32)> {
        let query = format!(
            r"
            SELECT {RECIPE_COLUMNS} FROM recipes
            WHERE user_id = $1 AND is_published = 1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "
        );

        let rows = sqlx::query(&query)
            .bind(user_id)
            .bind(i64::from(window.limit))
            .bind(i64::from(window.offset()))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list user recipes: {e}")))?;

        let recipes = rows.iter().map(row_to_recipe).collect::<AppResult<_>>()?;

        let count_row = sqlx::query(
            "SELECT COUNT(*) as count FROM recipes WHERE user_id = $1 AND is_published = 1",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to count user recipes: {e}")))?;

        let total: i64 = count_row.get("count");
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Ok((recipes, total as u32))
    }

    /// Update an existing recipe with the merged, validated field set
    ///
    /// Ownership must be checked by the caller beforehand.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn update(
        &self,
        recipe_id: &str,
        merged: &CreateRecipeRequest,
    ) -> AppResult<Option<Recipe>> {
        let now = Utc::now();
        let tags_json = serde_json::to_string(&merged.tags)?;
        let ingredients_json = serde_json::to_string(&merged.ingredients)?;
        let instructions_json = serde_json::to_string(&merged.instructions)?;
        let tips_json = serde_json::to_string(&merged.tips)?;
        let nutrition_json = merged
            .nutrition
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let result = sqlx::query(
            r"
            UPDATE recipes SET
                title = $1, description = $2, image = $3, cook_time = $4, prep_time = $5,
                servings = $6, category = $7, difficulty = $8, tags = $9,
                ingredients = $10, instructions = $11, nutrition = $12, tips = $13,
                updated_at = $14
            WHERE id = $15
            ",
        )
        .bind(&merged.title)
        .bind(&merged.description)
        .bind(&merged.image)
        .bind(&merged.cook_time)
        .bind(&merged.prep_time)
        .bind(i64::from(merged.servings))
        .bind(merged.category.as_str())
        .bind(merged.difficulty.as_str())
        .bind(&tags_json)
        .bind(&ingredients_json)
        .bind(&instructions_json)
        .bind(&nutrition_json)
        .bind(&tips_json)
        .bind(now.to_rfc3339())
        .bind(recipe_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update recipe: {e}")))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get(recipe_id).await
    }

    /// Delete a recipe and its comments in one transaction
    ///
    /// Ownership must be checked by the caller beforehand.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn delete(&self, recipe_id: &str) -> AppResult<bool> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        sqlx::query("DELETE FROM comments WHERE recipe_id = $1")
            .bind(recipe_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete recipe comments: {e}")))?;

        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(recipe_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete recipe: {e}")))?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit delete: {e}")))?;

        Ok(result.rows_affected() > 0)
    }
}

/// Convert a database row to a `Recipe`
fn row_to_recipe(row: &SqliteRow) -> AppResult<Recipe> {
    let id_str: String = row.get("id");
    let user_id_str: String = row.get("user_id");
    let category_str: String = row.get("category");
    let difficulty_str: String = row.get("difficulty");
    let tags_json: String = row.get("tags");
    let ingredients_json: String = row.get("ingredients");
    let instructions_json: String = row.get("instructions");
    let tips_json: String = row.get("tips");
    let nutrition_json: Option<String> = row.get("nutrition");
    let servings: i64 = row.get("servings");
    let review_count: i64 = row.get("review_count");
    let is_published: i64 = row.get("is_published");
    let created_at_str: String = row.get("created_at");
    let updated_at_str: String = row.get("updated_at");

    let nutrition = nutrition_json
        .as_deref()
        .map(serde_json::from_str)
        .transpose()?;

    Ok(Recipe {
        id: Uuid::parse_str(&id_str)
            .map_err(|e| AppError::internal(format!("Invalid UUID: {e}")))?,
        title: row.get("title"),
        description: row.get("description"),
        image: row.get("image"),
        image_public_id: row.get("image_public_id"),
        author: Uuid::parse_str(&user_id_str)
            .map_err(|e| AppError::internal(format!("Invalid UUID: {e}")))?,
        author_name: row.get("author_name"),
        cook_time: row.get("cook_time"),
        prep_time: row.get("prep_time"),
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        servings: servings as u32,
        rating: row.get("rating"),
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        review_count: review_count as u32,
        category: RecipeCategory::parse(&category_str),
        difficulty: Difficulty::parse(&difficulty_str),
        tags: serde_json::from_str(&tags_json)?,
        ingredients: serde_json::from_str(&ingredients_json)?,
        instructions: serde_json::from_str(&instructions_json)?,
        nutrition,
        tips: serde_json::from_str(&tips_json)?,
        is_published: is_published == 1,
        created_at: DateTime::parse_from_rfc3339(&created_at_str)
            .map_err(|e| AppError::internal(format!("Invalid datetime: {e}")))?
            .with_timezone(&Utc),
        updated_at: DateTime::parse_from_rfc3339(&updated_at_str)
            .map_err(|e| AppError::internal(format!("Invalid datetime: {e}")))?
            .with_timezone(&Utc),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateRecipeRequest {
        CreateRecipeRequest {
            title: "Chocolate Cake".into(),
            description: "A rich chocolate layer cake".into(),
            image: "https://images.example/cake.jpg".into(),
            cook_time: "45 min".into(),
            prep_time: "20 min".into(),
            servings: 8,
            category: RecipeCategory::Dessert,
            difficulty: Difficulty::Medium,
            tags: vec!["chocolate".into()],
            ingredients: vec!["2 cups flour".into(), "1 cup cocoa".into()],
            instructions: vec!["Mix the dry ingredients".into(), "Bake at 350F".into()],
            nutrition: None,
            tips: vec![],
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_title_too_short() {
        let mut request = valid_request();
        request.title = "ab".into();
        let err = request.validate().unwrap_err();
        assert_eq!(err.message, "Title must be at least 3 characters long");
    }

    #[test]
    fn test_time_format() {
        for good in ["30 min", "1 hour", "2 hrs", "90min", "3 HR"] {
            let mut request = valid_request();
            request.cook_time = good.into();
            assert!(request.validate().is_ok(), "expected {good} to be valid");
        }
        let mut request = valid_request();
        request.cook_time = "half an hour".into();
        let err = request.validate().unwrap_err();
        assert!(err.message.starts_with("Cook time format is invalid"));
    }

    #[test]
    fn test_servings_bounds() {
        let mut request = valid_request();
        request.servings = 0;
        assert_eq!(
            request.validate().unwrap_err().message,
            "Servings must be at least 1"
        );
        let mut request = valid_request();
        request.servings = 51;
        assert_eq!(
            request.validate().unwrap_err().message,
            "Servings cannot exceed 50"
        );
    }

    #[test]
    fn test_empty_ingredients_rejected() {
        let mut request = valid_request();
        request.ingredients.clear();
        assert_eq!(
            request.validate().unwrap_err().message,
            "At least one ingredient is required"
        );
    }

    #[test]
    fn test_category_round_trip() {
        assert_eq!(RecipeCategory::parse("Dessert"), RecipeCategory::Dessert);
        assert_eq!(RecipeCategory::parse("bogus"), RecipeCategory::Dinner);
        assert_eq!(Difficulty::parse("Easy").as_str(), "Easy");
        assert_eq!(Difficulty::parse("bogus"), Difficulty::Medium);
    }
}
