// ABOUTME: Application constants for validation limits and shared messages
// ABOUTME: Centralizes schema bounds so routes and managers agree on them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RecipeShare contributors

//! Application constants and configuration values

/// Validation and pagination limits
pub mod limits {
    /// Default JWT expiry (7 days)
    pub const DEFAULT_JWT_EXPIRY_HOURS: i64 = 168;

    /// Minimum password length for signup
    pub const MIN_PASSWORD_LENGTH: usize = 6;

    /// Minimum display name length for signup
    pub const MIN_NAME_LENGTH: usize = 2;

    /// Default page size for list endpoints
    pub const DEFAULT_PAGE_SIZE: u32 = 20;

    /// Maximum page size for list endpoints
    pub const MAX_PAGE_SIZE: u32 = 50;

    /// Recipe title bounds
    pub const TITLE_MIN: usize = 3;
    pub const TITLE_MAX: usize = 100;

    /// Recipe description bounds
    pub const DESCRIPTION_MIN: usize = 10;
    pub const DESCRIPTION_MAX: usize = 500;

    /// Servings bounds
    pub const SERVINGS_MIN: u32 = 1;
    pub const SERVINGS_MAX: u32 = 50;

    /// Per-item string bounds
    pub const TAG_MAX: usize = 30;
    pub const INGREDIENT_MAX: usize = 200;
    pub const INSTRUCTION_MIN: usize = 5;
    pub const INSTRUCTION_MAX: usize = 1000;
    pub const TIP_MAX: usize = 300;

    /// Comment content bounds
    pub const COMMENT_MIN: usize = 5;
    pub const COMMENT_MAX: usize = 1000;

    /// Comment rating bounds (inclusive)
    pub const RATING_MIN: u8 = 1;
    pub const RATING_MAX: u8 = 5;

    /// Maximum upload size in bytes (5 MB)
    pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

    /// Maximum request body size in bytes (10 MB, leaves headroom for uploads)
    pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

    /// Per-request timeout in seconds
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
}

/// Shared error message strings surfaced to API clients
pub mod error_messages {
    pub const INVALID_CREDENTIALS: &str = "Invalid email or password";
    pub const USER_ALREADY_EXISTS: &str = "User with this email already exists";
    pub const NO_TOKEN: &str = "No token provided";
    pub const INVALID_TOKEN: &str = "Invalid token";
    pub const INGREDIENT_REQUIRED: &str = "At least one ingredient is required";
    pub const INSTRUCTION_REQUIRED: &str = "At least one instruction is required";
    pub const RATING_OUT_OF_RANGE: &str = "Rating must be between 1 and 5";
}

/// Service identity used in logs and health responses
pub mod service_names {
    pub const RECIPESHARE_SERVER: &str = "recipeshare-server";
}
