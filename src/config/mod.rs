// ABOUTME: Configuration module grouping environment-driven settings
// ABOUTME: Exposes the typed ServerConfig loaded at process startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RecipeShare contributors

//! Configuration management

/// Environment-based configuration loading
pub mod environment;
