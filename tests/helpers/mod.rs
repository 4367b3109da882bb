// ABOUTME: Shared test helpers for integration tests
// ABOUTME: Exports the axum HTTP request builder utilities
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RecipeShare contributors

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub mod axum_test;
