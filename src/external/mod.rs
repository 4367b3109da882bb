// ABOUTME: Clients for external services the server depends on
// ABOUTME: Currently the Cloudinary image host
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RecipeShare contributors

//! External service integrations

pub mod cloudinary;

pub use cloudinary::{CloudinaryClient, CloudinaryConfig, UploadedImage};
