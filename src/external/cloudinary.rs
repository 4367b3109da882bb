// ABOUTME: Cloudinary image host client for uploads, deletion, and delivery URLs
// ABOUTME: Signs API requests with SHA-256 and builds transformation URLs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RecipeShare contributors

//! Cloudinary API client
//!
//! Uploads go to the authenticated upload endpoint with a signed
//! multipart request. Delivery URLs are built locally from the public
//! ID and a transformation string, no API call needed.
//!
//! # API Reference
//! Cloudinary upload API: <https://cloudinary.com/documentation/image_upload_api_reference>

use crate::config::environment::ImageServiceConfig;
use crate::errors::{AppError, AppResult};
use chrono::Utc;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::warn;

/// Transformation applied to the stored main image
const MAIN_TRANSFORMATION: &str = "w_800,h_600,c_fill,q_auto";

/// Cloudinary client configuration
#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    /// Cloud name identifying the account
    pub cloud_name: String,
    /// API key
    pub api_key: String,
    /// API secret used for request signing
    pub api_secret: String,
    /// Folder uploads are grouped under
    pub folder: String,
    /// Base URL for the upload API
    pub api_base_url: String,
    /// Base URL for image delivery
    pub delivery_base_url: String,
}

impl CloudinaryConfig {
    /// Build from environment-derived settings, if fully configured
    #[must_use]
    pub fn from_image_service(config: &ImageServiceConfig) -> Option<Self> {
        Some(Self {
            cloud_name: config.cloud_name.clone()?,
            api_key: config.api_key.clone()?,
            api_secret: config.api_secret.clone()?,
            folder: config.folder.clone(),
            api_base_url: "https://api.cloudinary.com/v1_1".into(),
            delivery_base_url: "https://res.cloudinary.com".into(),
        })
    }
}

/// A successfully uploaded image
#[derive(Debug, Clone, Deserialize)]
pub struct UploadedImage {
    /// HTTPS delivery URL of the stored image
    #[serde(rename = "secure_url")]
    pub url: String,
    /// Public ID used for later management
    pub public_id: String,
    /// Stored width in pixels
    pub width: u32,
    /// Stored height in pixels
    pub height: u32,
    /// Stored format, e.g. "jpg"
    pub format: String,
    /// Stored size in bytes
    pub bytes: u64,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

/// Cloudinary API client
pub struct CloudinaryClient {
    config: CloudinaryConfig,
    http_client: reqwest::Client,
}

impl CloudinaryClient {
    /// Create a new client
    #[must_use]
    pub fn new(config: CloudinaryConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// Upload raw image bytes
    ///
    /// # Errors
    ///
    /// Returns an `ExternalServiceError` if the upload fails
    pub async fn upload_bytes(
        &self,
        bytes: Vec<u8>,
        file_name: &str,
    ) -> AppResult<UploadedImage> {
        let timestamp = Utc::now().timestamp();
        let signature = self.sign(&[
            ("folder", self.config.folder.as_str()),
            ("timestamp", &timestamp.to_string()),
            ("transformation", MAIN_TRANSFORMATION),
        ]);

        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_owned());
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("api_key", self.config.api_key.clone())
            .text("timestamp", timestamp.to_string())
            .text("folder", self.config.folder.clone())
            .text("transformation", MAIN_TRANSFORMATION)
            .text("signature_algorithm", "sha256")
            .text("signature", signature);

        self.post_upload(form).await
    }

    /// Upload an image the host fetches from a remote URL
    ///
    /// # Errors
    ///
    /// Returns an `ExternalServiceError` if the upload fails
    pub async fn upload_from_url(&self, image_url: &str) -> AppResult<UploadedImage> {
        let timestamp = Utc::now().timestamp();
        let signature = self.sign(&[
            ("folder", self.config.folder.as_str()),
            ("timestamp", &timestamp.to_string()),
            ("transformation", MAIN_TRANSFORMATION),
        ]);

        let form = reqwest::multipart::Form::new()
            .text("file", image_url.to_owned())
            .text("api_key", self.config.api_key.clone())
            .text("timestamp", timestamp.to_string())
            .text("folder", self.config.folder.clone())
            .text("transformation", MAIN_TRANSFORMATION)
            .text("signature_algorithm", "sha256")
            .text("signature", signature);

        self.post_upload(form).await
    }

    /// Delete an image by public ID
    ///
    /// Returns `true` when the image existed and was removed.
    ///
    /// # Errors
    ///
    /// Returns an `ExternalServiceError` if the request fails
    pub async fn delete(&self, public_id: &str) -> AppResult<bool> {
        let timestamp = Utc::now().timestamp();
        let signature = self.sign(&[
            ("public_id", public_id),
            ("timestamp", &timestamp.to_string()),
        ]);

        let url = format!(
            "{}/{}/image/destroy",
            self.config.api_base_url, self.config.cloud_name
        );
        let form = reqwest::multipart::Form::new()
            .text("public_id", public_id.to_owned())
            .text("api_key", self.config.api_key.clone())
            .text("timestamp", timestamp.to_string())
            .text("signature_algorithm", "sha256")
            .text("signature", signature);

        let response = self
            .http_client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::external_service("Cloudinary", e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::external_service(
                "Cloudinary",
                format!(
                    "HTTP {}: {}",
                    response.status(),
                    response.text().await.unwrap_or_default()
                ),
            ));
        }

        let destroy: DestroyResponse = response.json().await.map_err(|e| {
            AppError::external_service("Cloudinary", format!("JSON parse error: {e}"))
        })?;

        if destroy.result != "ok" {
            warn!(public_id = %public_id, result = %destroy.result, "Image delete did not succeed");
        }
        Ok(destroy.result == "ok")
    }

    /// Delivery URL with the default optimization (800x600 fill)
    #[must_use]
    pub fn optimized_url(&self, public_id: &str) -> String {
        self.delivery_url(public_id, 800, 600)
    }

    /// Delivery URL for a small thumbnail (300x200 fill)
    #[must_use]
    pub fn thumbnail_url(&self, public_id: &str) -> String {
        self.delivery_url(public_id, 300, 200)
    }

    /// Delivery URL with explicit dimensions
    #[must_use]
    pub fn delivery_url(&self, public_id: &str, width: u32, height: u32) -> String {
        format!(
            "{}/{}/image/upload/w_{width},h_{height},c_fill,q_auto,f_auto/{public_id}",
            self.config.delivery_base_url, self.config.cloud_name
        )
    }

    async fn post_upload(&self, form: reqwest::multipart::Form) -> AppResult<UploadedImage> {
        let url = format!(
            "{}/{}/image/upload",
            self.config.api_base_url, self.config.cloud_name
        );

        let response = self
            .http_client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::external_service("Cloudinary", e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::external_service(
                "Cloudinary",
                format!(
                    "HTTP {}: {}",
                    response.status(),
                    response.text().await.unwrap_or_default()
                ),
            ));
        }

        response.json().await.map_err(|e| {
            AppError::external_service("Cloudinary", format!("JSON parse error: {e}"))
        })
    }

    /// Compute the request signature over sorted parameters
    ///
    /// Parameters must already be sorted by name. The signature is the
    /// SHA-256 hex digest of `k1=v1&k2=v2...` with the API secret
    /// appended.
    fn sign(&self, params: &[(&str, &str)]) -> String {
        let to_sign = params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");

        let mut hasher = Sha256::new();
        hasher.update(to_sign.as_bytes());
        hasher.update(self.config.api_secret.as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> CloudinaryClient {
        CloudinaryClient::new(CloudinaryConfig {
            cloud_name: "demo".into(),
            api_key: "key".into(),
            api_secret: "secret".into(),
            folder: "recipeshare".into(),
            api_base_url: "https://api.cloudinary.com/v1_1".into(),
            delivery_base_url: "https://res.cloudinary.com".into(),
        })
    }

    #[test]
    fn test_delivery_urls() {
        let client = test_client();
        assert_eq!(
            client.thumbnail_url("recipeshare/abc123"),
            "https://res.cloudinary.com/demo/image/upload/w_300,h_200,c_fill,q_auto,f_auto/recipeshare/abc123"
        );
        assert!(client
            .optimized_url("recipeshare/abc123")
            .contains("w_800,h_600"));
    }

    #[test]
    fn test_signature_is_deterministic() {
        let client = test_client();
        let a = client.sign(&[("folder", "recipeshare"), ("timestamp", "1700000000")]);
        let b = client.sign(&[("folder", "recipeshare"), ("timestamp", "1700000000")]);
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_config_requires_all_credentials() {
        let partial = ImageServiceConfig {
            cloud_name: Some("demo".into()),
            api_key: None,
            api_secret: Some("secret".into()),
            folder: "recipeshare".into(),
        };
        assert!(CloudinaryConfig::from_image_service(&partial).is_none());
    }
}
