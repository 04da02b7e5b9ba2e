//! Media downloading and data-URL encoding for vision calls

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::time::Duration;

use crate::application::errors::AppError;

/// Downloads media bytes and packages them for vision models
pub struct MediaLoader {
    client: reqwest::Client,
}

impl MediaLoader {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self { client }
    }

    /// Download an image and return it as a base64 `data:` URL
    pub async fn fetch_data_url(&self, url: &str) -> Result<String, AppError> {
        tracing::debug!("Downloading media: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::Media(format!("Download failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Media(format!(
                "Failed to download media from {}: status {}",
                url,
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::Media(e.to_string()))?;

        if bytes.is_empty() {
            return Err(AppError::Media(format!("Empty media body from {}", url)));
        }

        Ok(to_data_url(&bytes))
    }
}

impl Default for MediaLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Base64 data URL with the MIME type sniffed from magic bytes
pub fn to_data_url(bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        sniff_mime(bytes),
        STANDARD.encode(bytes)
    )
}

/// Detect the image MIME type from magic bytes; defaults to JPEG
fn sniff_mime(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        "image/png"
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        "image/gif"
    } else if bytes.len() > 11 && bytes.starts_with(b"RIFF") && bytes[8..12] == *b"WEBP" {
        "image/webp"
    } else {
        "image/jpeg"
    }
}
