//! Embedded image payloads

use crate::error::{Result, StoryError};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default ceiling on raw image size (800 KiB)
pub const DEFAULT_MAX_IMAGE_BYTES: u64 = 800 * 1024;

/// An image embedded as a `data:<mime>;base64,<payload>` URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageData(String);

impl ImageData {
    /// Encode raw bytes as a data URL with the given MIME type
    pub fn encode(bytes: &[u8], mime: &str) -> Self {
        ImageData(format!("data:{};base64,{}", mime, BASE64.encode(bytes)))
    }

    /// Wrap an already-encoded data URL as read back from the store
    pub fn from_data_url(url: impl Into<String>) -> Self {
        ImageData(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// MIME type declared by the data URL, if it is well-formed
    pub fn mime_type(&self) -> Option<&str> {
        let rest = self.0.strip_prefix("data:")?;
        let (mime, _) = rest.split_once(';')?;
        Some(mime)
    }

    /// Decode the payload back to raw bytes
    pub fn decode(&self) -> Result<Vec<u8>> {
        let (_, payload) = self
            .0
            .split_once(";base64,")
            .ok_or_else(|| StoryError::Validation("Image is not a base64 data URL".to_string()))?;
        BASE64
            .decode(payload)
            .map_err(|e| StoryError::Validation(format!("Image payload is not valid base64: {}", e)))
    }

    /// First `len` characters followed by "...", or "No Image" when empty
    pub fn preview(&self, len: usize) -> String {
        if self.0.is_empty() {
            return "No Image".to_string();
        }
        let head: String = self.0.chars().take(len).collect();
        format!("{}...", head)
    }
}

/// Guess an image MIME type from a file extension
pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    let mime = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "heic" => "image/heic",
        _ => return None,
    };
    Some(mime)
}
