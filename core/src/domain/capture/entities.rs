use base64::{Engine as _, engine::general_purpose};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::domain::common::entities::app_errors::CoreError;

pub const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

/// Raw image as handed over by the capture source.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedImage {
    pub file_name: Option<String>,
    pub mime_type: String,
    pub bytes: Bytes,
}

impl CapturedImage {
    /// Builds a captured image, resolving its MIME type from the declared
    /// content type first and the file name second.
    pub fn new(file_name: Option<String>, content_type: Option<&str>, bytes: Bytes) -> Self {
        let mime_type = resolve_mime_type(content_type, file_name.as_deref());

        Self {
            file_name,
            mime_type,
            bytes,
        }
    }
}

/// Image payload ready for inline transmission: standard base64, no
/// `data:` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedImage {
    pub mime_type: String,
    pub data: String,
}

impl EncodedImage {
    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: general_purpose::STANDARD.encode(bytes),
        }
    }

    /// Accepts a `data:<mime>;base64,<payload>` URL and keeps only the payload.
    pub fn from_data_url(data_url: &str) -> Result<Self, CoreError> {
        let rest = data_url
            .strip_prefix("data:")
            .ok_or_else(|| CoreError::ImageRead("not a data URL".to_string()))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| CoreError::ImageRead("data URL has no payload".to_string()))?;
        let mime_type = header
            .strip_suffix(";base64")
            .ok_or_else(|| CoreError::ImageRead("data URL is not base64 encoded".to_string()))?;

        if payload.is_empty() {
            return Err(CoreError::ImageRead("data URL payload is empty".to_string()));
        }

        let mime_type = if mime_type.is_empty() {
            DEFAULT_IMAGE_MIME
        } else {
            mime_type
        };

        Ok(Self {
            mime_type: mime_type.to_string(),
            data: payload.to_string(),
        })
    }
}

/// Picks the MIME type sent along with the image.
pub fn resolve_mime_type(content_type: Option<&str>, file_name: Option<&str>) -> String {
    if let Some(content_type) = content_type
        && content_type.starts_with("image/")
    {
        return content_type.to_string();
    }

    if let Some(file_name) = file_name
        && let Some(guess) = mime_guess::from_path(file_name).first()
        && guess.type_() == mime_guess::mime::IMAGE
    {
        return guess.essence_str().to_string();
    }

    DEFAULT_IMAGE_MIME.to_string()
}
