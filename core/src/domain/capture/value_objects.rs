use bytes::Bytes;

use crate::domain::{
    capture::{entities::CapturedImage, ports::ImageSource},
    common::entities::app_errors::CoreError,
};

/// An image whose bytes were already received by the transport layer.
///
/// A failed transfer is carried along as the read error so the capture still
/// goes through the regular failure transition.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    file_name: Option<String>,
    content_type: Option<String>,
    bytes: Result<Bytes, String>,
}

impl UploadedImage {
    pub fn new(file_name: Option<String>, content_type: Option<String>, bytes: Bytes) -> Self {
        Self {
            file_name,
            content_type,
            bytes: Ok(bytes),
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            file_name: None,
            content_type: None,
            bytes: Err(reason.into()),
        }
    }
}

impl ImageSource for UploadedImage {
    async fn read(&self) -> Result<CapturedImage, CoreError> {
        let bytes = self.bytes.clone().map_err(CoreError::ImageRead)?;

        if bytes.is_empty() {
            return Err(CoreError::ImageRead("uploaded image is empty".to_string()));
        }

        Ok(CapturedImage::new(
            self.file_name.clone(),
            self.content_type.as_deref(),
            bytes,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_uploaded_image_reads_bytes() {
        let image = UploadedImage::new(
            Some("lunch.png".to_string()),
            None,
            Bytes::from_static(b"\x89PNG"),
        );

        let captured = image.read().await.unwrap();
        assert_eq!(captured.mime_type, "image/png");
        assert_eq!(captured.bytes, Bytes::from_static(b"\x89PNG"));
    }

    #[tokio::test]
    async fn test_failed_upload_is_a_read_error() {
        let image = UploadedImage::failed("connection reset");
        let err = image.read().await.unwrap_err();
        assert_eq!(err, CoreError::ImageRead("connection reset".to_string()));
    }

    #[tokio::test]
    async fn test_empty_upload_is_a_read_error() {
        let image = UploadedImage::new(None, Some("image/jpeg".to_string()), Bytes::new());
        assert!(matches!(image.read().await, Err(CoreError::ImageRead(_))));
    }
}
