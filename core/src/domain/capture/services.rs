use crate::domain::{
    capture::{
        entities::{CapturedImage, EncodedImage},
        ports::ImageSource,
    },
    common::entities::app_errors::CoreError,
};

pub fn encode_image(image: &CapturedImage) -> EncodedImage {
    EncodedImage::from_bytes(image.mime_type.clone(), &image.bytes)
}

/// Reads the source and encodes it for transmission.
pub async fn capture_image<S>(source: &S) -> Result<EncodedImage, CoreError>
where
    S: ImageSource,
{
    let image = source.read().await.map_err(|e| match e {
        CoreError::ImageRead(_) => e,
        other => CoreError::ImageRead(other.to_string()),
    })?;

    tracing::debug!(
        mime_type = %image.mime_type,
        size_bytes = image.bytes.len(),
        "Captured meal image"
    );

    Ok(encode_image(&image))
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;
    use crate::domain::capture::ports::MockImageSource;

    #[tokio::test]
    async fn test_capture_image_encodes_source_bytes() {
        let mut source = MockImageSource::new();
        source.expect_read().times(1).returning(|| {
            Box::pin(async {
                Ok(CapturedImage::new(
                    None,
                    Some("image/jpeg"),
                    Bytes::from_static(b"plate"),
                ))
            })
        });

        let encoded = capture_image(&source).await.unwrap();
        assert_eq!(encoded.mime_type, "image/jpeg");
        assert_eq!(encoded.data, "cGxhdGU=");
    }

    #[tokio::test]
    async fn test_capture_image_maps_any_failure_to_read_error() {
        let mut source = MockImageSource::new();
        source.expect_read().times(1).returning(|| {
            Box::pin(async { Err(CoreError::Internal("decoder crashed".to_string())) })
        });

        let err = capture_image(&source).await.unwrap_err();
        assert!(matches!(err, CoreError::ImageRead(_)));
    }
}
