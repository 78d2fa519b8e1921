use std::path::PathBuf;

use bytes::Bytes;

use crate::domain::{
    capture::{entities::CapturedImage, ports::ImageSource},
    common::entities::app_errors::CoreError,
};

/// Reads a meal photo from the local filesystem.
#[derive(Debug, Clone)]
pub struct FileImageSource {
    path: PathBuf,
}

impl FileImageSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ImageSource for FileImageSource {
    async fn read(&self) -> Result<CapturedImage, CoreError> {
        let data = tokio::fs::read(&self.path).await.map_err(|e| {
            tracing::error!("Failed to read image {}: {}", self.path.display(), e);
            CoreError::ImageRead(e.to_string())
        })?;

        if data.is_empty() {
            return Err(CoreError::ImageRead(format!(
                "{} is empty",
                self.path.display()
            )));
        }

        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());

        Ok(CapturedImage::new(file_name, None, Bytes::from(data)))
    }
}
