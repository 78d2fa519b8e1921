use axum::extract::Multipart;
use hill_calories_core::domain::{
    capture::value_objects::UploadedImage, meal_analysis::ports::MealAnalysisService,
    view_state::{entities::CaptureTicket, services::MealScanner},
};
use serde::Serialize;
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::application::http::server::api_entities::api_error::ApiError;

pub const IMAGE_FIELD: &str = "image";

/// Multipart form posted by the file picker.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct CaptureForm {
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
}

#[derive(Debug)]
pub enum ImageUpload {
    /// The picker was dismissed: the form carried an empty file field.
    NoFileSelected,
    Image(UploadedImage),
}

/// Pulls the `image` field out of the form.
///
/// Transfer failures are not request errors: they become an image whose read
/// fails, so the session still moves to the error view.
pub async fn read_image_upload(multipart: &mut Multipart) -> Result<ImageUpload, ApiError> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => {
                return Err(ApiError::BadRequest(format!(
                    "Missing '{}' field in multipart form",
                    IMAGE_FIELD
                )));
            }
            Err(e) => {
                error!("Failed to read multipart field: {}", e);
                return Ok(ImageUpload::Image(UploadedImage::failed(e.to_string())));
            }
        };

        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let file_name = field
            .file_name()
            .filter(|name| !name.is_empty())
            .map(str::to_string);
        let content_type = field.content_type().map(str::to_string);

        return match field.bytes().await {
            Ok(data) if data.is_empty() && file_name.is_none() => Ok(ImageUpload::NoFileSelected),
            Ok(data) => Ok(ImageUpload::Image(UploadedImage::new(
                file_name,
                content_type,
                data,
            ))),
            Err(e) => {
                warn!("Failed to read image bytes: {}", e);
                Ok(ImageUpload::Image(UploadedImage::failed(e.to_string())))
            }
        };
    }
}

/// Moves the scanner to `analyzing` and runs the analysis in the background.
pub async fn spawn_analysis<S>(scanner: MealScanner<S>, image: UploadedImage) -> CaptureTicket
where
    S: MealAnalysisService + 'static,
{
    let ticket = scanner.begin().await;

    tokio::spawn(async move {
        scanner.finish(ticket, &image).await;
    });

    ticket
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CaptureAccepted {
    pub ticket: u64,
}
