use axum::{
    extract::{Multipart, State},
    response::Redirect,
};
use axum_extra::extract::cookie::CookieJar;

use crate::application::http::{
    scan::upload::{
        CaptureAccepted, CaptureForm, ImageUpload, read_image_upload, spawn_analysis,
    },
    server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
        session::resolve_session,
    },
};

/// Form target of the file picker. Always lands back on the page.
pub async fn capture_meal(
    State(state): State<AppState>,
    jar: CookieJar,
    mut multipart: Multipart,
) -> Result<(CookieJar, Redirect), ApiError> {
    let (jar, scanner) =
        resolve_session(&*state.sessions, jar, state.args.server.page_path()).await;

    if let ImageUpload::Image(image) = read_image_upload(&mut multipart).await? {
        spawn_analysis(scanner, image).await;
    }

    Ok((jar, Redirect::to(&state.args.server.page_path())))
}

#[utoipa::path(
    post,
    path = "/api/capture",
    tag = "scan",
    summary = "Analyze a meal photo",
    description = "Starts the analysis of the uploaded photo. Poll the view endpoint for the outcome.",
    request_body(content = CaptureForm, content_type = "multipart/form-data"),
    responses(
        (status = 202, body = CaptureAccepted),
        (status = 400, description = "No image in the form")
    ),
)]
pub async fn capture_meal_api(
    State(state): State<AppState>,
    jar: CookieJar,
    mut multipart: Multipart,
) -> Result<(CookieJar, Response<CaptureAccepted>), ApiError> {
    let (jar, scanner) =
        resolve_session(&*state.sessions, jar, state.args.server.page_path()).await;

    let image = match read_image_upload(&mut multipart).await? {
        ImageUpload::Image(image) => image,
        ImageUpload::NoFileSelected => {
            return Err(ApiError::BadRequest("No image selected".to_string()));
        }
    };

    let ticket = spawn_analysis(scanner, image).await;

    Ok((jar, Response::Accepted(CaptureAccepted { ticket: ticket.0 })))
}
