use utoipa::OpenApi;

use crate::application::http::{health::HealthApiDoc, scan::router::ScanApiDoc};

#[derive(OpenApi)]
#[openapi(info(
    title = "Hill Calories",
    description = "Photograph your plate. Get your macros."
))]
pub struct ApiDoc;

/// The full document: the base info plus every route group.
pub fn openapi() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.merge(ScanApiDoc::openapi());
    doc.merge(HealthApiDoc::openapi());
    doc
}
