use axum::{
    Router,
    routing::{get, post},
};
use utoipa::OpenApi;

use super::handlers::{
    capture_meal::{__path_capture_meal_api, capture_meal, capture_meal_api},
    get_page::get_page,
    get_view::{__path_get_view, get_view},
    reset_view::{__path_reset_view_api, reset_view, reset_view_api},
};
use crate::application::http::server::app_state::AppState;

#[derive(OpenApi)]
#[openapi(paths(capture_meal_api, get_view, reset_view_api))]
pub struct ScanApiDoc;

pub fn scan_routes(state: AppState) -> Router<AppState> {
    let server = &state.args.server;

    Router::new()
        .route(&server.page_path(), get(get_page))
        .route(&server.route("/capture"), post(capture_meal))
        .route(&server.route("/reset"), post(reset_view))
        .route(&server.route("/api/view"), get(get_view))
        .route(&server.route("/api/capture"), post(capture_meal_api))
        .route(&server.route("/api/reset"), post(reset_view_api))
}
