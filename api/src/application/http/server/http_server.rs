use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{
        HeaderValue, Method,
        header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE},
    },
};
use hill_calories_core::{application::create_service, domain::common::HillCaloriesConfig};
use tower_http::cors::CorsLayer;
use tracing::{debug, info_span, warn};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    application::http::{
        health::health_routes,
        scan::router::scan_routes,
        server::{app_state::AppState, openapi::openapi},
    },
    args::Args,
};

/// Builds the application state. Fails when the Gemini API key is missing.
pub fn state(args: Arc<Args>) -> Result<AppState, anyhow::Error> {
    let config = HillCaloriesConfig::from(args.as_ref().clone());
    let service = create_service(config)?;

    Ok(AppState::new(args, service))
}

///  Returns the [`Router`] of this application.
pub fn router(state: AppState) -> Result<Router, anyhow::Error> {
    let trace_layer = tower_http::trace::TraceLayer::new_for_http().make_span_with(
        |request: &axum::extract::Request| {
            let uri: String = request.uri().to_string();
            info_span!("http_request", method = ?request.method(), uri)
        },
    );

    let allowed_origins = state
        .args
        .server
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid allowed origin: {}", origin);
                None
            }
        })
        .collect::<Vec<HeaderValue>>();

    debug!("Allowed origins: {:?}", allowed_origins);

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_origin(allowed_origins)
        .allow_headers([CONTENT_TYPE, CONTENT_LENGTH, ACCEPT])
        .allow_credentials(true);

    let max_upload_bytes = state.args.server.max_upload_bytes;
    let swagger = SwaggerUi::new(state.args.server.route("/swagger-ui")).url(
        state.args.server.route("/api-docs/openapi.json"),
        openapi(),
    );

    let router = Router::new()
        .merge(swagger)
        .merge(scan_routes(state.clone()))
        .merge(health_routes(state.clone()))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state);

    Ok(router)
}
