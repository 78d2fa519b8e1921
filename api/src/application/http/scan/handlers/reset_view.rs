use axum::{extract::State, response::Redirect};
use axum_extra::extract::cookie::CookieJar;

use crate::application::http::{
    scan::handlers::get_view::ViewResponse,
    server::{api_entities::response::Response, app_state::AppState, session::resolve_session},
};

pub async fn reset_view(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Redirect) {
    let (jar, scanner) =
        resolve_session(&*state.sessions, jar, state.args.server.page_path()).await;

    scanner.reset().await;
    (jar, Redirect::to(&state.args.server.page_path()))
}

#[utoipa::path(
    post,
    path = "/api/reset",
    tag = "scan",
    summary = "Return to the landing view",
    description = "Discards the held result or error of the caller's session",
    responses(
        (status = 200, body = ViewResponse)
    ),
)]
pub async fn reset_view_api(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Response<ViewResponse>) {
    let (jar, scanner) =
        resolve_session(&*state.sessions, jar, state.args.server.page_path()).await;

    scanner.reset().await;
    let view = scanner.view().await;
    (jar, Response::OK(ViewResponse::from(view)))
}
