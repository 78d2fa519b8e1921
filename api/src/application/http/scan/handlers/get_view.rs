use axum::extract::State;
use axum_extra::extract::cookie::CookieJar;
use hill_calories_core::domain::{meal_analysis::report::MealReport, view_state::entities::ViewState};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::response::Response, app_state::AppState, session::resolve_session,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct ViewResponse {
    #[serde(flatten)]
    pub state: ViewState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<MealReport>,
}

impl From<ViewState> for ViewResponse {
    fn from(state: ViewState) -> Self {
        let report = state.result().map(MealReport::from);
        Self { state, report }
    }
}

#[utoipa::path(
    get,
    path = "/api/view",
    tag = "scan",
    summary = "Current view of the session",
    description = "Returns the view state of the caller's session, with the rendered report once a result is available",
    responses(
        (status = 200, body = ViewResponse)
    ),
)]
pub async fn get_view(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Response<ViewResponse>) {
    let (jar, scanner) =
        resolve_session(&*state.sessions, jar, state.args.server.page_path()).await;

    let view = scanner.view().await;
    (jar, Response::OK(ViewResponse::from(view)))
}
