use axum::{extract::State, response::Html};
use axum_extra::extract::cookie::CookieJar;

use crate::application::http::{
    scan::render::{PageLinks, render_page},
    server::{app_state::AppState, session::resolve_session},
};

pub fn page_links(state: &AppState) -> PageLinks {
    let server = &state.args.server;
    PageLinks {
        home: server.page_path(),
        capture: server.route("/capture"),
        reset: server.route("/reset"),
    }
}

pub async fn get_page(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, scanner) =
        resolve_session(&*state.sessions, jar, state.args.server.page_path()).await;

    let view = scanner.view().await;
    (jar, Html(render_page(&view, &page_links(&state))))
}
