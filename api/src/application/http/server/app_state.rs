use std::sync::Arc;

use hill_calories_core::application::HillCaloriesService;

use crate::{application::http::server::session::SessionStore, args::Args};

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub sessions: Arc<SessionStore<HillCaloriesService>>,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: HillCaloriesService) -> Self {
        let sessions = SessionStore::new(Arc::new(service), args.server.session_ttl());

        Self {
            args,
            sessions: Arc::new(sessions),
        }
    }
}
