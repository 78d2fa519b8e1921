use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use hill_calories_core::domain::{
    meal_analysis::ports::MealAnalysisService, view_state::services::MealScanner,
};
use tokio::sync::Mutex;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "hill_session";

struct SessionEntry<S>
where
    S: MealAnalysisService,
{
    scanner: MealScanner<S>,
    last_seen: Instant,
}

/// In-memory scanners, one per browser session. Nothing here outlives the
/// process.
pub struct SessionStore<S>
where
    S: MealAnalysisService,
{
    service: Arc<S>,
    ttl: Duration,
    sessions: Mutex<HashMap<Uuid, SessionEntry<S>>>,
}

impl<S> SessionStore<S>
where
    S: MealAnalysisService,
{
    pub fn new(service: Arc<S>, ttl: Duration) -> Self {
        Self {
            service,
            ttl,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the scanner for `id`, creating a fresh session when the id is
    /// missing or unknown. Idle sessions are pruned whenever one is created.
    pub async fn get_or_create(&self, id: Option<Uuid>) -> (Uuid, MealScanner<S>, bool) {
        let now = Instant::now();
        let mut sessions = self.sessions.lock().await;

        if let Some(id) = id
            && let Some(entry) = sessions.get_mut(&id)
        {
            entry.last_seen = now;
            return (id, entry.scanner.clone(), false);
        }

        let before = sessions.len();
        sessions.retain(|_, entry| now.duration_since(entry.last_seen) < self.ttl);
        let pruned = before - sessions.len();
        if pruned > 0 {
            tracing::debug!(pruned, "Pruned idle sessions");
        }

        let id = Uuid::new_v4();
        let scanner = MealScanner::new(Arc::clone(&self.service));
        sessions.insert(
            id,
            SessionEntry {
                scanner: scanner.clone(),
                last_seen: now,
            },
        );

        (id, scanner, true)
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }
}

/// Resolves the session of the request, adding the cookie when a new
/// session was opened.
pub async fn resolve_session<S>(
    store: &SessionStore<S>,
    jar: CookieJar,
    cookie_path: String,
) -> (CookieJar, MealScanner<S>)
where
    S: MealAnalysisService,
{
    let session_id = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok());

    let (id, scanner, created) = store.get_or_create(session_id).await;
    if !created {
        return (jar, scanner);
    }

    let cookie = Cookie::build((SESSION_COOKIE, id.to_string()))
        .path(cookie_path)
        .http_only(true)
        .same_site(SameSite::Lax);

    (jar.add(cookie), scanner)
}

#[cfg(test)]
mod tests {
    use std::future::Future;

    use hill_calories_core::domain::{
        capture::entities::EncodedImage, common::entities::app_errors::CoreError,
        meal_analysis::entities::NutritionResult,
    };

    use super::*;

    struct UnusedService;

    impl MealAnalysisService for UnusedService {
        fn analyze(
            &self,
            _image: EncodedImage,
        ) -> impl Future<Output = Result<NutritionResult, CoreError>> + Send {
            async { Err(CoreError::AnalysisFailed) }
        }
    }

    #[tokio::test]
    async fn test_known_session_is_reused() {
        let store = SessionStore::new(Arc::new(UnusedService), Duration::from_secs(60));

        let (id, _, created) = store.get_or_create(None).await;
        assert!(created);

        let (same, _, created) = store.get_or_create(Some(id)).await;
        assert_eq!(same, id);
        assert!(!created);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_unknown_session_gets_new_id() {
        let store = SessionStore::new(Arc::new(UnusedService), Duration::from_secs(60));

        let stale = Uuid::new_v4();
        let (id, _, created) = store.get_or_create(Some(stale)).await;
        assert!(created);
        assert_ne!(id, stale);
    }

    #[tokio::test]
    async fn test_idle_sessions_are_pruned() {
        let store = SessionStore::new(Arc::new(UnusedService), Duration::ZERO);

        store.get_or_create(None).await;
        store.get_or_create(None).await;
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_resolve_session_sets_cookie_once() {
        let store = SessionStore::new(Arc::new(UnusedService), Duration::from_secs(60));

        let (jar, _) = resolve_session(&store, CookieJar::new(), "/".to_string()).await;
        let cookie = jar.get(SESSION_COOKIE).unwrap().clone();
        assert!(Uuid::parse_str(cookie.value()).is_ok());

        let (jar, _) = resolve_session(&store, jar, "/".to_string()).await;
        assert_eq!(jar.get(SESSION_COOKIE).unwrap().value(), cookie.value());
        assert_eq!(store.len().await, 1);
    }
}
