//! Application state for the web layer.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::oracle::{CachedOracle, OracleBackend};
use crate::places::PlaceBackend;
use crate::planner::PlannerConfig;
use crate::session::Session;

/// Default idle time before a session is forgotten (1 hour).
pub const DEFAULT_SESSION_IDLE: Duration = Duration::from_secs(60 * 60);

/// A session shared between concurrent requests.
pub type SharedSession = Arc<Mutex<Session>>;

/// In-memory session storage.
///
/// Sessions are keyed by random v4 ids and expire after a period without
/// access.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Cache<Uuid, SharedSession>,
}

impl SessionStore {
    pub fn new(idle: Duration) -> Self {
        Self {
            sessions: Cache::builder()
                .max_capacity(10_000)
                .time_to_idle(idle)
                .build(),
        }
    }

    /// Start a new session and return its id.
    pub async fn create(&self) -> (Uuid, SharedSession) {
        let id = Uuid::new_v4();
        let session = Arc::new(Mutex::new(Session::new()));
        self.sessions.insert(id, session.clone()).await;
        (id, session)
    }

    pub async fn get(&self, id: Uuid) -> Option<SharedSession> {
        self.sessions.get(&id).await
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_IDLE)
    }
}

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Place provider
    pub places: Arc<PlaceBackend>,

    /// Cached travel-time oracle
    pub oracle: Arc<CachedOracle<OracleBackend>>,

    /// Tour planner configuration
    pub config: Arc<PlannerConfig>,

    /// Planning sessions
    pub sessions: SessionStore,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        places: PlaceBackend,
        oracle: CachedOracle<OracleBackend>,
        config: PlannerConfig,
        sessions: SessionStore,
    ) -> Self {
        Self {
            places: Arc::new(places),
            oracle: Arc::new(oracle),
            config: Arc::new(config),
            sessions,
        }
    }
}
