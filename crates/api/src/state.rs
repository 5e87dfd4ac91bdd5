use std::sync::Arc;

use wardroster_core::roster::RosterService;
use wardroster_db::PgStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the pool and the store are reference-counted handles.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: wardroster_db::DbPool,
    /// Server configuration (JWT secret, timeouts).
    pub config: Arc<ServerConfig>,
    /// Roster engine over the PostgreSQL store.
    pub roster: RosterService<PgStore>,
}

impl AppState {
    pub fn new(pool: wardroster_db::DbPool, config: ServerConfig) -> Self {
        Self {
            roster: RosterService::new(PgStore::new(pool.clone())),
            pool,
            config: Arc::new(config),
        }
    }
}
