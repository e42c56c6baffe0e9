pub mod database;
pub mod session_repository;

use sqlx::SqlitePool;
use std::sync::Arc;

/// Persisted session state: a small SQLite key-value table injected
/// into whoever needs it instead of being reached for ambiently.
#[derive(Clone)]
pub struct Repository {
    pub pool: Arc<SqlitePool>,
    pub session: session_repository::SessionRepository,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        let pool = Arc::new(pool);
        Self {
            session: session_repository::SessionRepository::new(pool.clone()),
            pool,
        }
    }
}
