//! Shared application state passed to route builders.

use mongodb::{Client, Database};

/// Cheap to clone: the client and database share one connection pool.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub mongo_client: Client,
    /// Database holding the toy collection
    pub db: Database,
}
