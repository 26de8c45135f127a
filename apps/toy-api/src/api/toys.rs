//! Wires the toys domain to the shared MongoDB database.

use axum::Router;
use domain_toys::{MongoToyRepository, ToyService, handlers};

use crate::state::AppState;

/// Toy service over the configured collection
pub fn service(state: &AppState) -> ToyService<MongoToyRepository> {
    let repository =
        MongoToyRepository::with_collection(state.db.clone(), state.config.mongodb.collection());
    ToyService::new(repository)
}

pub fn router(service: ToyService<MongoToyRepository>) -> Router {
    handlers::router(service)
}
