//! Toy Service - id parsing and search policy on top of the repository

use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{ToyError, ToyResult};
use crate::models::{
    DeleteOutcome, InsertOutcome, NewToy, Toy, ToyQuery, ToyUpdate, UpdateOutcome,
};
use crate::repository::ToyRepository;

/// Parse a path id, rejecting anything but a 24-character hex ObjectId
pub fn parse_id(id: &str) -> ToyResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| ToyError::InvalidId(id.to_string()))
}

pub struct ToyService<R: ToyRepository> {
    repository: Arc<R>,
}

impl<R: ToyRepository> ToyService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create the secondary index; callers treat failure as fatal
    #[instrument(skip(self))]
    pub async fn ensure_index(&self) -> ToyResult<()> {
        self.repository.ensure_index().await
    }

    #[instrument(skip(self))]
    pub async fn list_toys(&self, query: ToyQuery) -> ToyResult<Vec<Toy>> {
        let seller_email = query.seller_email().map(str::to_string);
        self.repository.list(seller_email).await
    }

    #[instrument(skip(self))]
    pub async fn list_by_category(&self, category: &str) -> ToyResult<Vec<Toy>> {
        self.repository.list_by_category(category).await
    }

    /// `Ok(None)` when the id is well formed but nothing is stored under it
    #[instrument(skip(self))]
    pub async fn get_toy(&self, id: &str) -> ToyResult<Option<Toy>> {
        let id = parse_id(id)?;
        self.repository.get_by_id(id).await
    }

    #[instrument(skip(self, update))]
    pub async fn upsert_toy(&self, id: &str, update: ToyUpdate) -> ToyResult<UpdateOutcome> {
        let id = parse_id(id)?;
        self.repository.upsert_by_id(id, update).await
    }

    #[instrument(skip(self, toy))]
    pub async fn create_toy(&self, toy: NewToy) -> ToyResult<InsertOutcome> {
        self.repository.create(toy).await
    }

    /// A malformed id cannot match any document, so it deletes nothing
    #[instrument(skip(self))]
    pub async fn delete_toy(&self, id: &str) -> ToyResult<DeleteOutcome> {
        match parse_id(id) {
            Ok(id) => self.repository.delete_by_id(id).await,
            Err(_) => {
                tracing::debug!(toy_id = id, "Malformed id, nothing to delete");
                Ok(DeleteOutcome::none())
            }
        }
    }

    /// Empty text matches nothing and skips the round trip
    #[instrument(skip(self))]
    pub async fn search_toys(&self, text: &str) -> ToyResult<Vec<Toy>> {
        if text.is_empty() {
            return Ok(Vec::new());
        }
        self.repository.search(text).await
    }
}

impl<R: ToyRepository> Clone for ToyService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
