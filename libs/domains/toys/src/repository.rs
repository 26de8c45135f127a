use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::error::ToyResult;
use crate::models::{DeleteOutcome, InsertOutcome, NewToy, Toy, ToyUpdate, UpdateOutcome};

/// Data access for the toy catalog
///
/// Every method is a single round trip to the store and never retries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ToyRepository: Send + Sync {
    /// Idempotently create the `toyCategory` compound index
    async fn ensure_index(&self) -> ToyResult<()>;

    /// All toys, or only one seller's, ascending by price with numeric collation
    async fn list(&self, seller_email: Option<String>) -> ToyResult<Vec<Toy>>;

    /// Toys whose category equals `category` exactly, in natural order
    async fn list_by_category(&self, category: &str) -> ToyResult<Vec<Toy>>;

    async fn get_by_id(&self, id: ObjectId) -> ToyResult<Option<Toy>>;

    /// Set `toyName`, `price`, `quantity` and `description` on the toy.
    ///
    /// An unknown id creates a document holding only those four fields.
    async fn upsert_by_id(&self, id: ObjectId, update: ToyUpdate) -> ToyResult<UpdateOutcome>;

    /// Insert the document as given, assigning an ObjectId when it has no `_id`
    async fn create(&self, toy: NewToy) -> ToyResult<InsertOutcome>;

    async fn delete_by_id(&self, id: ObjectId) -> ToyResult<DeleteOutcome>;

    /// Case-insensitive match of `text` against `toyName` or `category`, sorted like [`list`](Self::list)
    async fn search(&self, text: &str) -> ToyResult<Vec<Toy>>;
}
