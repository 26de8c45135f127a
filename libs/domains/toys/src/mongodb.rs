//! MongoDB implementation of ToyRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{Document, oid::ObjectId},
    options::FindOptions,
};
use tracing::instrument;

use crate::error::ToyResult;
use crate::models::{DeleteOutcome, InsertOutcome, NewToy, Toy, ToyUpdate, UpdateOutcome};
use crate::query;
use crate::repository::ToyRepository;

/// Collection used when none is given
pub const DEFAULT_COLLECTION: &str = "toys";

/// MongoDB implementation of the ToyRepository
pub struct MongoToyRepository {
    collection: Collection<Toy>,
}

impl MongoToyRepository {
    /// ```ignore
    /// let client = database::mongodb::connect("mongodb://localhost:27017").await?;
    /// let repo = MongoToyRepository::new(client.database("toyLand"));
    /// ```
    pub fn new(db: Database) -> Self {
        Self::with_collection(db, DEFAULT_COLLECTION)
    }

    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        let collection = db.collection::<Toy>(collection_name);
        Self { collection }
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<Toy> {
        &self.collection
    }

    async fn find_all(&self, filter: Document, options: Option<FindOptions>) -> ToyResult<Vec<Toy>> {
        let cursor = self.collection.find(filter).with_options(options).await?;
        let toys: Vec<Toy> = cursor.try_collect().await?;
        Ok(toys)
    }
}

#[async_trait]
impl ToyRepository for MongoToyRepository {
    #[instrument(skip(self), fields(collection = %self.collection.name()))]
    async fn ensure_index(&self) -> ToyResult<()> {
        let result = self
            .collection
            .create_index(query::toy_category_index())
            .await?;

        tracing::info!(index = %result.index_name, "Toy index ensured");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self, seller_email: Option<String>) -> ToyResult<Vec<Toy>> {
        let filter = query::seller_filter(seller_email.as_deref());
        self.find_all(filter, Some(query::price_sorted())).await
    }

    #[instrument(skip(self))]
    async fn list_by_category(&self, category: &str) -> ToyResult<Vec<Toy>> {
        self.find_all(query::category_filter(category), None).await
    }

    #[instrument(skip(self), fields(toy_id = %id))]
    async fn get_by_id(&self, id: ObjectId) -> ToyResult<Option<Toy>> {
        let toy = self.collection.find_one(query::id_filter(id)).await?;
        Ok(toy)
    }

    #[instrument(skip(self, update), fields(toy_id = %id))]
    async fn upsert_by_id(&self, id: ObjectId, update: ToyUpdate) -> ToyResult<UpdateOutcome> {
        let result = self
            .collection
            .update_one(query::id_filter(id), query::update_document(update))
            .upsert(true)
            .await?;

        let outcome = UpdateOutcome::from(result);
        if outcome.upserted_count > 0 {
            tracing::info!(toy_id = %id, "Toy created by upsert");
        } else {
            tracing::info!(
                toy_id = %id,
                matched = outcome.matched_count,
                modified = outcome.modified_count,
                "Toy updated"
            );
        }
        Ok(outcome)
    }

    #[instrument(skip(self, toy), fields(toy_name = ?toy.toy_name()))]
    async fn create(&self, toy: NewToy) -> ToyResult<InsertOutcome> {
        let document = toy.into_toy();
        let result = self.collection.insert_one(&document).await?;

        let outcome = InsertOutcome::from(result);
        tracing::info!(toy_id = %outcome.inserted_id, "Toy created successfully");
        Ok(outcome)
    }

    #[instrument(skip(self), fields(toy_id = %id))]
    async fn delete_by_id(&self, id: ObjectId) -> ToyResult<DeleteOutcome> {
        let result = self.collection.delete_one(query::id_filter(id)).await?;

        tracing::info!(toy_id = %id, deleted = result.deleted_count, "Toy delete processed");
        Ok(DeleteOutcome::from(result))
    }

    #[instrument(skip(self))]
    async fn search(&self, text: &str) -> ToyResult<Vec<Toy>> {
        self.find_all(query::text_filter(text), Some(query::price_sorted()))
            .await
    }
}
