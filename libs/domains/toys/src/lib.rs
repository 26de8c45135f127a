//! Toys Domain
//!
//! The toy catalog stored in MongoDB: listing, lookup, upsert, delete and text
//! search over one collection.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Id parsing, search policy
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │    Query    │  ← Filter / sort / collation / index documents
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_toys::{handlers, MongoToyRepository, ToyRepository, ToyService};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let repository = MongoToyRepository::new(client.database("toyLand"));
//! repository.ensure_index().await?;
//!
//! let service = ToyService::new(repository);
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod query;
pub mod repository;
pub mod service;

pub use error::{ToyError, ToyResult};
pub use handlers::ApiDoc;
pub use models::{
    DeleteOutcome, InsertOutcome, NewToy, Numeric, Toy, ToyQuery, ToyResponse, ToyUpdate,
    UpdateOutcome,
};
pub use self::mongodb::MongoToyRepository;
pub use repository::ToyRepository;
pub use service::ToyService;
