use mongodb::bson::{Bson, Document, doc, oid::ObjectId};
use mongodb::results::{DeleteResult, InsertOneResult, UpdateResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use utoipa::{IntoParams, ToSchema};

/// A numeric field of an update body.
///
/// Prices and quantities arrive as JSON numbers or numeric-looking strings and
/// are stored in the same shape, so `"15"` stays a string and `15` a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum Numeric {
    Integer(i64),
    Decimal(f64),
    Text(String),
}

impl From<Numeric> for Bson {
    fn from(value: Numeric) -> Self {
        match value {
            Numeric::Integer(n) => Bson::Int64(n),
            Numeric::Decimal(n) => Bson::Double(n),
            Numeric::Text(s) => Bson::String(s),
        }
    }
}

/// Toy document exactly as stored in the `toys` collection.
///
/// Nothing about its shape is guaranteed: documents written by `POST /toys`
/// carry whatever the client sent, and upserts against an unknown id create
/// documents holding only the four updatable fields. Reads therefore never
/// fail on an unexpected field type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Toy(Document);

impl Toy {
    pub fn id(&self) -> Option<&Bson> {
        self.0.get("_id")
    }

    /// The id, when it is an ObjectId
    pub fn object_id(&self) -> Option<ObjectId> {
        self.0.get_object_id("_id").ok()
    }

    pub fn toy_name(&self) -> Option<&str> {
        self.0.get_str("toyName").ok()
    }

    pub fn category(&self) -> Option<&str> {
        self.0.get_str("category").ok()
    }

    pub fn seller_email(&self) -> Option<&str> {
        self.0.get_str("sellerEmail").ok()
    }

    /// Price in whatever BSON type it was stored as
    pub fn price(&self) -> Option<&Bson> {
        self.0.get("price")
    }

    pub fn quantity(&self) -> Option<&Bson> {
        self.0.get("quantity")
    }

    pub fn into_document(self) -> Document {
        self.0
    }
}

impl From<Document> for Toy {
    fn from(document: Document) -> Self {
        Self(document)
    }
}

/// Body of `POST /toys`, inserted as given.
///
/// Any JSON object is accepted; fields and their types are not checked.
/// A client-supplied `_id` is kept, otherwise a new ObjectId is assigned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(
    value_type = Object,
    example = json!({
        "toyName": "Race Car",
        "category": "Vehicles",
        "price": "15",
        "quantity": 3,
        "description": "Remote controlled",
        "sellerEmail": "seller@example.com"
    })
)]
pub struct NewToy(Document);

impl NewToy {
    pub fn toy_name(&self) -> Option<&str> {
        self.0.get_str("toyName").ok()
    }

    pub fn document(&self) -> &Document {
        &self.0
    }

    /// The document to insert, with `_id` first
    pub fn into_toy(self) -> Toy {
        if self.0.contains_key("_id") {
            return Toy(self.0);
        }

        let mut document = doc! { "_id": ObjectId::new() };
        document.extend(self.0);
        Toy(document)
    }
}

impl From<Document> for NewToy {
    fn from(document: Document) -> Self {
        Self(document)
    }
}

/// Body of `PUT /toy/{id}`.
///
/// Exactly these four fields are written; a missing one is written as `null`.
/// `category` and `sellerEmail` can never be changed through an update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToyUpdate {
    pub toy_name: Option<String>,
    pub price: Option<Numeric>,
    pub quantity: Option<Numeric>,
    pub description: Option<String>,
}

/// Toy as returned over HTTP.
///
/// Every stored field is rendered as relaxed Extended JSON, except an
/// ObjectId `_id`, which becomes its 24-character hex string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(
    value_type = Object,
    example = json!({
        "_id": "64b7f0c2a1d3e4f5a6b7c8d9",
        "toyName": "Race Car",
        "category": "Vehicles",
        "price": "15",
        "quantity": 3,
        "sellerEmail": "seller@example.com"
    })
)]
pub struct ToyResponse(Map<String, Value>);

impl ToyResponse {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn id(&self) -> Option<&str> {
        self.0.get("_id").and_then(Value::as_str)
    }
}

impl From<Toy> for ToyResponse {
    fn from(toy: Toy) -> Self {
        let fields = toy
            .0
            .into_iter()
            .map(|(key, value)| {
                let value = match value {
                    Bson::ObjectId(oid) if key == "_id" => Value::String(oid.to_hex()),
                    other => other.into_relaxed_extjson(),
                };
                (key, value)
            })
            .collect();
        Self(fields)
    }
}

/// Query string of `GET /toys`
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ToyQuery {
    /// Only toys listed by this seller; empty means every seller
    pub seller_email: Option<String>,
}

impl ToyQuery {
    /// The seller filter, treating an empty value as absent
    pub fn seller_email(&self) -> Option<&str> {
        self.seller_email.as_deref().filter(|email| !email.is_empty())
    }
}

/// Write acknowledgement for `POST /toys`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertOutcome {
    pub acknowledged: bool,
    #[schema(example = "64b7f0c2a1d3e4f5a6b7c8d9")]
    pub inserted_id: String,
}

/// Write acknowledgement for `PUT /toy/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    /// Set only when the update created a new document
    pub upserted_id: Option<String>,
    pub upserted_count: u64,
}

/// Write acknowledgement for `DELETE /toy/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl DeleteOutcome {
    /// Outcome for a delete that matched nothing
    pub fn none() -> Self {
        Self {
            acknowledged: true,
            deleted_count: 0,
        }
    }
}

/// Hex form of an ObjectId, or the raw BSON text for any other id type
fn id_to_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// The driver only returns results for acknowledged writes.

impl From<InsertOneResult> for InsertOutcome {
    fn from(result: InsertOneResult) -> Self {
        Self {
            acknowledged: true,
            inserted_id: id_to_string(&result.inserted_id),
        }
    }
}

impl From<UpdateResult> for UpdateOutcome {
    fn from(result: UpdateResult) -> Self {
        let upserted_id = result.upserted_id.as_ref().map(id_to_string);
        Self {
            acknowledged: true,
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_count: u64::from(upserted_id.is_some()),
            upserted_id,
        }
    }
}

impl From<DeleteResult> for DeleteOutcome {
    fn from(result: DeleteResult) -> Self {
        Self {
            acknowledged: true,
            deleted_count: result.deleted_count,
        }
    }
}
