//! Filter, sort, collation and index documents for the toy collection.
//!
//! Kept free of any I/O so the exact shape of every query can be tested
//! without a running deployment.

use mongodb::IndexModel;
use mongodb::bson::{Document, doc, oid::ObjectId};
use mongodb::options::{Collation, FindOptions, IndexOptions};

use crate::models::ToyUpdate;

/// Name of the compound `{ toyName: 1, category: 1 }` index
pub const TOY_CATEGORY_INDEX: &str = "toyCategory";

/// Locale used when ordering by price
pub const PRICE_COLLATION_LOCALE: &str = "en_US";

/// `{}` or `{ sellerEmail: E }`
pub fn seller_filter(seller_email: Option<&str>) -> Document {
    match seller_email {
        Some(email) => doc! { "sellerEmail": email },
        None => doc! {},
    }
}

/// Exact, case-sensitive match on `category`
pub fn category_filter(category: &str) -> Document {
    doc! { "category": category }
}

pub fn id_filter(id: ObjectId) -> Document {
    doc! { "_id": id }
}

/// Case-insensitive substring match on `toyName` or `category`.
///
/// The text is escaped first, so `.` or `(` match themselves instead of being
/// read as pattern syntax.
pub fn text_filter(text: &str) -> Document {
    let pattern = regex::escape(text);
    doc! {
        "$or": [
            { "toyName": { "$regex": pattern.as_str(), "$options": "i" } },
            { "category": { "$regex": pattern.as_str(), "$options": "i" } },
        ]
    }
}

/// `$set` of the four updatable fields, absent ones as `null`
pub fn update_document(update: ToyUpdate) -> Document {
    doc! {
        "$set": {
            "toyName": update.toy_name,
            "price": update.price,
            "quantity": update.quantity,
            "description": update.description,
        }
    }
}

/// Compares numeric strings by value, so `"9"` sorts before `"10"`
pub fn numeric_collation() -> Collation {
    Collation::builder()
        .locale(PRICE_COLLATION_LOCALE.to_string())
        .numeric_ordering(true)
        .build()
}

/// Ascending price under [`numeric_collation`]
pub fn price_sorted() -> FindOptions {
    FindOptions::builder()
        .sort(doc! { "price": 1 })
        .collation(numeric_collation())
        .build()
}

pub fn toy_category_index() -> IndexModel {
    IndexModel::builder()
        .keys(doc! { "toyName": 1, "category": 1 })
        .options(
            IndexOptions::builder()
                .name(TOY_CATEGORY_INDEX.to_string())
                .build(),
        )
        .build()
}
