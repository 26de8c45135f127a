//! Integration tests for the toys domain against a real MongoDB
//!
//! Each test starts its own container and database. Run with:
//! `cargo test -p domain_toys -- --ignored` (requires Docker).

use domain_toys::{
    MongoToyRepository, NewToy, Numeric, Toy, ToyError, ToyQuery, ToyRepository, ToyService,
    ToyUpdate,
};
use mongodb::Database;
use mongodb::bson::{Bson, Document, doc, oid::ObjectId};
use test_utils::assertions::{assert_some, assert_sorted_by};
use test_utils::{TestDataBuilder, TestMongo};

struct Fixture {
    // Keeps the container alive for the duration of the test
    _mongo: TestMongo,
    db: Database,
    service: ToyService<MongoToyRepository>,
    builder: TestDataBuilder,
}

async fn setup(test_name: &str) -> Fixture {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name(test_name);
    let db = mongo.database(&builder.database());

    let repository = MongoToyRepository::new(db.clone());
    repository.ensure_index().await.unwrap();

    Fixture {
        _mongo: mongo,
        db,
        service: ToyService::new(repository),
        builder,
    }
}

fn new_toy(name: &str, category: &str, price: impl Into<Bson>, seller: &str) -> NewToy {
    let price: Bson = price.into();
    NewToy::from(doc! {
        "toyName": name,
        "category": category,
        "price": price,
        "quantity": 1,
        "description": format!("{} for testing", name),
        "sellerEmail": seller,
    })
}

fn names(toys: &[Toy]) -> Vec<&str> {
    toys.iter().filter_map(Toy::toy_name).collect()
}

/// Price as a number, for toys whose prices are all stored as one type
fn price_value(toy: &Toy) -> f64 {
    match toy.price() {
        Some(Bson::Int32(n)) => f64::from(*n),
        Some(Bson::Int64(n)) => *n as f64,
        Some(Bson::Double(n)) => *n,
        Some(Bson::String(s)) => s.parse().unwrap_or(f64::MAX),
        _ => f64::MIN,
    }
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_ensure_index_is_idempotent() {
    let fx = setup("ensure_index_idempotent").await;

    // setup() already created it once
    fx.service.ensure_index().await.unwrap();

    let names = fx
        .db
        .collection::<Document>("toys")
        .list_index_names()
        .await
        .unwrap();
    assert!(names.contains(&"toyCategory".to_string()));
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_list_orders_numeric_strings_by_value() {
    let fx = setup("list_numeric_order").await;
    let seller = fx.builder.seller_email("alice");

    for (name, price) in [("Ten", "10"), ("Nine", "9"), ("Hundred", "100")] {
        fx.service
            .create_toy(new_toy(name, "Blocks", price, &seller))
            .await
            .unwrap();
    }

    let toys = fx.service.list_toys(ToyQuery::default()).await.unwrap();
    assert_eq!(names(&toys), vec!["Nine", "Ten", "Hundred"]);
    assert_sorted_by(&toys, price_value, "listToys price order");
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_list_filters_by_seller() {
    let fx = setup("list_by_seller").await;
    let alice = fx.builder.seller_email("alice");
    let bob = fx.builder.seller_email("bob");

    fx.service
        .create_toy(new_toy("Car", "Vehicles", 20_i32, &alice))
        .await
        .unwrap();
    fx.service
        .create_toy(new_toy("Doll", "Dolls", 5_i32, &bob))
        .await
        .unwrap();
    fx.service
        .create_toy(new_toy("Truck", "Vehicles", 12_i32, &alice))
        .await
        .unwrap();

    let all = fx.service.list_toys(ToyQuery::default()).await.unwrap();
    assert_eq!(all.len(), 3);

    let mine = fx
        .service
        .list_toys(ToyQuery {
            seller_email: Some(alice.clone()),
        })
        .await
        .unwrap();
    assert_eq!(names(&mine), vec!["Truck", "Car"]);
    assert!(mine.iter().all(|t| t.seller_email() == Some(alice.as_str())));

    let nobody = fx
        .service
        .list_toys(ToyQuery {
            seller_email: Some("nobody@example.com".into()),
        })
        .await
        .unwrap();
    assert!(nobody.is_empty());
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_list_by_category_is_exact_match() {
    let fx = setup("category_exact").await;
    let seller = fx.builder.seller_email("carol");

    fx.service
        .create_toy(new_toy("Racer", "Cars", 9_i32, &seller))
        .await
        .unwrap();
    fx.service
        .create_toy(new_toy("Mini", "cars", 3_i32, &seller))
        .await
        .unwrap();
    fx.service
        .create_toy(new_toy("Sports", "Sports Cars", 30_i32, &seller))
        .await
        .unwrap();

    let toys = fx.service.list_by_category("Cars").await.unwrap();
    assert_eq!(names(&toys), vec!["Racer"]);

    assert!(fx.service.list_by_category("Planes").await.unwrap().is_empty());
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_get_round_trips_and_absent_is_none() {
    let fx = setup("get_round_trip").await;
    let seller = fx.builder.seller_email("dave");

    let created = fx
        .service
        .create_toy(new_toy("Kite", "Outdoor", "15", &seller))
        .await
        .unwrap();
    assert!(created.acknowledged);

    let toy = assert_some(
        fx.service.get_toy(&created.inserted_id).await.unwrap(),
        "created toy",
    );
    assert_eq!(toy.object_id().map(|id| id.to_hex()), Some(created.inserted_id));
    assert_eq!(toy.price(), Some(&Bson::String("15".into())));
    assert_eq!(toy.seller_email(), Some(seller.as_str()));

    let absent = ObjectId::new().to_hex();
    assert!(fx.service.get_toy(&absent).await.unwrap().is_none());

    assert!(matches!(
        fx.service.get_toy("not-an-id").await,
        Err(ToyError::InvalidId(_))
    ));
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_upsert_leaves_category_and_seller_untouched() {
    let fx = setup("upsert_existing").await;
    let seller = fx.builder.seller_email("erin");

    let created = fx
        .service
        .create_toy(new_toy("Ball", "Sports", 4_i32, &seller))
        .await
        .unwrap();

    let outcome = fx
        .service
        .upsert_toy(
            &created.inserted_id,
            ToyUpdate {
                toy_name: Some("Big Ball".into()),
                price: Some(Numeric::Integer(6)),
                quantity: Some(Numeric::Integer(2)),
                description: Some("Bigger".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(outcome.matched_count, 1);
    assert_eq!(outcome.modified_count, 1);
    assert_eq!(outcome.upserted_count, 0);
    assert!(outcome.upserted_id.is_none());

    let toy = assert_some(
        fx.service.get_toy(&created.inserted_id).await.unwrap(),
        "updated toy",
    );
    assert_eq!(toy.toy_name(), Some("Big Ball"));
    assert_eq!(toy.category(), Some("Sports"));
    assert_eq!(toy.seller_email(), Some(seller.as_str()));
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_upsert_unknown_id_creates_partial_document() {
    let fx = setup("upsert_unknown").await;
    let id = ObjectId::new();

    let outcome = fx
        .service
        .upsert_toy(
            &id.to_hex(),
            ToyUpdate {
                toy_name: Some("Ghost".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(outcome.matched_count, 0);
    assert_eq!(outcome.upserted_count, 1);
    assert_eq!(outcome.upserted_id, Some(id.to_hex()));

    let raw = fx
        .db
        .collection::<Document>("toys")
        .find_one(doc! { "_id": id })
        .await
        .unwrap()
        .unwrap();
    let mut keys: Vec<&str> = raw.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec!["_id", "description", "price", "quantity", "toyName"]
    );
    assert!(raw.is_null("price"));
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_delete_is_idempotent() {
    let fx = setup("delete_idempotent").await;
    let seller = fx.builder.seller_email("frank");

    let created = fx
        .service
        .create_toy(new_toy("Top", "Classic", 2_i32, &seller))
        .await
        .unwrap();

    let first = fx.service.delete_toy(&created.inserted_id).await.unwrap();
    assert_eq!(first.deleted_count, 1);

    let second = fx.service.delete_toy(&created.inserted_id).await.unwrap();
    assert_eq!(second.deleted_count, 0);

    let malformed = fx.service.delete_toy("zzz").await.unwrap();
    assert_eq!(malformed.deleted_count, 0);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_search_matches_name_or_category_case_insensitively() {
    let fx = setup("search_or").await;
    let seller = fx.builder.seller_email("gina");

    fx.service
        .create_toy(new_toy("Race CAR", "Vehicles", "25", &seller))
        .await
        .unwrap();
    fx.service
        .create_toy(new_toy("Truck", "cars", "7", &seller))
        .await
        .unwrap();
    fx.service
        .create_toy(new_toy("Doll", "Dolls", "3", &seller))
        .await
        .unwrap();

    let toys = fx.service.search_toys("car").await.unwrap();
    assert_eq!(names(&toys), vec!["Truck", "Race CAR"]);
    assert_sorted_by(&toys, price_value, "search price order");

    assert!(fx.service.search_toys("zeppelin").await.unwrap().is_empty());
    assert!(fx.service.search_toys("").await.unwrap().is_empty());
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_search_treats_metacharacters_literally() {
    let fx = setup("search_escape").await;
    let seller = fx.builder.seller_email("hank");

    fx.service
        .create_toy(new_toy("abc", "Letters", 1_i32, &seller))
        .await
        .unwrap();
    fx.service
        .create_toy(new_toy("a.c (deluxe)", "Letters", 2_i32, &seller))
        .await
        .unwrap();

    let toys = fx.service.search_toys("a.c").await.unwrap();
    assert_eq!(names(&toys), vec!["a.c (deluxe)"]);

    let toys = fx.service.search_toys("(deluxe").await.unwrap();
    assert_eq!(toys.len(), 1);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_toy_lifecycle() {
    let fx = setup("lifecycle").await;
    let seller = fx.builder.seller_email("ivy");

    let created = fx
        .service
        .create_toy(new_toy("X", "C", "15", &seller))
        .await
        .unwrap();
    let id = created.inserted_id;

    let toy = assert_some(fx.service.get_toy(&id).await.unwrap(), "after create");
    assert_eq!(toy.toy_name(), Some("X"));

    let outcome = fx
        .service
        .upsert_toy(
            &id,
            ToyUpdate {
                toy_name: Some("Y".into()),
                price: Some(Numeric::Text("20".into())),
                quantity: Some(Numeric::Integer(1)),
                description: Some("d".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(outcome.matched_count, 1);

    let toy = assert_some(fx.service.get_toy(&id).await.unwrap(), "after upsert");
    assert_eq!(toy.toy_name(), Some("Y"));
    assert_eq!(toy.price(), Some(&Bson::String("20".into())));
    assert_eq!(toy.category(), Some("C"));

    let deleted = fx.service.delete_toy(&id).await.unwrap();
    assert_eq!(deleted.deleted_count, 1);

    assert!(fx.service.get_toy(&id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_numbers_sort_before_numeric_strings() {
    let fx = setup("mixed_price_types").await;
    let seller = fx.builder.seller_email("jack");

    fx.service
        .create_toy(new_toy("Fifteen", "Blocks", 15, &seller))
        .await
        .unwrap();
    fx.service
        .create_toy(new_toy("Two", "Blocks", "2", &seller))
        .await
        .unwrap();
    fx.service
        .create_toy(new_toy("Ten", "Blocks", "10", &seller))
        .await
        .unwrap();

    // The collation orders strings among themselves; every number still
    // precedes every string
    let toys = fx.service.list_toys(ToyQuery::default()).await.unwrap();
    assert_eq!(names(&toys), vec!["Fifteen", "Two", "Ten"]);

    let toys = fx.service.search_toys("blocks").await.unwrap();
    assert_eq!(names(&toys), vec!["Fifteen", "Two", "Ten"]);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_create_stores_the_body_as_given() {
    let fx = setup("create_passthrough").await;

    let created = fx
        .service
        .create_toy(NewToy::from(doc! {
            "toyName": "Car",
            "photoURL": "http://x/p.png",
            "rating": 4.5,
            "subCategory": "rc",
            "price": true,
        }))
        .await
        .unwrap();

    let id = ObjectId::parse_str(&created.inserted_id).unwrap();
    let raw = fx
        .db
        .collection::<Document>("toys")
        .find_one(doc! { "_id": id })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        raw,
        doc! {
            "_id": id,
            "toyName": "Car",
            "photoURL": "http://x/p.png",
            "rating": 4.5,
            "subCategory": "rc",
            "price": true,
        }
    );
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_reads_tolerate_unexpected_field_types() {
    let fx = setup("irregular_documents").await;
    let seller = fx.builder.seller_email("kate");

    fx.service
        .create_toy(new_toy("Regular Car", "Cars", 5, &seller))
        .await
        .unwrap();
    fx.db
        .collection::<Document>("toys")
        .insert_many([
            doc! { "_id": "custom-id", "toyName": "Odd Car", "price": true },
            doc! { "toyName": 42, "category": "cars", "price": { "amount": 3 } },
        ])
        .await
        .unwrap();

    let toys = fx.service.list_toys(ToyQuery::default()).await.unwrap();
    assert_eq!(toys.len(), 3);

    let toys = fx.service.search_toys("car").await.unwrap();
    assert_eq!(toys.len(), 3);
    assert!(
        toys.iter()
            .any(|t| t.id() == Some(&Bson::String("custom-id".into())))
    );
}
