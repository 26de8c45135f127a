//! HTTP routes of the toy server, mounted at the root.

pub mod health;
pub mod toys;

use axum::{Router, routing::get};
use domain_toys::{MongoToyRepository, ToyService};

use crate::state::AppState;

pub const BANNER: &str = "Toy server is Running.....";

pub fn routes(state: &AppState, toys: ToyService<MongoToyRepository>) -> Router {
    Router::new()
        .route("/", get(banner))
        .merge(toys::router(toys))
        .merge(health::router(state.clone()))
}

async fn banner() -> &'static str {
    BANNER
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_banner() {
        let app = Router::new().route("/", get(banner));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], BANNER.as_bytes());
    }
}
