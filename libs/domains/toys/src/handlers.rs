use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    routing::get,
};
use axum_helpers::{
    AppError, ErrorResponse,
    errors::responses::{
        BadRequestIdResponse, InternalServerErrorResponse, JsonExtractionResponse,
        NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ToyError;
use crate::models::{
    DeleteOutcome, InsertOutcome, NewToy, Numeric, Toy, ToyQuery, ToyResponse, ToyUpdate,
    UpdateOutcome,
};
use crate::repository::ToyRepository;
use crate::service::ToyService;

/// OpenAPI documentation for the toy catalog
#[derive(OpenApi)]
#[openapi(
    paths(
        list_toys,
        create_toy,
        list_by_category,
        get_toy,
        upsert_toy,
        delete_toy,
        search_toys,
    ),
    components(
        schemas(
            ToyResponse,
            NewToy,
            ToyUpdate,
            Numeric,
            InsertOutcome,
            UpdateOutcome,
            DeleteOutcome
        ),
        responses(
            NotFoundResponse,
            BadRequestIdResponse,
            JsonExtractionResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Toys", description = "Toy catalog endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;

/// Toy catalog routes, mounted at the root
pub fn router<R: ToyRepository + 'static>(service: ToyService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/toys", get(list_toys).post(create_toy))
        .route("/toys/{category}", get(list_by_category))
        .route(
            "/toy/{id}",
            get(get_toy).put(upsert_toy).delete(delete_toy),
        )
        .route("/searchToysByText/{text}", get(search_toys))
        .with_state(shared_service)
}

fn to_responses(toys: Vec<Toy>) -> Json<Vec<ToyResponse>> {
    Json(toys.into_iter().map(ToyResponse::from).collect())
}

/// List toys, optionally for one seller, cheapest first
#[utoipa::path(
    get,
    path = "/toys",
    tag = "Toys",
    params(ToyQuery),
    responses(
        (status = 200, description = "Toys sorted by price", body = Vec<ToyResponse>),
        (status = 400, description = "Malformed query string", body = ErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_toys<R: ToyRepository>(
    State(service): State<Arc<ToyService<R>>>,
    query: Result<Query<ToyQuery>, QueryRejection>,
) -> Result<Json<Vec<ToyResponse>>, AppError> {
    let Query(query) = query?;
    let toys = service.list_toys(query).await?;
    Ok(to_responses(toys))
}

/// Add a toy
#[utoipa::path(
    post,
    path = "/toys",
    tag = "Toys",
    request_body = NewToy,
    responses(
        (status = 200, description = "Toy inserted", body = InsertOutcome),
        (status = 422, response = JsonExtractionResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_toy<R: ToyRepository>(
    State(service): State<Arc<ToyService<R>>>,
    payload: Result<Json<NewToy>, JsonRejection>,
) -> Result<Json<InsertOutcome>, AppError> {
    let Json(toy) = payload?;
    let outcome = service.create_toy(toy).await?;
    Ok(Json(outcome))
}

/// Toys in one category
#[utoipa::path(
    get,
    path = "/toys/{category}",
    tag = "Toys",
    params(
        ("category" = String, Path, description = "Exact category name")
    ),
    responses(
        (status = 200, description = "Toys in the category", body = Vec<ToyResponse>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_by_category<R: ToyRepository>(
    State(service): State<Arc<ToyService<R>>>,
    category: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<ToyResponse>>, AppError> {
    let Path(category) = category?;
    let toys = service.list_by_category(&category).await?;
    Ok(to_responses(toys))
}

/// Get a toy by id
#[utoipa::path(
    get,
    path = "/toy/{id}",
    tag = "Toys",
    params(
        ("id" = String, Path, description = "Toy ObjectId (24 hex characters)")
    ),
    responses(
        (status = 200, description = "Toy found", body = ToyResponse),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_toy<R: ToyRepository>(
    State(service): State<Arc<ToyService<R>>>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<ToyResponse>, AppError> {
    let Path(id) = id?;
    let toy = service
        .get_toy(&id)
        .await?
        .ok_or(ToyError::NotFound(id))?;
    Ok(Json(ToyResponse::from(toy)))
}

/// Update a toy, creating it when the id is unknown
#[utoipa::path(
    put,
    path = "/toy/{id}",
    tag = "Toys",
    params(
        ("id" = String, Path, description = "Toy ObjectId (24 hex characters)")
    ),
    request_body = ToyUpdate,
    responses(
        (status = 200, description = "Update applied", body = UpdateOutcome),
        (status = 400, response = BadRequestIdResponse),
        (status = 422, response = JsonExtractionResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn upsert_toy<R: ToyRepository>(
    State(service): State<Arc<ToyService<R>>>,
    id: Result<Path<String>, PathRejection>,
    payload: Result<Json<ToyUpdate>, JsonRejection>,
) -> Result<Json<UpdateOutcome>, AppError> {
    let Path(id) = id?;
    let Json(update) = payload?;
    let outcome = service.upsert_toy(&id, update).await?;
    Ok(Json(outcome))
}

/// Delete a toy
#[utoipa::path(
    delete,
    path = "/toy/{id}",
    tag = "Toys",
    params(
        ("id" = String, Path, description = "Toy ObjectId (24 hex characters)")
    ),
    responses(
        (status = 200, description = "Delete processed; deletedCount is 0 or 1", body = DeleteOutcome),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_toy<R: ToyRepository>(
    State(service): State<Arc<ToyService<R>>>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<DeleteOutcome>, AppError> {
    let Path(id) = id?;
    let outcome = service.delete_toy(&id).await?;
    Ok(Json(outcome))
}

/// Search toy names and categories, case-insensitively
#[utoipa::path(
    get,
    path = "/searchToysByText/{text}",
    tag = "Toys",
    params(
        ("text" = String, Path, description = "Text to look for in toyName or category")
    ),
    responses(
        (status = 200, description = "Matching toys sorted by price", body = Vec<ToyResponse>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_toys<R: ToyRepository>(
    State(service): State<Arc<ToyService<R>>>,
    text: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<ToyResponse>>, AppError> {
    let Path(text) = text?;
    let toys = service.search_toys(&text).await?;
    Ok(to_responses(toys))
}
