//! OpenAPI documentation configuration

use utoipa::{Modify, OpenApi};

/// Combined OpenAPI documentation for the toy server
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Toy Catalog API",
        version = "0.1.0",
        description = "MongoDB-backed REST API for a toy marketplace catalog",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    ),
    modifiers(&ToyRoutes),
    tags(
        (name = "Toys", description = "Toy catalog endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;

/// Toy routes are mounted at the root, so their paths merge in unprefixed
struct ToyRoutes;

impl Modify for ToyRoutes {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.merge(domain_toys::ApiDoc::openapi());
    }
}
