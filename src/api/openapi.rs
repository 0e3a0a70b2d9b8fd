//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, health, presenter};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Book API",
        version = "0.1.0",
        description = "Minimal CRUD API over a book catalog"
    ),
    paths(
        // Health
        health::welcome,
        health::ping,
        // Books
        books::list_books,
        books::create_book,
        books::get_book,
        books::update_book,
        books::delete_book,
    ),
    components(
        schemas(
            presenter::BookPayload,
            presenter::BookResponse,
            crate::models::Book,
            crate::models::BookId,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Welcome and liveness endpoints"),
        (name = "books", description = "Book management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
