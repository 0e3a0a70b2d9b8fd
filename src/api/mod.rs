//! API handlers and router for the Book API

pub mod books;
pub mod health;
pub mod openapi;
pub mod presenter;

use axum::{
    middleware,
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    // Routes addressing a single book go through the context middleware
    let book_routes = Router::new()
        .route(
            "/books/:book_id",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), books::book_ctx));

    let api = Router::new()
        .route("/", get(health::welcome))
        .route("/ping", get(health::ping))
        .route("/books", get(books::list_books).post(books::create_book))
        .merge(book_routes)
        .with_state(state);

    Router::new()
        .merge(api)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
}
