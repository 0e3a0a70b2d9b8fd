//! Book endpoints

use axum::{
    async_trait,
    extract::{rejection::PathRejection, FromRequestParts, Path, Request, State},
    http::{request::Parts, StatusCode},
    middleware::Next,
    response::Response,
};

use super::presenter::{render, BookPayload, BookResponse};
use crate::{
    error::{AppError, AppResult, ErrorResponse},
    models::Book,
    repository::StoreError,
    AppState,
};

/// Book resolved from the `{book_id}` path segment by [`book_ctx`].
///
/// Stored in the request extensions, which are keyed by type, so nothing
/// else can shadow or overwrite it.
#[derive(Debug, Clone)]
pub struct ResolvedBook(pub Book);

#[async_trait]
impl<S> FromRequestParts<S> for ResolvedBook
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<ResolvedBook>()
            .cloned()
            .ok_or_else(|| AppError::Internal("book context missing from request".to_string()))
    }
}

/// Middleware resolving `{book_id}` into a [`ResolvedBook`].
///
/// Responds 400 for undecodable or unparsable ids and 404 for unknown books,
/// without running the inner handler.
pub async fn book_ctx(
    State(state): State<AppState>,
    book_id: Result<Path<String>, PathRejection>,
    mut request: Request,
    next: Next,
) -> AppResult<Response> {
    let Path(book_id) = book_id.map_err(|e| AppError::InvalidRequest(e.body_text()))?;
    let id = state.store.parse_id(&book_id).map_err(AppError::from_lookup)?;
    let book = state.store.get(&id).await.map_err(AppError::from_lookup)?;

    tracing::debug!("Resolved book {}", book.id);

    request.extensions_mut().insert(ResolvedBook(book));
    Ok(next.run(request).await)
}

/// List all books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "List of books", body = Vec<BookResponse>),
        (status = 422, description = "Response could not be rendered", body = ErrorResponse)
    )
)]
pub async fn list_books(State(state): State<AppState>) -> AppResult<Response> {
    let books = state.store.list().await?;
    render(StatusCode::OK, &BookResponse::list(books))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = BookPayload,
    responses(
        (status = 201, description = "Book created", body = BookResponse),
        (status = 400, description = "Missing or malformed body", body = ErrorResponse),
        (status = 500, description = "Book could not be stored", body = ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    payload: BookPayload,
) -> AppResult<Response> {
    let new_book = payload.into_new_book()?;
    let id = state.store.create(&new_book).await?;

    tracing::info!("Created book {} ({})", id, new_book.title);

    render(StatusCode::CREATED, &BookResponse::from(new_book.with_id(id)))
}

/// Get a book by ID
#[utoipa::path(
    get,
    path = "/books/{book_id}",
    tag = "books",
    params(
        ("book_id" = String, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = BookResponse),
        (status = 400, description = "Malformed book ID", body = ErrorResponse),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn get_book(ResolvedBook(book): ResolvedBook) -> AppResult<Response> {
    render(StatusCode::OK, &BookResponse::from(book))
}

/// Update a book.
///
/// Fields omitted from the body keep their current value.
#[utoipa::path(
    put,
    path = "/books/{book_id}",
    tag = "books",
    params(
        ("book_id" = String, Path, description = "Book ID")
    ),
    request_body = BookPayload,
    responses(
        (status = 200, description = "Book updated", body = BookResponse),
        (status = 400, description = "Malformed body or book ID", body = ErrorResponse),
        (status = 404, description = "Book not found", body = ErrorResponse),
        (status = 500, description = "Book could not be stored", body = ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    ResolvedBook(book): ResolvedBook,
    payload: BookPayload,
) -> AppResult<Response> {
    let id = book.id.clone();
    let updated = state.store.update(&id, payload.merge_into(book)).await?;

    tracing::info!("Updated book {}", updated.id);

    render(StatusCode::OK, &BookResponse::from(updated))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{book_id}",
    tag = "books",
    params(
        ("book_id" = String, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Deleted book", body = BookResponse),
        (status = 400, description = "Malformed book ID", body = ErrorResponse),
        (status = 404, description = "Book not found", body = ErrorResponse),
        (status = 500, description = "Book could not be removed", body = ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    ResolvedBook(book): ResolvedBook,
) -> AppResult<Response> {
    let removed = state.store.delete(&book.id).await.map_err(|e| match e {
        StoreError::NotFound(_) => AppError::NotFound,
        other => AppError::Store(other),
    })?;

    tracing::info!("Deleted book {}", removed.id);

    render(StatusCode::OK, &BookResponse::from(removed))
}
