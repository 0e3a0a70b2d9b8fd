//! Request binding and response rendering for books

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookId, NewBook},
};

const MISSING_FIELDS: &str = "missing required Book fields";

/// Inbound book payload. Any `id` in the body is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
pub struct BookPayload {
    pub title: Option<String>,
    pub author: Option<String>,
}

impl BookPayload {
    /// Decode a raw request body.
    ///
    /// An empty body or a JSON `null` is rejected as missing fields.
    pub fn bind(body: &[u8]) -> AppResult<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(AppError::InvalidRequest(MISSING_FIELDS.to_string()));
        }

        serde_json::from_slice::<Option<BookPayload>>(body)
            .map_err(|e| AppError::InvalidRequest(e.to_string()))?
            .ok_or_else(|| AppError::InvalidRequest(MISSING_FIELDS.to_string()))
    }

    /// Book to create; both fields must be present
    pub fn into_new_book(self) -> AppResult<NewBook> {
        match (self.title, self.author) {
            (Some(title), Some(author)) => Ok(NewBook::new(title, author)),
            _ => Err(AppError::InvalidRequest(MISSING_FIELDS.to_string())),
        }
    }

    /// Overlay the present fields on `book`; omitted fields keep their value
    pub fn merge_into(self, book: Book) -> NewBook {
        NewBook {
            title: self.title.unwrap_or(book.title),
            author: self.author.unwrap_or(book.author),
        }
    }
}

#[async_trait]
impl<S> FromRequest<S> for BookPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::InvalidRequest(e.body_text()))?;
        Self::bind(&body)
    }
}

/// Outbound book representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct BookResponse {
    /// String key in memory mode, integer in MySQL mode
    pub id: BookId,
    pub title: String,
    pub author: String,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            title: book.title,
            author: book.author,
        }
    }
}

impl BookResponse {
    /// Map a list of books, keeping their order
    pub fn list(books: Vec<Book>) -> Vec<BookResponse> {
        books.into_iter().map(BookResponse::from).collect()
    }
}

/// Serialize `value` as the JSON body of a response with `status`
pub fn render<T: Serialize>(status: StatusCode, value: &T) -> AppResult<Response> {
    let body = serde_json::to_vec(value).map_err(|e| AppError::Render(e.to_string()))?;

    let mut response = (status, body).into_response();
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(response)
}
