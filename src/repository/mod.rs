//! Repository layer for book storage
//!
//! Handlers only see the [`BookStore`] trait. Two implementations exist:
//! [`memory::MemoryStore`], seeded with fixture data, and
//! [`mysql::MySqlStore`], backed by a `books` table.

pub mod memory;
pub mod mysql;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Book, BookId, NewBook};

/// Storage error
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Book {0} not found")]
    NotFound(BookId),

    #[error("Invalid book id: {0}")]
    InvalidId(String),

    #[error("Assigned id {0} does not fit a book id")]
    IdOutOfRange(u64),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// CRUD operations over book records
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Convert a raw path segment into this store's key type
    fn parse_id(&self, raw: &str) -> StoreResult<BookId>;

    /// Insert a book, returning the identifier assigned to it
    async fn create(&self, book: &NewBook) -> StoreResult<BookId>;

    async fn get(&self, id: &BookId) -> StoreResult<Book>;

    /// Replace the record matching `id`. The stored book keeps `id`.
    async fn update(&self, id: &BookId, book: NewBook) -> StoreResult<Book>;

    /// Remove the record matching `id` and return it
    async fn delete(&self, id: &BookId) -> StoreResult<Book>;

    /// Snapshot of every stored book, oldest first
    async fn list(&self) -> StoreResult<Vec<Book>>;
}
