//! In-memory book store

use async_trait::async_trait;
use rand::Rng;
use std::collections::HashSet;
use tokio::sync::RwLock;

use super::{BookStore, StoreError, StoreResult};
use crate::models::{Book, BookId, NewBook};

/// Range random keys are drawn from
const KEY_RANGE: std::ops::Range<i64> = 10..110;

/// Book store kept in a vector, in insertion order.
///
/// Every operation holds the lock for its whole duration, so concurrent
/// writers are serialized.
pub struct MemoryStore {
    books: RwLock<Vec<Book>>,
}

impl MemoryStore {
    /// Store seeded with the fixture books
    pub fn with_fixtures() -> Self {
        Self::from_books(fixtures())
    }

    pub fn empty() -> Self {
        Self::from_books(Vec::new())
    }

    pub fn from_books(books: Vec<Book>) -> Self {
        Self {
            books: RwLock::new(books),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::with_fixtures()
    }
}

/// Seed data used when no database is configured
pub fn fixtures() -> Vec<Book> {
    vec![
        NewBook::new("Cattedrale", "Carver").with_id(BookId::from("1")),
        NewBook::new("Uno, nessuno, centomila", "Luigi Pirandello").with_id(BookId::from("2")),
    ]
}

/// Pick a random key not used by `books`, or one past the highest numeric
/// key once the random range is full.
fn assign_key(books: &[Book]) -> BookId {
    let used: HashSet<String> = books.iter().map(|b| b.id.to_string()).collect();

    let free_in_range = KEY_RANGE
        .clone()
        .filter(|k| !used.contains(&k.to_string()))
        .count();

    if free_in_range > 0 {
        let mut rng = rand::thread_rng();
        loop {
            let key = rng.gen_range(KEY_RANGE).to_string();
            if !used.contains(&key) {
                return BookId::Key(key);
            }
        }
    }

    let next = books
        .iter()
        .filter_map(|b| b.id.to_string().parse::<i64>().ok())
        .max()
        .map_or(KEY_RANGE.end, |max| max.max(KEY_RANGE.end - 1) + 1);
    BookId::Key(next.to_string())
}

#[async_trait]
impl BookStore for MemoryStore {
    fn parse_id(&self, raw: &str) -> StoreResult<BookId> {
        Ok(BookId::from(raw))
    }

    async fn create(&self, book: &NewBook) -> StoreResult<BookId> {
        let mut books = self.books.write().await;
        let id = assign_key(&books);
        books.push(book.clone().with_id(id.clone()));
        tracing::debug!("Memory store: created book {}", id);
        Ok(id)
    }

    async fn get(&self, id: &BookId) -> StoreResult<Book> {
        self.books
            .read()
            .await
            .iter()
            .find(|b| &b.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    async fn update(&self, id: &BookId, book: NewBook) -> StoreResult<Book> {
        let mut books = self.books.write().await;
        let slot = books
            .iter_mut()
            .find(|b| &b.id == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        *slot = book.with_id(id.clone());
        Ok(slot.clone())
    }

    async fn delete(&self, id: &BookId) -> StoreResult<Book> {
        let mut books = self.books.write().await;
        let index = books
            .iter()
            .position(|b| &b.id == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        Ok(books.remove(index))
    }

    async fn list(&self) -> StoreResult<Vec<Book>> {
        Ok(self.books.read().await.clone())
    }
}
