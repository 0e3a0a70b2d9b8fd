//! MySQL-backed book store

use async_trait::async_trait;
use sqlx::{mysql::MySqlPoolOptions, FromRow, MySql, Pool};

use super::{BookStore, StoreError, StoreResult};
use crate::{
    config::DatabaseConfig,
    models::{Book, BookId, NewBook},
};

#[derive(FromRow)]
struct BookRow {
    id: i64,
    title: String,
    author: String,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        NewBook::new(row.title, row.author).with_id(BookId::Serial(row.id))
    }
}

/// Book store over the `books` table
#[derive(Clone)]
pub struct MySqlStore {
    pool: Pool<MySql>,
}

impl MySqlStore {
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }

    /// Connect, run migrations and optionally clear the table
    pub async fn connect(config: &DatabaseConfig) -> StoreResult<Self> {
        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(config.connect_options())
            .await?;

        tracing::info!("Connected to MySQL database {}", config.name);

        sqlx::migrate!("./migrations").run(&pool).await?;

        tracing::info!("Database migrations completed");

        let store = Self::new(pool);
        if config.clear_on_reload {
            store.clear().await?;
        }
        Ok(store)
    }

    /// Remove every book and reset the id sequence
    pub async fn clear(&self) -> StoreResult<()> {
        sqlx::query("TRUNCATE TABLE books")
            .execute(&self.pool)
            .await?;
        tracing::info!("Cleared books table");
        Ok(())
    }
}

fn serial(id: &BookId) -> StoreResult<i64> {
    match id {
        BookId::Serial(id) => Ok(*id),
        BookId::Key(raw) => raw
            .parse()
            .map_err(|_| StoreError::InvalidId(raw.clone())),
    }
}

/// Convert the id MySQL reports for an insert
fn inserted_id(raw: u64) -> StoreResult<BookId> {
    i64::try_from(raw)
        .map(BookId::Serial)
        .map_err(|_| StoreError::IdOutOfRange(raw))
}

#[async_trait]
impl BookStore for MySqlStore {
    fn parse_id(&self, raw: &str) -> StoreResult<BookId> {
        serial(&BookId::from(raw)).map(BookId::Serial)
    }

    async fn create(&self, book: &NewBook) -> StoreResult<BookId> {
        let result = sqlx::query("INSERT INTO books (title, author) VALUES (?, ?)")
            .bind(&book.title)
            .bind(&book.author)
            .execute(&self.pool)
            .await?;
        inserted_id(result.last_insert_id())
    }

    async fn get(&self, id: &BookId) -> StoreResult<Book> {
        sqlx::query_as::<_, BookRow>("SELECT id, title, author FROM books WHERE id = ?")
            .bind(serial(id)?)
            .fetch_optional(&self.pool)
            .await?
            .map(Book::from)
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    async fn update(&self, id: &BookId, book: NewBook) -> StoreResult<Book> {
        let key = serial(id)?;
        let mut tx = self.pool.begin().await?;

        // MySQL reports zero affected rows for no-op updates, so existence
        // is checked on a locked read instead.
        let exists = sqlx::query_scalar::<_, i64>("SELECT id FROM books WHERE id = ? FOR UPDATE")
            .bind(key)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Err(StoreError::NotFound(id.clone()));
        }

        sqlx::query("UPDATE books SET title = ?, author = ? WHERE id = ?")
            .bind(&book.title)
            .bind(&book.author)
            .bind(key)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(book.with_id(BookId::Serial(key)))
    }

    async fn delete(&self, id: &BookId) -> StoreResult<Book> {
        let key = serial(id)?;
        let mut tx = self.pool.begin().await?;

        let book: Book = sqlx::query_as::<_, BookRow>(
            "SELECT id, title, author FROM books WHERE id = ? FOR UPDATE",
        )
        .bind(key)
        .fetch_optional(&mut *tx)
        .await?
        .map(Book::from)
        .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(key)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(book)
    }

    async fn list(&self) -> StoreResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, BookRow>("SELECT id, title, author FROM books ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Book::from).collect())
    }
}
