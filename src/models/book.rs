//! Book model and related types

use serde::Serialize;
use std::fmt;
use utoipa::{
    openapi::{
        schema::{KnownFormat, ObjectBuilder, OneOfBuilder, Schema, SchemaFormat, SchemaType},
        RefOr,
    },
    ToSchema,
};

/// Book identifier.
///
/// The in-memory store hands out string keys, the MySQL store auto-increment
/// integers. Both serialize transparently (`"42"` vs `42`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum BookId {
    Serial(i64),
    Key(String),
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookId::Serial(id) => write!(f, "{}", id),
            BookId::Key(id) => f.write_str(id),
        }
    }
}

impl<'s> ToSchema<'s> for BookId {
    fn schema() -> (&'s str, RefOr<Schema>) {
        let key = ObjectBuilder::new().schema_type(SchemaType::String).build();
        let serial = ObjectBuilder::new()
            .schema_type(SchemaType::Integer)
            .format(Some(SchemaFormat::KnownFormat(KnownFormat::Int64)))
            .build();

        let one_of = OneOfBuilder::new()
            .item(Schema::Object(key))
            .item(Schema::Object(serial))
            .build();

        ("BookId", RefOr::T(Schema::OneOf(one_of)))
    }
}

impl From<i64> for BookId {
    fn from(id: i64) -> Self {
        BookId::Serial(id)
    }
}

impl From<&str> for BookId {
    fn from(id: &str) -> Self {
        BookId::Key(id.to_string())
    }
}

/// Stored book record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Book {
    /// String key in memory mode, integer in MySQL mode
    pub id: BookId,
    pub title: String,
    pub author: String,
}

/// Book data without an identifier, as handed to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
}

impl NewBook {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
        }
    }

    /// Attach an identifier, producing the stored representation
    pub fn with_id(self, id: BookId) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
        }
    }
}

impl From<Book> for NewBook {
    fn from(book: Book) -> Self {
        Self {
            title: book.title,
            author: book.author,
        }
    }
}
