//! Book API
//!
//! A minimal REST JSON API exposing CRUD operations over a book catalog,
//! stored in memory or in a MySQL table.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn repository::BookStore>,
}
