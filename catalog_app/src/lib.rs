//! Product catalog web application: list, view, create, edit, delete and search products,
//! with one uploaded image per product.
//!
//! Handlers in [`web::handlers`] talk to storage only through the [`repository::Repository`]
//! and [`storage::ImageStore`] traits held in [`state::AppState`].

pub mod config;
pub mod errors;
pub mod models;
pub mod repository;
pub mod state;
pub mod storage;
pub mod views;
pub mod web;

pub use errors::{AppError, Result};
pub use state::AppState;
