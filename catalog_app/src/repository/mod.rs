// catalog_app/src/repository/mod.rs

//! Persistence seam for the catalog.
//!
//! Handlers only ever see `Arc<dyn Repository<Product>>`; which adapter sits behind it is
//! decided once in `main` from the configuration.

use async_trait::async_trait;

use crate::errors::Result;

pub mod memory;
pub mod postgres;

pub use memory::MemoryRepository;
pub use postgres::PgProductRepository;

/// What an adapter needs to know about the records it stores.
pub trait Entity: Clone + Send + Sync + 'static {
  fn id(&self) -> i32;
  fn set_id(&mut self, id: i32);
  /// Search predicate used by adapters that filter in process.
  fn matches_term(&self, term: &str) -> bool;
}

#[async_trait]
pub trait Repository<T>: Send + Sync {
  async fn get(&self, id: i32) -> Result<Option<T>>;

  /// Every record, ordered by id.
  async fn get_all(&self) -> Result<Vec<T>>;

  /// Persists a new record and returns it with its assigned id.
  async fn add(&self, entity: T) -> Result<T>;

  /// Overwrites the stored record with the same id. `None` when that record no longer exists.
  async fn update(&self, entity: T) -> Result<Option<T>>;

  /// Removes the record and returns it. `None` when nothing was stored under `id`.
  async fn delete(&self, id: i32) -> Result<Option<T>>;

  /// Case-insensitive substring search; a blank term yields every record.
  async fn search(&self, term: &str) -> Result<Vec<T>>;
}
