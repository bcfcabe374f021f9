// catalog_app/src/repository/memory.rs

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

use super::{Entity, Repository};
use crate::errors::Result;

struct Store<T> {
  next_id: i32,
  rows: BTreeMap<i32, T>,
}

/// Process-local repository. Used when no database is configured, and by the tests.
pub struct MemoryRepository<T> {
  store: RwLock<Store<T>>,
}

impl<T: Entity> MemoryRepository<T> {
  pub fn new() -> Self {
    Self {
      store: RwLock::new(Store {
        next_id: 1,
        rows: BTreeMap::new(),
      }),
    }
  }

  pub fn len(&self) -> usize {
    self.store.read().rows.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

impl<T: Entity> Default for MemoryRepository<T> {
  fn default() -> Self {
    Self::new()
  }
}

#[async_trait]
impl<T: Entity> Repository<T> for MemoryRepository<T> {
  async fn get(&self, id: i32) -> Result<Option<T>> {
    Ok(self.store.read().rows.get(&id).cloned())
  }

  async fn get_all(&self) -> Result<Vec<T>> {
    Ok(self.store.read().rows.values().cloned().collect())
  }

  async fn add(&self, mut entity: T) -> Result<T> {
    let mut store = self.store.write();
    let id = store.next_id;
    store.next_id += 1;
    entity.set_id(id);
    store.rows.insert(id, entity.clone());
    debug!(id, "Inserted record into memory repository.");
    Ok(entity)
  }

  async fn update(&self, entity: T) -> Result<Option<T>> {
    let mut store = self.store.write();
    match store.rows.get_mut(&entity.id()) {
      Some(slot) => {
        *slot = entity.clone();
        Ok(Some(entity))
      }
      None => Ok(None),
    }
  }

  async fn delete(&self, id: i32) -> Result<Option<T>> {
    Ok(self.store.write().rows.remove(&id))
  }

  async fn search(&self, term: &str) -> Result<Vec<T>> {
    let term = term.trim();
    let store = self.store.read();
    if term.is_empty() {
      return Ok(store.rows.values().cloned().collect());
    }
    Ok(store.rows.values().filter(|row| row.matches_term(term)).cloned().collect())
  }
}
