// catalog_app/src/storage/memory.rs

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{is_safe_file_name, unique_file_name, ImageStore};
use crate::errors::Result;

/// Keeps images in a map instead of on disk.
#[derive(Debug, Default)]
pub struct MemoryImageStore {
  files: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl MemoryImageStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Places a file under an exact name, bypassing the unique-name scheme.
  pub fn insert(&self, file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) {
    self.files.lock().insert(file_name.into(), bytes.into());
  }

  pub fn contains(&self, file_name: &str) -> bool {
    self.files.lock().contains_key(file_name)
  }

  pub fn file_names(&self) -> Vec<String> {
    self.files.lock().keys().cloned().collect()
  }
}

#[async_trait]
impl ImageStore for MemoryImageStore {
  async fn save(&self, original_name: &str, bytes: &[u8]) -> Result<String> {
    let file_name = unique_file_name(original_name);
    self.files.lock().insert(file_name.clone(), bytes.to_vec());
    Ok(file_name)
  }

  async fn delete(&self, file_name: &str) -> Result<bool> {
    if !is_safe_file_name(file_name) {
      return Ok(false);
    }
    Ok(self.files.lock().remove(file_name).is_some())
  }

  async fn read(&self, file_name: &str) -> Result<Option<Vec<u8>>> {
    if !is_safe_file_name(file_name) {
      return Ok(None);
    }
    Ok(self.files.lock().get(file_name).cloned())
  }

  async fn exists(&self, file_name: &str) -> Result<bool> {
    Ok(is_safe_file_name(file_name) && self.contains(file_name))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[actix_web::test]
  async fn save_then_delete() {
    let store = MemoryImageStore::new();
    let name = store.save("photo.png", b"abc").await.unwrap();
    assert_eq!(store.file_names(), vec![name.clone()]);
    assert_eq!(store.read(&name).await.unwrap(), Some(b"abc".to_vec()));
    assert!(store.delete(&name).await.unwrap());
    assert!(!store.exists(&name).await.unwrap());
  }

  #[actix_web::test]
  async fn unsafe_names_behave_like_missing_files() {
    let store = MemoryImageStore::new();
    // Seeded directly so only the name check stands between the call and the entry.
    store.insert("../secret.png", b"x".to_vec());

    assert!(!store.delete("../secret.png").await.unwrap());
    assert_eq!(store.read("../secret.png").await.unwrap(), None);
    assert!(!store.exists("../secret.png").await.unwrap());
    assert!(store.contains("../secret.png"));
  }
}
