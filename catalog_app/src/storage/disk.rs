// catalog_app/src/storage/disk.rs

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

use super::{is_safe_file_name, unique_file_name, ImageStore};
use crate::errors::Result;

/// Images kept as plain files in one directory (normally `<web_root>/images`).
#[derive(Debug, Clone)]
pub struct DiskImageStore {
  root: PathBuf,
}

impl DiskImageStore {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  pub async fn ensure_root(&self) -> Result<()> {
    tokio::fs::create_dir_all(&self.root).await?;
    info!(root = %self.root.display(), "Image directory is ready.");
    Ok(())
  }
}

#[async_trait]
impl ImageStore for DiskImageStore {
  #[instrument(name = "disk_images::save", skip(self, bytes), fields(size = bytes.len()))]
  async fn save(&self, original_name: &str, bytes: &[u8]) -> Result<String> {
    let file_name = unique_file_name(original_name);
    tokio::fs::create_dir_all(&self.root).await?;
    tokio::fs::write(self.root.join(&file_name), bytes).await?;
    debug!(%file_name, "Stored uploaded image.");
    Ok(file_name)
  }

  #[instrument(name = "disk_images::delete", skip(self))]
  async fn delete(&self, file_name: &str) -> Result<bool> {
    if !is_safe_file_name(file_name) {
      warn!("Refusing to delete image with unsafe name.");
      return Ok(false);
    }
    match tokio::fs::remove_file(self.root.join(file_name)).await {
      Ok(()) => {
        debug!("Deleted image file.");
        Ok(true)
      }
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
      Err(e) => Err(e.into()),
    }
  }

  async fn read(&self, file_name: &str) -> Result<Option<Vec<u8>>> {
    if !is_safe_file_name(file_name) {
      return Ok(None);
    }
    match tokio::fs::read(self.root.join(file_name)).await {
      Ok(bytes) => Ok(Some(bytes)),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
      Err(e) => Err(e.into()),
    }
  }

  async fn exists(&self, file_name: &str) -> Result<bool> {
    if !is_safe_file_name(file_name) {
      return Ok(false);
    }
    Ok(tokio::fs::try_exists(self.root.join(file_name)).await?)
  }
}
