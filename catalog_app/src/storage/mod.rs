// catalog_app/src/storage/mod.rs

//! Image files attached to products.
//!
//! Stored names are `{uuid}_{original-file-name}` and always live directly in the store's
//! root directory, so every name handed back to an `ImageStore` must be a single path segment.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::Result;

pub mod disk;
pub mod memory;

pub use disk::DiskImageStore;
pub use memory::MemoryImageStore;

#[async_trait]
pub trait ImageStore: Send + Sync {
  /// Writes the upload under a fresh unique name and returns that name.
  async fn save(&self, original_name: &str, bytes: &[u8]) -> Result<String>;

  /// Removes a stored image. Returns whether a file was actually removed.
  async fn delete(&self, file_name: &str) -> Result<bool>;

  async fn read(&self, file_name: &str) -> Result<Option<Vec<u8>>>;

  async fn exists(&self, file_name: &str) -> Result<bool>;
}

/// Longest file name most filesystems accept, in bytes.
pub const MAX_FILE_NAME_BYTES: usize = 255;

// A hyphenated uuid plus the `_` separator.
const UNIQUE_PREFIX_BYTES: usize = 37;

/// Budget left for the client's name once the unique prefix is in place.
pub const MAX_ORIGINAL_NAME_BYTES: usize = MAX_FILE_NAME_BYTES - UNIQUE_PREFIX_BYTES;

// Longer "extensions" are treated as part of the stem.
const MAX_EXTENSION_BYTES: usize = 16;

/// Reduces a client supplied file name to its last path segment, shortened to
/// `MAX_ORIGINAL_NAME_BYTES` with the extension preserved.
pub fn sanitize_original_name(original: &str) -> String {
  // Some browsers send the full client path, with either separator.
  let last = original.rsplit(['/', '\\']).next().unwrap_or("").trim();
  if last.is_empty() || last == "." || last == ".." {
    return "image".to_string();
  }
  if last.len() <= MAX_ORIGINAL_NAME_BYTES {
    return last.to_string();
  }
  let (stem, extension) = match last.rsplit_once('.') {
    Some((stem, ext)) if !stem.is_empty() && ext.len() < MAX_EXTENSION_BYTES => (stem, &last[stem.len()..]),
    _ => (last, ""),
  };
  let stem = truncate_on_char_boundary(stem, MAX_ORIGINAL_NAME_BYTES - extension.len());
  format!("{}{}", stem, extension)
}

fn truncate_on_char_boundary(value: &str, max_bytes: usize) -> &str {
  if value.len() <= max_bytes {
    return value;
  }
  let mut end = max_bytes;
  while !value.is_char_boundary(end) {
    end -= 1;
  }
  &value[..end]
}

pub fn unique_file_name(original: &str) -> String {
  format!("{}_{}", Uuid::new_v4(), sanitize_original_name(original))
}

/// True when `name` can only resolve to an entry directly inside the store root.
pub fn is_safe_file_name(name: &str) -> bool {
  !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\', '\0'])
}

pub fn content_type_for(file_name: &str) -> &'static str {
  let extension = file_name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase());
  match extension.as_deref() {
    Some("png") => "image/png",
    Some("jpg") | Some("jpeg") => "image/jpeg",
    Some("gif") => "image/gif",
    Some("webp") => "image/webp",
    Some("svg") => "image/svg+xml",
    Some("bmp") => "image/bmp",
    _ => "application/octet-stream",
  }
}
