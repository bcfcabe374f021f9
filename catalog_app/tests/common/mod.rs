// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use catalog_app::config::AppConfig;
use catalog_app::models::Product;
use catalog_app::repository::{MemoryRepository, Repository};
use catalog_app::state::AppState;
use catalog_app::storage::MemoryImageStore;
use catalog_app::views::Views;
use catalog_app::{AppError, Result};

pub const BOUNDARY: &str = "----catalog-test-boundary";

/// Builds an initialised actix service from an `AppState`.
macro_rules! spawn_app {
  ($state:expr) => {
    actix_web::test::init_service(
      actix_web::App::new()
        .app_data(actix_web::web::Data::new($state))
        .configure(catalog_app::web::configure_app_routes),
    )
    .await
  };
}

pub fn test_config(max_upload_bytes: usize) -> AppConfig {
  AppConfig {
    server_host: "127.0.0.1".to_string(),
    server_port: 0,
    database_url: None,
    web_root: PathBuf::from("unused"),
    max_upload_bytes,
  }
}

pub struct TestCatalog {
  pub repo: Arc<MemoryRepository<Product>>,
  pub images: Arc<MemoryImageStore>,
  pub state: AppState,
}

pub fn setup_tracing() {
  let _ = tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .with_test_writer()
    .try_init();
}

pub fn catalog() -> TestCatalog {
  catalog_with_limit(1024 * 1024)
}

pub fn catalog_with_limit(max_upload_bytes: usize) -> TestCatalog {
  setup_tracing();
  let repo = Arc::new(MemoryRepository::<Product>::new());
  let images = Arc::new(MemoryImageStore::new());
  let state = state_with(repo.clone(), images.clone(), max_upload_bytes);
  TestCatalog { repo, images, state }
}

pub fn state_with(
  products: Arc<dyn Repository<Product>>,
  images: Arc<MemoryImageStore>,
  max_upload_bytes: usize,
) -> AppState {
  AppState {
    products,
    images,
    views: Arc::new(Views::embedded().expect("embedded templates load")),
    config: Arc::new(test_config(max_upload_bytes)),
  }
}

// --- Multipart bodies ---

#[derive(Default)]
pub struct MultipartBody {
  body: Vec<u8>,
}

impl MultipartBody {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn text(mut self, name: &str, value: &str) -> Self {
    self.body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    self
      .body
      .extend_from_slice(format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes());
    self.body.extend_from_slice(value.as_bytes());
    self.body.extend_from_slice(b"\r\n");
    self
  }

  pub fn file(mut self, name: &str, file_name: &str, bytes: &[u8]) -> Self {
    self.body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    self.body.extend_from_slice(
      format!(
        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
        name, file_name
      )
      .as_bytes(),
    );
    self.body.extend_from_slice(bytes);
    self.body.extend_from_slice(b"\r\n");
    self
  }

  pub fn product(designation: &str, prix: &str, quantite: &str) -> Self {
    Self::new()
      .text("designation", designation)
      .text("prix", prix)
      .text("quantite", quantite)
  }

  pub fn finish(mut self) -> Vec<u8> {
    self.body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    self.body
  }
}

pub fn multipart_request(uri: &str, body: MultipartBody) -> actix_web::test::TestRequest {
  actix_web::test::TestRequest::post()
    .uri(uri)
    .insert_header((
      actix_web::http::header::CONTENT_TYPE,
      format!("multipart/form-data; boundary={}", BOUNDARY),
    ))
    .set_payload(body.finish())
}

// --- Misbehaving repositories ---

/// Delegates to a memory repository but fails every delete.
pub struct FailingDeleteRepository {
  pub inner: MemoryRepository<Product>,
}

#[async_trait]
impl Repository<Product> for FailingDeleteRepository {
  async fn get(&self, id: i32) -> Result<Option<Product>> {
    self.inner.get(id).await
  }
  async fn get_all(&self) -> Result<Vec<Product>> {
    self.inner.get_all().await
  }
  async fn add(&self, entity: Product) -> Result<Product> {
    self.inner.add(entity).await
  }
  async fn update(&self, entity: Product) -> Result<Option<Product>> {
    self.inner.update(entity).await
  }
  async fn delete(&self, _id: i32) -> Result<Option<Product>> {
    Err(AppError::Internal("simulated storage outage".to_string()))
  }
  async fn search(&self, term: &str) -> Result<Vec<Product>> {
    self.inner.search(term).await
  }
}

/// Simulates a concurrent delete: reads succeed but every update finds nothing to change.
pub struct VanishingUpdateRepository {
  pub inner: MemoryRepository<Product>,
}

#[async_trait]
impl Repository<Product> for VanishingUpdateRepository {
  async fn get(&self, id: i32) -> Result<Option<Product>> {
    self.inner.get(id).await
  }
  async fn get_all(&self) -> Result<Vec<Product>> {
    self.inner.get_all().await
  }
  async fn add(&self, entity: Product) -> Result<Product> {
    self.inner.add(entity).await
  }
  async fn update(&self, _entity: Product) -> Result<Option<Product>> {
    Ok(None)
  }
  async fn delete(&self, id: i32) -> Result<Option<Product>> {
    self.inner.delete(id).await
  }
  async fn search(&self, term: &str) -> Result<Vec<Product>> {
    self.inner.search(term).await
  }
}

/// Delegates to a memory repository but fails every insert.
pub struct FailingAddRepository {
  pub inner: MemoryRepository<Product>,
}

#[async_trait]
impl Repository<Product> for FailingAddRepository {
  async fn get(&self, id: i32) -> Result<Option<Product>> {
    self.inner.get(id).await
  }
  async fn get_all(&self) -> Result<Vec<Product>> {
    self.inner.get_all().await
  }
  async fn add(&self, _entity: Product) -> Result<Product> {
    Err(AppError::Internal("simulated insert failure".to_string()))
  }
  async fn update(&self, entity: Product) -> Result<Option<Product>> {
    self.inner.update(entity).await
  }
  async fn delete(&self, id: i32) -> Result<Option<Product>> {
    self.inner.delete(id).await
  }
  async fn search(&self, term: &str) -> Result<Vec<Product>> {
    self.inner.search(term).await
  }
}

/// Delegates to a memory repository but every update errors out.
pub struct FailingUpdateRepository {
  pub inner: MemoryRepository<Product>,
}

#[async_trait]
impl Repository<Product> for FailingUpdateRepository {
  async fn get(&self, id: i32) -> Result<Option<Product>> {
    self.inner.get(id).await
  }
  async fn get_all(&self) -> Result<Vec<Product>> {
    self.inner.get_all().await
  }
  async fn add(&self, entity: Product) -> Result<Product> {
    self.inner.add(entity).await
  }
  async fn update(&self, _entity: Product) -> Result<Option<Product>> {
    Err(AppError::Internal("simulated update failure".to_string()))
  }
  async fn delete(&self, id: i32) -> Result<Option<Product>> {
    self.inner.delete(id).await
  }
  async fn search(&self, term: &str) -> Result<Vec<Product>> {
    self.inner.search(term).await
  }
}
