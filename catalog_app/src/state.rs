// catalog_app/src/state.rs
use crate::config::AppConfig;
use crate::models::Product;
use crate::repository::Repository;
use crate::storage::ImageStore;
use crate::views::Views;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub products: Arc<dyn Repository<Product>>,
  pub images: Arc<dyn ImageStore>,
  pub views: Arc<Views>,
  pub config: Arc<AppConfig>, // Share loaded config
}
