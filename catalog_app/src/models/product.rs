// catalog_app/src/models/product.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::repository::Entity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Product {
  /// Assigned by the repository on `add`; zero until then.
  pub id: i32,
  pub designation: String,
  pub prix: f64,
  pub quantite: i32,
  /// Stored file name inside the image directory.
  pub image: Option<String>,
}

impl Product {
  pub fn new(designation: impl Into<String>, prix: f64, quantite: i32, image: Option<String>) -> Self {
    Self {
      id: 0,
      designation: designation.into(),
      prix,
      quantite,
      image,
    }
  }
}

impl Entity for Product {
  fn id(&self) -> i32 {
    self.id
  }

  fn set_id(&mut self, id: i32) {
    self.id = id;
  }

  fn matches_term(&self, term: &str) -> bool {
    self.designation.to_lowercase().contains(&term.to_lowercase())
  }
}
