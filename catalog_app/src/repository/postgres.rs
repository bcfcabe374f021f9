// catalog_app/src/repository/postgres.rs

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{error, info, instrument};

use super::Repository;
use crate::errors::{AppError, Result};
use crate::models::Product;

const CREATE_PRODUCTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS products (
  id          SERIAL PRIMARY KEY,
  designation VARCHAR(50)      NOT NULL,
  prix        DOUBLE PRECISION NOT NULL,
  quantite    INTEGER          NOT NULL,
  image       TEXT             NULL
)
"#;

pub struct PgProductRepository {
  pool: PgPool,
}

impl PgProductRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  /// Creates the `products` table when it does not exist yet.
  pub async fn ensure_schema(&self) -> Result<()> {
    sqlx::query(CREATE_PRODUCTS_TABLE)
      .execute(&self.pool)
      .await
      .map_err(|e| {
        error!("Failed to create products table: {}", e);
        AppError::Sqlx(e)
      })?;
    info!("Products table is ready.");
    Ok(())
  }
}

/// Escapes LIKE metacharacters so the term is matched literally.
pub(crate) fn like_pattern(term: &str) -> String {
  let mut pattern = String::with_capacity(term.len() + 2);
  pattern.push('%');
  for c in term.chars() {
    if matches!(c, '%' | '_' | '\\') {
      pattern.push('\\');
    }
    pattern.push(c);
  }
  pattern.push('%');
  pattern
}

#[async_trait]
impl Repository<Product> for PgProductRepository {
  #[instrument(name = "pg::get_product", skip(self))]
  async fn get(&self, id: i32) -> Result<Option<Product>> {
    sqlx::query_as::<_, Product>("SELECT id, designation, prix, quantite, image FROM products WHERE id = $1")
      .bind(id)
      .fetch_optional(&self.pool)
      .await
      .map_err(|e| {
        error!("Database error while fetching product {}: {}", id, e);
        AppError::Sqlx(e)
      })
  }

  #[instrument(name = "pg::get_all_products", skip(self))]
  async fn get_all(&self) -> Result<Vec<Product>> {
    sqlx::query_as::<_, Product>("SELECT id, designation, prix, quantite, image FROM products ORDER BY id ASC")
      .fetch_all(&self.pool)
      .await
      .map_err(|e| {
        error!("Failed to fetch products from database: {}", e);
        AppError::Sqlx(e)
      })
  }

  #[instrument(name = "pg::add_product", skip(self, entity), fields(designation = %entity.designation))]
  async fn add(&self, entity: Product) -> Result<Product> {
    sqlx::query_as::<_, Product>(
      "INSERT INTO products (designation, prix, quantite, image) VALUES ($1, $2, $3, $4)
       RETURNING id, designation, prix, quantite, image",
    )
    .bind(&entity.designation)
    .bind(entity.prix)
    .bind(entity.quantite)
    .bind(&entity.image)
    .fetch_one(&self.pool)
    .await
    .map_err(|e| {
      error!("Failed to insert product: {}", e);
      AppError::Sqlx(e)
    })
  }

  #[instrument(name = "pg::update_product", skip(self, entity), fields(product_id = entity.id))]
  async fn update(&self, entity: Product) -> Result<Option<Product>> {
    sqlx::query_as::<_, Product>(
      "UPDATE products SET designation = $2, prix = $3, quantite = $4, image = $5 WHERE id = $1
       RETURNING id, designation, prix, quantite, image",
    )
    .bind(entity.id)
    .bind(&entity.designation)
    .bind(entity.prix)
    .bind(entity.quantite)
    .bind(&entity.image)
    .fetch_optional(&self.pool)
    .await
    .map_err(|e| {
      error!("Failed to update product {}: {}", entity.id, e);
      AppError::Sqlx(e)
    })
  }

  #[instrument(name = "pg::delete_product", skip(self))]
  async fn delete(&self, id: i32) -> Result<Option<Product>> {
    sqlx::query_as::<_, Product>("DELETE FROM products WHERE id = $1 RETURNING id, designation, prix, quantite, image")
      .bind(id)
      .fetch_optional(&self.pool)
      .await
      .map_err(|e| {
        error!("Failed to delete product {}: {}", id, e);
        AppError::Sqlx(e)
      })
  }

  #[instrument(name = "pg::search_products", skip(self))]
  async fn search(&self, term: &str) -> Result<Vec<Product>> {
    let term = term.trim();
    if term.is_empty() {
      return self.get_all().await;
    }
    sqlx::query_as::<_, Product>(
      "SELECT id, designation, prix, quantite, image FROM products
       WHERE designation ILIKE $1 ESCAPE '\\' ORDER BY id ASC",
    )
    .bind(like_pattern(term))
    .fetch_all(&self.pool)
    .await
    .map_err(|e| {
      error!("Failed to search products for '{}': {}", term, e);
      AppError::Sqlx(e)
    })
  }
}
