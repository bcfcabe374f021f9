// catalog_app/src/main.rs

use anyhow::Context;
use actix_web::{web as actix_data, App, HttpServer};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing

use catalog_app::config::AppConfig;
use catalog_app::models::Product;
use catalog_app::repository::{MemoryRepository, PgProductRepository, Repository};
use catalog_app::state::AppState;
use catalog_app::storage::DiskImageStore;
use catalog_app::views::Views;
use catalog_app::web::configure_app_routes;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  // Initialize tracing subscriber for logging
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO) // Default level
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE) // Log when spans close, showing duration
    .init();

  tracing::info!("Starting product catalog server...");

  let app_config = Arc::new(AppConfig::from_env().context("Failed to load application configuration")?);

  let products: Arc<dyn Repository<Product>> = match &app_config.database_url {
    Some(database_url) => {
      let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .context("Failed to connect to the database")?;
      tracing::info!("Successfully connected to the database.");
      let repository = PgProductRepository::new(pool);
      repository.ensure_schema().await.context("Failed to prepare the products table")?;
      Arc::new(repository)
    }
    None => {
      tracing::warn!("DATABASE_URL is not set; products are kept in memory and lost on restart.");
      Arc::new(MemoryRepository::<Product>::new())
    }
  };

  let images = DiskImageStore::new(app_config.images_dir());
  images.ensure_root().await.context("Failed to create the image directory")?;

  let app_state = AppState {
    products,
    images: Arc::new(images),
    views: Arc::new(Views::embedded().context("Failed to load view templates")?),
    config: app_config.clone(),
  };

  let server_address = app_config.server_address();
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(configure_app_routes)
  })
  .bind(&server_address)
  .with_context(|| format!("Failed to bind {}", server_address))?
  .run()
  .await?;

  Ok(())
}
