// catalog_app/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Directory under the web root that holds uploaded product images.
pub const IMAGES_DIR: &str = "images";

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  /// When absent the catalog runs on the in-memory repository.
  pub database_url: Option<String>,
  pub web_root: PathBuf,
  pub max_upload_bytes: usize,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_lookup(|name| env::var(name).ok())
  }

  /// Builds the config from any variable source. `from_env` passes the process environment.
  pub fn from_lookup<F>(lookup: F) -> Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let server_host = lookup("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
    let server_port = lookup("SERVER_PORT")
      .unwrap_or_else(|| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;
    let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
    let web_root = PathBuf::from(lookup("WEB_ROOT").unwrap_or_else(|| "wwwroot".to_string()));
    let max_upload_bytes = match lookup("MAX_UPLOAD_BYTES") {
      Some(raw) => raw
        .parse::<usize>()
        .map_err(|e| AppError::Config(format!("Invalid MAX_UPLOAD_BYTES: {}", e)))?,
      None => DEFAULT_MAX_UPLOAD_BYTES,
    };

    tracing::info!("Application configuration loaded successfully.");
    // The database URL may carry credentials, so only its presence is logged.
    tracing::debug!(
      server_host = %server_host,
      server_port,
      database_configured = database_url.is_some(),
      web_root = %web_root.display(),
      max_upload_bytes,
      "Loaded config details"
    );

    Ok(Self {
      server_host,
      server_port,
      database_url,
      web_root,
      max_upload_bytes,
    })
  }

  pub fn images_dir(&self) -> PathBuf {
    self.web_root.join(IMAGES_DIR)
  }

  pub fn server_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;

  fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |name| vars.get(name).cloned()
  }

  #[test]
  fn defaults_apply_when_nothing_is_set() {
    let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(config.server_address(), "127.0.0.1:8080");
    assert!(config.database_url.is_none());
    assert_eq!(config.images_dir(), PathBuf::from("wwwroot").join("images"));
    assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
  }

  #[test]
  fn explicit_values_override_defaults() {
    let config = AppConfig::from_lookup(lookup_from(&[
      ("SERVER_HOST", "0.0.0.0"),
      ("SERVER_PORT", "9000"),
      ("DATABASE_URL", "postgres://localhost/catalog"),
      ("WEB_ROOT", "/srv/catalog"),
      ("MAX_UPLOAD_BYTES", "1024"),
    ]))
    .unwrap();
    assert_eq!(config.server_address(), "0.0.0.0:9000");
    assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/catalog"));
    assert_eq!(config.images_dir(), PathBuf::from("/srv/catalog/images"));
    assert_eq!(config.max_upload_bytes, 1024);
  }

  #[test]
  fn blank_database_url_means_in_memory() {
    let config = AppConfig::from_lookup(lookup_from(&[("DATABASE_URL", "  ")])).unwrap();
    assert!(config.database_url.is_none());
  }

  #[test]
  fn invalid_port_is_a_config_error() {
    let err = AppConfig::from_lookup(lookup_from(&[("SERVER_PORT", "eighty")])).unwrap_err();
    assert!(matches!(err, AppError::Config(ref m) if m.starts_with("Invalid SERVER_PORT")));
  }

  #[test]
  fn invalid_upload_limit_is_a_config_error() {
    let err = AppConfig::from_lookup(lookup_from(&[("MAX_UPLOAD_BYTES", "-1")])).unwrap_err();
    assert!(matches!(err, AppError::Config(_)));
  }
}
