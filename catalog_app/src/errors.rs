// catalog_app/src/errors.rs

use actix_web::http::{header::ContentType, StatusCode};
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Image Storage Error: {0}")]
  Io(#[from] std::io::Error),

  #[error("Template Error: {0}")]
  Template(#[from] tera::Error),

  // Malformed multipart payloads. Oversized images are reported as field errors instead.
  #[error("Upload Error: {0}")]
  Upload(String),

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl AppError {
  pub fn product_not_found(id: i32) -> Self {
    AppError::NotFound(format!("Product with ID {} not found.", id))
  }
}

// Allow anyhow::Error to be converted into AppError::Internal for convenience in handlers
impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    // Keep database failures recognisable when they were wrapped by anyhow
    match err.downcast::<sqlx::Error>() {
      Ok(sqlx_err) => AppError::Sqlx(sqlx_err),
      Err(other) => AppError::Internal(other.to_string()),
    }
  }
}

impl From<actix_multipart::MultipartError> for AppError {
  fn from(err: actix_multipart::MultipartError) -> Self {
    AppError::Upload(err.to_string())
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation(_) | AppError::Upload(_) => StatusCode::BAD_REQUEST,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::Config(_)
      | AppError::Sqlx(_)
      | AppError::Io(_)
      | AppError::Template(_)
      | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    // Log the full error when it's turned into a response
    tracing::error!(application_error = %self, "Responding with error");
    let status = self.status_code();
    // Internal details stay in the log; the page only carries what the user can act on.
    let detail = match self {
      AppError::Validation(m) | AppError::NotFound(m) | AppError::Upload(m) => m.clone(),
      AppError::Sqlx(_) => "Database operation failed.".to_string(),
      AppError::Io(_) => "Image storage operation failed.".to_string(),
      _ => "An internal error occurred.".to_string(),
    };
    HttpResponse::build(status)
      .content_type(ContentType::html())
      .body(error_page(status, &detail))
  }
}

fn error_page(status: StatusCode, detail: &str) -> String {
  let title = status.canonical_reason().unwrap_or("Error");
  format!(
    "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{code} {title}</title></head>\
     <body><h1>{code} {title}</h1><p>{detail}</p><p><a href=\"/Product\">Retour à la liste</a></p></body></html>",
    code = status.as_u16(),
    title = title,
    detail = tera::escape_html(detail),
  )
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
