// catalog_app/src/web/handlers/image_handlers.rs

use actix_web::http::header;
use actix_web::{web, HttpResponse};
use tracing::{instrument, warn};

use crate::errors::{AppError, Result};
use crate::state::AppState;
use crate::storage::content_type_for;

#[instrument(name = "handler::serve_image", skip(app_state, path), fields(file_name = %path.as_str()))]
pub async fn serve_image_handler(app_state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse> {
  let file_name = path.into_inner();
  match app_state.images.read(&file_name).await? {
    Some(bytes) => Ok(
      HttpResponse::Ok()
        .content_type(content_type_for(&file_name))
        .insert_header((header::CACHE_CONTROL, "public, max-age=86400"))
        .body(bytes),
    ),
    None => {
      warn!("Requested image does not exist.");
      Err(AppError::NotFound(format!("Image '{}' not found.", file_name)))
    }
  }
}
