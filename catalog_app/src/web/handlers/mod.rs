// catalog_app/src/web/handlers/mod.rs

pub mod image_handlers;
pub mod product_handlers;

use actix_web::http::{header, header::ContentType, StatusCode};
use actix_web::HttpResponse;
use serde::Serialize;

use crate::errors::Result;
use crate::state::AppState;

/// Renders a view into an HTML response with the given status.
pub(crate) fn render_view<C: Serialize>(
  app_state: &AppState,
  template_name: &str,
  context: &C,
  status: StatusCode,
) -> Result<HttpResponse> {
  let body = app_state.views.render(template_name, context)?;
  Ok(HttpResponse::build(status).content_type(ContentType::html()).body(body))
}

/// 303 so the browser follows up a form POST with a GET.
pub(crate) fn see_other(location: impl Into<String>) -> HttpResponse {
  HttpResponse::SeeOther()
    .insert_header((header::LOCATION, location.into()))
    .finish()
}
