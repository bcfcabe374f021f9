// catalog_app/src/web/handlers/product_handlers.rs

use actix_multipart::Multipart;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::{error, info, instrument, warn};

use super::{render_view, see_other};
use crate::errors::{AppError, Result};
use crate::models::Product;
use crate::state::AppState;
use crate::views::{ErrorPage, FormPage, ListPage, ProductPage};
use crate::web::forms::{read_product_form, FieldErrors, FormValues};

pub const DELETE_FAILED_MESSAGE: &str =
  "Une erreur est survenue lors de la suppression du produit. Veuillez réessayer.";

#[derive(Deserialize, Debug)]
pub struct SearchQuery {
  pub term: Option<String>,
}

#[instrument(name = "handler::list_products", skip(app_state))]
pub async fn index_handler(app_state: web::Data<AppState>) -> Result<HttpResponse> {
  let products = app_state.products.get_all().await?;
  info!("Successfully fetched {} products.", products.len());
  render_view(
    &app_state,
    "index.html",
    &ListPage {
      products: &products,
      term: None,
    },
    StatusCode::OK,
  )
}

#[instrument(name = "handler::product_details", skip(app_state, path), fields(product_id = %path.as_ref()))]
pub async fn details_handler(app_state: web::Data<AppState>, path: web::Path<i32>) -> Result<HttpResponse> {
  let product = fetch_product(&app_state, path.into_inner()).await?;
  render_view(&app_state, "details.html", &ProductPage { product: &product }, StatusCode::OK)
}

#[instrument(name = "handler::create_form", skip(app_state))]
pub async fn create_form_handler(app_state: web::Data<AppState>) -> Result<HttpResponse> {
  let values = FormValues::default();
  let errors = FieldErrors::new();
  render_view(&app_state, "form.html", &FormPage::create(&values, &errors), StatusCode::OK)
}

#[instrument(name = "handler::create_product", skip(app_state, payload))]
pub async fn create_submit_handler(app_state: web::Data<AppState>, payload: Multipart) -> Result<HttpResponse> {
  let form = read_product_form(payload, app_state.config.max_upload_bytes).await?;

  let fields = match form.model.validated() {
    Ok(fields) => fields,
    Err(errors) => {
      warn!(invalid_fields = ?errors.keys().collect::<Vec<_>>(), "Create form rejected by validation.");
      return render_view(
        &app_state,
        "form.html",
        &FormPage::create(&form.values, &errors),
        StatusCode::UNPROCESSABLE_ENTITY,
      );
    }
  };

  let image = match &form.model.image {
    Some(upload) => Some(app_state.images.save(&upload.file_name, &upload.bytes).await?),
    None => None,
  };

  let product = Product::new(fields.designation, fields.prix, fields.quantite, image.clone());
  let created = match app_state.products.add(product).await {
    Ok(created) => created,
    Err(e) => {
      if let Some(file_name) = &image {
        discard_image(&app_state, file_name).await;
      }
      return Err(e);
    }
  };

  info!(product_id = created.id, image = ?created.image, "Product created.");
  Ok(see_other(format!("/Product/Details/{}", created.id)))
}

#[instrument(name = "handler::edit_form", skip(app_state, path), fields(product_id = %path.as_ref()))]
pub async fn edit_form_handler(app_state: web::Data<AppState>, path: web::Path<i32>) -> Result<HttpResponse> {
  let id = path.into_inner();
  let product = fetch_product(&app_state, id).await?;
  let values = FormValues::from_product(&product);
  let errors = FieldErrors::new();
  render_view(&app_state, "form.html", &FormPage::edit(id, &values, &errors), StatusCode::OK)
}

#[instrument(name = "handler::edit_product", skip(app_state, path, payload), fields(product_id = %path.as_ref()))]
pub async fn edit_submit_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i32>,
  payload: Multipart,
) -> Result<HttpResponse> {
  let id = path.into_inner();
  let form = read_product_form(payload, app_state.config.max_upload_bytes).await?;
  let (values, model) = form.into_edit(id);

  let fields = match model.validated() {
    Ok(fields) => fields,
    Err(errors) => {
      warn!(invalid_fields = ?errors.keys().collect::<Vec<_>>(), "Edit form rejected by validation.");
      return render_view(
        &app_state,
        "form.html",
        &FormPage::edit(id, &values, &errors),
        StatusCode::UNPROCESSABLE_ENTITY,
      );
    }
  };

  let mut product = fetch_product(&app_state, model.id).await?;
  product.designation = fields.designation;
  product.prix = fields.prix;
  product.quantite = fields.quantite;

  // The stored record is authoritative for the current image; the hidden form field only
  // feeds the redisplay.
  let previous_image = product.image.clone();
  let new_image = match &model.fields.image {
    Some(upload) => {
      let file_name = app_state.images.save(&upload.file_name, &upload.bytes).await?;
      product.image = Some(file_name.clone());
      Some(file_name)
    }
    None => None,
  };

  let updated = match app_state.products.update(product).await {
    Ok(updated) => updated,
    Err(e) => {
      if let Some(file_name) = &new_image {
        discard_image(&app_state, file_name).await;
      }
      return Err(e);
    }
  };

  let Some(updated) = updated else {
    warn!("Product vanished before the update could be applied.");
    if let Some(file_name) = &new_image {
      discard_image(&app_state, file_name).await;
    }
    return Err(AppError::product_not_found(id));
  };

  // Only once the record points at the new file is the old one removed.
  if new_image.is_some() {
    if let Some(old) = previous_image.filter(|old| Some(old) != updated.image.as_ref()) {
      discard_image(&app_state, &old).await;
    }
  }

  info!(image = ?updated.image, "Product updated.");
  Ok(see_other("/Product"))
}

#[instrument(name = "handler::delete_form", skip(app_state, path), fields(product_id = %path.as_ref()))]
pub async fn delete_form_handler(app_state: web::Data<AppState>, path: web::Path<i32>) -> Result<HttpResponse> {
  let product = fetch_product(&app_state, path.into_inner()).await?;
  render_view(&app_state, "delete.html", &ProductPage { product: &product }, StatusCode::OK)
}

#[instrument(name = "handler::delete_product", skip(app_state, path), fields(product_id = %path.as_ref()))]
pub async fn delete_confirmed_handler(app_state: web::Data<AppState>, path: web::Path<i32>) -> Result<HttpResponse> {
  let id = path.into_inner();
  match delete_product(&app_state, id).await {
    Ok(()) => {
      info!("Product deleted.");
      Ok(see_other("/Product"))
    }
    Err(AppError::NotFound(message)) => Err(AppError::NotFound(message)),
    Err(e) => {
      error!(error = %e, "Product deletion failed.");
      render_view(
        &app_state,
        "error.html",
        &ErrorPage {
          message: DELETE_FAILED_MESSAGE,
        },
        StatusCode::INTERNAL_SERVER_ERROR,
      )
    }
  }
}

#[instrument(name = "handler::search_products", skip(app_state, query))]
pub async fn search_handler(app_state: web::Data<AppState>, query: web::Query<SearchQuery>) -> Result<HttpResponse> {
  let term = query.into_inner().term.unwrap_or_default();
  let products = app_state.products.search(&term).await?;
  info!(term = %term, hits = products.len(), "Product search completed.");
  render_view(
    &app_state,
    "index.html",
    &ListPage {
      products: &products,
      term: Some(term.as_str()),
    },
    StatusCode::OK,
  )
}

async fn fetch_product(app_state: &AppState, id: i32) -> Result<Product> {
  match app_state.products.get(id).await? {
    Some(product) => Ok(product),
    None => {
      warn!("Product with ID {} not found.", id);
      Err(AppError::product_not_found(id))
    }
  }
}

async fn delete_product(app_state: &AppState, id: i32) -> Result<()> {
  let product = fetch_product(app_state, id).await?;
  // A concurrent delete may have won the race since the fetch.
  app_state
    .products
    .delete(id)
    .await?
    .ok_or_else(|| AppError::product_not_found(id))?;

  if let Some(file_name) = &product.image {
    discard_image(app_state, file_name).await;
  }
  Ok(())
}

/// Best-effort removal; a leftover file is logged, never surfaced to the user.
async fn discard_image(app_state: &AppState, file_name: &str) {
  match app_state.images.delete(file_name).await {
    Ok(true) => info!(%file_name, "Removed image file."),
    Ok(false) => warn!(%file_name, "Image file was already gone."),
    Err(e) => warn!(%file_name, error = %e, "Failed to remove image file; it is now orphaned."),
  }
}
