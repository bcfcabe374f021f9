// catalog_app/src/views.rs

//! HTML views, rendered with Tera from templates compiled into the binary.

use serde::Serialize;
use tera::Tera;
use tracing::debug;

use crate::errors::{AppError, Result};
use crate::models::Product;
use crate::web::forms::{FieldErrors, FormValues};

const TEMPLATES: &[(&str, &str)] = &[
  ("layout.html", include_str!("../templates/layout.html")),
  ("index.html", include_str!("../templates/index.html")),
  ("details.html", include_str!("../templates/details.html")),
  ("form.html", include_str!("../templates/form.html")),
  ("delete.html", include_str!("../templates/delete.html")),
  ("error.html", include_str!("../templates/error.html")),
];

pub struct Views {
  tera: Tera,
}

impl Views {
  pub fn embedded() -> Result<Self> {
    let mut tera = Tera::default();
    tera
      .add_raw_templates(TEMPLATES.iter().copied())
      .map_err(|e| AppError::Internal(format!("Failed to load view templates: {}", e)))?;
    debug!(count = TEMPLATES.len(), "View templates loaded");
    Ok(Self { tera })
  }

  pub fn render<C: Serialize>(&self, template_name: &str, context: &C) -> Result<String> {
    let context = tera::Context::from_serialize(context)?;
    Ok(self.tera.render(template_name, &context)?)
  }
}

#[derive(Debug, Serialize)]
pub struct ListPage<'a> {
  pub products: &'a [Product],
  pub term: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct ProductPage<'a> {
  pub product: &'a Product,
}

#[derive(Debug, Serialize)]
pub struct FormPage<'a> {
  pub title: &'a str,
  pub action: String,
  pub form: &'a FormValues,
  pub errors: &'a FieldErrors,
  pub editing: bool,
}

impl<'a> FormPage<'a> {
  pub fn create(form: &'a FormValues, errors: &'a FieldErrors) -> Self {
    Self {
      title: "Nouveau produit",
      action: "/Product/Create".to_string(),
      form,
      errors,
      editing: false,
    }
  }

  pub fn edit(id: i32, form: &'a FormValues, errors: &'a FieldErrors) -> Self {
    Self {
      title: "Modifier le produit",
      action: format!("/Product/Edit/{}", id),
      form,
      errors,
      editing: true,
    }
  }
}

#[derive(Debug, Serialize)]
pub struct ErrorPage<'a> {
  pub message: &'a str,
}
