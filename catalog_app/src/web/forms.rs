// catalog_app/src/web/forms.rs

//! Request-scoped view-models for the create and edit forms.
//!
//! Both forms are posted as `multipart/form-data` with the fields `designation`, `prix`,
//! `quantite`, an optional `image` file, and (edit only) the hidden `existing_image`.

use std::collections::BTreeMap;

use actix_multipart::Multipart;
use futures_util::TryStreamExt;
use serde::Serialize;
use tracing::{debug, warn};
use validator::{Validate, ValidationErrors};

use crate::errors::{AppError, Result};
use crate::models::Product;

/// Field name -> messages, in the shape the templates iterate over.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

const MAX_TEXT_FIELD_BYTES: usize = 16 * 1024;

#[derive(Debug, Clone)]
pub struct UploadedImage {
  pub file_name: String,
  pub bytes: Vec<u8>,
}

/// Raw form input, echoed back into the form when it is redisplayed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FormValues {
  pub designation: String,
  pub prix: String,
  pub quantite: String,
  pub existing_image: Option<String>,
}

impl FormValues {
  pub fn from_product(product: &Product) -> Self {
    Self {
      designation: product.designation.clone(),
      prix: product.prix.to_string(),
      quantite: product.quantite.to_string(),
      existing_image: product.image.clone(),
    }
  }
}

#[derive(Debug, Default, Validate)]
pub struct CreateViewModel {
  #[validate(
    required(message = "La désignation est obligatoire."),
    length(min = 5, max = 50, message = "La désignation doit contenir entre 5 et 50 caractères.")
  )]
  pub designation: Option<String>,

  #[validate(
    required(message = "Le prix est obligatoire et doit être un nombre."),
    range(min = 0.0, message = "Le prix ne peut pas être négatif.")
  )]
  pub prix: Option<f64>,

  #[validate(required(message = "La quantité est obligatoire et doit être un nombre entier."))]
  pub quantite: Option<i32>,

  pub image: Option<UploadedImage>,

  /// Set when the upload was rejected while reading it (e.g. too large).
  pub image_error: Option<String>,
}

/// Field values that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFields {
  pub designation: String,
  pub prix: f64,
  pub quantite: i32,
}

impl CreateViewModel {
  pub fn from_input(values: &FormValues, image: Option<UploadedImage>, image_error: Option<String>) -> Self {
    Self {
      designation: non_blank(&values.designation),
      prix: parse_price(&values.prix),
      quantite: values.quantite.trim().parse::<i32>().ok(),
      image,
      image_error,
    }
  }

  pub fn validated(&self) -> std::result::Result<ProductFields, FieldErrors> {
    let mut errors = match self.validate() {
      Ok(()) => FieldErrors::new(),
      Err(validation_errors) => collect_field_errors(&validation_errors),
    };
    if let Some(message) = &self.image_error {
      errors.entry("image".to_string()).or_default().push(message.clone());
    }
    if !errors.is_empty() {
      return Err(errors);
    }

    match (&self.designation, self.prix, self.quantite) {
      (Some(designation), Some(prix), Some(quantite)) => Ok(ProductFields {
        designation: designation.clone(),
        prix,
        quantite,
      }),
      _ => {
        errors.insert("form".to_string(), vec!["Formulaire incomplet.".to_string()]);
        Err(errors)
      }
    }
  }
}

#[derive(Debug)]
pub struct EditViewModel {
  pub id: i32,
  pub existing_image: Option<String>,
  pub fields: CreateViewModel,
}

impl EditViewModel {
  pub fn validated(&self) -> std::result::Result<ProductFields, FieldErrors> {
    self.fields.validated()
  }
}

/// Everything read out of a posted product form.
#[derive(Debug)]
pub struct ProductForm {
  pub values: FormValues,
  pub model: CreateViewModel,
}

impl ProductForm {
  pub fn into_edit(self, id: i32) -> (FormValues, EditViewModel) {
    let existing_image = self.values.existing_image.clone();
    (
      self.values,
      EditViewModel {
        id,
        existing_image,
        fields: self.model,
      },
    )
  }
}

/// Drains a multipart payload into a [`ProductForm`].
///
/// Malformed payloads are errors. An oversized image is not: it becomes a field error so the
/// form can be redisplayed.
pub async fn read_product_form(mut payload: Multipart, max_upload_bytes: usize) -> Result<ProductForm> {
  let mut values = FormValues::default();
  let mut image = None;
  let mut image_error = None;

  while let Some(mut field) = payload.try_next().await? {
    let name = field.name().unwrap_or_default().to_string();
    let client_file_name = field
      .content_disposition()
      .and_then(|cd| cd.get_filename())
      .map(str::to_string);

    if name == "image" {
      let mut bytes = Vec::new();
      let mut too_large = false;
      while let Some(chunk) = field.try_next().await? {
        // Keep draining so the rest of the payload stays readable.
        if too_large || bytes.len() + chunk.len() > max_upload_bytes {
          too_large = true;
          continue;
        }
        bytes.extend_from_slice(&chunk);
      }

      let file_name = client_file_name.unwrap_or_default();
      if too_large {
        warn!(%file_name, max_upload_bytes, "Rejected oversized image upload.");
        image_error = Some(format!(
          "L'image dépasse la taille maximale autorisée ({} octets).",
          max_upload_bytes
        ));
      } else if !file_name.is_empty() && !bytes.is_empty() {
        debug!(%file_name, size = bytes.len(), "Received image upload.");
        image = Some(UploadedImage { file_name, bytes });
      }
      continue;
    }

    let mut raw = Vec::new();
    while let Some(chunk) = field.try_next().await? {
      if raw.len() + chunk.len() > MAX_TEXT_FIELD_BYTES {
        return Err(AppError::Upload(format!("Form field '{}' is too large.", name)));
      }
      raw.extend_from_slice(&chunk);
    }
    let text =
      String::from_utf8(raw).map_err(|_| AppError::Upload(format!("Form field '{}' is not valid UTF-8.", name)))?;

    match name.as_str() {
      "designation" => values.designation = text,
      "prix" => values.prix = text,
      "quantite" => values.quantite = text,
      "existing_image" => values.existing_image = non_blank(&text),
      other => debug!(field = %other, "Ignoring unknown form field."),
    }
  }

  let model = CreateViewModel::from_input(&values, image, image_error);
  Ok(ProductForm { values, model })
}

fn non_blank(raw: &str) -> Option<String> {
  let trimmed = raw.trim();
  (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Accepts both `9.99` and the French `9,99`. Non-finite values count as unparseable.
fn parse_price(raw: &str) -> Option<f64> {
  raw
    .trim()
    .replace(',', ".")
    .parse::<f64>()
    .ok()
    .filter(|value| value.is_finite())
}

fn collect_field_errors(errors: &ValidationErrors) -> FieldErrors {
  let mut collected = FieldErrors::new();
  for (field, field_errors) in errors.field_errors() {
    let messages = field_errors
      .iter()
      .map(|e| {
        e.message
          .as_ref()
          .map(|m| m.to_string())
          .unwrap_or_else(|| format!("Valeur invalide ({}).", e.code))
      })
      .collect();
    collected.insert(field.to_string(), messages);
  }
  collected
}
