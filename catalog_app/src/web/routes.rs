// catalog_app/src/web/routes.rs

use actix_web::web;

use crate::web::handlers::{image_handlers, product_handlers};

async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

// Called from `main.rs` (and the integration tests) to configure services for the Actix App.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .route("/", web::get().to(product_handlers::index_handler))
    .route("/health", web::get().to(health_check_handler))
    .route("/images/{file_name}", web::get().to(image_handlers::serve_image_handler))
    .service(
      web::scope("/Product")
        .route("", web::get().to(product_handlers::index_handler))
        .route("/Index", web::get().to(product_handlers::index_handler))
        .route("/Details/{id}", web::get().to(product_handlers::details_handler))
        .route("/Search", web::get().to(product_handlers::search_handler))
        .service(
          web::resource("/Create")
            .route(web::get().to(product_handlers::create_form_handler))
            .route(web::post().to(product_handlers::create_submit_handler)),
        )
        .service(
          web::resource("/Edit/{id}")
            .route(web::get().to(product_handlers::edit_form_handler))
            .route(web::post().to(product_handlers::edit_submit_handler)),
        )
        .service(
          web::resource("/Delete/{id}")
            .route(web::get().to(product_handlers::delete_form_handler))
            .route(web::post().to(product_handlers::delete_confirmed_handler)),
        ),
    );
}
