// server/src/web/routes.rs

use actix_cors::Cors;
use actix_web::web;

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::web::handlers::{catalog_handlers, order_handlers, status_handlers};

/// CORS for every route: any origin unless one is configured.
pub fn build_cors(config: &AppConfig) -> Cors {
  match &config.cors_allowed_origin {
    Some(origin) => Cors::default()
      .allowed_origin(origin)
      .allow_any_method()
      .allow_any_header()
      .supports_credentials(),
    None => Cors::permissive(),
  }
}

// Rejected bodies and query strings become 400s with the usual `{"detail": ...}` shape.
fn extractor_configs(cfg: &mut web::ServiceConfig) {
  cfg
    .app_data(
      web::JsonConfig::default().error_handler(|err, _req| AppError::Validation(err.to_string()).into()),
    )
    .app_data(
      web::QueryConfig::default().error_handler(|err, _req| AppError::Validation(err.to_string()).into()),
    );
}

// This function will be called in `main.rs` to configure services for the Actix App.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  extractor_configs(cfg);
  cfg
    .route("/", web::get().to(status_handlers::root_handler))
    .service(
      web::scope("/api")
        .route("/health", web::get().to(status_handlers::health_check_handler))
        .route(
          "/generate-order",
          web::post().to(order_handlers::generate_order_handler),
        )
        .route("/order/{order_id}", web::get().to(order_handlers::get_order_handler))
        .route(
          "/order/{order_id}/fulfill",
          web::put().to(order_handlers::fulfill_order_handler),
        )
        .route("/orders", web::get().to(order_handlers::list_orders_handler))
        .route("/stats", web::get().to(order_handlers::stats_handler))
        .route("/plans", web::get().to(catalog_handlers::get_plans_handler)),
    );
}
