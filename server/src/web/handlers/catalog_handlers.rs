// server/src/web/handlers/catalog_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::instrument;

use crate::state::AppState;

/// Returns the plan catalog exactly as the service uses it for new orders.
#[instrument(name = "handler::get_plans", skip(app_state))]
pub async fn get_plans_handler(app_state: web::Data<AppState>) -> HttpResponse {
  HttpResponse::Ok().json(json!({ "plans": app_state.order_service.catalog() }))
}
