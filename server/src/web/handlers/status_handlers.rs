// server/src/web/handlers/status_handlers.rs

use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde_json::json;
use tracing::{error, instrument};

use crate::errors::AppError;
use crate::state::AppState;

pub async fn root_handler() -> HttpResponse {
  HttpResponse::Ok().json(json!({
      "message": "SongSnaps API is running",
      "status": "healthy",
  }))
}

/// Liveness plus a round trip to the record store.
#[instrument(name = "handler::health", skip(app_state))]
pub async fn health_check_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  if let Err(e) = app_state.order_service.check_store().await {
    error!("Health check failed: {}", e);
    return Err(AppError::Unhealthy(e.to_string()));
  }

  Ok(HttpResponse::Ok().json(json!({
      "status": "healthy",
      "database": "connected",
      "timestamp": Utc::now().to_rfc3339(),
  })))
}
