// server/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use songsnaps::{OrderError, StoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  /// Malformed request bodies or query strings.
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Order Error: {source}")]
  Order {
    #[from] // Allows conversion from songsnaps::OrderError
    source: OrderError,
  },

  /// The health probe could not reach the record store.
  #[error("Service unhealthy: {0}")]
  Unhealthy(String),

  #[error("Configuration Error: {0}")]
  Config(String),
}

impl AppError {
  /// Short, client-facing message. Never includes backend details.
  fn detail(&self) -> String {
    match self {
      AppError::Validation(m) => m.clone(),
      AppError::Order { source } => match source {
        OrderError::InvalidPlan { .. } => "Invalid plan type".to_string(),
        OrderError::NotFound { .. } => "Order not found".to_string(),
        OrderError::PersistenceFailure {
          source: StoreError::Unacknowledged { .. },
        } => "Failed to create order".to_string(),
        OrderError::PersistenceFailure { .. } => "Internal server error".to_string(),
      },
      AppError::Unhealthy(_) => "Service unhealthy".to_string(),
      AppError::Config(_) => "Internal server error".to_string(),
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation(_) => StatusCode::BAD_REQUEST,
      AppError::Order { source } => match source {
        OrderError::InvalidPlan { .. } => StatusCode::BAD_REQUEST,
        OrderError::NotFound { .. } => StatusCode::NOT_FOUND,
        OrderError::PersistenceFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
      },
      AppError::Unhealthy(_) | AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    // Log the full error when it's turned into a response
    let status = self.status_code();
    if status.is_server_error() {
      tracing::error!(application_error = %self, "Responding with error");
    } else {
      tracing::warn!(application_error = %self, "Responding with client error");
    }
    HttpResponse::build(status).json(json!({ "detail": self.detail() }))
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn order_errors_map_to_taxonomy_status_codes() {
    let invalid: AppError = OrderError::invalid_plan("gold").into();
    assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(invalid.detail(), "Invalid plan type");

    let missing: AppError = OrderError::not_found("SS-00000000").into();
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(missing.detail(), "Order not found");

    let dropped: AppError = OrderError::from(StoreError::Unacknowledged { operation: "insert_one" }).into();
    assert_eq!(dropped.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(dropped.detail(), "Failed to create order");

    let outage: AppError = OrderError::from(StoreError::backend("count", anyhow::anyhow!("timeout"))).into();
    assert_eq!(outage.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(outage.detail(), "Internal server error");
  }

  #[test]
  fn backend_details_stay_out_of_client_messages() {
    let err = AppError::Config("DATABASE_URL=postgres://admin:secret@db/songsnaps".to_string());
    assert_eq!(err.detail(), "Internal server error");
    let unhealthy = AppError::Unhealthy("connection refused".to_string());
    assert_eq!(unhealthy.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(unhealthy.detail(), "Service unhealthy");
  }
}
