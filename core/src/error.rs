// core/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

/// Failures reported by a `RecordStore` implementation.
#[derive(Debug, Error)]
pub enum StoreError {
  #[error("Record store backend failed during '{operation}'. Source: {source}")]
  Backend {
    operation: &'static str,
    #[source]
    source: AnyhowError,
  },

  #[error("Record store did not acknowledge '{operation}'")]
  Unacknowledged { operation: &'static str },
}

impl StoreError {
  /// Wraps any backend error (driver, codec, ...) for the given store operation.
  pub fn backend<E>(operation: &'static str, err: E) -> Self
  where
    E: Into<AnyhowError>,
  {
    StoreError::Backend {
      operation,
      source: err.into(),
    }
  }
}

/// The order service's error taxonomy.
#[derive(Debug, Error)]
pub enum OrderError {
  #[error("Invalid plan type: '{plan}'")]
  InvalidPlan { plan: String },

  #[error("Order not found: {order_id}")]
  NotFound { order_id: String },

  #[error("Persistence failure: {source}")]
  PersistenceFailure {
    #[from]
    source: StoreError,
  },
}

impl OrderError {
  pub fn invalid_plan(plan: impl Into<String>) -> Self {
    OrderError::InvalidPlan { plan: plan.into() }
  }

  pub fn not_found(order_id: impl Into<String>) -> Self {
    OrderError::NotFound {
      order_id: order_id.into(),
    }
  }
}

pub type StoreResult<T, E = StoreError> = std::result::Result<T, E>;
pub type OrderResult<T, E = OrderError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn store_error_converts_into_persistence_failure() {
    let err: OrderError = StoreError::Unacknowledged { operation: "insert_one" }.into();
    match err {
      OrderError::PersistenceFailure {
        source: StoreError::Unacknowledged { operation },
      } => assert_eq!(operation, "insert_one"),
      other => panic!("Expected PersistenceFailure, got {:?}", other),
    }
  }

  #[test]
  fn backend_error_keeps_source_message() {
    let err = StoreError::backend("count", anyhow::anyhow!("connection reset"));
    assert!(err.to_string().contains("count"));
    assert!(err.to_string().contains("connection reset"));
  }
}
