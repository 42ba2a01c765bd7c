// core/src/service.rs

//! The order service. Every operation is one call into the injected `RecordStore`
//! (stats being the exception, with one count per figure).

use crate::catalog::{PlanCatalog, PlanCode};
use crate::error::{OrderError, OrderResult, StoreError};
use crate::order::{
  generate_order_id, FulfillmentConfirmation, Order, OrderFilter, OrderReceipt, OrderStats, OrderUpdate,
  PlanBreakdown,
};
use crate::store::RecordStore;
use chrono::Utc;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

pub const DEFAULT_LIST_LIMIT: u64 = 50;
pub const DEFAULT_WHATSAPP_NUMBER: &str = "+1234567890";
pub const INITIAL_ORDER_STATUS: &str = "payment_confirmed";
pub const FULFILLED_MESSAGE: &str = "Order fulfilled successfully";

/// Creates, reads and fulfills orders against an injected record store.
///
/// Cheap to clone; clones share the store handle.
#[derive(Clone)]
pub struct OrderService {
  store: Arc<dyn RecordStore>,
  catalog: PlanCatalog,
  whatsapp_number: Arc<str>,
}

impl fmt::Debug for OrderService {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("OrderService")
      .field("catalog_plans", &self.catalog.len())
      .field("whatsapp_number", &self.whatsapp_number)
      .finish_non_exhaustive()
  }
}

impl OrderService {
  pub fn new(store: Arc<dyn RecordStore>) -> Self {
    OrderService {
      store,
      catalog: PlanCatalog::standard(),
      whatsapp_number: Arc::from(DEFAULT_WHATSAPP_NUMBER),
    }
  }

  pub fn with_catalog(mut self, catalog: PlanCatalog) -> Self {
    self.catalog = catalog;
    self
  }

  /// Fulfillment contact copied into every new order.
  pub fn with_whatsapp_number(mut self, number: impl Into<String>) -> Self {
    self.whatsapp_number = Arc::from(number.into());
    self
  }

  pub fn catalog(&self) -> &PlanCatalog {
    &self.catalog
  }

  pub fn whatsapp_number(&self) -> &str {
    &self.whatsapp_number
  }

  /// Validates the plan, snapshots its catalog entry and inserts a new order.
  /// Unknown plans are rejected before anything touches the store.
  #[instrument(name = "order_service::create_order", skip(self), err(Display))]
  pub async fn create_order(&self, plan: &str) -> OrderResult<OrderReceipt> {
    let (code, details) = self.catalog.resolve(plan).map_err(|e| {
      warn!(requested_plan = %plan, "Rejected order for unknown plan.");
      e
    })?;

    let order = Order::new(
      generate_order_id(),
      code,
      details,
      Utc::now(),
      INITIAL_ORDER_STATUS,
      &self.whatsapp_number,
    );

    let outcome = self.store.insert_one(&order).await?;
    if !outcome.acknowledged {
      return Err(StoreError::Unacknowledged { operation: "insert_one" }.into());
    }

    info!("Order created successfully: {} for plan: {}", order.order_id, code);
    Ok(order.receipt())
  }

  #[instrument(name = "order_service::get_order", skip(self), err(Display))]
  pub async fn get_order(&self, order_id: &str) -> OrderResult<Order> {
    self
      .store
      .find_one(order_id)
      .await?
      .ok_or_else(|| OrderError::not_found(order_id))
  }

  /// Marks the order fulfilled. Repeating the call succeeds and moves
  /// `fulfilledAt` to the newer time.
  #[instrument(name = "order_service::fulfill_order", skip(self), err(Display))]
  pub async fn fulfill_order(&self, order_id: &str) -> OrderResult<FulfillmentConfirmation> {
    let outcome = self.store.update_one(order_id, &OrderUpdate::fulfill(Utc::now())).await?;
    if outcome.matched == 0 {
      return Err(OrderError::not_found(order_id));
    }

    info!("Order {} marked as fulfilled", order_id);
    Ok(FulfillmentConfirmation {
      message: FULFILLED_MESSAGE.to_string(),
      order_id: order_id.to_string(),
    })
  }

  /// Newest orders first. `limit` defaults to `DEFAULT_LIST_LIMIT` and is otherwise
  /// passed through as given; `0` means no limit.
  #[instrument(name = "order_service::list_orders", skip(self), err(Display))]
  pub async fn list_orders(&self, limit: Option<u64>, filter: &OrderFilter) -> OrderResult<Vec<Order>> {
    let limit = limit.unwrap_or(DEFAULT_LIST_LIMIT);
    let orders = self.store.find_many(filter, Some(limit)).await?;
    debug!(returned = orders.len(), "Listed orders.");
    Ok(orders)
  }

  /// Counts are queried one at a time with no shared snapshot.
  #[instrument(name = "order_service::stats", skip(self), err(Display))]
  pub async fn stats(&self) -> OrderResult<OrderStats> {
    let total_orders = self.store.count(&OrderFilter::all()).await?;
    let fulfilled_orders = self.store.count(&OrderFilter::all().with_fulfilled(true)).await?;

    let mut plan_breakdown = PlanBreakdown::default();
    for code in PlanCode::ALL {
      let count = self.store.count(&OrderFilter::all().with_plan(code.as_str())).await?;
      plan_breakdown.set(code, count);
    }

    Ok(OrderStats {
      total_orders,
      fulfilled_orders,
      // A fulfilled count read after a concurrent insert can exceed the total.
      pending_orders: total_orders.saturating_sub(fulfilled_orders),
      plan_breakdown,
    })
  }

  pub async fn check_store(&self) -> OrderResult<()> {
    self.store.ping().await.map_err(OrderError::from)
  }
}
