// core/src/order.rs

//! The order record and the small value types the service and stores exchange.

use crate::catalog::{PlanCode, PlanDetails};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const ORDER_ID_PREFIX: &str = "SS-";
const ORDER_ID_HEX_LEN: usize = 8;

/// Mints a new order identifier: `SS-` followed by the first 8 uppercase hex
/// digits of a random v4 UUID.
pub fn generate_order_id() -> String {
  let mut buf = Uuid::encode_buffer();
  let hex = Uuid::new_v4().simple().encode_upper(&mut buf);
  format!("{}{}", ORDER_ID_PREFIX, &hex[..ORDER_ID_HEX_LEN])
}

/// True if `candidate` has the `SS-XXXXXXXX` shape.
pub fn is_valid_order_id(candidate: &str) -> bool {
  match candidate.strip_prefix(ORDER_ID_PREFIX) {
    Some(hex) => {
      hex.len() == ORDER_ID_HEX_LEN && hex.chars().all(|c| c.is_ascii_digit() || matches!(c, 'A'..='F'))
    }
    None => false,
  }
}

/// A persisted customer purchase of one plan.
///
/// Plan attributes are copied in at creation time; they are a snapshot and do
/// not follow later catalog changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
  pub order_id: String,
  pub plan: PlanCode,
  pub plan_name: String,
  pub price: String,
  pub description: String,
  pub delivery: String,
  pub features: Vec<String>,
  pub timestamp: DateTime<Utc>,
  pub status: String,
  pub whatsapp_number: String,
  pub fulfilled: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub fulfilled_at: Option<DateTime<Utc>>,
}

impl Order {
  /// Builds a fresh, unfulfilled order from a catalog entry.
  pub fn new(
    order_id: String,
    plan: PlanCode,
    details: &PlanDetails,
    timestamp: DateTime<Utc>,
    status: &str,
    whatsapp_number: &str,
  ) -> Self {
    Order {
      order_id,
      plan,
      plan_name: details.name.to_string(),
      price: details.price.to_string(),
      description: details.description.to_string(),
      delivery: details.delivery.to_string(),
      features: details.features.iter().map(|f| f.to_string()).collect(),
      timestamp,
      status: status.to_string(),
      whatsapp_number: whatsapp_number.to_string(),
      fulfilled: false,
      fulfilled_at: None,
    }
  }

  pub fn receipt(&self) -> OrderReceipt {
    OrderReceipt {
      order_id: self.order_id.clone(),
      plan: self.plan,
      price: self.price.clone(),
      timestamp: self.timestamp,
      whatsapp_number: self.whatsapp_number.clone(),
    }
  }
}

/// What `create_order` hands back to the caller: a projection, not the full record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
  pub order_id: String,
  pub plan: PlanCode,
  pub price: String,
  pub timestamp: DateTime<Utc>,
  pub whatsapp_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FulfillmentConfirmation {
  pub message: String,
  pub order_id: String,
}

/// Conjunctive predicate over orders. `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
  pub fulfilled: Option<bool>,
  /// Raw plan code; an unknown code simply matches nothing.
  pub plan: Option<String>,
}

impl OrderFilter {
  pub fn all() -> Self {
    Self::default()
  }

  pub fn with_fulfilled(mut self, fulfilled: bool) -> Self {
    self.fulfilled = Some(fulfilled);
    self
  }

  pub fn with_plan(mut self, plan: impl Into<String>) -> Self {
    self.plan = Some(plan.into());
    self
  }

  pub fn matches(&self, order: &Order) -> bool {
    if let Some(fulfilled) = self.fulfilled {
      if order.fulfilled != fulfilled {
        return false;
      }
    }
    if let Some(plan) = &self.plan {
      if order.plan.as_str() != plan {
        return false;
      }
    }
    true
  }
}

/// Partial `$set`-style update. Only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderUpdate {
  pub fulfilled: Option<bool>,
  pub fulfilled_at: Option<DateTime<Utc>>,
}

impl OrderUpdate {
  pub fn fulfill(at: DateTime<Utc>) -> Self {
    OrderUpdate {
      fulfilled: Some(true),
      fulfilled_at: Some(at),
    }
  }

  /// Applies the update in place. Returns whether anything changed.
  pub fn apply(&self, order: &mut Order) -> bool {
    let mut changed = false;
    if let Some(fulfilled) = self.fulfilled {
      changed |= order.fulfilled != fulfilled;
      order.fulfilled = fulfilled;
    }
    if let Some(at) = self.fulfilled_at {
      changed |= order.fulfilled_at != Some(at);
      order.fulfilled_at = Some(at);
    }
    changed
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanBreakdown {
  pub snap: u64,
  pub snappack: u64,
  pub creator: u64,
}

impl PlanBreakdown {
  pub fn set(&mut self, plan: PlanCode, count: u64) {
    match plan {
      PlanCode::Snap => self.snap = count,
      PlanCode::SnapPack => self.snappack = count,
      PlanCode::Creator => self.creator = count,
    }
  }

  pub fn total(&self) -> u64 {
    self.snap + self.snappack + self.creator
  }
}

/// Aggregate counts. Each number comes from its own store query, so under
/// concurrent writes they may disagree slightly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStats {
  pub total_orders: u64,
  pub fulfilled_orders: u64,
  pub pending_orders: u64,
  pub plan_breakdown: PlanBreakdown,
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::catalog::PlanCatalog;
  use pretty_assertions::assert_eq;

  fn sample_order() -> Order {
    let details = PlanCatalog::standard().get(PlanCode::Snap).copied().unwrap();
    Order::new(
      "SS-0A1B2C3D".to_string(),
      PlanCode::Snap,
      &details,
      Utc::now(),
      "payment_confirmed",
      "+1234567890",
    )
  }

  #[test]
  fn generated_ids_have_expected_shape() {
    for _ in 0..64 {
      let id = generate_order_id();
      assert!(is_valid_order_id(&id), "bad id: {}", id);
    }
  }

  #[test]
  fn order_id_validation_rejects_lowercase_and_wrong_length() {
    assert!(is_valid_order_id("SS-0A1B2C3D"));
    assert!(!is_valid_order_id("SS-0a1b2c3d"));
    assert!(!is_valid_order_id("SS-0A1B2C3"));
    assert!(!is_valid_order_id("XX-0A1B2C3D"));
    assert!(!is_valid_order_id("SS-0A1B2C3G"));
  }

  #[test]
  fn new_order_snapshots_plan_and_starts_unfulfilled() {
    let order = sample_order();
    assert_eq!(order.plan_name, "Snap");
    assert_eq!(order.price, "$3.99");
    assert_eq!(order.features, vec!["1 custom song", "Simple cover art", "2-hour delivery", "No edits"]);
    assert!(!order.fulfilled);
    assert!(order.fulfilled_at.is_none());
  }

  #[test]
  fn serializes_camel_case_and_omits_missing_fulfilled_at() {
    let value = serde_json::to_value(sample_order()).unwrap();
    assert_eq!(value["orderId"], "SS-0A1B2C3D");
    assert_eq!(value["planName"], "Snap");
    assert_eq!(value["whatsappNumber"], "+1234567890");
    assert_eq!(value["plan"], "snap");
    assert!(value.get("fulfilledAt").is_none());
  }

  #[test]
  fn filter_combines_with_and() {
    let mut order = sample_order();
    let filter = OrderFilter::all().with_fulfilled(true).with_plan("snap");
    assert!(!filter.matches(&order));
    order.fulfilled = true;
    assert!(filter.matches(&order));
    assert!(!OrderFilter::all().with_plan("creator").matches(&order));
    assert!(OrderFilter::all().matches(&order));
  }

  #[test]
  fn fulfill_update_sets_both_fields() {
    let mut order = sample_order();
    let at = Utc::now();
    assert!(OrderUpdate::fulfill(at).apply(&mut order));
    assert!(order.fulfilled);
    assert_eq!(order.fulfilled_at, Some(at));
    // Same update again changes nothing.
    assert!(!OrderUpdate::fulfill(at).apply(&mut order));
  }
}
