// core/src/store/mod.rs

//! The persistence seam: a document-style record store addressed by the
//! application-assigned `orderId`, never by a backend-internal key.

pub mod memory;

use crate::error::StoreResult;
use crate::order::{Order, OrderFilter, OrderUpdate};
use async_trait::async_trait;

/// Result of an insert. `acknowledged == false` means the backend accepted the
/// call but did not confirm the write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertOutcome {
  pub acknowledged: bool,
}

/// Result of a single-record partial update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
  pub matched: u64,
  pub modified: u64,
}

/// Backend holding order records.
///
/// Implementations own their concurrency control. Each method is expected to be
/// a single round trip; callers never retry.
#[async_trait]
pub trait RecordStore: Send + Sync {
  /// Cheap reachability probe used by health checks.
  async fn ping(&self) -> StoreResult<()>;

  async fn insert_one(&self, order: &Order) -> StoreResult<InsertOutcome>;

  async fn find_one(&self, order_id: &str) -> StoreResult<Option<Order>>;

  /// Applies `update` to the first record whose `orderId` matches.
  async fn update_one(&self, order_id: &str, update: &OrderUpdate) -> StoreResult<UpdateOutcome>;

  async fn count(&self, filter: &OrderFilter) -> StoreResult<u64>;

  /// Records matching `filter`, newest `timestamp` first. Ties go to the most
  /// recently inserted record. `limit` of `None` or `Some(0)` returns every match.
  async fn find_many(&self, filter: &OrderFilter, limit: Option<u64>) -> StoreResult<Vec<Order>>;
}
