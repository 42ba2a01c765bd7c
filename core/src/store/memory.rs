// core/src/store/memory.rs
use crate::error::StoreResult;
use crate::order::{Order, OrderFilter, OrderUpdate};
use crate::store::{InsertOutcome, RecordStore, UpdateOutcome};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::cmp::Reverse;
use std::sync::Arc;
use tracing::debug;

/// In-process `RecordStore` keeping orders in insertion order.
///
/// Cloning shares the underlying records. Lock guards are never held across
/// an `.await`.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
  records: Arc<RwLock<Vec<Order>>>,
}

impl MemoryRecordStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.records.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.records.read().is_empty()
  }

  /// Copies of every stored record, in insertion order.
  pub fn snapshot(&self) -> Vec<Order> {
    self.records.read().clone()
  }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
  async fn ping(&self) -> StoreResult<()> {
    Ok(())
  }

  async fn insert_one(&self, order: &Order) -> StoreResult<InsertOutcome> {
    self.records.write().push(order.clone());
    debug!(order_id = %order.order_id, "Inserted order into memory store.");
    Ok(InsertOutcome { acknowledged: true })
  }

  async fn find_one(&self, order_id: &str) -> StoreResult<Option<Order>> {
    Ok(self.records.read().iter().find(|o| o.order_id == order_id).cloned())
  }

  async fn update_one(&self, order_id: &str, update: &OrderUpdate) -> StoreResult<UpdateOutcome> {
    let mut guard = self.records.write();
    match guard.iter_mut().find(|o| o.order_id == order_id) {
      Some(order) => {
        let modified = update.apply(order);
        Ok(UpdateOutcome {
          matched: 1,
          modified: u64::from(modified),
        })
      }
      None => Ok(UpdateOutcome::default()),
    }
  }

  async fn count(&self, filter: &OrderFilter) -> StoreResult<u64> {
    Ok(self.records.read().iter().filter(|o| filter.matches(o)).count() as u64)
  }

  async fn find_many(&self, filter: &OrderFilter, limit: Option<u64>) -> StoreResult<Vec<Order>> {
    // Newest inserted first, then a stable sort keeps that order among equal timestamps.
    let mut matches: Vec<Order> = self
      .records
      .read()
      .iter()
      .rev()
      .filter(|o| filter.matches(o))
      .cloned()
      .collect();
    matches.sort_by_key(|o| Reverse(o.timestamp));
    if let Some(limit) = limit.filter(|l| *l > 0) {
      matches.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
    }
    Ok(matches)
  }
}
