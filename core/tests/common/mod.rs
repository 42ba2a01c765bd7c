// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every helper

use async_trait::async_trait;
use once_cell::sync::Lazy;
use songsnaps::{
  InsertOutcome, MemoryRecordStore, Order, OrderFilter, OrderService, OrderUpdate, RecordStore, StoreError,
  StoreResult, UpdateOutcome,
};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use tracing::Level;

// --- Store doubles ---

/// Wraps a `MemoryRecordStore` and counts calls that could write.
#[derive(Debug, Clone, Default)]
pub struct CountingStore {
  pub inner: MemoryRecordStore,
  pub inserts: Arc<AtomicUsize>,
  pub updates: Arc<AtomicUsize>,
}

impl CountingStore {
  pub fn inserts(&self) -> usize {
    self.inserts.load(Ordering::SeqCst)
  }

  pub fn updates(&self) -> usize {
    self.updates.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl RecordStore for CountingStore {
  async fn ping(&self) -> StoreResult<()> {
    self.inner.ping().await
  }

  async fn insert_one(&self, order: &Order) -> StoreResult<InsertOutcome> {
    self.inserts.fetch_add(1, Ordering::SeqCst);
    self.inner.insert_one(order).await
  }

  async fn find_one(&self, order_id: &str) -> StoreResult<Option<Order>> {
    self.inner.find_one(order_id).await
  }

  async fn update_one(&self, order_id: &str, update: &OrderUpdate) -> StoreResult<UpdateOutcome> {
    self.updates.fetch_add(1, Ordering::SeqCst);
    self.inner.update_one(order_id, update).await
  }

  async fn count(&self, filter: &OrderFilter) -> StoreResult<u64> {
    self.inner.count(filter).await
  }

  async fn find_many(&self, filter: &OrderFilter, limit: Option<u64>) -> StoreResult<Vec<Order>> {
    self.inner.find_many(filter, limit).await
  }
}

/// How a `FailingStore` misbehaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureMode {
  /// Every call returns a backend error.
  Unreachable,
  /// Inserts come back unacknowledged; reads are empty.
  DropsWrites,
}

#[derive(Debug, Clone, Copy)]
pub struct FailingStore {
  pub mode: FailureMode,
}

impl FailingStore {
  fn fail<T>(&self, operation: &'static str) -> StoreResult<T> {
    Err(StoreError::backend(operation, anyhow::anyhow!("simulated outage")))
  }
}

#[async_trait]
impl RecordStore for FailingStore {
  async fn ping(&self) -> StoreResult<()> {
    match self.mode {
      FailureMode::Unreachable => self.fail("ping"),
      FailureMode::DropsWrites => Ok(()),
    }
  }

  async fn insert_one(&self, _order: &Order) -> StoreResult<InsertOutcome> {
    match self.mode {
      FailureMode::Unreachable => self.fail("insert_one"),
      FailureMode::DropsWrites => Ok(InsertOutcome { acknowledged: false }),
    }
  }

  async fn find_one(&self, _order_id: &str) -> StoreResult<Option<Order>> {
    match self.mode {
      FailureMode::Unreachable => self.fail("find_one"),
      FailureMode::DropsWrites => Ok(None),
    }
  }

  async fn update_one(&self, _order_id: &str, _update: &OrderUpdate) -> StoreResult<UpdateOutcome> {
    match self.mode {
      FailureMode::Unreachable => self.fail("update_one"),
      FailureMode::DropsWrites => Ok(UpdateOutcome::default()),
    }
  }

  async fn count(&self, _filter: &OrderFilter) -> StoreResult<u64> {
    match self.mode {
      FailureMode::Unreachable => self.fail("count"),
      FailureMode::DropsWrites => Ok(0),
    }
  }

  async fn find_many(&self, _filter: &OrderFilter, _limit: Option<u64>) -> StoreResult<Vec<Order>> {
    match self.mode {
      FailureMode::Unreachable => self.fail("find_many"),
      FailureMode::DropsWrites => Ok(Vec::new()),
    }
  }
}

// --- Service builders ---

pub fn memory_service() -> (OrderService, MemoryRecordStore) {
  let store = MemoryRecordStore::new();
  (OrderService::new(Arc::new(store.clone())), store)
}

pub fn counting_service() -> (OrderService, CountingStore) {
  let store = CountingStore::default();
  (OrderService::new(Arc::new(store.clone())), store)
}

pub fn failing_service(mode: FailureMode) -> OrderService {
  OrderService::new(Arc::new(FailingStore { mode }))
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
