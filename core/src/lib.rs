// src/lib.rs

//! SongSnaps: order lifecycle and plan catalog for a song-commissioning service.
//!
//! The crate covers the part of the service that has any structure:
//!  - A static plan catalog (`snap`, `snappack`, `creator`) with display attributes.
//!  - The `Order` record, a denormalized snapshot of the chosen plan.
//!  - A `RecordStore` seam for the document-style persistence backend,
//!    plus an in-memory implementation.
//!  - The `OrderService`, which maps each operation onto a single store call.
//!
//! Transport (HTTP) and concrete database drivers live outside this crate.

pub mod catalog;
pub mod error;
pub mod order;
pub mod service;
pub mod store;

// --- Re-exports for the Public API ---

pub use crate::catalog::{PlanCatalog, PlanCode, PlanDetails};
pub use crate::error::{OrderError, OrderResult, StoreError, StoreResult};
pub use crate::order::{
  FulfillmentConfirmation, Order, OrderFilter, OrderReceipt, OrderStats, OrderUpdate, PlanBreakdown,
};
pub use crate::service::{OrderService, DEFAULT_LIST_LIMIT, DEFAULT_WHATSAPP_NUMBER, INITIAL_ORDER_STATUS};
pub use crate::store::memory::MemoryRecordStore;
pub use crate::store::{InsertOutcome, RecordStore, UpdateOutcome};

/*
    Order lifecycle:
    1. `create_order(plan)` validates the plan code against the catalog, mints `SS-XXXXXXXX`,
       snapshots the plan attributes and inserts one record.
    2. `fulfill_order(id)` issues one partial update (`fulfilled`, `fulfilledAt`) and decides
       "not found" from the matched count the store reports.
    3. Reads (`get_order`, `list_orders`, `stats`) never write.
*/
