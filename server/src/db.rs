// server/src/db.rs

//! Postgres-backed `RecordStore`.
//!
//! Orders live in a single `orders` table. The `id` column is the backend's own
//! key and never leaves this module; every lookup goes through `order_id`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use songsnaps::{
  InsertOutcome, Order, OrderFilter, OrderUpdate, PlanCode, RecordStore, StoreError, StoreResult, UpdateOutcome,
};
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::{debug, error, info, instrument};

const ORDER_COLUMNS: &str = "order_id, plan, plan_name, price, description, delivery, features, \
                             created_at, status, whatsapp_number, fulfilled, fulfilled_at";

// Bootstrap only: creates what is missing, never alters existing tables.
const SCHEMA_STATEMENTS: [&str; 3] = [
  r#"CREATE TABLE IF NOT EXISTS orders (
       id BIGSERIAL PRIMARY KEY,
       order_id TEXT NOT NULL,
       plan TEXT NOT NULL,
       plan_name TEXT NOT NULL,
       price TEXT NOT NULL,
       description TEXT NOT NULL,
       delivery TEXT NOT NULL,
       features JSONB NOT NULL,
       created_at TIMESTAMPTZ NOT NULL,
       status TEXT NOT NULL,
       whatsapp_number TEXT NOT NULL,
       fulfilled BOOLEAN NOT NULL DEFAULT FALSE,
       fulfilled_at TIMESTAMPTZ
     )"#,
  "CREATE INDEX IF NOT EXISTS orders_order_id_idx ON orders (order_id)",
  "CREATE INDEX IF NOT EXISTS orders_created_at_idx ON orders (created_at DESC, id DESC)",
];

#[derive(Debug, FromRow)]
struct OrderRow {
  order_id: String,
  plan: String,
  plan_name: String,
  price: String,
  description: String,
  delivery: String,
  features: Json<Vec<String>>,
  created_at: DateTime<Utc>,
  status: String,
  whatsapp_number: String,
  fulfilled: bool,
  fulfilled_at: Option<DateTime<Utc>>,
}

impl TryFrom<OrderRow> for Order {
  type Error = StoreError;

  fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
    let plan = row
      .plan
      .parse::<PlanCode>()
      .map_err(|e| StoreError::backend("decode_order", e))?;
    Ok(Order {
      order_id: row.order_id,
      plan,
      plan_name: row.plan_name,
      price: row.price,
      description: row.description,
      delivery: row.delivery,
      features: row.features.0,
      timestamp: row.created_at,
      status: row.status,
      whatsapp_number: row.whatsapp_number,
      fulfilled: row.fulfilled,
      fulfilled_at: row.fulfilled_at,
    })
  }
}

/// Appends ` WHERE ...` for the filter's set fields, joined with `AND`.
fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &OrderFilter) {
  let mut separator = " WHERE ";
  if let Some(fulfilled) = filter.fulfilled {
    builder.push(separator).push("fulfilled = ").push_bind(fulfilled);
    separator = " AND ";
  }
  if let Some(plan) = &filter.plan {
    builder.push(separator).push("plan = ").push_bind(plan.clone());
  }
}

fn select_query(filter: &OrderFilter, limit: Option<u64>) -> QueryBuilder<'static, Postgres> {
  let mut builder = QueryBuilder::new(format!("SELECT {} FROM orders", ORDER_COLUMNS));
  push_filter(&mut builder, filter);
  builder.push(" ORDER BY created_at DESC, id DESC");
  if let Some(limit) = limit.filter(|l| *l > 0) {
    builder.push(" LIMIT ").push_bind(i64::try_from(limit).unwrap_or(i64::MAX));
  }
  builder
}

fn count_query(filter: &OrderFilter) -> QueryBuilder<'static, Postgres> {
  let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM orders");
  push_filter(&mut builder, filter);
  builder
}

#[derive(Debug, Clone)]
pub struct PgRecordStore {
  pool: PgPool,
}

impl PgRecordStore {
  pub fn from_pool(pool: PgPool) -> Self {
    PgRecordStore { pool }
  }

  #[instrument(name = "pg_store::connect", skip(database_url), err(Display))]
  pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
    let pool = PgPoolOptions::new()
      .max_connections(max_connections)
      .connect(database_url)
      .await?;
    info!("Successfully connected to the database.");
    Ok(Self::from_pool(pool))
  }

  /// Creates the `orders` table and its indexes if they do not exist yet.
  #[instrument(name = "pg_store::ensure_schema", skip(self), err(Display))]
  pub async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
    for statement in SCHEMA_STATEMENTS {
      sqlx::query(statement).execute(&self.pool).await?;
    }
    debug!("Orders schema is in place.");
    Ok(())
  }
}

#[async_trait]
impl RecordStore for PgRecordStore {
  async fn ping(&self) -> StoreResult<()> {
    sqlx::query("SELECT 1 FROM orders LIMIT 1")
      .fetch_optional(&self.pool)
      .await
      .map(|_| ())
      .map_err(|e| {
        error!("Database ping failed: {}", e);
        StoreError::backend("ping", e)
      })
  }

  async fn insert_one(&self, order: &Order) -> StoreResult<InsertOutcome> {
    let result = sqlx::query(
      r#"INSERT INTO orders (order_id, plan, plan_name, price, description, delivery, features,
                             created_at, status, whatsapp_number, fulfilled, fulfilled_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)"#,
    )
    .bind(&order.order_id)
    .bind(order.plan.as_str())
    .bind(&order.plan_name)
    .bind(&order.price)
    .bind(&order.description)
    .bind(&order.delivery)
    .bind(Json(&order.features))
    .bind(order.timestamp)
    .bind(&order.status)
    .bind(&order.whatsapp_number)
    .bind(order.fulfilled)
    .bind(order.fulfilled_at)
    .execute(&self.pool)
    .await
    .map_err(|e| {
      error!("Failed to insert order {}: {}", order.order_id, e);
      StoreError::backend("insert_one", e)
    })?;

    Ok(InsertOutcome {
      acknowledged: result.rows_affected() == 1,
    })
  }

  async fn find_one(&self, order_id: &str) -> StoreResult<Option<Order>> {
    let row: Option<OrderRow> = sqlx::query_as(&format!(
      "SELECT {} FROM orders WHERE order_id = $1 ORDER BY id LIMIT 1",
      ORDER_COLUMNS
    ))
    .bind(order_id)
    .fetch_optional(&self.pool)
    .await
    .map_err(|e| {
      error!("Database error while fetching order {}: {}", order_id, e);
      StoreError::backend("find_one", e)
    })?;

    row.map(Order::try_from).transpose()
  }

  async fn update_one(&self, order_id: &str, update: &OrderUpdate) -> StoreResult<UpdateOutcome> {
    // COALESCE keeps columns the update leaves unset.
    let result = sqlx::query(
      r#"UPDATE orders
         SET fulfilled = COALESCE($2, fulfilled),
             fulfilled_at = COALESCE($3, fulfilled_at)
         WHERE id = (SELECT id FROM orders WHERE order_id = $1 ORDER BY id LIMIT 1)"#,
    )
    .bind(order_id)
    .bind(update.fulfilled)
    .bind(update.fulfilled_at)
    .execute(&self.pool)
    .await
    .map_err(|e| {
      error!("Failed to update order {}: {}", order_id, e);
      StoreError::backend("update_one", e)
    })?;

    // Postgres reports rows matched by the WHERE clause, changed or not.
    let matched = result.rows_affected();
    Ok(UpdateOutcome {
      matched,
      modified: matched,
    })
  }

  async fn count(&self, filter: &OrderFilter) -> StoreResult<u64> {
    let count: i64 = count_query(filter)
      .build_query_scalar()
      .fetch_one(&self.pool)
      .await
      .map_err(|e| {
        error!("Failed to count orders: {}", e);
        StoreError::backend("count", e)
      })?;
    Ok(u64::try_from(count).unwrap_or(0))
  }

  async fn find_many(&self, filter: &OrderFilter, limit: Option<u64>) -> StoreResult<Vec<Order>> {
    let rows: Vec<OrderRow> = select_query(filter, limit)
      .build_query_as()
      .fetch_all(&self.pool)
      .await
      .map_err(|e| {
        error!("Failed to fetch orders from database: {}", e);
        StoreError::backend("find_many", e)
      })?;

    rows.into_iter().map(Order::try_from).collect()
  }
}
