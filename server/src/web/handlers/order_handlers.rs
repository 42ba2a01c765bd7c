// server/src/web/handlers/order_handlers.rs

use actix_web::{web, HttpResponse};
use serde::{de, Deserialize, Deserializer};
use serde_json::json;
use songsnaps::OrderFilter;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;

// --- Request DTOs ---
#[derive(Deserialize, Debug)]
pub struct GenerateOrderPayload {
  pub plan: String, // 'snap', 'snappack', or 'creator'
}

#[derive(Deserialize, Debug, Default)]
pub struct ListOrdersQuery {
  pub limit: Option<u64>,
  #[serde(default, deserialize_with = "deserialize_flag")]
  pub fulfilled: Option<bool>,
  pub plan: Option<String>,
}

/// Accepts the usual query-string spellings of a boolean, case-insensitively:
/// `true`/`false`, `1`/`0`, `yes`/`no`, `on`/`off`, `t`/`f`, `y`/`n`.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
  D: Deserializer<'de>,
{
  let raw = Option::<String>::deserialize(deserializer)?;
  raw
    .map(|value| match value.trim().to_ascii_lowercase().as_str() {
      "true" | "1" | "yes" | "on" | "t" | "y" => Ok(true),
      "false" | "0" | "no" | "off" | "f" | "n" => Ok(false),
      _ => Err(de::Error::custom(format!("invalid boolean value: {}", value))),
    })
    .transpose()
}

impl ListOrdersQuery {
  fn filter(&self) -> OrderFilter {
    OrderFilter {
      fulfilled: self.fulfilled,
      plan: self.plan.clone(),
    }
  }
}

// --- Handler Implementations ---

#[instrument(
    name = "handler::generate_order",
    skip(app_state, req_payload),
    fields(plan = %req_payload.plan)
)]
pub async fn generate_order_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<GenerateOrderPayload>,
) -> Result<HttpResponse, AppError> {
  let receipt = app_state.order_service.create_order(&req_payload.plan).await?;
  Ok(HttpResponse::Ok().json(receipt))
}

#[instrument(name = "handler::get_order", skip(app_state, path), fields(order_id = %path.as_ref()))]
pub async fn get_order_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let order_id = path.into_inner();
  let order = app_state.order_service.get_order(&order_id).await?;
  Ok(HttpResponse::Ok().json(order))
}

#[instrument(name = "handler::fulfill_order", skip(app_state, path), fields(order_id = %path.as_ref()))]
pub async fn fulfill_order_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let order_id = path.into_inner();
  let confirmation = app_state.order_service.fulfill_order(&order_id).await?;
  Ok(HttpResponse::Ok().json(confirmation))
}

#[instrument(name = "handler::list_orders", skip(app_state))]
pub async fn list_orders_handler(
  app_state: web::Data<AppState>,
  query_params: web::Query<ListOrdersQuery>,
) -> Result<HttpResponse, AppError> {
  let orders = app_state
    .order_service
    .list_orders(query_params.limit, &query_params.filter())
    .await?;

  let count = orders.len();
  info!("Successfully fetched {} orders.", count);
  Ok(HttpResponse::Ok().json(json!({
      "orders": orders,
      "count": count,
  })))
}

#[instrument(name = "handler::stats", skip(app_state))]
pub async fn stats_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let stats = app_state.order_service.stats().await?;
  Ok(HttpResponse::Ok().json(stats))
}
