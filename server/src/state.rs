// server/src/state.rs
use crate::config::AppConfig;
use songsnaps::OrderService;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct AppState {
  pub order_service: OrderService,
  pub config: Arc<AppConfig>, // Share loaded config
}
