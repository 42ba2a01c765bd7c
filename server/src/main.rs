// server/src/main.rs

use anyhow::Context;
use songsnaps::{MemoryRecordStore, OrderService, RecordStore};
use songsnaps_server::db::PgRecordStore;
use songsnaps_server::web::{build_cors, configure_app_routes};
use songsnaps_server::{telemetry, AppConfig, AppState, StoreBackend};

use actix_web::{web as actix_data, App, HttpServer}; // Renamed web to actix_data
use std::sync::Arc;

async fn build_record_store(app_config: &AppConfig) -> anyhow::Result<Arc<dyn RecordStore>> {
  match app_config.store_backend {
    StoreBackend::Postgres => {
      let database_url = app_config
        .database_url
        .as_deref()
        .context("DATABASE_URL is required for the postgres store backend")?;
      let store = PgRecordStore::connect(database_url, app_config.db_max_connections)
        .await
        .context("Failed to connect to the database")?;
      store
        .ensure_schema()
        .await
        .context("Failed to prepare the orders table")?;
      let store: Arc<dyn RecordStore> = Arc::new(store);
      Ok(store)
    }
    StoreBackend::Memory => {
      tracing::warn!("Using the in-memory record store; orders will not survive a restart.");
      let store: Arc<dyn RecordStore> = Arc::new(MemoryRecordStore::new());
      Ok(store)
    }
  }
}

// Main function
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  dotenvy::dotenv().ok(); // LOG_FORMAT / RUST_LOG may come from .env
  telemetry::init_tracing();

  tracing::info!("Starting SongSnaps order service...");

  // Load application configuration
  let app_config = Arc::new(AppConfig::from_env().context("Failed to load application configuration")?);

  let record_store = build_record_store(&app_config).await?;
  let order_service = OrderService::new(record_store).with_whatsapp_number(app_config.whatsapp_number.clone());

  let app_state = AppState {
    order_service,
    config: app_config.clone(), // Clone Arc for AppState
  };

  // Configure and Start Actix Web Server
  let server_address = app_config.bind_address();
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .wrap(build_cors(&app_state.config))
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(configure_app_routes)
  })
  .bind(&server_address)
  .with_context(|| format!("Failed to bind {}", server_address))?
  .run()
  .await
  .context("HTTP server terminated with an error")
}
