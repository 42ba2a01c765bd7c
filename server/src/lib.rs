// server/src/lib.rs

//! HTTP surface and process plumbing for the SongSnaps order service.

pub mod config;
pub mod db;
pub mod errors;
pub mod state;
pub mod telemetry;
pub mod web;

pub use crate::config::{AppConfig, StoreBackend};
pub use crate::errors::{AppError, Result};
pub use crate::state::AppState;
