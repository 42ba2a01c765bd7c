// server/src/web/mod.rs

// Declare child modules
pub mod handlers;
pub mod routes;

// Re-export key items so main.rs and tests can build the App the same way.
pub use routes::{build_cors, configure_app_routes};
