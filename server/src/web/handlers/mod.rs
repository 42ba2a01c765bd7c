// server/src/web/handlers/mod.rs

// Declare handler modules
pub mod catalog_handlers;
pub mod order_handlers;
pub mod status_handlers;
