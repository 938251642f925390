//! Service Module
//!
//! Business logic layer for the orchestrator.
//! Services guard repositories and log the changes made through them.

pub mod order;

// Re-export for convenience
pub use order as order_service;
pub use order::{OrderError, OrderService};
