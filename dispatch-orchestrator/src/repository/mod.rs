//! Repository Module
//!
//! Data access layer for the orchestrator.
//! State is volatile and lives entirely in process memory.

pub mod assignment;

// Re-export for convenience
pub use assignment::{AssignmentIndex, AssignmentPolicy, ConsistencyError};
