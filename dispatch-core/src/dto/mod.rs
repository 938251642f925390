//! Data Transfer Objects
//!
//! Request shapes an outer request-handling layer hands to the orchestrator.
//! Times travel as raw `HH:MM` strings until they are converted into domain
//! types.

pub mod order;
