//! Dispatch Orchestrator
//!
//! Bookkeeping for delivery orders and the partners they are assigned to.
//!
//! - `repository`: the in-memory assignment index
//! - `service`: a shareable, lock-guarded handle used by request handlers
//! - `config`: environment-driven settings

pub mod config;
pub mod repository;
pub mod service;
