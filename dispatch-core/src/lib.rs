//! Dispatch Core
//!
//! Core types for the Dispatch order/partner bookkeeping system.
//!
//! This crate contains:
//! - Domain types: Orders, delivery partners and delivery times
//! - DTOs: Request shapes handed in by outer request-handling layers

pub mod domain;
pub mod dto;
