//! Core domain types
//!
//! This module contains the domain structures shared by the assignment index
//! and whatever request layer sits in front of it.

pub mod order;
pub mod partner;
pub mod time;
