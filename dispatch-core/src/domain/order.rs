//! Order domain model
//!
//! A deliverable unit identified by a caller-supplied string.

use serde::{Deserialize, Serialize};

use super::time::{DeliveryTime, TimeParseError};

/// An order scheduled for delivery at a time of day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Unique, case-sensitive identifier
    pub id: String,

    /// Scheduled delivery time
    pub delivery_time: DeliveryTime,
}

impl Order {
    /// Creates an order from an identifier and an `HH:MM` delivery time
    pub fn new(id: impl Into<String>, delivery_time: &str) -> Result<Self, TimeParseError> {
        Ok(Self {
            id: id.into(),
            delivery_time: delivery_time.parse()?,
        })
    }

    pub fn with_time(id: impl Into<String>, delivery_time: DeliveryTime) -> Self {
        Self {
            id: id.into(),
            delivery_time,
        }
    }
}
