//! Order DTOs

use serde::{Deserialize, Serialize};

use crate::domain::order::Order;
use crate::domain::time::TimeParseError;

/// Request to add a new order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrder {
    /// Unique identifier for the order
    pub id: String,

    /// Delivery time as `HH:MM`
    pub delivery_time: String,
}

impl TryFrom<CreateOrder> for Order {
    type Error = TimeParseError;

    fn try_from(req: CreateOrder) -> Result<Self, Self::Error> {
        Order::new(req.id, &req.delivery_time)
    }
}
