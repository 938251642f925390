//! Delivery partner domain model

use serde::{Deserialize, Serialize};

/// A partner that can be assigned zero or more orders
///
/// The order counter is maintained by the assignment index, which only ever
/// hands out shared references or clones of its records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryPartner {
    /// Unique, case-sensitive identifier
    pub id: String,

    /// Number of orders currently assigned to this partner
    number_of_orders: usize,
}

impl DeliveryPartner {
    /// Creates a partner with no assigned orders
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            number_of_orders: 0,
        }
    }

    pub fn number_of_orders(&self) -> usize {
        self.number_of_orders
    }

    /// Records one more assigned order
    pub fn increment_orders(&mut self) {
        self.number_of_orders += 1;
    }

    /// Records one fewer assigned order
    ///
    /// Saturates at zero. A legacy index can release an order from a partner
    /// whose counter was already reset, which would otherwise go negative.
    pub fn decrement_orders(&mut self) {
        self.number_of_orders = self.number_of_orders.saturating_sub(1);
    }
}
