//! Order Service
//!
//! Business logic for orders, delivery partners and their assignments.
//!
//! The assignment index keeps four interlinked maps, so the whole structure
//! sits behind a single mutex. Every call takes the lock once and runs to
//! completion while holding it.

use std::sync::{Arc, Mutex, MutexGuard};

use dispatch_core::domain::order::Order;
use dispatch_core::domain::partner::DeliveryPartner;
use dispatch_core::domain::time::TimeParseError;
use dispatch_core::dto::order::CreateOrder;
use thiserror::Error;

use crate::config::Config;
use crate::repository::AssignmentIndex;

/// Service error type
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("invalid time: {0}")]
    InvalidTime(#[from] TimeParseError),

    #[error("assignment index lock poisoned")]
    LockPoisoned,
}

pub type Result<T> = std::result::Result<T, OrderError>;

/// Shared handle to one assignment index
///
/// Clones share the same index. Separate `OrderService::new` calls never do.
#[derive(Clone)]
pub struct OrderService {
    index: Arc<Mutex<AssignmentIndex>>,
    instance: Arc<str>,
}

impl OrderService {
    /// Creates a service around a fresh, empty index
    pub fn new(config: &Config) -> Self {
        tracing::debug!(
            instance = %config.instance_name,
            policy = %config.policy,
            "Creating order service"
        );

        Self {
            index: Arc::new(Mutex::new(AssignmentIndex::new(config.policy))),
            instance: Arc::from(config.instance_name.as_str()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, AssignmentIndex>> {
        self.index.lock().map_err(|_| OrderError::LockPoisoned)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add or replace an order
    pub fn add_order(&self, order: Order) -> Result<()> {
        let order_id = order.id.clone();
        self.lock()?.add_order(order);

        tracing::info!(instance = %self.instance, "Order added: {}", order_id);

        Ok(())
    }

    /// Add an order from a request carrying an `HH:MM` delivery time
    pub fn create_order(&self, req: CreateOrder) -> Result<Order> {
        let order = Order::try_from(req)?;
        self.add_order(order.clone())?;
        Ok(order)
    }

    /// Add a delivery partner with no orders
    pub fn add_partner(&self, partner_id: &str) -> Result<()> {
        self.lock()?.add_partner(partner_id);

        tracing::info!(instance = %self.instance, "Delivery partner added: {}", partner_id);

        Ok(())
    }

    /// Assign an order to a partner; ignored if either is unknown
    pub fn add_order_partner_pair(&self, order_id: &str, partner_id: &str) -> Result<()> {
        let assigned = self.lock()?.assign(order_id, partner_id);

        if assigned {
            tracing::info!(
                instance = %self.instance,
                "Order {} assigned to partner {}",
                order_id,
                partner_id
            );
        } else {
            tracing::debug!(
                instance = %self.instance,
                "Ignoring assignment of order {} to partner {}: unknown id",
                order_id,
                partner_id
            );
        }

        Ok(())
    }

    /// Delete a partner; its orders stay but become unassigned
    pub fn delete_partner_by_id(&self, partner_id: &str) -> Result<()> {
        self.lock()?.delete_partner(partner_id);

        tracing::info!(instance = %self.instance, "Delivery partner removed: {}", partner_id);

        Ok(())
    }

    /// Delete an order and release it from its partner
    pub fn delete_order_by_id(&self, order_id: &str) -> Result<()> {
        self.lock()?.delete_order(order_id);

        tracing::info!(instance = %self.instance, "Order removed: {}", order_id);

        Ok(())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn get_order_by_id(&self, order_id: &str) -> Result<Order> {
        tracing::debug!("Getting order: {}", order_id);

        self.lock()?
            .order(order_id)
            .cloned()
            .ok_or_else(|| OrderError::NotFound(format!("Order {}", order_id)))
    }

    pub fn get_partner_by_id(&self, partner_id: &str) -> Result<DeliveryPartner> {
        tracing::debug!("Getting delivery partner: {}", partner_id);

        self.lock()?
            .partner(partner_id)
            .cloned()
            .ok_or_else(|| OrderError::NotFound(format!("Delivery partner {}", partner_id)))
    }

    /// Number of orders assigned to a partner; 0 for an unknown partner
    pub fn get_order_count_by_partner_id(&self, partner_id: &str) -> Result<usize> {
        Ok(self.lock()?.order_count_for_partner(partner_id))
    }

    pub fn get_orders_by_partner_id(&self, partner_id: &str) -> Result<Vec<String>> {
        Ok(self.lock()?.orders_for_partner(partner_id))
    }

    pub fn get_all_orders(&self) -> Result<Vec<String>> {
        Ok(self.lock()?.all_order_ids())
    }

    pub fn get_count_of_unassigned_orders(&self) -> Result<usize> {
        Ok(self.lock()?.count_unassigned_orders())
    }

    /// Orders a partner still has to deliver after `time` (`HH:MM`)
    ///
    /// `None` when the partner is unknown.
    pub fn get_orders_left_after_given_time_by_partner_id(
        &self,
        time: &str,
        partner_id: &str,
    ) -> Result<Option<usize>> {
        tracing::debug!("Counting orders after {} for partner: {}", time, partner_id);

        let count = self.lock()?.count_orders_after_time(time, partner_id)?;
        Ok(count)
    }

    /// Latest delivery time of a partner as `HH:MM`
    ///
    /// `None` when the partner is unknown, `"00:00"` when it has no orders.
    pub fn get_last_delivery_time_by_partner_id(&self, partner_id: &str) -> Result<Option<String>> {
        Ok(self.lock()?.last_delivery_time_for_partner(partner_id))
    }
}

impl Default for OrderService {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}
