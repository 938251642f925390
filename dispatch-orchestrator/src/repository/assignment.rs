//! Assignment Repository
//!
//! In-memory bidirectional index between orders and delivery partners.
//!
//! Four maps describe the same relationship and must agree with each other:
//! - order id -> order record
//! - partner id -> partner record (carrying the live order counter)
//! - partner id -> set of assigned order ids
//! - order id -> assigned partner id
//!
//! Callers never see the maps. Every mutation goes through the methods below,
//! which update all affected views together.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use dispatch_core::domain::order::Order;
use dispatch_core::domain::partner::DeliveryPartner;
use dispatch_core::domain::time::{DeliveryTime, TimeParseError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How the index treats overwrite-adds and reassignment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentPolicy {
    /// Historical behavior. Re-adding a partner resets it, and reassigning an
    /// order leaves the previous partner's set and counter untouched.
    #[default]
    Legacy,

    /// Re-adding a partner keeps the existing one, and reassigning an order
    /// unassigns it from its previous partner first.
    Strict,
}

impl fmt::Display for AssignmentPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssignmentPolicy::Legacy => write!(f, "legacy"),
            AssignmentPolicy::Strict => write!(f, "strict"),
        }
    }
}

impl FromStr for AssignmentPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(AssignmentPolicy::Legacy),
            "strict" => Ok(AssignmentPolicy::Strict),
            other => Err(format!("unknown assignment policy '{other}'")),
        }
    }
}

/// A disagreement between the views kept by [`AssignmentIndex`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsistencyError {
    #[error("order {order_id} points at partner {partner_id}, whose set does not contain it")]
    ReverseNotMirrored {
        order_id: String,
        partner_id: String,
    },

    #[error("partner {partner_id} holds order {order_id}, which does not point back at it")]
    ForwardNotMirrored {
        order_id: String,
        partner_id: String,
    },

    #[error("partner {partner_id} counts {counter} orders but holds {assigned}")]
    CounterMismatch {
        partner_id: String,
        counter: usize,
        assigned: usize,
    },

    #[error("assignment references unknown order {0}")]
    UnknownOrder(String),

    #[error("partner {0} has a record without an order set, or a set without a record")]
    OrphanedPartner(String),
}

/// Bidirectional order/partner index
#[derive(Debug, Default)]
pub struct AssignmentIndex {
    policy: AssignmentPolicy,
    orders: HashMap<String, Order>,
    partners: HashMap<String, DeliveryPartner>,
    partner_orders: HashMap<String, HashSet<String>>,
    order_partner: HashMap<String, String>,
}

impl AssignmentIndex {
    /// Creates an empty index using the given policy
    pub fn new(policy: AssignmentPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> AssignmentPolicy {
        self.policy
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Insert or replace an order record
    ///
    /// An existing assignment for the same id is kept.
    pub fn add_order(&mut self, order: Order) {
        self.orders.insert(order.id.clone(), order);
    }

    /// Register a partner with no orders
    ///
    /// Under [`AssignmentPolicy::Legacy`] an existing partner is replaced and
    /// its order set emptied, while its orders keep pointing at it.
    pub fn add_partner(&mut self, partner_id: &str) {
        if self.policy == AssignmentPolicy::Strict && self.partners.contains_key(partner_id) {
            return;
        }

        self.partners
            .insert(partner_id.to_string(), DeliveryPartner::new(partner_id));
        self.partner_orders
            .insert(partner_id.to_string(), HashSet::new());
    }

    /// Assign an order to a partner
    ///
    /// Does nothing and returns `false` unless both the order and the partner
    /// exist.
    pub fn assign(&mut self, order_id: &str, partner_id: &str) -> bool {
        if !self.orders.contains_key(order_id) || !self.partners.contains_key(partner_id) {
            return false;
        }

        if let Some(previous) = self.order_partner.get(order_id).cloned() {
            match self.policy {
                AssignmentPolicy::Strict if previous == partner_id => return true,
                AssignmentPolicy::Strict => self.unassign(order_id, &previous),
                AssignmentPolicy::Legacy => {
                    tracing::warn!(
                        order_id,
                        previous_partner = %previous,
                        partner_id,
                        "Reassigning an assigned order; previous partner bookkeeping is left as is"
                    );
                }
            }
        }

        self.partner_orders
            .entry(partner_id.to_string())
            .or_default()
            .insert(order_id.to_string());
        self.order_partner
            .insert(order_id.to_string(), partner_id.to_string());
        if let Some(partner) = self.partners.get_mut(partner_id) {
            partner.increment_orders();
        }

        true
    }

    /// Remove a partner, leaving its orders unassigned
    pub fn delete_partner(&mut self, partner_id: &str) {
        if !self.partners.contains_key(partner_id) {
            return;
        }

        if let Some(orders) = self.partner_orders.remove(partner_id) {
            for order_id in &orders {
                self.order_partner.remove(order_id);
            }
        }
        self.partners.remove(partner_id);
    }

    /// Remove an order, releasing it from its partner if assigned
    ///
    /// Under [`AssignmentPolicy::Legacy`] the order's partner pointer is only
    /// cleared when that partner still has an order set. A pointer left behind
    /// by a reset-then-deleted partner survives the delete, so re-adding the
    /// same order id brings it back as assigned.
    pub fn delete_order(&mut self, order_id: &str) {
        if !self.orders.contains_key(order_id) {
            return;
        }

        if let Some(partner_id) = self.order_partner.get(order_id).cloned() {
            let released = self.release(order_id, &partner_id);
            if released || self.policy == AssignmentPolicy::Strict {
                self.order_partner.remove(order_id);
            }
        }
        self.orders.remove(order_id);
    }

    fn unassign(&mut self, order_id: &str, partner_id: &str) {
        self.release(order_id, partner_id);
        self.order_partner.remove(order_id);
    }

    /// Drop an order from a partner's set and counter
    ///
    /// Returns `false` when the partner has no order set.
    fn release(&mut self, order_id: &str, partner_id: &str) -> bool {
        let Some(orders) = self.partner_orders.get_mut(partner_id) else {
            return false;
        };

        orders.remove(order_id);
        if let Some(partner) = self.partners.get_mut(partner_id) {
            partner.decrement_orders();
        }
        true
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    pub fn order(&self, order_id: &str) -> Option<&Order> {
        self.orders.get(order_id)
    }

    pub fn partner(&self, partner_id: &str) -> Option<&DeliveryPartner> {
        self.partners.get(partner_id)
    }

    /// Partner currently assigned to an order, if any
    pub fn partner_for_order(&self, order_id: &str) -> Option<&str> {
        self.order_partner.get(order_id).map(String::as_str)
    }

    /// Number of orders in a partner's set; 0 for an unknown partner
    pub fn order_count_for_partner(&self, partner_id: &str) -> usize {
        self.partner_orders.get(partner_id).map_or(0, HashSet::len)
    }

    /// Orders assigned to a partner, in no particular order
    pub fn orders_for_partner(&self, partner_id: &str) -> Vec<String> {
        self.partner_orders
            .get(partner_id)
            .map(|orders| orders.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Every known order id, in no particular order
    pub fn all_order_ids(&self) -> Vec<String> {
        self.orders.keys().cloned().collect()
    }

    // =========================================================================
    // Aggregates
    // =========================================================================

    pub fn count_unassigned_orders(&self) -> usize {
        self.orders
            .keys()
            .filter(|order_id| !self.order_partner.contains_key(*order_id))
            .count()
    }

    /// Count a partner's orders scheduled strictly after `time` (`HH:MM`)
    ///
    /// Returns `Ok(None)` for an unknown partner without looking at `time`.
    pub fn count_orders_after_time(
        &self,
        time: &str,
        partner_id: &str,
    ) -> Result<Option<usize>, TimeParseError> {
        let Some(orders) = self.partner_orders.get(partner_id) else {
            return Ok(None);
        };

        let threshold: DeliveryTime = time.parse()?;
        let count = self
            .assigned_times(orders)
            .filter(|delivery_time| *delivery_time > threshold)
            .count();

        Ok(Some(count))
    }

    /// Latest delivery time among a partner's orders, as `HH:MM`
    ///
    /// A known partner with no orders yields `"00:00"`, not `None`.
    pub fn last_delivery_time_for_partner(&self, partner_id: &str) -> Option<String> {
        let orders = self.partner_orders.get(partner_id)?;

        let latest = self
            .assigned_times(orders)
            .max()
            .unwrap_or(DeliveryTime::MIDNIGHT);

        Some(latest.to_string())
    }

    fn assigned_times<'a>(
        &'a self,
        orders: &'a HashSet<String>,
    ) -> impl Iterator<Item = DeliveryTime> + 'a {
        orders
            .iter()
            .filter_map(|order_id| self.orders.get(order_id))
            .map(|order| order.delivery_time)
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    /// Verify that all four views agree
    ///
    /// Always holds under [`AssignmentPolicy::Strict`]. Under
    /// [`AssignmentPolicy::Legacy`] it holds until a partner is re-added or an
    /// assigned order is reassigned.
    pub fn check_consistency(&self) -> Result<(), ConsistencyError> {
        for partner_id in self.partners.keys() {
            if !self.partner_orders.contains_key(partner_id) {
                return Err(ConsistencyError::OrphanedPartner(partner_id.clone()));
            }
        }

        for (partner_id, orders) in &self.partner_orders {
            let Some(partner) = self.partners.get(partner_id) else {
                return Err(ConsistencyError::OrphanedPartner(partner_id.clone()));
            };

            if partner.number_of_orders() != orders.len() {
                return Err(ConsistencyError::CounterMismatch {
                    partner_id: partner_id.clone(),
                    counter: partner.number_of_orders(),
                    assigned: orders.len(),
                });
            }

            for order_id in orders {
                if !self.orders.contains_key(order_id) {
                    return Err(ConsistencyError::UnknownOrder(order_id.clone()));
                }
                if self.order_partner.get(order_id) != Some(partner_id) {
                    return Err(ConsistencyError::ForwardNotMirrored {
                        order_id: order_id.clone(),
                        partner_id: partner_id.clone(),
                    });
                }
            }
        }

        for (order_id, partner_id) in &self.order_partner {
            if !self.orders.contains_key(order_id) {
                return Err(ConsistencyError::UnknownOrder(order_id.clone()));
            }
            let mirrored = self
                .partner_orders
                .get(partner_id)
                .is_some_and(|orders| orders.contains(order_id));
            if !mirrored {
                return Err(ConsistencyError::ReverseNotMirrored {
                    order_id: order_id.clone(),
                    partner_id: partner_id.clone(),
                });
            }
        }

        Ok(())
    }
}
