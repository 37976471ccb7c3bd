use serde::Deserialize;

use super::errors::OrderError;
use super::value_objects::{OrderStatus, OrderedItem};

// ============================================================================
// Order Commands - Represent user intent
// ============================================================================

/// Input for creating an order. There is no id field: ids are always generated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewOrder {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub ordered_items: Vec<OrderedItem>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub status: Option<String>,
}

impl NewOrder {
    /// Requested status, defaulting to CREATED when none was supplied.
    pub fn initial_status(&self) -> Result<OrderStatus, OrderError> {
        match self.status.as_deref() {
            None | Some("") => Ok(OrderStatus::Created),
            Some(raw) => OrderStatus::parse_workflow(raw),
        }
    }
}

/// Full replacement of the mutable parts of an order, as requested.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateOrder {
    #[serde(default)]
    pub ordered_items: Vec<OrderedItem>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub notes: String,
}

impl UpdateOrder {
    pub fn validate(self) -> Result<OrderUpdate, OrderError> {
        let status = OrderStatus::parse_workflow(&self.status)?;
        Ok(OrderUpdate {
            ordered_items: self.ordered_items,
            status,
            notes: self.notes,
        })
    }
}

/// A validated full-replace delta.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderUpdate {
    pub ordered_items: Vec<OrderedItem>,
    pub status: OrderStatus,
    pub notes: String,
}
