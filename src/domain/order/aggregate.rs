use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::commands::OrderUpdate;
use super::value_objects::{OrderStatus, OrderedItem};

// ============================================================================
// Order Aggregate
// ============================================================================
//
// Transitions are pure: they borrow the current order and return a new value
// that the caller hands to the persistence gateway.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    // Identity
    pub order_id: String,
    pub client_id: String,

    // Current State
    pub status: OrderStatus,
    pub ordered_items: Vec<OrderedItem>,
    pub notes: String,

    // Audit Trail
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl Order {
    /// Build a brand new order with a generated id. `updated_at` stays empty.
    pub fn new(
        client_id: String,
        status: OrderStatus,
        ordered_items: Vec<OrderedItem>,
        notes: String,
        created_at: String,
    ) -> Self {
        Self {
            order_id: Uuid::new_v4().to_string(),
            client_id,
            status,
            ordered_items,
            notes,
            created_at,
            updated_at: String::new(),
        }
    }

    pub fn is_status_valid(&self) -> bool {
        self.status.is_workflow_status()
    }

    /// Full replace of items, status and notes.
    pub fn apply_update(&self, update: &OrderUpdate, now: &str) -> Self {
        Self {
            ordered_items: update.ordered_items.clone(),
            status: update.status,
            notes: update.notes.clone(),
            updated_at: now.to_string(),
            ..self.clone()
        }
    }

    pub fn with_status(&self, status: OrderStatus, now: &str) -> Self {
        Self {
            status,
            updated_at: now.to_string(),
            ..self.clone()
        }
    }
}

/// Current time in the textual form stored on orders.
pub fn timestamp_now() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}
