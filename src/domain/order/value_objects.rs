use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::OrderError;

// ============================================================================
// Order Value Objects
// ============================================================================

/// A line item referencing a catalog item within an order.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OrderedItem {
    pub item_id: String,
    pub quantity: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl OrderedItem {
    #[cfg(test)]
    pub fn new(item_id: impl Into<String>, quantity: i32) -> Self {
        Self {
            item_id: item_id.into(),
            quantity,
            price: None,
            name: None,
            category: None,
            description: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Created,
    Received,
    Cooking,
    Ready,
    Delivered,
    Done,
    // Payment outcomes, never a valid order workflow status
    Approved,
    Declined,
}

impl OrderStatus {
    pub const WORKFLOW: [OrderStatus; 6] = [
        OrderStatus::Created,
        OrderStatus::Received,
        OrderStatus::Cooking,
        OrderStatus::Ready,
        OrderStatus::Delivered,
        OrderStatus::Done,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Created => "CREATED",
            OrderStatus::Received => "RECEIVED",
            OrderStatus::Cooking => "COOKING",
            OrderStatus::Ready => "READY",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Done => "DONE",
            OrderStatus::Approved => "APPROVED",
            OrderStatus::Declined => "DECLINED",
        }
    }

    /// Membership in the order workflow set.
    pub fn is_workflow_status(&self) -> bool {
        Self::WORKFLOW.contains(self)
    }

    /// Parse a raw status and require it to be a workflow status.
    pub fn parse_workflow(raw: &str) -> Result<Self, OrderError> {
        match raw.parse::<OrderStatus>() {
            Ok(status) if status.is_workflow_status() => Ok(status),
            _ => Err(OrderError::InvalidStatus(raw.to_string())),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Unknown order status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATED" => Ok(OrderStatus::Created),
            "RECEIVED" => Ok(OrderStatus::Received),
            "COOKING" => Ok(OrderStatus::Cooking),
            "READY" => Ok(OrderStatus::Ready),
            "DELIVERED" => Ok(OrderStatus::Delivered),
            "DONE" => Ok(OrderStatus::Done),
            "APPROVED" => Ok(OrderStatus::Approved),
            "DECLINED" => Ok(OrderStatus::Declined),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
