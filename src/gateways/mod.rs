// ============================================================================
// Gateways - Ports the order use-case depends on
// ============================================================================
//
// Storage:       OrderGateway         (scylla, memory)
// Notification:  NotificationGateway  (messaging::RedpandaNotifier, messaging::NoopNotifier)
//
// Absence is Ok(None), never an error.
//
// ============================================================================

mod memory;
mod scylla_db;

use async_trait::async_trait;

use crate::domain::order::Order;

pub use memory::MemoryOrderGateway;
pub use scylla_db::ScyllaOrderGateway;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Notification error: {0}")]
    Notification(String),
}

impl From<serde_json::Error> for GatewayError {
    fn from(e: serde_json::Error) -> Self {
        GatewayError::Serialization(e.to_string())
    }
}

/// Durable storage of orders.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Insert or overwrite the order keyed by its id.
    async fn save(&self, order: &Order) -> Result<Order, GatewayError>;

    async fn update(&self, order_id: &str, order: &Order) -> Result<Order, GatewayError>;

    async fn delete(&self, order_id: &str) -> Result<(), GatewayError>;

    async fn get_by_id(&self, order_id: &str) -> Result<Option<Order>, GatewayError>;

    async fn get_all(&self) -> Result<Vec<Order>, GatewayError>;

    async fn get_all_by_client_id(&self, client_id: &str) -> Result<Vec<Order>, GatewayError>;
}

/// Publication of a freshly created order to an external channel.
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    /// Publish the order and echo it back.
    async fn send_message(&self, order: &Order) -> Result<Order, GatewayError>;
}
