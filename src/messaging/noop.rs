use async_trait::async_trait;

use crate::domain::order::Order;
use crate::gateways::{GatewayError, NotificationGateway};

/// Stand-in for environments without a queue: logs and echoes the order.
#[derive(Debug, Default, Clone)]
pub struct NoopNotifier;

#[async_trait]
impl NotificationGateway for NoopNotifier {
    async fn send_message(&self, order: &Order) -> Result<Order, GatewayError> {
        tracing::debug!(order_id = %order.order_id, "Queue disabled, skipping order notification");
        Ok(order.clone())
    }
}
