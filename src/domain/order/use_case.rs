use std::sync::Arc;

use crate::gateways::{NotificationGateway, OrderGateway};

use super::aggregate::{timestamp_now, Order};
use super::commands::{NewOrder, UpdateOrder};
use super::errors::OrderError;
use super::value_objects::OrderStatus;

// ============================================================================
// Order Use-Case
// ============================================================================
//
// Orchestrates: Request → Validation → Pure transition → Gateway
//
// Every requested status is validated before anything is fetched-and-changed
// or persisted. Absence is Ok(None) except for delete, which reports
// NotFound.
//
// ============================================================================

#[derive(Clone)]
pub struct OrderUseCase {
    orders: Arc<dyn OrderGateway>,
    notifier: Arc<dyn NotificationGateway>,
}

impl OrderUseCase {
    pub fn new(orders: Arc<dyn OrderGateway>, notifier: Arc<dyn NotificationGateway>) -> Self {
        Self { orders, notifier }
    }

    /// All orders, or one client's orders, optionally narrowed to an exact status.
    pub async fn list(&self, client_id: &str, status: &str) -> Result<Vec<Order>, OrderError> {
        let orders = if client_id.is_empty() {
            self.orders.get_all().await?
        } else {
            self.orders.get_all_by_client_id(client_id).await?
        };

        if status.is_empty() {
            return Ok(orders);
        }

        Ok(orders
            .into_iter()
            .filter(|order| order.status.as_str() == status)
            .collect())
    }

    pub async fn get_by_id(&self, order_id: &str) -> Result<Option<Order>, OrderError> {
        let order = self.orders.get_by_id(order_id).await?;
        if order.is_none() {
            tracing::debug!(order_id = %order_id, "Order not found");
        }
        Ok(order)
    }

    pub async fn create(&self, new_order: NewOrder) -> Result<Order, OrderError> {
        let status = new_order.initial_status()?;

        let order = Order::new(
            new_order.client_id,
            status,
            new_order.ordered_items,
            new_order.notes,
            timestamp_now(),
        );

        tracing::info!(
            order_id = %order.order_id,
            client_id = %order.client_id,
            item_count = order.ordered_items.len(),
            "Creating new order"
        );

        let saved = self.orders.save(&order).await?;
        let published = self.notifier.send_message(&saved).await?;

        Ok(published)
    }

    pub async fn update(
        &self,
        order_id: &str,
        update: UpdateOrder,
    ) -> Result<Option<Order>, OrderError> {
        let Some(existing) = self.get_by_id(order_id).await? else {
            return Ok(None);
        };

        let update = update.validate()?;
        let updated = existing.apply_update(&update, &timestamp_now());

        tracing::info!(
            order_id = %order_id,
            from = %existing.status,
            to = %updated.status,
            "Updating order"
        );

        Ok(Some(self.orders.save(&updated).await?))
    }

    pub async fn update_order_status(
        &self,
        order_id: &str,
        status: &str,
    ) -> Result<Option<Order>, OrderError> {
        let Some(existing) = self.get_by_id(order_id).await? else {
            return Ok(None);
        };

        let status = OrderStatus::parse_workflow(status)?;
        let patched = existing.with_status(status, &timestamp_now());

        tracing::info!(
            order_id = %order_id,
            from = %existing.status,
            to = %status,
            "Updating order status"
        );

        Ok(Some(self.orders.update(order_id, &patched).await?))
    }

    pub async fn delete(&self, order_id: &str) -> Result<(), OrderError> {
        if self.get_by_id(order_id).await?.is_none() {
            return Err(OrderError::NotFound(order_id.to_string()));
        }

        self.orders.delete(order_id).await?;
        tracing::info!(order_id = %order_id, "Order deleted");
        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
