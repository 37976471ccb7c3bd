use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{GatewayError, OrderGateway};
use crate::domain::order::Order;

/// In-memory order storage.
///
/// Nothing survives a restart. Listing is sorted by creation time so output
/// is stable across calls.
#[derive(Clone, Default)]
pub struct MemoryOrderGateway {
    store: Arc<RwLock<HashMap<String, Order>>>,
}

impl MemoryOrderGateway {
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted(mut orders: Vec<Order>) -> Vec<Order> {
        orders.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.order_id.cmp(&b.order_id))
        });
        orders
    }
}

#[async_trait]
impl OrderGateway for MemoryOrderGateway {
    async fn save(&self, order: &Order) -> Result<Order, GatewayError> {
        let mut store = self.store.write().await;
        store.insert(order.order_id.clone(), order.clone());
        tracing::debug!(order_id = %order.order_id, "Order stored in memory");
        Ok(order.clone())
    }

    async fn update(&self, order_id: &str, order: &Order) -> Result<Order, GatewayError> {
        let mut store = self.store.write().await;
        store.insert(order_id.to_string(), order.clone());
        Ok(order.clone())
    }

    async fn delete(&self, order_id: &str) -> Result<(), GatewayError> {
        let mut store = self.store.write().await;
        store.remove(order_id);
        Ok(())
    }

    async fn get_by_id(&self, order_id: &str) -> Result<Option<Order>, GatewayError> {
        let store = self.store.read().await;
        Ok(store.get(order_id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Order>, GatewayError> {
        let store = self.store.read().await;
        Ok(Self::sorted(store.values().cloned().collect()))
    }

    async fn get_all_by_client_id(&self, client_id: &str) -> Result<Vec<Order>, GatewayError> {
        let store = self.store.read().await;
        Ok(Self::sorted(
            store
                .values()
                .filter(|o| o.client_id == client_id)
                .cloned()
                .collect(),
        ))
    }
}
