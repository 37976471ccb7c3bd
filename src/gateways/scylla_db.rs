use async_trait::async_trait;
use futures_util::{Stream, TryStreamExt};
use ::scylla::client::session::Session;
use std::fmt::Display;
use std::sync::Arc;

use super::{GatewayError, OrderGateway};
use crate::domain::order::{Order, OrderStatus, OrderedItem};

// ============================================================================
// ScyllaDB Order Gateway
// ============================================================================
//
// One row per order, keyed by order_id. Line items are stored as a JSON text
// column. A secondary index on client_id serves the per-client listing.
//
// ============================================================================

const COLUMNS: &str = "order_id, client_id, status, ordered_items, notes, created_at, updated_at";

type OrderRow = (
    String,
    String,
    String,
    Option<String>,
    Option<String>,
    String,
    Option<String>,
);

fn backend<E: Display>(e: E) -> GatewayError {
    GatewayError::Backend(e.to_string())
}

pub struct ScyllaOrderGateway {
    session: Arc<Session>,
    keyspace: String,
    table: String,
}

impl ScyllaOrderGateway {
    pub fn new(session: Arc<Session>, keyspace: &str, table: &str) -> Self {
        Self {
            session,
            keyspace: keyspace.to_string(),
            table: table.to_string(),
        }
    }

    fn qualified_table(&self) -> String {
        format!("{}.{}", self.keyspace, self.table)
    }

    /// Create keyspace, table and client index when they are missing.
    pub async fn ensure_schema(&self) -> Result<(), GatewayError> {
        self.session
            .query_unpaged(
                format!(
                    "CREATE KEYSPACE IF NOT EXISTS {} WITH REPLICATION = \
                     {{'class': 'SimpleStrategy', 'replication_factor': 1}}",
                    self.keyspace
                ),
                (),
            )
            .await
            .map_err(backend)?;

        self.session
            .query_unpaged(
                format!(
                    "CREATE TABLE IF NOT EXISTS {} (
                        order_id text PRIMARY KEY,
                        client_id text,
                        status text,
                        ordered_items text,
                        notes text,
                        created_at text,
                        updated_at text
                    )",
                    self.qualified_table()
                ),
                (),
            )
            .await
            .map_err(backend)?;

        self.session
            .query_unpaged(
                format!("CREATE INDEX IF NOT EXISTS ON {} (client_id)", self.qualified_table()),
                (),
            )
            .await
            .map_err(backend)?;

        tracing::info!(
            keyspace = %self.keyspace,
            table = %self.table,
            "Order table ready"
        );

        Ok(())
    }

    fn row_to_order(row: OrderRow) -> Result<Order, GatewayError> {
        let (order_id, client_id, status, items_json, notes, created_at, updated_at) = row;

        let status: OrderStatus = status
            .parse()
            .map_err(|e| GatewayError::Serialization(format!("order {}: {}", order_id, e)))?;

        let ordered_items: Vec<OrderedItem> = match items_json.as_deref() {
            None | Some("") => Vec::new(),
            Some(json) => serde_json::from_str(json)?,
        };

        let order = Order {
            order_id,
            client_id,
            status,
            ordered_items,
            notes: notes.unwrap_or_default(),
            created_at,
            updated_at: updated_at.unwrap_or_default(),
        };

        if !order.is_status_valid() {
            tracing::warn!(order_id = %order.order_id, status = %order.status, "Stored order has a non-workflow status");
        }

        Ok(order)
    }

    /// Listing queries are paged so a full scan never arrives as one response.
    async fn select(
        &self,
        query: String,
        values: impl ::scylla::serialize::row::SerializeRow,
    ) -> Result<Vec<Order>, GatewayError> {
        let rows = self
            .session
            .query_iter(query, values)
            .await
            .map_err(backend)?
            .rows_stream::<OrderRow>()
            .map_err(backend)?;

        Self::collect_orders(rows).await
    }

    async fn collect_orders<S, E>(mut rows: S) -> Result<Vec<Order>, GatewayError>
    where
        S: Stream<Item = Result<OrderRow, E>> + Unpin,
        E: Display,
    {
        let mut orders = Vec::new();
        while let Some(row) = rows.try_next().await.map_err(backend)? {
            orders.push(Self::row_to_order(row)?);
        }

        Ok(orders)
    }
}

#[async_trait]
impl OrderGateway for ScyllaOrderGateway {
    async fn save(&self, order: &Order) -> Result<Order, GatewayError> {
        let items_json = serde_json::to_string(&order.ordered_items)?;

        self.session
            .query_unpaged(
                format!(
                    "INSERT INTO {} ({}) VALUES (?, ?, ?, ?, ?, ?, ?)",
                    self.qualified_table(),
                    COLUMNS
                ),
                (
                    order.order_id.as_str(),
                    order.client_id.as_str(),
                    order.status.as_str(),
                    items_json.as_str(),
                    order.notes.as_str(),
                    order.created_at.as_str(),
                    order.updated_at.as_str(),
                ),
            )
            .await
            .map_err(|e| {
                tracing::error!(order_id = %order.order_id, error = %e, "Failed to insert order");
                backend(e)
            })?;

        tracing::info!(order_id = %order.order_id, "Order persisted");
        Ok(order.clone())
    }

    async fn update(&self, order_id: &str, order: &Order) -> Result<Order, GatewayError> {
        let items_json = serde_json::to_string(&order.ordered_items)?;

        self.session
            .query_unpaged(
                format!(
                    "UPDATE {} SET client_id = ?, status = ?, ordered_items = ?, notes = ?, \
                     created_at = ?, updated_at = ? WHERE order_id = ?",
                    self.qualified_table()
                ),
                (
                    order.client_id.as_str(),
                    order.status.as_str(),
                    items_json.as_str(),
                    order.notes.as_str(),
                    order.created_at.as_str(),
                    order.updated_at.as_str(),
                    order_id,
                ),
            )
            .await
            .map_err(|e| {
                tracing::error!(order_id = %order_id, error = %e, "Failed to update order");
                backend(e)
            })?;

        tracing::info!(order_id = %order_id, status = %order.status, "Order updated");
        Ok(order.clone())
    }

    async fn delete(&self, order_id: &str) -> Result<(), GatewayError> {
        self.session
            .query_unpaged(
                format!("DELETE FROM {} WHERE order_id = ?", self.qualified_table()),
                (order_id,),
            )
            .await
            .map_err(backend)?;

        tracing::info!(order_id = %order_id, "Order deleted");
        Ok(())
    }

    async fn get_by_id(&self, order_id: &str) -> Result<Option<Order>, GatewayError> {
        let result = self
            .session
            .query_unpaged(
                format!(
                    "SELECT {} FROM {} WHERE order_id = ?",
                    COLUMNS,
                    self.qualified_table()
                ),
                (order_id,),
            )
            .await
            .map_err(|e| {
                tracing::error!(order_id = %order_id, error = %e, "Failed to fetch order");
                backend(e)
            })?;

        let rows_result = result.into_rows_result().map_err(backend)?;

        match rows_result.maybe_first_row::<OrderRow>().map_err(backend)? {
            Some(row) => Ok(Some(Self::row_to_order(row)?)),
            None => {
                tracing::debug!(order_id = %order_id, "Order does not exist");
                Ok(None)
            }
        }
    }

    async fn get_all(&self) -> Result<Vec<Order>, GatewayError> {
        self.select(
            format!("SELECT {} FROM {}", COLUMNS, self.qualified_table()),
            (),
        )
        .await
    }

    async fn get_all_by_client_id(&self, client_id: &str) -> Result<Vec<Order>, GatewayError> {
        self.select(
            format!(
                "SELECT {} FROM {} WHERE client_id = ?",
                COLUMNS,
                self.qualified_table()
            ),
            (client_id,),
        )
        .await
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
//
// Database round trips need a running cluster; these cover row decoding.
//
// ============================================================================
