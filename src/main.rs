use clap::Parser;
use scylla::client::session::Session;
use scylla::client::session_builder::SessionBuilder;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod api;
mod config;
mod domain;
mod gateways;
mod messaging;
mod metrics;
mod utils;

use config::{NotifierBackend, Settings, StorageBackend};
use domain::order::OrderUseCase;
use gateways::{MemoryOrderGateway, NotificationGateway, OrderGateway, ScyllaOrderGateway};
use messaging::{NoopNotifier, RedpandaNotifier};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Default to INFO level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,order_service=debug")),
        )
        .init();

    let settings = Settings::parse();
    tracing::info!(storage = ?settings.storage, notifier = ?settings.notifier, "🚀 Starting order service");

    // === 1. Prometheus metrics ===
    let metrics = Arc::new(metrics::Metrics::new()?);
    tracing::info!("📊 Metrics registry created with {} metrics", metrics.registry().gather().len());

    let metrics_registry = Arc::new(metrics.registry().clone());
    let metrics_host = settings.http_host.clone();
    let metrics_port = settings.metrics_port;
    actix_web::rt::spawn(async move {
        if let Err(e) = metrics::start_metrics_server(metrics_registry, metrics_host, metrics_port).await {
            tracing::error!("Metrics server error: {}", e);
        }
    });

    // === 2. Storage ===
    let orders: Arc<dyn OrderGateway> = match settings.storage {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage, orders are lost on restart");
            Arc::new(MemoryOrderGateway::new())
        }
        StorageBackend::Scylla => {
            tracing::info!(nodes = ?settings.scylla_nodes, "Connecting to ScyllaDB...");
            let session: Session = SessionBuilder::new()
                .known_nodes(&settings.scylla_nodes)
                .build()
                .await?;

            let gateway = ScyllaOrderGateway::new(
                Arc::new(session),
                &settings.scylla_keyspace,
                &settings.orders_table,
            );
            gateway.ensure_schema().await?;
            Arc::new(gateway)
        }
    };

    // === 3. Order-created notifications ===
    let notifier: Arc<dyn NotificationGateway> = match settings.notifier {
        NotifierBackend::Noop => Arc::new(NoopNotifier),
        NotifierBackend::Redpanda => {
            tracing::info!(brokers = %settings.brokers, topic = %settings.topic, "Connecting to Redpanda");
            Arc::new(RedpandaNotifier::new(&settings.brokers, &settings.topic)?.with_metrics(metrics.clone()))
        }
    };

    // === 4. Order API ===
    let state = api::AppState {
        use_case: OrderUseCase::new(orders, notifier),
        metrics,
    };

    api::start_api_server(state, settings.http_host, settings.http_port).await?;

    tracing::info!("👋 Order service stopped");
    Ok(())
}
