// Private module declaration
mod server;

use prometheus::{
    HistogramOpts, HistogramVec, IntCounter, IntCounterVec,
    IntGauge, Opts, Registry,
};

// Re-export for public API
pub use server::start_metrics_server;

// ============================================================================
// Metrics Module - Prometheus metrics for observability
// ============================================================================
//
// - Order API requests (throughput, latency, outcome)
// - Orders created
// - Order-created notifications (published / failed)
// - Queue circuit breaker state
//
// Scraped via /metrics on the metrics port.
// ============================================================================

pub struct Metrics {
    registry: Registry,

    // Request Metrics
    pub order_requests: IntCounterVec,
    pub order_request_duration: HistogramVec,

    // Lifecycle Metrics
    pub orders_created: IntCounter,

    // Notification Metrics
    pub notifications_published: IntCounter,
    pub notifications_failed: IntCounter,

    // Circuit Breaker Metrics
    pub circuit_breaker_state: IntGauge,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let order_requests = IntCounterVec::new(
            Opts::new("order_requests_total", "Total order API requests"),
            &["operation", "outcome"],
        )?;
        registry.register(Box::new(order_requests.clone()))?;

        let order_request_duration = HistogramVec::new(
            HistogramOpts::new("order_request_duration_seconds", "Order API request duration")
                .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
            &["operation"],
        )?;
        registry.register(Box::new(order_request_duration.clone()))?;

        let orders_created = IntCounter::new(
            "orders_created_total",
            "Orders created and announced; a failed notification is not counted",
        )?;
        registry.register(Box::new(orders_created.clone()))?;

        let notifications_published = IntCounter::new(
            "notifications_published_total",
            "Order created messages published to the queue",
        )?;
        registry.register(Box::new(notifications_published.clone()))?;

        let notifications_failed = IntCounter::new(
            "notifications_failed_total",
            "Order created messages that could not be published",
        )?;
        registry.register(Box::new(notifications_failed.clone()))?;

        let circuit_breaker_state = IntGauge::new(
            "circuit_breaker_state",
            "Circuit breaker state (0=Closed, 1=Open, 2=HalfOpen)",
        )?;
        registry.register(Box::new(circuit_breaker_state.clone()))?;

        Ok(Self {
            registry,
            order_requests,
            order_request_duration,
            orders_created,
            notifications_published,
            notifications_failed,
            circuit_breaker_state,
        })
    }

    /// Get the Prometheus registry for exposing metrics via HTTP
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Record one handled API request
    pub fn record_request(&self, operation: &str, outcome: &str, duration_secs: f64) {
        self.order_requests.with_label_values(&[operation, outcome]).inc();
        self.order_request_duration.with_label_values(&[operation]).observe(duration_secs);
    }

    pub fn record_order_created(&self) {
        self.orders_created.inc();
    }

    pub fn record_notification(&self, success: bool) {
        if success {
            self.notifications_published.inc();
        } else {
            self.notifications_failed.inc();
        }
    }

    pub fn update_circuit_breaker_state(&self, state: u8) {
        self.circuit_breaker_state.set(state as i64);
    }
}
