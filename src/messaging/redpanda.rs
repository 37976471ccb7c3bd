use async_trait::async_trait;
use rdkafka::{
    producer::{FutureProducer, FutureRecord},
    config::ClientConfig,
};
use std::sync::Arc;
use std::time::Duration;

use crate::domain::order::Order;
use crate::gateways::{GatewayError, NotificationGateway};
use crate::metrics::Metrics;
use crate::utils::{CircuitBreaker, CircuitBreakerConfig, CircuitBreakerError};

/// Publishes created orders to a Redpanda (Kafka protocol) topic.
pub struct RedpandaNotifier {
    producer: FutureProducer,
    topic: String,
    circuit_breaker: CircuitBreaker,
    metrics: Option<Arc<Metrics>>,
}

impl RedpandaNotifier {
    pub fn new(brokers: &str, topic: &str) -> anyhow::Result<Self> {
        // Open after 5 failures, probe again after 30s, close after 3 successes
        let cb_config = CircuitBreakerConfig {
            timeout: Duration::from_secs(30),
            success_threshold: 3,
            ..CircuitBreakerConfig::default()
        };

        Self::with_config(brokers, topic, Duration::from_secs(5), cb_config)
    }

    pub(crate) fn with_config(
        brokers: &str,
        topic: &str,
        message_timeout: Duration,
        cb_config: CircuitBreakerConfig,
    ) -> anyhow::Result<Self> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("message.timeout.ms", message_timeout.as_millis().to_string())
            .create()?;

        tracing::info!(brokers = %brokers, topic = %topic, "Redpanda producer created");

        Ok(Self {
            producer,
            topic: topic.to_string(),
            circuit_breaker: CircuitBreaker::new("redpanda", cb_config),
            metrics: None,
        })
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub async fn publish(&self, key: &str, payload: &str) -> Result<(), GatewayError> {
        let result = self.circuit_breaker.call(async {
            let record = FutureRecord::to(&self.topic)
                .key(key)
                .payload(payload);

            self.producer
                .send(record, rdkafka::util::Timeout::After(Duration::from_secs(5)))
                .await
                .map_err(|(e, _)| GatewayError::Notification(format!("Kafka send error: {}", e)))?;

            Ok::<(), GatewayError>(())
        }).await;

        self.report_circuit_state().await;

        match result {
            Ok(_) => {
                tracing::info!(topic = %self.topic, key = %key, "Published to Redpanda");
                Ok(())
            }
            Err(CircuitBreakerError::CircuitOpen) => {
                tracing::error!(topic = %self.topic, "Circuit breaker open - Redpanda unavailable");
                Err(GatewayError::Notification("Circuit breaker open for Redpanda".to_string()))
            }
            Err(CircuitBreakerError::OperationFailed(e)) => {
                let failures = self.circuit_breaker.get_failure_count().await;
                tracing::error!(
                    error = %e,
                    topic = %self.topic,
                    failures,
                    "Failed to publish to Redpanda"
                );
                Err(e)
            }
        }
    }

    async fn report_circuit_state(&self) {
        if let Some(metrics) = &self.metrics {
            let state = self.circuit_breaker.get_state().await;
            metrics.update_circuit_breaker_state(state.as_gauge());
        }
    }
}

#[async_trait]
impl NotificationGateway for RedpandaNotifier {
    async fn send_message(&self, order: &Order) -> Result<Order, GatewayError> {
        let payload = serde_json::to_string(order)?;
        tracing::debug!(order_id = %order.order_id, "Sending order created message");

        match self.publish(&order.order_id, &payload).await {
            Ok(()) => {
                if let Some(metrics) = &self.metrics {
                    metrics.record_notification(true);
                }
                Ok(order.clone())
            }
            Err(e) => {
                if let Some(metrics) = &self.metrics {
                    metrics.record_notification(false);
                }
                Err(e)
            }
        }
    }
}
