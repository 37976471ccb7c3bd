use clap::{Parser, ValueEnum};

/// Where orders are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackend {
    Memory,
    Scylla,
}

/// Where order-created notifications go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NotifierBackend {
    Noop,
    Redpanda,
}

/// Service settings. Every flag falls back to an environment variable.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Order management service", long_about = None)]
pub struct Settings {
    /// Address the order API binds to
    #[arg(long, env = "HTTP_HOST", default_value = "0.0.0.0")]
    pub http_host: String,

    /// Port of the order API
    #[arg(long, env = "HTTP_PORT", default_value_t = 8000)]
    pub http_port: u16,

    /// Port of the Prometheus metrics server
    #[arg(long, env = "METRICS_PORT", default_value_t = 9090)]
    pub metrics_port: u16,

    /// Storage backend
    #[arg(long, env = "STORAGE_BACKEND", value_enum, default_value_t = StorageBackend::Memory)]
    pub storage: StorageBackend,

    /// ScyllaDB contact points
    #[arg(long, env = "SCYLLA_NODES", value_delimiter = ',', default_value = "127.0.0.1:9042")]
    pub scylla_nodes: Vec<String>,

    #[arg(long, env = "SCYLLA_KEYSPACE", default_value = "orders_ks")]
    pub scylla_keyspace: String,

    #[arg(long, env = "ORDERS_TABLE", default_value = "orders")]
    pub orders_table: String,

    /// Notification backend for created orders
    #[arg(long, env = "NOTIFICATION_BACKEND", value_enum, default_value_t = NotifierBackend::Noop)]
    pub notifier: NotifierBackend,

    /// Redpanda bootstrap servers
    #[arg(long, env = "QUEUE_BROKERS", default_value = "127.0.0.1:9092")]
    pub brokers: String,

    /// Topic receiving order-created messages
    #[arg(long, env = "QUEUE_TOPIC", default_value = "orders-created")]
    pub topic: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::try_parse_from(["order_service"]).unwrap();

        assert_eq!(settings.http_port, 8000);
        assert_eq!(settings.metrics_port, 9090);
        assert_eq!(settings.storage, StorageBackend::Memory);
        assert_eq!(settings.notifier, NotifierBackend::Noop);
        assert_eq!(settings.scylla_nodes, vec!["127.0.0.1:9042".to_string()]);
        assert_eq!(settings.topic, "orders-created");
    }

    #[test]
    fn test_flags_override_defaults() {
        let settings = Settings::try_parse_from([
            "order_service",
            "--storage",
            "scylla",
            "--notifier",
            "redpanda",
            "--scylla-nodes",
            "10.0.0.1:9042,10.0.0.2:9042",
            "--http-port",
            "8080",
        ])
        .unwrap();

        assert_eq!(settings.storage, StorageBackend::Scylla);
        assert_eq!(settings.notifier, NotifierBackend::Redpanda);
        assert_eq!(settings.scylla_nodes.len(), 2);
        assert_eq!(settings.http_port, 8080);
    }

    #[test]
    fn test_rejects_unknown_backend() {
        assert!(Settings::try_parse_from(["order_service", "--storage", "dynamo"]).is_err());
    }
}
