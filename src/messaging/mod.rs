mod noop;
mod redpanda;

pub use noop::NoopNotifier;
pub use redpanda::RedpandaNotifier;
