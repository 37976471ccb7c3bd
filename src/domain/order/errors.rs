use crate::gateways::GatewayError;

// ============================================================================
// Order Business Rule Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("Status {0} is not valid")]
    InvalidStatus(String),

    #[error("Order ID {0} not found")]
    NotFound(String),

    #[error(transparent)]
    Storage(#[from] GatewayError),
}

impl OrderError {
    /// Domain errors are caller mistakes; storage errors are internal failures.
    pub fn is_domain_error(&self) -> bool {
        !matches!(self, OrderError::Storage(_))
    }
}
