use actix_web::{http::StatusCode, HttpResponse, ResponseError};

use crate::domain::order::OrderError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Order(#[from] OrderError),
}

impl ApiError {
    /// Label used on the order_requests_total metric.
    pub fn outcome(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Order(OrderError::InvalidStatus(_)) => "validation_error",
            ApiError::Order(OrderError::NotFound(_)) => "not_found",
            ApiError::Order(OrderError::Storage(_)) => "error",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Order(OrderError::InvalidStatus(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Order(OrderError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Order(OrderError::Storage(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Order(e) if !e.is_domain_error() => {
                tracing::error!(error = %self, "Order request failed")
            }
            _ => tracing::debug!(error = %self, "Order request rejected"),
        }

        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.to_string()
        }))
    }
}
