use actix_web::{web, HttpResponse};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Instant;

use super::error::ApiError;
use super::AppState;
use crate::domain::order::{NewOrder, UpdateOrder};

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct StatusPatch {
    #[serde(default)]
    pub status: String,
}

fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "Rejecting malformed request body");
        ApiError::BadRequest("Error parsing request body".to_string())
    })
}

/// Record the outcome of one request and hand the result back.
fn observe(
    state: &AppState,
    operation: &str,
    started: Instant,
    result: Result<HttpResponse, ApiError>,
) -> Result<HttpResponse, ApiError> {
    let outcome = match &result {
        Ok(response) if response.status().as_u16() == 404 => "not_found",
        Ok(_) => "success",
        Err(e) => e.outcome(),
    };
    state
        .metrics
        .record_request(operation, outcome, started.elapsed().as_secs_f64());
    result
}

pub async fn healthcheck() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "order-service"
    }))
}

pub async fn list_orders(
    state: web::Data<AppState>,
    params: web::Query<ListParams>,
) -> Result<HttpResponse, ApiError> {
    let started = Instant::now();
    let result = async {
        let orders = state.use_case.list(&params.client_id, &params.status).await?;
        tracing::debug!(
            client_id = %params.client_id,
            status = %params.status,
            count = orders.len(),
            "Listed orders"
        );
        Ok::<_, ApiError>(HttpResponse::Ok().json(orders))
    }
    .await;
    observe(&state, "list", started, result)
}

pub async fn get_order(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let started = Instant::now();
    let order_id = path.into_inner();
    let result = async {
        Ok::<_, ApiError>(match state.use_case.get_by_id(&order_id).await? {
            Some(order) => HttpResponse::Ok().json(order),
            None => HttpResponse::NotFound().finish(),
        })
    }
    .await;
    observe(&state, "get", started, result)
}

pub async fn create_order(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let started = Instant::now();
    let result = async {
        let new_order: NewOrder = parse_body(&body)?;
        let order = state.use_case.create(new_order).await?;
        // Only complete creates count; notification failures show up in notifications_failed_total
        state.metrics.record_order_created();
        Ok::<_, ApiError>(HttpResponse::Created().json(order))
    }
    .await;
    observe(&state, "create", started, result)
}

pub async fn update_order(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let started = Instant::now();
    let order_id = path.into_inner();
    let result = async {
        let update: UpdateOrder = parse_body(&body)?;
        Ok::<_, ApiError>(match state.use_case.update(&order_id, update).await? {
            Some(order) => HttpResponse::Ok().json(order),
            None => HttpResponse::NotFound().finish(),
        })
    }
    .await;
    observe(&state, "update", started, result)
}

pub async fn patch_order_status(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let started = Instant::now();
    let order_id = path.into_inner();
    let result = async {
        let patch: StatusPatch = parse_body(&body)?;
        Ok::<_, ApiError>(match state.use_case.update_order_status(&order_id, &patch.status).await? {
            Some(order) => HttpResponse::Ok().json(order),
            None => HttpResponse::NotFound().finish(),
        })
    }
    .await;
    observe(&state, "update_status", started, result)
}

pub async fn delete_order(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let started = Instant::now();
    let order_id = path.into_inner();
    let result = async {
        state.use_case.delete(&order_id).await?;
        Ok::<_, ApiError>(HttpResponse::NoContent().finish())
    }
    .await;
    observe(&state, "delete", started, result)
}
