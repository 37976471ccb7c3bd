// ============================================================================
// Order HTTP API
// ============================================================================
//
// GET    /orders/healthcheck
// GET    /orders?client_id=&status=
// POST   /orders
// GET    /orders/{id}
// PUT    /orders/{id}      full update
// PATCH  /orders/{id}      status only
// DELETE /orders/{id}
//
// ============================================================================

mod error;
mod handlers;

use actix_web::{web, App, HttpServer};
use std::sync::Arc;

use crate::domain::order::OrderUseCase;
use crate::metrics::Metrics;

pub use error::ApiError;

pub struct AppState {
    pub use_case: OrderUseCase,
    pub metrics: Arc<Metrics>,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/orders")
            // Registered before /{id} so it is not captured as an id
            .route("/healthcheck", web::get().to(handlers::healthcheck))
            .route("", web::get().to(handlers::list_orders))
            .route("", web::post().to(handlers::create_order))
            .route("/", web::get().to(handlers::list_orders))
            .route("/", web::post().to(handlers::create_order))
            .route("/{id}", web::get().to(handlers::get_order))
            .route("/{id}", web::put().to(handlers::update_order))
            .route("/{id}", web::patch().to(handlers::patch_order_status))
            .route("/{id}", web::delete().to(handlers::delete_order)),
    );
}

pub async fn start_api_server(state: AppState, host: String, port: u16) -> std::io::Result<()> {
    tracing::info!("🚀 Order API listening on http://{}:{}/orders", host, port);

    let state = web::Data::new(state);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}

// ============================================================================
// Controller Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::{Order, OrderStatus};
    use crate::gateways::{GatewayError, MemoryOrderGateway, NotificationGateway, OrderGateway};
    use crate::messaging::NoopNotifier;
    use actix_web::http::StatusCode;
    use actix_web::{body::to_bytes, dev::ServiceResponse, test};
    use async_trait::async_trait;

    struct DownGateway;

    #[async_trait]
    impl OrderGateway for DownGateway {
        async fn save(&self, _: &Order) -> Result<Order, GatewayError> {
            Err(GatewayError::Backend("down".into()))
        }
        async fn update(&self, _: &str, _: &Order) -> Result<Order, GatewayError> {
            Err(GatewayError::Backend("down".into()))
        }
        async fn delete(&self, _: &str) -> Result<(), GatewayError> {
            Err(GatewayError::Backend("down".into()))
        }
        async fn get_by_id(&self, _: &str) -> Result<Option<Order>, GatewayError> {
            Err(GatewayError::Backend("down".into()))
        }
        async fn get_all(&self) -> Result<Vec<Order>, GatewayError> {
            Err(GatewayError::Backend("down".into()))
        }
        async fn get_all_by_client_id(&self, _: &str) -> Result<Vec<Order>, GatewayError> {
            Err(GatewayError::Backend("down".into()))
        }
    }

    struct DownNotifier;

    #[async_trait]
    impl NotificationGateway for DownNotifier {
        async fn send_message(&self, _: &Order) -> Result<Order, GatewayError> {
            Err(GatewayError::Notification("queue down".into()))
        }
    }

    fn state_with(gateway: Arc<dyn OrderGateway>) -> web::Data<AppState> {
        web::Data::new(AppState {
            use_case: OrderUseCase::new(gateway, Arc::new(NoopNotifier)),
            metrics: Arc::new(Metrics::new().unwrap()),
        })
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(App::new().app_data($state.clone()).configure(configure)).await
        };
    }

    async fn json_body(resp: ServiceResponse) -> serde_json::Value {
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_web::test]
    async fn test_healthcheck() {
        let state = state_with(Arc::new(MemoryOrderGateway::new()));
        let app = app!(state);

        let req = test::TestRequest::get().uri("/orders/healthcheck").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_create_then_get() {
        let state = state_with(Arc::new(MemoryOrderGateway::new()));
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/orders")
            .set_payload(r#"{"order_id":"client-made","client_id":"123","ordered_items":[{"item_id":"1","quantity":2}]}"#)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let created = json_body(resp).await;
        let order_id = created["order_id"].as_str().unwrap().to_string();
        assert_ne!(order_id, "client-made");
        assert_eq!(created["status"], "CREATED");
        assert_eq!(created["updated_at"], "");

        let req = test::TestRequest::get().uri(&format!("/orders/{}", order_id)).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(json_body(resp).await["client_id"], "123");

        assert_eq!(state.metrics.orders_created.get(), 1);
    }

    #[actix_web::test]
    async fn test_create_rejects_malformed_body() {
        let state = state_with(Arc::new(MemoryOrderGateway::new()));
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/orders")
            .set_payload(r#"{"invalid json"#)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(resp).await["error"], "Error parsing request body");
    }

    #[actix_web::test]
    async fn test_create_with_invalid_status_is_unprocessable() {
        let state = state_with(Arc::new(MemoryOrderGateway::new()));
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/orders")
            .set_payload(r#"{"client_id":"1","status":"PAID"}"#)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[actix_web::test]
    async fn test_list_filters_and_returns_empty_array() {
        let gateway = Arc::new(MemoryOrderGateway::new());
        let state = state_with(gateway.clone());
        let app = app!(state);

        let req = test::TestRequest::get().uri("/orders").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(json_body(resp).await, serde_json::json!([]));

        let mut ready = Order::new("7".into(), OrderStatus::Ready, vec![], String::new(), "t1".into());
        gateway.save(&ready).await.unwrap();
        ready = Order::new("7".into(), OrderStatus::Created, vec![], String::new(), "t2".into());
        gateway.save(&ready).await.unwrap();

        let req = test::TestRequest::get()
            .uri("/orders?client_id=7&status=READY")
            .to_request();
        let body = json_body(test::call_service(&app, req).await).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["status"], "READY");
    }

    #[actix_web::test]
    async fn test_get_unknown_is_not_found() {
        let state = state_with(Arc::new(MemoryOrderGateway::new()));
        let app = app!(state);

        let req = test::TestRequest::get().uri("/orders/9999").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_put_and_patch() {
        let gateway = Arc::new(MemoryOrderGateway::new());
        let state = state_with(gateway.clone());
        let app = app!(state);

        let order = Order::new("1".into(), OrderStatus::Created, vec![], String::new(), "t".into());
        gateway.save(&order).await.unwrap();
        let uri = format!("/orders/{}", order.order_id);

        let req = test::TestRequest::put()
            .uri(&uri)
            .set_payload(r#"{"status":"COOKING","notes":"well done","ordered_items":[{"item_id":"3","quantity":1}]}"#)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body["status"], "COOKING");
        assert_eq!(body["notes"], "well done");

        let req = test::TestRequest::patch()
            .uri(&uri)
            .set_payload(r#"{"status":"INVALID"}"#)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json_body(resp).await["error"], "Status INVALID is not valid");

        let req = test::TestRequest::patch()
            .uri(&uri)
            .set_payload(r#"{"status":"DONE"}"#)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let stored = gateway.get_by_id(&order.order_id).await.unwrap().unwrap();
        assert_eq!(stored.status, OrderStatus::Done);
        assert_eq!(stored.notes, "well done");
    }

    #[actix_web::test]
    async fn test_put_and_patch_unknown_or_malformed() {
        let state = state_with(Arc::new(MemoryOrderGateway::new()));
        let app = app!(state);

        let req = test::TestRequest::put()
            .uri("/orders/1")
            .set_payload(r#"{"status":"READY"}"#)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::patch()
            .uri("/orders/1")
            .set_payload(r#"{"status":"READY"}"#)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::put()
            .uri("/orders/1")
            .set_payload(r#"{"invalid json"#)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::patch()
            .uri("/orders/1")
            .set_payload(r#"{"invalid json"#)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_delete() {
        let gateway = Arc::new(MemoryOrderGateway::new());
        let state = state_with(gateway.clone());
        let app = app!(state);

        let order = Order::new("1".into(), OrderStatus::Created, vec![], String::new(), "t".into());
        gateway.save(&order).await.unwrap();

        let req = test::TestRequest::delete()
            .uri(&format!("/orders/{}", order.order_id))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::delete()
            .uri(&format!("/orders/{}", order.order_id))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_storage_failures_are_internal_errors() {
        let state = state_with(Arc::new(DownGateway));
        let app = app!(state);

        let requests = [
            test::TestRequest::get().uri("/orders").to_request(),
            test::TestRequest::get().uri("/orders/1").to_request(),
            test::TestRequest::post().uri("/orders").set_payload("{}").to_request(),
            test::TestRequest::put()
                .uri("/orders/1")
                .set_payload(r#"{"status":"READY"}"#)
                .to_request(),
            test::TestRequest::patch()
                .uri("/orders/1")
                .set_payload(r#"{"status":"READY"}"#)
                .to_request(),
            test::TestRequest::delete().uri("/orders/1").to_request(),
        ];

        for req in requests {
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }

        let gathered = state.metrics.registry().gather();
        let requests = gathered
            .iter()
            .find(|m| m.name() == "order_requests_total")
            .unwrap();
        assert_eq!(requests.metric.len(), 6); // One label set per operation
    }

    #[actix_web::test]
    async fn test_failed_notification_is_not_counted_as_created() {
        let gateway = Arc::new(MemoryOrderGateway::new());
        let state = web::Data::new(AppState {
            use_case: OrderUseCase::new(gateway.clone(), Arc::new(DownNotifier)),
            metrics: Arc::new(Metrics::new().unwrap()),
        });
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/orders")
            .set_payload(r#"{"client_id":"1"}"#)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(resp).await["error"], "Notification error: queue down");
        assert_eq!(state.metrics.orders_created.get(), 0);
        // The order was persisted before the notification failed
        assert_eq!(gateway.get_all().await.unwrap().len(), 1);
    }
}
