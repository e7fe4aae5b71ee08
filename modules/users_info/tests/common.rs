#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{Local, Months, NaiveDate};
use serde_json::Value;
use tower::ServiceExt;

use users_info::domain::service::{Service, ServiceConfig};
use users_info::infra::storage::InMemoryUsersRepository;

/// No-op OpenAPI registry for route tests
pub struct NoopOpenApiRegistry;

impl modkit::api::OpenApiRegistry for NoopOpenApiRegistry {
    fn register_openapi(&self, _doc: utoipa::openapi::OpenApi) {}

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn years_ago(years: u32) -> NaiveDate {
    today().checked_sub_months(Months::new(years * 12)).unwrap()
}

pub fn create_test_service() -> Arc<Service> {
    Arc::new(Service::new(
        Arc::new(InMemoryUsersRepository::new()),
        ServiceConfig::default(),
    ))
}

pub fn create_test_router_with(service: Arc<Service>) -> Router {
    users_info::api::rest::routes::register_routes(Router::new(), &NoopOpenApiRegistry, service)
        .expect("Failed to register routes")
}

pub fn create_test_router() -> Router {
    create_test_router_with(create_test_service())
}

pub fn user_json(email: &str, birth_date: NaiveDate) -> Value {
    serde_json::json!({
        "email": email,
        "firstName": "Jane",
        "lastName": "Doe",
        "birthDate": birth_date.to_string(),
        "address": "1 Main St",
        "phoneNumber": "+1-555-0100"
    })
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    send_request(app, request).await
}

pub async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}
