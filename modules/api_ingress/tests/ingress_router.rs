//! Router-level tests for the REST host: health, fallback, docs, request ids,
//! timeouts and the OpenAPI document merged from registered modules.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use api_ingress::request_id::XRequestId;
use api_ingress::ApiIngress;
use async_trait::async_trait;
use axum::{
    body::Body,
    extract::Extension,
    http::{Request, StatusCode},
    response::Json,
    routing::get,
    Router,
};
use modkit::{
    ConfigProvider, Module, ModuleCtx, ModuleCtxBuilder, OpenApiRegistry, RestHostModule,
    RestfulModule,
};
use tokio_util::sync::CancellationToken;
use tower::util::ServiceExt;
use utoipa::OpenApi;

struct TestConfig(HashMap<String, serde_json::Value>);

impl ConfigProvider for TestConfig {
    fn get_module_config(&self, module_name: &str) -> Option<&serde_json::Value> {
        self.0.get(module_name)
    }
}

/// Pong
#[utoipa::path(get, path = "/ping", tag = "ping", responses((status = 200, description = "pong")))]
async fn ping() -> &'static str {
    "pong"
}

async fn echo_request_id(Extension(XRequestId(id)): Extension<XRequestId>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "request_id": id }))
}

async fn slow() -> &'static str {
    tokio::time::sleep(Duration::from_secs(5)).await;
    "late"
}

#[derive(OpenApi)]
#[openapi(paths(ping))]
struct PingApi;

struct PingModule;

#[async_trait]
impl Module for PingModule {
    fn name(&self) -> &'static str {
        "ping"
    }

    async fn init(&self, _ctx: &ModuleCtx) -> Result<()> {
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

impl RestfulModule for PingModule {
    fn register_rest(
        &self,
        _ctx: &ModuleCtx,
        router: Router,
        openapi: &dyn OpenApiRegistry,
    ) -> Result<Router> {
        openapi.register_openapi(PingApi::openapi());
        Ok(router
            .route("/ping", get(ping))
            .route("/request-id", get(echo_request_id))
            .route("/slow", get(slow)))
    }
}

async fn build_app(ingress_cfg: serde_json::Value) -> Router {
    let provider = TestConfig(HashMap::from([(
        api_ingress::MODULE_NAME.to_string(),
        ingress_cfg,
    )]));
    let ctx = ModuleCtxBuilder::new(CancellationToken::new())
        .with_config_provider(Arc::new(provider))
        .build();

    let ingress = ApiIngress::default();
    let host_ctx = ctx.for_module(ingress.name());
    ingress.init(&host_ctx).await.unwrap();

    let router = ingress.rest_prepare(&host_ctx, Router::new()).unwrap();
    let router = PingModule
        .register_rest(&ctx.for_module("ping"), router, ingress.as_registry())
        .unwrap();
    ingress.rest_finalize(&host_ctx, router).unwrap()
}

async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn get_req(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn health_reports_healthy_with_request_id() {
    let app = build_app(serde_json::json!({})).await;

    let resp = app.oneshot(get_req("/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));

    let json = body_json(resp).await;
    assert_eq!(json["status"], "healthy");
    assert!(json["timestamp"].is_string());
}

#[tokio::test]
async fn module_routes_are_served() {
    let app = build_app(serde_json::json!({})).await;

    let resp = app.oneshot(get_req("/ping")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"pong");
}

#[tokio::test]
async fn unknown_route_is_a_problem_404() {
    let app = build_app(serde_json::json!({})).await;

    let resp = app.oneshot(get_req("/nope")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        resp.headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("application/problem+json")
    );

    let json = body_json(resp).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["instance"], "/nope");
}

#[tokio::test]
async fn docs_are_hidden_unless_enabled() {
    let app = build_app(serde_json::json!({})).await;

    let resp = app.oneshot(get_req("/openapi.json")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn openapi_document_contains_module_paths() {
    let app = build_app(serde_json::json!({"enable_docs": true})).await;

    let resp = app.clone().oneshot(get_req("/openapi.json")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let doc = body_json(resp).await;
    assert_eq!(doc["info"]["title"], "Users Server API");
    assert!(doc["paths"]["/ping"]["get"].is_object());

    let resp = app.oneshot(get_req("/docs")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn generated_request_id_reaches_handler_and_response() {
    let app = build_app(serde_json::json!({})).await;

    let resp = app.oneshot(get_req("/request-id")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let header_id = resp
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .expect("x-request-id should be generated");
    assert!(!header_id.is_empty());

    let json = body_json(resp).await;
    assert_eq!(json["request_id"], header_id);
}

#[tokio::test]
async fn incoming_request_id_is_kept_on_success_and_problem() {
    let app = build_app(serde_json::json!({})).await;

    for (uri, status) in [
        ("/request-id", StatusCode::OK),
        ("/missing", StatusCode::NOT_FOUND),
    ] {
        let req = Request::builder()
            .uri(uri)
            .header("x-request-id", "caller-42")
            .body(Body::empty())
            .unwrap();
        let resp = app.clone().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), status, "{uri}");
        assert_eq!(
            resp.headers()
                .get("x-request-id")
                .and_then(|v| v.to_str().ok()),
            Some("caller-42"),
            "{uri}"
        );
    }
}

#[tokio::test]
async fn slow_requests_time_out() {
    let app = build_app(serde_json::json!({"request_timeout_secs": 1})).await;

    let resp = app.oneshot(get_req("/slow")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::REQUEST_TIMEOUT);
    assert!(resp.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn unknown_ingress_config_key_fails_init() {
    let provider = TestConfig(HashMap::from([(
        api_ingress::MODULE_NAME.to_string(),
        serde_json::json!({"enable_doc": true}),
    )]));
    let ctx = ModuleCtxBuilder::new(CancellationToken::new())
        .with_config_provider(Arc::new(provider))
        .build();

    let ingress = ApiIngress::default();
    let err = ingress
        .init(&ctx.for_module(ingress.name()))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("invalid api_ingress config"));
}
