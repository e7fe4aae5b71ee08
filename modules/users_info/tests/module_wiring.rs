//! The module wired behind the real REST host, configured through ModuleCtx.

mod common;

use std::collections::HashMap;
use std::sync::Arc;

use api_ingress::ApiIngress;
use axum::http::StatusCode;
use axum::Router;
use modkit::{ConfigProvider, Module, ModuleCtxBuilder, RestHostModule, RestfulModule};
use serde_json::json;
use tokio_util::sync::CancellationToken;

use common::{send, user_json, years_ago};
use users_info::UsersInfo;

struct TestConfig(HashMap<String, serde_json::Value>);

impl ConfigProvider for TestConfig {
    fn get_module_config(&self, module_name: &str) -> Option<&serde_json::Value> {
        self.0.get(module_name)
    }
}

async fn wire(minimum_age_years: u32) -> (Arc<UsersInfo>, Router) {
    let provider = TestConfig(HashMap::from([
        (
            "users_info".to_string(),
            json!({ "minimum_age_years": minimum_age_years }),
        ),
        ("api_ingress".to_string(), json!({ "enable_docs": true })),
    ]));
    let ctx = ModuleCtxBuilder::new(CancellationToken::new())
        .with_config_provider(Arc::new(provider))
        .build();

    let host = ApiIngress::default();
    let users = Arc::new(UsersInfo::default());
    let host_ctx = ctx.for_module(host.name());
    let users_ctx = ctx.for_module(users.name());

    host.init(&host_ctx).await.unwrap();
    users.init(&users_ctx).await.unwrap();

    let router = host.rest_prepare(&host_ctx, Router::new()).unwrap();
    let router = users
        .register_rest(&users_ctx, router, host.as_registry())
        .unwrap();
    let router = host.rest_finalize(&host_ctx, router).unwrap();
    (users, router)
}

#[tokio::test]
async fn configured_minimum_age_is_enforced() {
    let (_, app) = wire(21).await;

    let (status, body) = send(
        &app,
        "POST",
        "/users",
        Some(user_json("twenty@example.com", years_ago(20))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["detail"],
        "Users must be older than 21 years old to register."
    );

    let (status, _) = send(
        &app,
        "POST",
        "/users",
        Some(user_json("adult@example.com", years_ago(21))),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn openapi_document_lists_user_routes() {
    let (_, app) = wire(18).await;

    let (status, doc) = send(&app, "GET", "/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/users"]["post"].is_object());
    assert!(doc["paths"]["/users"]["get"].is_object());
    for method in ["get", "put", "patch", "delete"] {
        assert!(
            doc["paths"]["/users/{email}"][method].is_object(),
            "missing {method} /users/{{email}}"
        );
    }
    assert!(doc["components"]["schemas"]["UserDto"].is_object());
}

#[tokio::test]
async fn client_and_rest_share_one_store() {
    let (users, app) = wire(18).await;

    let (status, _) = send(
        &app,
        "POST",
        "/users",
        Some(user_json("shared@example.com", years_ago(30))),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let client = users.client().expect("client after init");
    let user = client.get_user("shared@example.com").await.unwrap();
    assert_eq!(user.first_name, "Jane");
}

#[tokio::test]
async fn register_rest_requires_init() {
    let host = ApiIngress::default();
    let ctx = ModuleCtxBuilder::new(CancellationToken::new()).build();
    let users = UsersInfo::default();

    assert!(users.client().is_none());
    let res = users.register_rest(&ctx, Router::new(), host.as_registry());
    assert!(res.is_err());
}

#[tokio::test]
async fn unknown_config_key_fails_init() {
    let provider = TestConfig(HashMap::from([(
        "users_info".to_string(),
        json!({ "minimum_age_years": 30, "minimum_age": 21 }),
    )]));
    let ctx = ModuleCtxBuilder::new(CancellationToken::new())
        .with_config_provider(Arc::new(provider))
        .build();
    let users = UsersInfo::default();

    let err = users
        .init(&ctx.for_module(users.name()))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("invalid users_info config"));
    assert!(users.client().is_none());
}

#[tokio::test]
async fn missing_section_uses_default_minimum_age() {
    let ctx = ModuleCtxBuilder::new(CancellationToken::new())
        .with_config_provider(Arc::new(TestConfig(HashMap::new())))
        .build();
    let users = UsersInfo::default();
    users.init(&ctx.for_module(users.name())).await.unwrap();

    let host = ApiIngress::default();
    let app = users
        .register_rest(&ctx.for_module(users.name()), Router::new(), host.as_registry())
        .unwrap();
    let (status, body) = send(
        &app,
        "POST",
        "/users",
        Some(user_json("seventeen@example.com", years_ago(17))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["detail"],
        "Users must be older than 18 years old to register."
    );
}
