use async_trait::async_trait;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use axum::http::{header, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::{middleware::from_fn, routing::get, Router};
use modkit::api::OpenApiRegistry;
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};
use utoipa::openapi::{Info, OpenApi, Paths};

mod config;
pub mod request_id;
mod web;

pub use config::ApiIngressConfig;

pub const MODULE_NAME: &str = "api_ingress";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8087";

/// API Ingress module: owns the HTTP server (rest host) and merges the
/// OpenAPI fragments published by REST modules into one document.
pub struct ApiIngress {
    config: ArcSwap<ApiIngressConfig>,
    // Used when the module config carries no `bind_addr`.
    fallback_bind_addr: String,
    openapi: Mutex<OpenApi>,
    final_router: Mutex<Option<Router>>,
}

impl Default for ApiIngress {
    fn default() -> Self {
        Self::new(DEFAULT_BIND_ADDR)
    }
}

impl ApiIngress {
    pub fn new(fallback_bind_addr: impl Into<String>) -> Self {
        Self {
            config: ArcSwap::from_pointee(ApiIngressConfig::default()),
            fallback_bind_addr: fallback_bind_addr.into(),
            openapi: Mutex::new(OpenApi::new(
                Info::new("Users Server API", env!("CARGO_PKG_VERSION")),
                Paths::new(),
            )),
            final_router: Mutex::new(None),
        }
    }

    /// Get the current configuration (cheap clone from ArcSwap)
    pub fn get_config(&self) -> ApiIngressConfig {
        (**self.config.load()).clone()
    }

    pub fn bind_addr(&self) -> String {
        self.config
            .load()
            .bind_addr
            .clone()
            .unwrap_or_else(|| self.fallback_bind_addr.clone())
    }

    /// Snapshot of the merged OpenAPI document.
    pub fn openapi(&self) -> OpenApi {
        self.openapi.lock().clone()
    }

    /// Wrap `router` with the global middleware stack.
    ///
    /// Order, outermost first:
    /// SetRequestId -> PropagateRequestId -> Trace -> push_req_id_to_extensions
    /// -> Timeout -> CORS -> BodyLimit
    pub fn apply_middleware(&self, router: Router) -> Router {
        let config = self.get_config();
        let x_request_id = request_id::header();

        let mut router = router.layer(RequestBodyLimitLayer::new(config.body_limit_bytes));

        if config.cors_enabled {
            router = router.layer(CorsLayer::permissive());
        }

        router
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_secs(config.request_timeout_secs),
            ))
            .layer(from_fn(request_id::push_req_id_to_extensions))
            .layer(request_id::create_trace_layer())
            .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
            .layer(SetRequestIdLayer::new(x_request_id, request_id::MakeReqId))
    }

    /// Background HTTP server: bind, serve until cancelled.
    async fn serve_router(&self, cancel: CancellationToken) -> anyhow::Result<()> {
        let bind_addr = self.bind_addr();
        let addr: SocketAddr = bind_addr
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid bind address '{bind_addr}': {e}"))?;

        // Take the finalized router so the MutexGuard is dropped before awaits
        let stored = { self.final_router.lock().take() };
        let router = match stored {
            Some(r) => r,
            None => {
                tracing::debug!("No router from REST phase, serving health check only");
                self.apply_middleware(with_fallback(
                    Router::new().route("/health", get(web::health_check)),
                ))
            }
        };

        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("HTTP server bound on {}", addr);

        let shutdown = async move {
            cancel.cancelled().await;
            tracing::info!("HTTP server shutting down gracefully (cancellation)");
        };

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| anyhow::anyhow!(e))
    }
}

fn with_fallback(router: Router) -> Router {
    router.fallback(|uri: Uri| async move {
        let mut resp = modkit::not_found(format!("No route for {}", uri.path()));
        resp.0.instance = uri.path().to_string();
        resp
    })
}

#[async_trait]
impl modkit::Module for ApiIngress {
    fn name(&self) -> &'static str {
        MODULE_NAME
    }

    async fn init(&self, ctx: &modkit::ModuleCtx) -> anyhow::Result<()> {
        let cfg = ctx.module_config_or_default::<ApiIngressConfig>()?;
        tracing::debug!(
            module = MODULE_NAME,
            enable_docs = cfg.enable_docs,
            cors_enabled = cfg.cors_enabled,
            "Module initialized with context"
        );
        self.config.store(Arc::new(cfg));
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

// REST host role: prepare/finalize the router, but do not start the server here.
#[async_trait]
impl modkit::contracts::RestHostModule for ApiIngress {
    fn rest_prepare(
        &self,
        _ctx: &modkit::ModuleCtx,
        router: Router,
    ) -> anyhow::Result<Router> {
        let router = router.route("/health", get(web::health_check));
        tracing::debug!("REST host prepared base router with health check");
        Ok(router)
    }

    fn rest_finalize(
        &self,
        _ctx: &modkit::ModuleCtx,
        mut router: Router,
    ) -> anyhow::Result<Router> {
        let config = self.get_config();

        if config.enable_docs {
            // Build once, serve as static JSON (no per-request serialization)
            let doc = self.openapi();
            tracing::info!(paths = doc.paths.paths.len(), "emitting OpenAPI document");
            let openapi_value = Arc::new(serde_json::to_value(&doc)?);

            router = router
                .route(
                    "/openapi.json",
                    get(move || {
                        let v = openapi_value.clone();
                        async move {
                            let json = axum::Json((*v).clone());
                            ([(header::CACHE_CONTROL, "no-store")], json).into_response()
                        }
                    }),
                )
                .route("/docs", get(web::serve_docs));
        }

        let router = self.apply_middleware(with_fallback(router));

        // Keep the finalized router to be used by `serve()`
        *self.final_router.lock() = Some(router.clone());

        tracing::debug!("REST host finalized router");
        Ok(router)
    }

    fn as_registry(&self) -> &dyn OpenApiRegistry {
        self
    }

    async fn serve(&self, cancel: CancellationToken) -> anyhow::Result<()> {
        self.serve_router(cancel).await
    }
}

impl OpenApiRegistry for ApiIngress {
    fn register_openapi(&self, doc: OpenApi) {
        let mut merged = self.openapi.lock();
        for path in doc.paths.paths.keys() {
            if merged.paths.paths.contains_key(path) {
                tracing::warn!(%path, "OpenAPI path registered twice; operations are merged");
            }
        }
        merged.merge(doc);
        tracing::debug!(total_paths = merged.paths.paths.len(), "Registered OpenAPI fragment");
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_falls_back_to_server_address() {
        let ingress = ApiIngress::new("0.0.0.0:9999");
        assert_eq!(ingress.bind_addr(), "0.0.0.0:9999");

        ingress.config.store(Arc::new(ApiIngressConfig {
            bind_addr: Some("127.0.0.1:1234".into()),
            ..Default::default()
        }));
        assert_eq!(ingress.bind_addr(), "127.0.0.1:1234");
    }

    #[test]
    fn fragments_are_merged_into_one_document() {
        let ingress = ApiIngress::default();
        let mut a = OpenApi::new(Info::new("a", "1"), Paths::new());
        a.paths
            .paths
            .insert("/a".into(), utoipa::openapi::PathItem::default());
        let mut b = OpenApi::new(Info::new("b", "1"), Paths::new());
        b.paths
            .paths
            .insert("/b".into(), utoipa::openapi::PathItem::default());

        ingress.register_openapi(a);
        ingress.register_openapi(b);

        let doc = ingress.openapi();
        assert_eq!(doc.info.title, "Users Server API");
        assert!(doc.paths.paths.contains_key("/a"));
        assert!(doc.paths.paths.contains_key("/b"));
    }
}
