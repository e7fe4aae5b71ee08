use async_trait::async_trait;
use axum::Router;
use tokio_util::sync::CancellationToken;

pub use crate::api::OpenApiRegistry;

/// Core module: DI/wiring. Runs before any routes are registered.
#[async_trait]
pub trait Module: Send + Sync + 'static {
    /// Stable name; also the key of the module's configuration section.
    fn name(&self) -> &'static str;

    async fn init(&self, ctx: &crate::context::ModuleCtx) -> anyhow::Result<()>;

    fn as_any(&self) -> &dyn std::any::Any;
}

/// Pure wiring; must be sync. Runs AFTER init.
pub trait RestfulModule: Module {
    fn register_rest(
        &self,
        ctx: &crate::context::ModuleCtx,
        router: Router,
        openapi: &dyn OpenApiRegistry,
    ) -> anyhow::Result<Router>;
}

/// REST host module: owns the HTTP server.
#[async_trait]
pub trait RestHostModule: Module {
    /// Prepare a base Router (e.g. /health). Do NOT start the server here.
    fn rest_prepare(
        &self,
        ctx: &crate::context::ModuleCtx,
        router: Router,
    ) -> anyhow::Result<Router>;

    /// Finalize after all modules registered: attach docs, global middlewares,
    /// and keep the Router for `serve`.
    fn rest_finalize(
        &self,
        ctx: &crate::context::ModuleCtx,
        router: Router,
    ) -> anyhow::Result<Router>;

    /// Registry REST modules publish their OpenAPI fragments into.
    fn as_registry(&self) -> &dyn OpenApiRegistry;

    /// Serve the finalized router until `cancel` fires.
    async fn serve(&self, cancel: CancellationToken) -> anyhow::Result<()>;
}
