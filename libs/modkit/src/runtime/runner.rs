//! ModKit runtime runner.
//!
//! The runner owns one cancellation token and one base `ModuleCtx`, and drives
//! every module through the same phases:
//!   init → rest (sync router composition) → serve → stop.
//!
//! Modules are passed in explicitly; the REST host is the module that owns the
//! listener, and every other module mounts its routes onto the host's router.

use crate::context::{ConfigProvider, ModuleCtxBuilder};
use crate::contracts::{RestHostModule, RestfulModule};
use crate::runtime::shutdown;
use std::{future::Future, pin::Pin, sync::Arc};
use tokio_util::sync::CancellationToken;

/// How the runtime should decide when to stop.
pub enum ShutdownOptions {
    /// Listen for OS signals (Ctrl+C / SIGTERM).
    Signals,
    /// An external `CancellationToken` controls the lifecycle.
    Token(CancellationToken),
    /// An arbitrary future; when it completes, we initiate shutdown.
    Future(Pin<Box<dyn Future<Output = ()> + Send>>),
}

/// Options for running the ModKit runner.
pub struct RunOptions {
    /// Provider of module config sections (raw JSON by module name).
    pub modules_cfg: Arc<dyn ConfigProvider>,
    /// Module that owns the HTTP server.
    pub host: Arc<dyn RestHostModule>,
    /// Modules that expose REST routes through the host, in registration order.
    pub modules: Vec<Arc<dyn RestfulModule>>,
    /// Shutdown strategy.
    pub shutdown: ShutdownOptions,
}

/// Full cycle: init → rest → serve → stop.
pub async fn run(opts: RunOptions) -> anyhow::Result<()> {
    let cancel = match &opts.shutdown {
        ShutdownOptions::Token(t) => t.clone(),
        _ => CancellationToken::new(),
    };

    match opts.shutdown {
        ShutdownOptions::Signals => {
            let c = cancel.clone();
            tokio::spawn(async move {
                match shutdown::wait_for_shutdown().await {
                    Ok(()) => {
                        tracing::info!("shutdown: signal received");
                    }
                    Err(e) => {
                        tracing::warn!(
                            error = %e,
                            "shutdown: primary waiter failed; falling back to ctrl_c()"
                        );
                        let _ = tokio::signal::ctrl_c().await;
                    }
                }
                c.cancel();
            });
        }
        ShutdownOptions::Future(waiter) => {
            let c = cancel.clone();
            tokio::spawn(async move {
                waiter.await;
                tracing::info!("shutdown: external future completed");
                c.cancel();
            });
        }
        ShutdownOptions::Token(_) => {
            tracing::info!("shutdown: external token will control lifecycle");
        }
    }

    let base_ctx = ModuleCtxBuilder::new(cancel.clone())
        .with_config_provider(opts.modules_cfg.clone())
        .build();

    let host = opts.host;
    let host_ctx = base_ctx.for_module(host.name());

    // INIT phase
    tracing::info!("Phase: init");
    host.init(&host_ctx).await?;
    for module in &opts.modules {
        tracing::debug!(module = module.name(), "initializing module");
        module.init(&base_ctx.for_module(module.name())).await?;
    }

    // REST phase
    tracing::info!("Phase: rest (sync)");
    let mut router = host.rest_prepare(&host_ctx, axum::Router::new())?;
    for module in &opts.modules {
        let ctx = base_ctx.for_module(module.name());
        router = module.register_rest(&ctx, router, host.as_registry())?;
        tracing::debug!(module = module.name(), "REST routes registered");
    }
    host.rest_finalize(&host_ctx, router)?;

    // SERVE until cancelled
    tracing::info!("Phase: serve");
    host.serve(cancel.clone()).await?;

    // STOP phase
    tracing::info!("Phase: stop");
    cancel.cancel();
    Ok(())
}
