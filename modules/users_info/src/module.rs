use std::sync::Arc;

use arc_swap::ArcSwapOption;
use async_trait::async_trait;
use modkit::api::OpenApiRegistry;
use modkit::{Module, ModuleCtx, RestfulModule};
use tracing::{debug, info};

use crate::api::rest::routes;
use crate::config::UsersInfoConfig;
use crate::contract::client::UsersInfoApi;
use crate::domain::service::{Service, ServiceConfig};
use crate::gateways::local::UsersInfoLocalClient;
use crate::infra::storage::InMemoryUsersRepository;

pub const MODULE_NAME: &str = "users_info";

/// Users module: in-memory record store, domain service and REST routes.
#[derive(Default)]
pub struct UsersInfo {
    // Keep the domain service behind ArcSwap for cheap read-mostly access.
    service: ArcSwapOption<Service>,
}

impl UsersInfo {
    /// In-process client; `None` until the module is initialized.
    pub fn client(&self) -> Option<Arc<dyn UsersInfoApi>> {
        self.service
            .load_full()
            .map(|svc| Arc::new(UsersInfoLocalClient::new(svc)) as Arc<dyn UsersInfoApi>)
    }
}

#[async_trait]
impl Module for UsersInfo {
    fn name(&self) -> &'static str {
        MODULE_NAME
    }

    async fn init(&self, ctx: &ModuleCtx) -> anyhow::Result<()> {
        info!("Initializing users_info module");

        let cfg: UsersInfoConfig = ctx.module_config_or_default()?;
        debug!(
            "Loaded users_info config: minimum_age_years={}",
            cfg.minimum_age_years
        );

        // Wire repository (infra) to domain service (port)
        let repo = InMemoryUsersRepository::new();
        let service_config = ServiceConfig {
            minimum_age_years: cfg.minimum_age_years,
        };
        let service = Service::new(Arc::new(repo), service_config);

        self.service.store(Some(Arc::new(service)));
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

impl RestfulModule for UsersInfo {
    fn register_rest(
        &self,
        _ctx: &ModuleCtx,
        router: axum::Router,
        openapi: &dyn OpenApiRegistry,
    ) -> anyhow::Result<axum::Router> {
        info!("Registering users_info REST routes");

        let service = self
            .service
            .load_full()
            .ok_or_else(|| anyhow::anyhow!("Service not initialized"))?;

        let router = routes::register_routes(router, openapi, service)?;
        info!("Users REST routes registered successfully");
        Ok(router)
    }
}
