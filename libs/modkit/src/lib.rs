//! # ModKit - module contracts and runtime
//!
//! Modules implement [`Module`] for wiring, [`RestfulModule`] to contribute
//! routes, and one module acts as the [`RestHostModule`] that owns the HTTP
//! server. [`run`] drives them through init → rest → serve → stop.
//!
//! ```rust,ignore
//! let opts = RunOptions {
//!     modules_cfg: Arc::new(my_config_provider),
//!     host: Arc::new(ApiIngress::new(host_cfg)),
//!     modules: vec![Arc::new(UsersInfo::default())],
//!     shutdown: ShutdownOptions::Signals,
//! };
//! modkit::run(opts).await?;
//! ```

pub use anyhow::Result;
pub use async_trait::async_trait;

pub mod context;
pub use context::{ConfigProvider, ModuleCtx, ModuleCtxBuilder};

pub mod contracts;
pub use contracts::*;

pub mod api;
pub use api::problem::{not_found, Problem, ProblemResponse, ValidationError};

pub mod runtime;
pub use runtime::{run, RunOptions, ShutdownOptions};
