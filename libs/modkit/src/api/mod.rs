//! HTTP API building blocks shared by REST modules.

pub mod problem;

pub use problem::{Problem, ProblemResponse, ValidationError, APPLICATION_PROBLEM_JSON};

/// Sink for the OpenAPI fragments that REST modules publish while registering routes.
///
/// The REST host collects the fragments and serves one merged document.
pub trait OpenApiRegistry: Send + Sync {
    fn register_openapi(&self, doc: utoipa::openapi::OpenApi);

    fn as_any(&self) -> &dyn std::any::Any;
}
