use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use modkit::api::problem::{Problem, ValidationError};
use modkit::api::OpenApiRegistry;
use utoipa::OpenApi;

use crate::api::rest::{dto, handlers};
use crate::domain::service::Service;

/// OpenAPI fragment for the users REST surface.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_users_by_birth_date,
        handlers::get_user,
        handlers::create_user,
        handlers::replace_user,
        handlers::patch_user,
        handlers::delete_user
    ),
    components(schemas(dto::UserDto, dto::UserReq, dto::PatchUserReq, Problem, ValidationError)),
    tags((name = "users", description = "User records keyed by email"))
)]
pub struct UsersApiDoc;

pub fn register_routes(
    router: Router,
    openapi: &dyn OpenApiRegistry,
    service: Arc<Service>,
) -> anyhow::Result<Router> {
    openapi.register_openapi(UsersApiDoc::openapi());

    let users = Router::new()
        .route(
            "/users",
            get(handlers::list_users_by_birth_date).post(handlers::create_user),
        )
        .route(
            "/users/{email}",
            get(handlers::get_user)
                .put(handlers::replace_user)
                .patch(handlers::patch_user)
                .delete(handlers::delete_user),
        )
        .layer(Extension(service));

    Ok(router.merge(users))
}
