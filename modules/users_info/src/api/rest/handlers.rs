use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query,
    },
    http::{StatusCode, Uri},
    response::Json,
    Extension,
};
use modkit::api::problem::{Problem, ProblemResponse};
use tracing::{error, info};

use crate::api::rest::dto::{BirthDateRangeQuery, PatchUserReq, UserDto, UserReq};
use crate::api::rest::error::{
    map_body_rejection, map_domain_error, map_patch_rejection, map_range_rejection,
};
use crate::domain::service::Service;

/// List users born strictly between `from` and `to`
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    operation_id = "users_info.list_users_by_birth_date",
    params(BirthDateRangeQuery),
    responses(
        (status = 200, description = "Users in store order", body = [UserDto]),
        (status = 400, description = "`from` is after `to`, or a bound is missing", body = Problem, content_type = "application/problem+json"),
        (status = 500, description = "Internal Server Error", body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn list_users_by_birth_date(
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
    query: Result<Query<BirthDateRangeQuery>, QueryRejection>,
) -> Result<Json<Vec<UserDto>>, ProblemResponse> {
    let Query(query) = query.map_err(|e| {
        error!("Rejected birth date range query: {}", e);
        map_range_rejection(&e, uri.path())
    })?;
    info!("Listing users born between {} and {}", query.from, query.to);

    match svc.list_users_by_birth_date(query.from, query.to).await {
        Ok(users) => Ok(Json(users.into_iter().map(UserDto::from).collect())),
        Err(e) => {
            error!("Failed to list users: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Get a specific user by email
#[utoipa::path(
    get,
    path = "/users/{email}",
    tag = "users",
    operation_id = "users_info.get_user",
    params(("email" = String, Path, description = "User email")),
    responses(
        (status = 200, description = "User found", body = UserDto),
        (status = 404, description = "Not Found", body = Problem, content_type = "application/problem+json"),
        (status = 500, description = "Internal Server Error", body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn get_user(
    Extension(svc): Extension<Arc<Service>>,
    Path(email): Path<String>,
    uri: Uri,
) -> Result<Json<UserDto>, ProblemResponse> {
    info!("Getting user with email: {}", email);

    match svc.get_user(&email).await {
        Ok(user) => Ok(Json(UserDto::from(user))),
        Err(e) => {
            error!("Failed to get user {}: {}", email, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    operation_id = "users_info.create_user",
    request_body = UserReq,
    responses(
        (status = 201, description = "Created user", body = UserDto),
        (status = 400, description = "Validation failed or user below minimum age", body = Problem, content_type = "application/problem+json"),
        (status = 409, description = "Email already in use", body = Problem, content_type = "application/problem+json"),
        (status = 500, description = "Internal Server Error", body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn create_user(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    req_body: Result<Json<UserReq>, JsonRejection>,
) -> Result<(StatusCode, Json<UserDto>), ProblemResponse> {
    let Json(req_body) = req_body.map_err(|e| {
        error!("Rejected create body: {}", e);
        map_body_rejection(&e, uri.path())
    })?;
    info!("Creating user: {}", req_body.email.as_deref().unwrap_or_default());

    match svc.create_user(req_body.into()).await {
        Ok(user) => Ok((StatusCode::CREATED, Json(UserDto::from(user)))),
        Err(e) => {
            error!("Failed to create user: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Replace a user record
#[utoipa::path(
    put,
    path = "/users/{email}",
    tag = "users",
    operation_id = "users_info.replace_user",
    params(("email" = String, Path, description = "User email")),
    request_body = UserReq,
    responses(
        (status = 200, description = "Replaced user", body = UserDto),
        (status = 400, description = "Validation failed", body = Problem, content_type = "application/problem+json"),
        (status = 404, description = "Not Found", body = Problem, content_type = "application/problem+json"),
        (status = 409, description = "New email already in use", body = Problem, content_type = "application/problem+json"),
        (status = 500, description = "Internal Server Error", body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn replace_user(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Path(email): Path<String>,
    req_body: Result<Json<UserReq>, JsonRejection>,
) -> Result<Json<UserDto>, ProblemResponse> {
    let Json(req_body) = req_body.map_err(|e| {
        error!("Rejected replace body for {}: {}", email, e);
        map_body_rejection(&e, uri.path())
    })?;
    info!("Replacing user {}", email);

    match svc.replace_user(&email, req_body.into()).await {
        Ok(user) => Ok(Json(UserDto::from(user))),
        Err(e) => {
            error!("Failed to replace user {}: {}", email, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Partially update a user (JSON merge patch)
#[utoipa::path(
    patch,
    path = "/users/{email}",
    tag = "users",
    operation_id = "users_info.patch_user",
    params(("email" = String, Path, description = "User email")),
    request_body(content = PatchUserReq, content_type = "application/json"),
    responses(
        (status = 200, description = "Merged user", body = UserDto),
        (status = 400, description = "Malformed patch or invalid field", body = Problem, content_type = "application/problem+json"),
        (status = 404, description = "Not Found", body = Problem, content_type = "application/problem+json"),
        (status = 409, description = "New email already in use", body = Problem, content_type = "application/problem+json"),
        (status = 500, description = "Internal Server Error", body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn patch_user(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Path(email): Path<String>,
    req_body: Result<Json<PatchUserReq>, JsonRejection>,
) -> Result<Json<UserDto>, ProblemResponse> {
    let Json(req_body) = req_body.map_err(|e| {
        error!("Rejected patch for {}: {}", email, e);
        map_patch_rejection(&e, uri.path())
    })?;
    info!("Patching user {} with: {:?}", email, req_body);

    match svc.patch_user(&email, req_body.into()).await {
        Ok(user) => Ok(Json(UserDto::from(user))),
        Err(e) => {
            error!("Failed to patch user {}: {}", email, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Delete a user by email
#[utoipa::path(
    delete,
    path = "/users/{email}",
    tag = "users",
    operation_id = "users_info.delete_user",
    params(("email" = String, Path, description = "User email")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 404, description = "Not Found", body = Problem, content_type = "application/problem+json"),
        (status = 500, description = "Internal Server Error", body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn delete_user(
    Extension(svc): Extension<Arc<Service>>,
    Path(email): Path<String>,
    uri: Uri,
) -> Result<StatusCode, ProblemResponse> {
    info!("Deleting user: {}", email);

    match svc.delete_user(&email).await {
        Ok(()) => Ok(StatusCode::OK),
        Err(e) => {
            error!("Failed to delete user {}: {}", email, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}
