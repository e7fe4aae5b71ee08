use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use modkit::api::problem::{Problem, ProblemResponse, ValidationError};

use crate::domain::error::DomainError;

/// Helper to create a ProblemResponse with less boilerplate
pub fn from_parts(
    status: StatusCode,
    code: &str,
    title: &str,
    detail: impl Into<String>,
    instance: &str,
) -> ProblemResponse {
    let problem = Problem::new(status, title, detail)
        .with_type(format!("https://errors.example.com/{}", code))
        .with_code(code)
        .with_instance(instance);

    // Add trace id from current tracing span if available
    let problem = if let Some(id) = tracing::Span::current().id() {
        problem.with_trace_id(id.into_u64().to_string())
    } else {
        problem
    };

    ProblemResponse(problem)
}

/// Map domain error to RFC9457 ProblemResponse
pub fn map_domain_error(e: &DomainError, instance: &str) -> ProblemResponse {
    match e {
        DomainError::UserNotFound { .. } => from_parts(
            StatusCode::NOT_FOUND,
            "USERS_NOT_FOUND",
            "User not found",
            e.to_string(),
            instance,
        ),
        DomainError::EmailAlreadyExists { email } => from_parts(
            StatusCode::CONFLICT,
            "USERS_EMAIL_CONFLICT",
            "Email already exists",
            format!("Email '{}' is already in use", email),
            instance,
        ),
        DomainError::Validation { violations } => {
            let errors = violations
                .iter()
                .map(|v| ValidationError {
                    detail: v.message.clone(),
                    pointer: format!("/{}", v.field),
                })
                .collect();
            let resp = from_parts(
                StatusCode::BAD_REQUEST,
                "USERS_VALIDATION",
                "Validation error",
                e.to_string(),
                instance,
            );
            ProblemResponse(resp.0.with_errors(errors))
        }
        DomainError::BelowMinimumAge { .. } => from_parts(
            StatusCode::BAD_REQUEST,
            "USERS_MINIMUM_AGE",
            "User below minimum age",
            e.to_string(),
            instance,
        ),
        DomainError::PatchApplication { .. } => from_parts(
            StatusCode::BAD_REQUEST,
            "USERS_PATCH_INVALID",
            "Invalid patch",
            e.to_string(),
            instance,
        ),
        DomainError::InvalidBirthDateRange { .. } => from_parts(
            StatusCode::BAD_REQUEST,
            "USERS_INVALID_RANGE",
            "Invalid birth date range",
            e.to_string(),
            instance,
        ),
        DomainError::Storage { .. } => {
            // Log the internal error details but don't expose them to the client
            tracing::error!(error = ?e, "Storage error occurred");
            from_parts(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_STORAGE",
                "Internal error",
                "An internal storage error occurred",
                instance,
            )
        }
    }
}

/// Unparsable create/replace body.
pub fn map_body_rejection(rejection: &JsonRejection, instance: &str) -> ProblemResponse {
    from_parts(
        StatusCode::BAD_REQUEST,
        "USERS_VALIDATION",
        "Malformed request body",
        rejection.body_text(),
        instance,
    )
}

/// Unparsable patch document.
pub fn map_patch_rejection(rejection: &JsonRejection, instance: &str) -> ProblemResponse {
    map_domain_error(
        &DomainError::patch_application(rejection.body_text()),
        instance,
    )
}

/// Missing or unparsable `from`/`to`.
pub fn map_range_rejection(rejection: &QueryRejection, instance: &str) -> ProblemResponse {
    from_parts(
        StatusCode::BAD_REQUEST,
        "USERS_INVALID_RANGE",
        "Invalid birth date range",
        rejection.body_text(),
        instance,
    )
}
