use chrono::NaiveDate;
use thiserror::Error;

/// One rejected attribute of an inbound record or patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Attribute name as it appears on the wire (`firstName`, `birthDate`, ...).
    pub field: &'static str,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("user not found with email: {email}")]
    UserNotFound { email: String },

    #[error("User with email '{email}' already exists")]
    EmailAlreadyExists { email: String },

    #[error("Validation failed for the following fields:{}", render_violations(.violations))]
    Validation { violations: Vec<FieldViolation> },

    #[error("Users must be older than {minimum_age_years} years old to register.")]
    BelowMinimumAge { minimum_age_years: u32 },

    #[error("Failed to apply JSON Patch: {message}")]
    PatchApplication { message: String },

    #[error("Invalid birth date range: from ({from}) is after to ({to})")]
    InvalidBirthDateRange { from: NaiveDate, to: NaiveDate },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

fn render_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| format!(" {} - {}", v.field, v.message))
        .collect()
}

impl DomainError {
    pub fn user_not_found(email: impl Into<String>) -> Self {
        Self::UserNotFound {
            email: email.into(),
        }
    }

    pub fn email_already_exists(email: impl Into<String>) -> Self {
        Self::EmailAlreadyExists {
            email: email.into(),
        }
    }

    pub fn validation(violations: Vec<FieldViolation>) -> Self {
        Self::Validation { violations }
    }

    pub fn below_minimum_age(minimum_age_years: u32) -> Self {
        Self::BelowMinimumAge { minimum_age_years }
    }

    pub fn patch_application(message: impl Into<String>) -> Self {
        Self::PatchApplication {
            message: message.into(),
        }
    }

    pub fn invalid_birth_date_range(from: NaiveDate, to: NaiveDate) -> Self {
        Self::InvalidBirthDateRange { from, to }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}
