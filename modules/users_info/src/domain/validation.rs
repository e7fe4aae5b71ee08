//! Field rules for inbound records and patch documents.

use chrono::{Months, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::contract::model::{FieldPatch, NewUser, User, UserPatch};
use crate::domain::error::{DomainError, FieldViolation};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

pub const INVALID_EMAIL: &str = "The provided email is invalid";
pub const NOT_BLANK: &str = "must not be blank";
pub const NOT_NULL: &str = "must not be null";
pub const PAST_DATE: &str = "must be a past date";

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// A blank email fails both rules.
fn check_email(email: &str, out: &mut Vec<FieldViolation>) {
    check_not_blank("email", email, out);
    if !is_valid_email(email) {
        out.push(FieldViolation::new("email", INVALID_EMAIL));
    }
}

fn check_not_blank(field: &'static str, value: &str, out: &mut Vec<FieldViolation>) {
    if value.trim().is_empty() {
        out.push(FieldViolation::new(field, NOT_BLANK));
    }
}

/// Validate a full record and turn it into a [`User`].
///
/// Every violation is collected before failing.
pub fn validate_new_user(new_user: NewUser, today: NaiveDate) -> Result<User, DomainError> {
    let mut violations = Vec::new();

    check_email(&new_user.email, &mut violations);
    check_not_blank("firstName", &new_user.first_name, &mut violations);
    check_not_blank("lastName", &new_user.last_name, &mut violations);
    match new_user.birth_date {
        None => violations.push(FieldViolation::new("birthDate", NOT_NULL)),
        Some(d) if d >= today => violations.push(FieldViolation::new("birthDate", PAST_DATE)),
        Some(_) => {}
    }

    match (violations.is_empty(), new_user.birth_date) {
        (true, Some(birth_date)) => Ok(User {
            email: new_user.email,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            birth_date,
            address: new_user.address,
            phone_number: new_user.phone_number,
        }),
        _ => Err(DomainError::validation(violations)),
    }
}

/// Only the patch's own field rules: email format and past-only birth date,
/// checked when the patch sets them.
pub fn validate_patch(patch: &UserPatch, today: NaiveDate) -> Result<(), DomainError> {
    let mut violations = Vec::new();

    if let FieldPatch::Set(email) = &patch.email {
        if !is_valid_email(email) {
            violations.push(FieldViolation::new("email", INVALID_EMAIL));
        }
    }
    if let FieldPatch::Set(d) = patch.birth_date {
        if d >= today {
            violations.push(FieldViolation::new("birthDate", PAST_DATE));
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(DomainError::validation(violations))
    }
}

/// Latest birth date allowed to register: `today` minus `years` calendar years.
/// Feb 29 clamps to Feb 28 in non-leap years.
pub fn minimum_age_cutoff(today: NaiveDate, years: u32) -> NaiveDate {
    today
        .checked_sub_months(Months::new(years.saturating_mul(12)))
        .unwrap_or(NaiveDate::MIN)
}

/// True if someone born on `birth_date` is at least `years` old on `today`.
pub fn meets_minimum_age(birth_date: NaiveDate, today: NaiveDate, years: u32) -> bool {
    birth_date <= minimum_age_cutoff(today, years)
}
