//! Overlay of a sparse [`UserPatch`] onto a stored [`User`].

use crate::contract::model::{FieldPatch, User, UserPatch};
use crate::domain::error::DomainError;

/// Compute the merged record; the input record is left untouched.
///
/// `Unchanged` keeps the current value, `Set` overwrites it and `Clear`
/// empties an optional attribute. Required attributes cannot be cleared.
pub fn apply_merge_patch(current: &User, patch: &UserPatch) -> Result<User, DomainError> {
    Ok(User {
        email: required("email", &current.email, &patch.email)?,
        first_name: required("firstName", &current.first_name, &patch.first_name)?,
        last_name: required("lastName", &current.last_name, &patch.last_name)?,
        birth_date: required("birthDate", &current.birth_date, &patch.birth_date)?,
        address: optional(&current.address, &patch.address),
        phone_number: optional(&current.phone_number, &patch.phone_number),
    })
}

fn required<T: Clone>(field: &str, current: &T, patch: &FieldPatch<T>) -> Result<T, DomainError> {
    match patch {
        FieldPatch::Unchanged => Ok(current.clone()),
        FieldPatch::Set(v) => Ok(v.clone()),
        FieldPatch::Clear => Err(DomainError::patch_application(format!(
            "required field '{field}' cannot be null"
        ))),
    }
}

fn optional<T: Clone>(current: &Option<T>, patch: &FieldPatch<T>) -> Option<T> {
    match patch {
        FieldPatch::Unchanged => current.clone(),
        FieldPatch::Set(v) => Some(v.clone()),
        FieldPatch::Clear => None,
    }
}
