use chrono::NaiveDate;

/// Pure user model for inter-module communication (no serde).
///
/// `email` is the only identity a user has.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub address: Option<String>,
    pub phone_number: Option<String>,
}

/// A full record as submitted for creation or full replacement.
///
/// Required attributes may be blank or missing here; validation reports
/// every offending field at once.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<NaiveDate>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
}

/// One attribute of a merge patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldPatch<T> {
    /// Key absent from the patch document.
    Unchanged,
    /// Key present with an explicit `null`.
    Clear,
    /// Key present with a value.
    Set(T),
}

impl<T> Default for FieldPatch<T> {
    fn default() -> Self {
        Self::Unchanged
    }
}

impl<T> FieldPatch<T> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }

    /// The new value, if the patch sets one.
    pub fn as_set(&self) -> Option<&T> {
        match self {
            Self::Set(v) => Some(v),
            _ => None,
        }
    }
}

/// `None` = absent, `Some(None)` = explicit null, `Some(Some(v))` = value.
impl<T> From<Option<Option<T>>> for FieldPatch<T> {
    fn from(v: Option<Option<T>>) -> Self {
        match v {
            None => Self::Unchanged,
            Some(None) => Self::Clear,
            Some(Some(v)) => Self::Set(v),
        }
    }
}

/// Sparse update of a user (RFC 7396 merge-patch semantics).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserPatch {
    pub email: FieldPatch<String>,
    pub first_name: FieldPatch<String>,
    pub last_name: FieldPatch<String>,
    pub birth_date: FieldPatch<NaiveDate>,
    pub address: FieldPatch<String>,
    pub phone_number: FieldPatch<String>,
}
