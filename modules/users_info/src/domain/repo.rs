use crate::contract::model::User;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Port for the domain layer: persistence operations the domain needs.
/// Object-safe and async-friendly via `async_trait`.
///
/// Records are kept in insertion order and addressed by exact email match.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// First user whose email matches exactly.
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    /// Check uniqueness by email.
    async fn email_exists(&self, email: &str) -> anyhow::Result<bool>;
    /// Append a fully-formed user. No uniqueness check at this level.
    async fn insert(&self, u: User) -> anyhow::Result<()>;
    /// Remove the user stored under `email` and append `u` in its place.
    /// Returns false if nothing was stored under `email`.
    async fn replace(&self, email: &str, u: User) -> anyhow::Result<bool>;
    /// Delete by email. Returns true if a user was removed.
    async fn delete(&self, email: &str) -> anyhow::Result<bool>;
    /// Users with `from < birth_date < to`, in store order.
    async fn find_in_birth_date_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> anyhow::Result<Vec<User>>;
}
