use async_trait::async_trait;
use chrono::NaiveDate;

use crate::contract::model::{NewUser, User, UserPatch};

/// Public API trait for the users_info module that other modules can use.
///
/// Failures carry a [`UsersInfoError`](crate::contract::error::UsersInfoError)
/// inside the `anyhow::Error`.
#[async_trait]
pub trait UsersInfoApi: Send + Sync {
    /// Get a user by email
    async fn get_user(&self, email: &str) -> anyhow::Result<User>;

    /// Users born strictly between `from` and `to`
    async fn list_users_by_birth_date(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> anyhow::Result<Vec<User>>;

    async fn create_user(&self, new_user: NewUser) -> anyhow::Result<User>;

    /// Replace the whole record addressed by `email`
    async fn replace_user(&self, email: &str, user: NewUser) -> anyhow::Result<User>;

    /// Merge a sparse patch into the record addressed by `email`
    async fn patch_user(&self, email: &str, patch: UserPatch) -> anyhow::Result<User>;

    async fn delete_user(&self, email: &str) -> anyhow::Result<()>;
}
