use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

use crate::contract::{
    client::UsersInfoApi,
    error::UsersInfoError,
    model::{NewUser, User, UserPatch},
};
use crate::domain::{error::DomainError, service::Service};

/// Local implementation of the UsersInfoApi trait that delegates to the domain service
pub struct UsersInfoLocalClient {
    service: Arc<Service>,
}

impl UsersInfoLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl UsersInfoApi for UsersInfoLocalClient {
    async fn get_user(&self, email: &str) -> anyhow::Result<User> {
        self.service
            .get_user(email)
            .await
            .map_err(map_domain_error_to_anyhow)
    }

    async fn list_users_by_birth_date(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> anyhow::Result<Vec<User>> {
        self.service
            .list_users_by_birth_date(from, to)
            .await
            .map_err(map_domain_error_to_anyhow)
    }

    async fn create_user(&self, new_user: NewUser) -> anyhow::Result<User> {
        self.service
            .create_user(new_user)
            .await
            .map_err(map_domain_error_to_anyhow)
    }

    async fn replace_user(&self, email: &str, user: NewUser) -> anyhow::Result<User> {
        self.service
            .replace_user(email, user)
            .await
            .map_err(map_domain_error_to_anyhow)
    }

    async fn patch_user(&self, email: &str, patch: UserPatch) -> anyhow::Result<User> {
        self.service
            .patch_user(email, patch)
            .await
            .map_err(map_domain_error_to_anyhow)
    }

    async fn delete_user(&self, email: &str) -> anyhow::Result<()> {
        self.service
            .delete_user(email)
            .await
            .map_err(map_domain_error_to_anyhow)
    }
}

/// Map domain errors to contract errors wrapped in anyhow
fn map_domain_error_to_anyhow(domain_error: DomainError) -> anyhow::Error {
    let contract_error = match domain_error {
        DomainError::UserNotFound { email } => UsersInfoError::not_found(email),
        DomainError::EmailAlreadyExists { email } => UsersInfoError::conflict(email),
        e @ (DomainError::Validation { .. }
        | DomainError::BelowMinimumAge { .. }
        | DomainError::PatchApplication { .. }
        | DomainError::InvalidBirthDateRange { .. }) => UsersInfoError::validation(e.to_string()),
        DomainError::Storage { .. } => UsersInfoError::internal(),
    };

    anyhow::Error::new(contract_error)
}
