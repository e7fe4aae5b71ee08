use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, instrument};

use crate::contract::model::{NewUser, User, UserPatch};
use crate::domain::error::DomainError;
use crate::domain::merge_patch::apply_merge_patch;
use crate::domain::repo::UsersRepository;
use crate::domain::validation;

/// Domain service with business rules for user management.
/// Depends only on the repository port, not on infra types.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn UsersRepository>,
    config: ServiceConfig,
}

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub minimum_age_years: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            minimum_age_years: 18,
        }
    }
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn storage(e: anyhow::Error) -> DomainError {
    DomainError::storage(e.to_string())
}

impl Service {
    /// Create a service with dependencies.
    pub fn new(repo: Arc<dyn UsersRepository>, config: ServiceConfig) -> Self {
        Self { repo, config }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    #[instrument(name = "users_info.service.get_user", skip(self))]
    pub async fn get_user(&self, email: &str) -> Result<User, DomainError> {
        debug!("Getting user by email");

        let user = self
            .repo
            .find_by_email(email)
            .await
            .map_err(storage)?
            .ok_or_else(|| DomainError::user_not_found(email))?;
        debug!("Successfully retrieved user");
        Ok(user)
    }

    /// Users born strictly between `from` and `to`.
    #[instrument(name = "users_info.service.list_users_by_birth_date", skip(self))]
    pub async fn list_users_by_birth_date(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<User>, DomainError> {
        debug!("Listing users by birth date range");
        if from > to {
            return Err(DomainError::invalid_birth_date_range(from, to));
        }

        let users = self
            .repo
            .find_in_birth_date_range(from, to)
            .await
            .map_err(storage)?;
        debug!("Found {} users in birth date range", users.len());
        Ok(users)
    }

    #[instrument(
        name = "users_info.service.create_user",
        skip(self, new_user),
        fields(email = %new_user.email)
    )]
    pub async fn create_user(&self, new_user: NewUser) -> Result<User, DomainError> {
        info!("Creating new user");
        let today = today();

        let user = validation::validate_new_user(new_user, today)?;

        let min_age = self.config.minimum_age_years;
        if !validation::meets_minimum_age(user.birth_date, today, min_age) {
            return Err(DomainError::below_minimum_age(min_age));
        }

        if self.repo.email_exists(&user.email).await.map_err(storage)? {
            return Err(DomainError::email_already_exists(user.email));
        }

        self.repo.insert(user.clone()).await.map_err(storage)?;

        info!("Successfully created user");
        Ok(user)
    }

    /// Full replacement. The minimum-age rule applies to creation only.
    #[instrument(
        name = "users_info.service.replace_user",
        skip(self, new_user),
        fields(new_email = %new_user.email)
    )]
    pub async fn replace_user(&self, email: &str, new_user: NewUser) -> Result<User, DomainError> {
        info!("Replacing user");

        let user = validation::validate_new_user(new_user, today())?;

        if self.repo.find_by_email(email).await.map_err(storage)?.is_none() {
            return Err(DomainError::user_not_found(email));
        }

        self.store_replacement(email, user).await
    }

    #[instrument(name = "users_info.service.patch_user", skip(self, patch))]
    pub async fn patch_user(&self, email: &str, patch: UserPatch) -> Result<User, DomainError> {
        info!("Patching user");

        validation::validate_patch(&patch, today())?;

        let current = self
            .repo
            .find_by_email(email)
            .await
            .map_err(storage)?
            .ok_or_else(|| DomainError::user_not_found(email))?;

        let merged = apply_merge_patch(&current, &patch)?;
        self.store_replacement(email, merged).await
    }

    #[instrument(name = "users_info.service.delete_user", skip(self))]
    pub async fn delete_user(&self, email: &str) -> Result<(), DomainError> {
        info!("Deleting user");

        let deleted = self.repo.delete(email).await.map_err(storage)?;
        if !deleted {
            return Err(DomainError::user_not_found(email));
        }

        info!("Successfully deleted user");
        Ok(())
    }

    /// Uniqueness on rename, then swap the stored record.
    async fn store_replacement(&self, email: &str, user: User) -> Result<User, DomainError> {
        if user.email != email && self.repo.email_exists(&user.email).await.map_err(storage)? {
            return Err(DomainError::email_already_exists(user.email));
        }

        let replaced = self
            .repo
            .replace(email, user.clone())
            .await
            .map_err(storage)?;
        if !replaced {
            // Removed concurrently between the lookup and the write.
            return Err(DomainError::user_not_found(email));
        }

        info!(email = %user.email, "Successfully updated user");
        Ok(user)
    }
}
