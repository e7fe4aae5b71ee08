use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::RwLock;

use crate::contract::model::User;
use crate::domain::repo::UsersRepository;

/// Process-local user store.
///
/// An insertion-ordered list behind a single store-wide lock. Each call is
/// atomic on its own; sequences of calls are not.
#[derive(Default)]
pub struct InMemoryUsersRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUsersRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated store, in the given order.
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: RwLock::new(users),
        }
    }

    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }
}

fn position(users: &[User], email: &str) -> Option<usize> {
    users.iter().position(|u| u.email == email)
}

#[async_trait]
impl UsersRepository for InMemoryUsersRepository {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        Ok(self.users.read().iter().find(|u| u.email == email).cloned())
    }

    async fn email_exists(&self, email: &str) -> anyhow::Result<bool> {
        Ok(self.users.read().iter().any(|u| u.email == email))
    }

    async fn insert(&self, u: User) -> anyhow::Result<()> {
        self.users.write().push(u);
        Ok(())
    }

    async fn replace(&self, email: &str, u: User) -> anyhow::Result<bool> {
        let mut users = self.users.write();
        let Some(idx) = position(&users, email) else {
            return Ok(false);
        };
        users.remove(idx);
        users.push(u);
        Ok(true)
    }

    async fn delete(&self, email: &str) -> anyhow::Result<bool> {
        let mut users = self.users.write();
        match position(&users, email) {
            Some(idx) => {
                users.remove(idx);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_in_birth_date_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> anyhow::Result<Vec<User>> {
        Ok(self
            .users
            .read()
            .iter()
            .filter(|u| u.birth_date > from && u.birth_date < to)
            .cloned()
            .collect())
    }
}
