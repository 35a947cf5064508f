//! Admin-only account management.

use serde_json::Value;
use std::sync::Arc;

use super::advanced_results::AdvancedResults;
use super::password::hash_password;
use crate::domain::entities::{NewUser, UpdateUser, User};
use crate::domain::identity::Role;
use crate::domain::pagination::Page;
use crate::domain::query::{Filter, QueryDescriptor};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

/// Account input with a plain-text password.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

pub struct UserService {
    repository: Arc<dyn UserRepository>,
    results: Arc<AdvancedResults>,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(
        repository: Arc<dyn UserRepository>,
        results: Arc<AdvancedResults>,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            repository,
            results,
            bcrypt_cost,
        }
    }

    pub async fn list(&self, query: &QueryDescriptor<User>) -> Result<Page<Value>, AppError> {
        self.results
            .collect(
                query,
                self.repository.find(query),
                self.repository.count(&query.filter),
            )
            .await
    }

    pub async fn get(&self, id: i64) -> Result<User, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Creates an account with any role, admin included.
    pub async fn create(&self, account: NewAccount) -> Result<User, AppError> {
        let password_hash = hash_password(account.password, self.bcrypt_cost).await?;

        let user = self
            .repository
            .create(NewUser {
                name: account.name,
                email: account.email,
                role: account.role,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = user.id, role = %user.role, "user created");
        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<User, AppError> {
        self.repository
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::not_found(format!("No user with the email {email}")))
    }

    /// Number of registered accounts; also serves as the storage probe of
    /// the health check.
    pub async fn count_all(&self) -> Result<u64, AppError> {
        self.repository.count(&Filter::new()).await
    }

    pub async fn update(&self, id: i64, update: UpdateUser) -> Result<User, AppError> {
        self.repository.update(id, update).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found(id));
        }
        tracing::info!(user_id = id, "user deleted");
        Ok(())
    }
}

fn not_found(id: i64) -> AppError {
    AppError::not_found(format!("No user with the id of {id}"))
}
