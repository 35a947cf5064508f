//! Repository trait for user accounts.

use crate::domain::entities::{NewUser, UpdateUser, User};
use crate::domain::query::{Filter, QueryDescriptor};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage operations for user accounts.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find(&self, query: &QueryDescriptor<User>) -> Result<Vec<User>, AppError>;

    async fn count(&self, filter: &Filter) -> Result<u64, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<User>, AppError>;

    /// Case-insensitive lookup used by login.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// # Errors
    ///
    /// Returns [`AppError::DuplicateKey`] if the email is already registered.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    async fn update(&self, id: i64, update: UpdateUser) -> Result<User, AppError>;

    /// Replaces the stored password hash.
    async fn set_password(&self, id: i64, password_hash: String) -> Result<(), AppError>;

    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
