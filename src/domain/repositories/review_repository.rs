//! Repository trait for review data access.

use crate::domain::entities::{NewReview, Review, UpdateReview};
use crate::domain::query::{Filter, QueryDescriptor};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage operations for reviews.
///
/// Every write also refreshes the parent bootcamp's `average_rating` in the
/// same transaction.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn find(&self, query: &QueryDescriptor<Review>) -> Result<Vec<Review>, AppError>;

    async fn count(&self, filter: &Filter) -> Result<u64, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Review>, AppError>;

    /// # Errors
    ///
    /// Returns [`AppError::DuplicateKey`] if the user already reviewed the
    /// bootcamp.
    async fn create(&self, new_review: NewReview) -> Result<Review, AppError>;

    async fn update(&self, id: i64, update: UpdateReview) -> Result<Review, AppError>;

    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
