//! Repository trait for bootcamp data access.

use crate::domain::entities::{Bootcamp, NewBootcamp, UpdateBootcamp};
use crate::domain::query::{Filter, QueryDescriptor};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage operations for bootcamps.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgBootcampRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BootcampRepository: Send + Sync {
    /// Runs a translated list query and returns one page of bootcamps.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ServerError`] on database errors.
    async fn find(&self, query: &QueryDescriptor<Bootcamp>) -> Result<Vec<Bootcamp>, AppError>;

    /// Counts bootcamps matching `filter`, ignoring paging.
    async fn count(&self, filter: &Filter) -> Result<u64, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Bootcamp>, AppError>;

    /// Loads every bootcamp whose id is in `ids`, in no particular order.
    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Bootcamp>, AppError>;

    /// Returns the bootcamp published by `user_id`, if any.
    async fn find_by_user(&self, user_id: i64) -> Result<Option<Bootcamp>, AppError>;

    /// Bootcamps whose coordinates lie within `radius_miles` great-circle
    /// miles of (`latitude`, `longitude`). Bootcamps without coordinates never
    /// match.
    async fn find_within_radius(
        &self,
        latitude: f64,
        longitude: f64,
        radius_miles: f64,
    ) -> Result<Vec<Bootcamp>, AppError>;

    /// Inserts a bootcamp, deriving its slug from the name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DuplicateKey`] if the name is already taken.
    async fn create(&self, new_bootcamp: NewBootcamp) -> Result<Bootcamp, AppError>;

    /// Applies a partial update; a changed name also changes the slug.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no bootcamp has this id.
    async fn update(&self, id: i64, update: UpdateBootcamp) -> Result<Bootcamp, AppError>;

    /// Deletes a bootcamp together with its courses and reviews.
    ///
    /// Returns `Ok(false)` if no bootcamp had this id.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
