//! Repository trait for course data access.

use crate::domain::entities::{Course, NewCourse, UpdateCourse};
use crate::domain::query::{Filter, QueryDescriptor};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage operations for courses.
///
/// Every write also refreshes the parent bootcamp's `average_cost` in the
/// same transaction.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn find(&self, query: &QueryDescriptor<Course>) -> Result<Vec<Course>, AppError>;

    async fn count(&self, filter: &Filter) -> Result<u64, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Course>, AppError>;

    /// Every course belonging to any of `bootcamp_ids`, oldest first.
    async fn find_by_bootcamps(&self, bootcamp_ids: &[i64]) -> Result<Vec<Course>, AppError>;

    /// # Errors
    ///
    /// Returns [`AppError::ValidationFailed`] if the bootcamp does not exist.
    async fn create(&self, new_course: NewCourse) -> Result<Course, AppError>;

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no course has this id.
    async fn update(&self, id: i64, update: UpdateCourse) -> Result<Course, AppError>;

    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
