//! Repository trait definitions for the domain layer.
//!
//! Traits define the storage contract; PostgreSQL implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! with `mockall` for unit tests.

pub mod bootcamp_repository;
pub mod course_repository;
pub mod review_repository;
pub mod user_repository;

pub use bootcamp_repository::BootcampRepository;
pub use course_repository::CourseRepository;
pub use review_repository::ReviewRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use bootcamp_repository::MockBootcampRepository;
#[cfg(test)]
pub use course_repository::MockCourseRepository;
#[cfg(test)]
pub use review_repository::MockReviewRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
