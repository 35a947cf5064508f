//! PostgreSQL repository implementations.
//!
//! Queries are checked at runtime; list queries are rendered from a
//! [`crate::domain::query::QueryDescriptor`] by [`query_sql`].
//!
//! # Repositories
//!
//! - [`PgBootcampRepository`] - Bootcamps and radius search
//! - [`PgCourseRepository`] - Courses, keeps `average_cost` current
//! - [`PgReviewRepository`] - Reviews, keeps `average_rating` current
//! - [`PgUserRepository`] - User accounts

pub mod pg_bootcamp_repository;
pub mod pg_course_repository;
pub mod pg_review_repository;
pub mod pg_user_repository;
pub(crate) mod query_sql;

pub use pg_bootcamp_repository::PgBootcampRepository;
pub use pg_course_repository::PgCourseRepository;
pub use pg_review_repository::PgReviewRepository;
pub use pg_user_repository::PgUserRepository;
