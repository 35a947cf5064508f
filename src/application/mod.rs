//! Application layer services implementing business logic.
//!
//! Services consume repository traits and enforce ownership rules; HTTP
//! handlers call them and never touch storage directly.
//!
//! # Available Services
//!
//! - [`services::BootcampService`] - Bootcamps and radius search
//! - [`services::CourseService`] - Courses of a bootcamp
//! - [`services::ReviewService`] - Reviews of a bootcamp
//! - [`services::UserService`] - Admin account management
//! - [`services::AuthService`] - Registration, login and identity tokens
//! - [`services::AdvancedResults`] - Shared list pipeline (count, project, populate)

pub mod services;
