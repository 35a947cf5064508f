//! Business logic services for the application layer.

pub mod advanced_results;
pub mod auth_service;
pub mod bootcamp_service;
pub mod course_service;
pub mod password;
pub mod review_service;
pub mod user_service;

#[cfg(test)]
pub(crate) mod fixtures;

pub use advanced_results::AdvancedResults;
pub use auth_service::{AuthService, Claims, JwtSettings, Registration, Session};
pub use bootcamp_service::BootcampService;
pub use course_service::CourseService;
pub use review_service::ReviewService;
pub use user_service::{NewAccount, UserService};
