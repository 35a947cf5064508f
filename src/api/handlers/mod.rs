//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to one resource; handlers translate
//! between DTOs and services and never touch storage directly.

pub mod auth;
pub mod bootcamps;
pub mod courses;
pub mod health;
pub mod reviews;
pub mod users;

pub use health::health_handler;
