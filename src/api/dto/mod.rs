//! Data Transfer Objects for API requests and responses.
//!
//! Request bodies use Serde for deserialization and validator for input
//! rules; every success body is wrapped in [`envelope::Envelope`].

pub mod auth;
pub mod bootcamp;
pub mod course;
pub mod envelope;
pub mod health;
pub mod review;
