//! REST API layer for HTTP request/response handling.
//!
//! This layer translates HTTP requests into domain operations and formats
//! responses according to API contracts.
//!
//! # Modules
//!
//! - [`dto`] - Request bodies and the response envelope
//! - [`extract`] - Extractors for validated bodies, list queries and path ids
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Access gate, rate limiting and tracing
//! - [`routes`] - Route tables and their access policies

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod routes;
