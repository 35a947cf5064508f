//! Domain layer: entities, identity, query translation and repository
//! contracts.
//!
//! Nothing here depends on HTTP or on a concrete database.
//!
//! - [`entities`] - Bootcamps, courses, reviews and users
//! - [`identity`] - Caller identity, roles and route policies
//! - [`query`] - Query-string translation into typed list descriptors
//! - [`pagination`] - Page windows and next/previous links
//! - [`repositories`] - Storage traits implemented by the infrastructure layer

pub mod entities;
pub mod identity;
pub mod pagination;
pub mod query;
pub mod repositories;
