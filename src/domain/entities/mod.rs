//! Typed entities of the bootcamp directory.
//!
//! Each entity implements [`crate::domain::query::Resource`], which declares
//! the fields a list query may filter, select or sort on. Creation and
//! partial-update inputs live next to the entity as `New*` and `Update*`.

pub mod bootcamp;
pub mod course;
pub mod review;
pub mod user;

pub use bootcamp::{Bootcamp, NewBootcamp, UpdateBootcamp, slugify};
pub use course::{Course, MinimumSkill, NewCourse, UpdateCourse};
pub use review::{NewReview, Review, UpdateReview};
pub use user::{NewUser, UpdateUser, User};
