//! User account entity.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::identity::{Identity, Role};
use crate::domain::query::{Field, FieldKind, Resource};

/// A registered account. The password hash never leaves the process.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    #[serde(skip)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn identity(&self) -> Identity {
        Identity::new(self.id, self.role)
    }
}

impl Resource for User {
    const NAME: &'static str = "user";
    const TABLE: &'static str = "users";
    const FIELDS: &'static [Field] = &[
        Field::new("id", "id", FieldKind::Integer),
        Field::new("name", "name", FieldKind::Text),
        Field::new("email", "email", FieldKind::Text),
        Field::new("role", "role", FieldKind::Text),
        Field::new("createdAt", "created_at", FieldKind::Timestamp),
    ];

    fn id(&self) -> i64 {
        self.id
    }
}

/// Input for creating an account; `password_hash` is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub password_hash: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
}

impl UpdateUser {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.role.is_none()
    }
}
