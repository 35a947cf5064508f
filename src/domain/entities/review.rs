//! Review entity.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::query::{Field, FieldKind, Resource};

/// A user's rating of a bootcamp. At most one per user and bootcamp.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub rating: i32,
    #[serde(rename = "bootcamp")]
    pub bootcamp_id: i64,
    #[serde(rename = "user")]
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

impl Resource for Review {
    const NAME: &'static str = "review";
    const TABLE: &'static str = "reviews";
    const FIELDS: &'static [Field] = &[
        Field::new("id", "id", FieldKind::Integer),
        Field::new("title", "title", FieldKind::Text),
        Field::new("text", "text", FieldKind::Text),
        Field::new("rating", "rating", FieldKind::Integer),
        Field::new("bootcamp", "bootcamp_id", FieldKind::Integer),
        Field::new("user", "user_id", FieldKind::Integer),
        Field::new("createdAt", "created_at", FieldKind::Timestamp),
    ];

    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone)]
pub struct NewReview {
    pub title: String,
    pub text: String,
    pub rating: i32,
    pub bootcamp_id: i64,
    pub user_id: i64,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateReview {
    pub title: Option<String>,
    pub text: Option<String>,
    pub rating: Option<i32>,
}

impl UpdateReview {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.text.is_none() && self.rating.is_none()
    }
}
