//! Course entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::query::{Field, FieldKind, Resource};

/// Prior knowledge a course expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MinimumSkill {
    Beginner,
    Intermediate,
    Advanced,
}

impl MinimumSkill {
    pub fn as_str(&self) -> &'static str {
        match self {
            MinimumSkill::Beginner => "beginner",
            MinimumSkill::Intermediate => "intermediate",
            MinimumSkill::Advanced => "advanced",
        }
    }
}

impl fmt::Display for MinimumSkill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown skill level '{0}'")]
pub struct UnknownSkill(pub String);

impl FromStr for MinimumSkill {
    type Err = UnknownSkill;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(MinimumSkill::Beginner),
            "intermediate" => Ok(MinimumSkill::Intermediate),
            "advanced" => Ok(MinimumSkill::Advanced),
            other => Err(UnknownSkill(other.to_string())),
        }
    }
}

impl TryFrom<String> for MinimumSkill {
    type Error = UnknownSkill;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A course offered by a bootcamp.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub weeks: i32,
    pub tuition: f64,
    #[sqlx(try_from = "String")]
    pub minimum_skill: MinimumSkill,
    pub scholarship_available: bool,
    #[serde(rename = "bootcamp")]
    pub bootcamp_id: i64,
    #[serde(rename = "user")]
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

impl Resource for Course {
    const NAME: &'static str = "course";
    const TABLE: &'static str = "courses";
    const FIELDS: &'static [Field] = &[
        Field::new("id", "id", FieldKind::Integer),
        Field::new("title", "title", FieldKind::Text),
        Field::new("description", "description", FieldKind::Text),
        Field::new("weeks", "weeks", FieldKind::Integer),
        Field::new("tuition", "tuition", FieldKind::Float),
        Field::new("minimumSkill", "minimum_skill", FieldKind::Text),
        Field::new(
            "scholarshipAvailable",
            "scholarship_available",
            FieldKind::Boolean,
        ),
        Field::new("bootcamp", "bootcamp_id", FieldKind::Integer),
        Field::new("user", "user_id", FieldKind::Integer),
        Field::new("createdAt", "created_at", FieldKind::Timestamp),
    ];

    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone)]
pub struct NewCourse {
    pub title: String,
    pub description: String,
    pub weeks: i32,
    pub tuition: f64,
    pub minimum_skill: MinimumSkill,
    pub scholarship_available: bool,
    pub bootcamp_id: i64,
    pub user_id: i64,
}

/// Partial update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateCourse {
    pub title: Option<String>,
    pub description: Option<String>,
    pub weeks: Option<i32>,
    pub tuition: Option<f64>,
    pub minimum_skill: Option<MinimumSkill>,
    pub scholarship_available: Option<bool>,
}

impl UpdateCourse {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.weeks.is_none()
            && self.tuition.is_none()
            && self.minimum_skill.is_none()
            && self.scholarship_available.is_none()
    }
}
