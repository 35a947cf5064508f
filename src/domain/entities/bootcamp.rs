//! Bootcamp entity.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::query::{Field, FieldKind, Resource};

/// Career tracks a bootcamp may advertise.
pub const CAREERS: [&str; 6] = [
    "Web Development",
    "Mobile Development",
    "UI/UX",
    "Data Science",
    "Business",
    "Other",
];

pub const DEFAULT_PHOTO: &str = "no-photo.jpg";

/// A bootcamp listed in the directory, owned by one publisher.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Bootcamp {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub careers: Vec<String>,
    /// Mean review rating; `None` until the first review.
    pub average_rating: Option<f64>,
    /// Mean course tuition rounded up to the next ten; `None` without courses.
    pub average_cost: Option<f64>,
    pub photo: String,
    pub housing: bool,
    pub job_assistance: bool,
    pub job_guarantee: bool,
    pub accept_gi: bool,
    #[serde(rename = "user")]
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

impl Resource for Bootcamp {
    const NAME: &'static str = "bootcamp";
    const TABLE: &'static str = "bootcamps";
    const FIELDS: &'static [Field] = &[
        Field::new("id", "id", FieldKind::Integer),
        Field::new("name", "name", FieldKind::Text),
        Field::new("slug", "slug", FieldKind::Text),
        Field::new("description", "description", FieldKind::Text),
        Field::new("website", "website", FieldKind::Text),
        Field::new("phone", "phone", FieldKind::Text),
        Field::new("email", "email", FieldKind::Text),
        Field::new("address", "address", FieldKind::Text),
        Field::new("latitude", "latitude", FieldKind::Float),
        Field::new("longitude", "longitude", FieldKind::Float),
        Field::new("careers", "careers", FieldKind::TextList),
        Field::new("averageRating", "average_rating", FieldKind::Float),
        Field::new("averageCost", "average_cost", FieldKind::Float),
        Field::new("photo", "photo", FieldKind::Text),
        Field::new("housing", "housing", FieldKind::Boolean),
        Field::new("jobAssistance", "job_assistance", FieldKind::Boolean),
        Field::new("jobGuarantee", "job_guarantee", FieldKind::Boolean),
        Field::new("acceptGi", "accept_gi", FieldKind::Boolean),
        Field::new("user", "user_id", FieldKind::Integer),
        Field::new("createdAt", "created_at", FieldKind::Timestamp),
    ];

    fn id(&self) -> i64 {
        self.id
    }
}

/// Input for creating a bootcamp. The slug is derived from `name`.
#[derive(Debug, Clone)]
pub struct NewBootcamp {
    pub name: String,
    pub description: String,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub careers: Vec<String>,
    pub housing: bool,
    pub job_assistance: bool,
    pub job_guarantee: bool,
    pub accept_gi: bool,
    pub user_id: i64,
}

/// Partial update. `None` leaves a column unchanged; for nullable columns
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct UpdateBootcamp {
    pub name: Option<String>,
    pub description: Option<String>,
    pub website: Option<Option<String>>,
    pub phone: Option<Option<String>>,
    pub email: Option<Option<String>>,
    pub address: Option<String>,
    pub latitude: Option<Option<f64>>,
    pub longitude: Option<Option<f64>>,
    pub careers: Option<Vec<String>>,
    pub housing: Option<bool>,
    pub job_assistance: Option<bool>,
    pub job_guarantee: Option<bool>,
    pub accept_gi: Option<bool>,
}

impl UpdateBootcamp {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.website.is_none()
            && self.phone.is_none()
            && self.email.is_none()
            && self.address.is_none()
            && self.latitude.is_none()
            && self.longitude.is_none()
            && self.careers.is_none()
            && self.housing.is_none()
            && self.job_assistance.is_none()
            && self.job_guarantee.is_none()
            && self.accept_gi.is_none()
    }
}

/// Lower-cases `name` and joins its alphanumeric runs with `-`.
pub fn slugify(name: &str) -> String {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}
