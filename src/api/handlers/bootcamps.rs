//! Handlers for `/bootcamps`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::Value;

use crate::api::dto::bootcamp::{CreateBootcampRequest, UpdateBootcampRequest};
use crate::api::dto::envelope::Envelope;
use crate::api::extract::{EntityId, ListQuery, ValidatedJson};
use crate::domain::entities::Bootcamp;
use crate::domain::identity::Identity;
use crate::domain::query::{Populate, Relation};
use crate::error::AppError;
use crate::state::AppState;

/// Every listed bootcamp carries its courses.
const LIST_POPULATE: [Populate; 1] = [Populate::new(Relation::Courses, &[])];

/// Lists bootcamps with filtering, selection, sorting and pagination.
///
/// # Endpoint
///
/// `GET /api/v1/bootcamps?averageCost[lte]=10000&select=name,careers&sort=-averageRating`
///
/// # Response
///
/// ```json
/// {
///   "success": true,
///   "count": 1,
///   "pagination": { "next": { "page": 2, "limit": 1 } },
///   "data": [ { "id": 1, "name": "Devworks Bootcamp", "careers": ["Web Development"], "courses": [] } ]
/// }
/// ```
pub async fn list_bootcamps(
    State(st): State<AppState>,
    ListQuery(query): ListQuery<Bootcamp>,
) -> Result<Envelope<Vec<Value>>, AppError> {
    let query = query.with_populate(&LIST_POPULATE);
    let page = st.bootcamp_service.list(&query).await?;
    Ok(Envelope::page(page))
}

pub async fn get_bootcamp(
    State(st): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Envelope<Bootcamp>, AppError> {
    let bootcamp = st.bootcamp_service.get(id).await?;
    Ok(Envelope::single(bootcamp))
}

/// Bootcamps within `distance` miles of (`lat`, `lng`).
///
/// # Endpoint
///
/// `GET /api/v1/bootcamps/radius/{lat}/{lng}/{distance}`
///
/// # Errors
///
/// Returns 400 if any segment is not a number or is out of range.
pub async fn bootcamps_in_radius(
    State(st): State<AppState>,
    Path((lat, lng, distance)): Path<(String, String, String)>,
) -> Result<Envelope<Vec<Bootcamp>>, AppError> {
    let latitude = parse_number("latitude", &lat)?;
    let longitude = parse_number("longitude", &lng)?;
    let distance = parse_number("distance", &distance)?;

    let bootcamps = st
        .bootcamp_service
        .within_radius(latitude, longitude, distance)
        .await?;

    Ok(Envelope::list(bootcamps))
}

/// Publishes a bootcamp owned by the caller.
///
/// # Endpoint
///
/// `POST /api/v1/bootcamps` (publisher, admin)
///
/// # Errors
///
/// - **400**: invalid body, duplicate name, or the caller already published one
/// - **401/403**: from the access gate
pub async fn create_bootcamp(
    State(st): State<AppState>,
    caller: Identity,
    ValidatedJson(payload): ValidatedJson<CreateBootcampRequest>,
) -> Result<(StatusCode, Envelope<Bootcamp>), AppError> {
    let bootcamp = st
        .bootcamp_service
        .create(&caller, payload.into_new(caller.id))
        .await?;

    Ok(Envelope::single(bootcamp).created())
}

pub async fn update_bootcamp(
    State(st): State<AppState>,
    caller: Identity,
    EntityId(id): EntityId,
    ValidatedJson(payload): ValidatedJson<UpdateBootcampRequest>,
) -> Result<Envelope<Bootcamp>, AppError> {
    let bootcamp = st
        .bootcamp_service
        .update(&caller, id, payload.into())
        .await?;

    Ok(Envelope::single(bootcamp))
}

/// Deletes a bootcamp together with its courses and reviews.
pub async fn delete_bootcamp(
    State(st): State<AppState>,
    caller: Identity,
    EntityId(id): EntityId,
) -> Result<Envelope<Value>, AppError> {
    st.bootcamp_service.delete(&caller, id).await?;
    Ok(Envelope::empty())
}

fn parse_number(name: &str, raw: &str) -> Result<f64, AppError> {
    raw.parse::<f64>()
        .map_err(|_| AppError::validation(format!("Invalid {name} '{raw}'")))
}
