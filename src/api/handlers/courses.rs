//! Handlers for `/courses` and `/bootcamps/{id}/courses`.

use axum::extract::State;
use axum::http::StatusCode;
use serde_json::Value;

use crate::api::dto::course::{CreateCourseRequest, UpdateCourseRequest};
use crate::api::dto::envelope::Envelope;
use crate::api::extract::{EntityId, ListQuery, ValidatedJson};
use crate::domain::entities::Course;
use crate::domain::identity::Identity;
use crate::domain::query::{FilterValue, Populate, Relation};
use crate::error::AppError;
use crate::state::AppState;

const BOOTCAMP_SUMMARY: [Populate; 1] =
    [Populate::new(Relation::Bootcamp, &["name", "description"])];

/// `GET /api/v1/courses`, each course with its bootcamp's name and description.
pub async fn list_courses(
    State(st): State<AppState>,
    ListQuery(query): ListQuery<Course>,
) -> Result<Envelope<Vec<Value>>, AppError> {
    let query = query.with_populate(&BOOTCAMP_SUMMARY);
    let page = st.course_service.list(&query).await?;
    Ok(Envelope::page(page))
}

/// `GET /api/v1/bootcamps/{id}/courses`; the route id is added as a filter
/// after the query string is translated.
pub async fn list_bootcamp_courses(
    State(st): State<AppState>,
    EntityId(bootcamp_id): EntityId,
    ListQuery(query): ListQuery<Course>,
) -> Result<Envelope<Vec<Value>>, AppError> {
    let query = query.with_condition("bootcamp", FilterValue::Integer(bootcamp_id))?;
    let page = st.course_service.list(&query).await?;
    Ok(Envelope::page(page))
}

pub async fn get_course(
    State(st): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Envelope<Value>, AppError> {
    let course = st.course_service.get(id, &BOOTCAMP_SUMMARY).await?;
    Ok(Envelope::single(course))
}

/// Adds a course to a bootcamp the caller owns.
///
/// # Endpoint
///
/// `POST /api/v1/bootcamps/{id}/courses` (publisher, admin)
///
/// # Errors
///
/// - **404**: the bootcamp does not exist
/// - **403**: the caller neither owns the bootcamp nor is an admin
pub async fn create_course(
    State(st): State<AppState>,
    caller: Identity,
    EntityId(bootcamp_id): EntityId,
    ValidatedJson(payload): ValidatedJson<CreateCourseRequest>,
) -> Result<(StatusCode, Envelope<Course>), AppError> {
    let course = st
        .course_service
        .create(&caller, bootcamp_id, payload.into_new(bootcamp_id, caller.id))
        .await?;

    Ok(Envelope::single(course).created())
}

pub async fn update_course(
    State(st): State<AppState>,
    caller: Identity,
    EntityId(id): EntityId,
    ValidatedJson(payload): ValidatedJson<UpdateCourseRequest>,
) -> Result<Envelope<Course>, AppError> {
    let course = st.course_service.update(&caller, id, payload.into()).await?;
    Ok(Envelope::single(course))
}

pub async fn delete_course(
    State(st): State<AppState>,
    caller: Identity,
    EntityId(id): EntityId,
) -> Result<Envelope<Value>, AppError> {
    st.course_service.delete(&caller, id).await?;
    Ok(Envelope::empty())
}
