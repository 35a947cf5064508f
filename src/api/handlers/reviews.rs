//! Handlers for `/reviews` and `/bootcamps/{id}/reviews`.

use axum::extract::State;
use axum::http::StatusCode;
use serde_json::Value;

use crate::api::dto::envelope::Envelope;
use crate::api::dto::review::{CreateReviewRequest, UpdateReviewRequest};
use crate::api::extract::{EntityId, ListQuery, ValidatedJson};
use crate::domain::entities::Review;
use crate::domain::identity::Identity;
use crate::domain::query::{FilterValue, Populate, Relation};
use crate::error::AppError;
use crate::state::AppState;

const LIST_POPULATE: [Populate; 1] = [Populate::new(Relation::Bootcamp, &["name", "description"])];

const BOOTCAMP_LIST_POPULATE: [Populate; 1] = [Populate::new(Relation::User, &["name"])];

const DETAIL_POPULATE: [Populate; 2] = [
    Populate::new(Relation::Bootcamp, &["name", "description"]),
    Populate::new(Relation::User, &["name", "role"]),
];

pub async fn list_reviews(
    State(st): State<AppState>,
    ListQuery(query): ListQuery<Review>,
) -> Result<Envelope<Vec<Value>>, AppError> {
    let query = query.with_populate(&LIST_POPULATE);
    let page = st.review_service.list(&query).await?;
    Ok(Envelope::page(page))
}

/// `GET /api/v1/bootcamps/{id}/reviews`, each review with its author's name.
pub async fn list_bootcamp_reviews(
    State(st): State<AppState>,
    EntityId(bootcamp_id): EntityId,
    ListQuery(query): ListQuery<Review>,
) -> Result<Envelope<Vec<Value>>, AppError> {
    let query = query
        .with_condition("bootcamp", FilterValue::Integer(bootcamp_id))?
        .with_populate(&BOOTCAMP_LIST_POPULATE);
    let page = st.review_service.list(&query).await?;
    Ok(Envelope::page(page))
}

/// `GET /api/v1/reviews/me`: the caller's own reviews.
pub async fn my_reviews(
    State(st): State<AppState>,
    caller: Identity,
    ListQuery(query): ListQuery<Review>,
) -> Result<Envelope<Vec<Value>>, AppError> {
    let query = query
        .with_condition("user", FilterValue::Integer(caller.id))?
        .with_populate(&LIST_POPULATE);
    let page = st.review_service.list(&query).await?;
    Ok(Envelope::page(page))
}

pub async fn get_review(
    State(st): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Envelope<Value>, AppError> {
    let review = st.review_service.get(id, &DETAIL_POPULATE).await?;
    Ok(Envelope::single(review))
}

/// Adds the caller's review of a bootcamp.
///
/// # Endpoint
///
/// `POST /api/v1/bootcamps/{id}/reviews` (user, admin)
///
/// # Errors
///
/// - **404**: the bootcamp does not exist
/// - **400**: the caller already reviewed this bootcamp
pub async fn create_review(
    State(st): State<AppState>,
    caller: Identity,
    EntityId(bootcamp_id): EntityId,
    ValidatedJson(payload): ValidatedJson<CreateReviewRequest>,
) -> Result<(StatusCode, Envelope<Review>), AppError> {
    let review = st
        .review_service
        .create(&caller, bootcamp_id, payload.into_new(bootcamp_id, caller.id))
        .await?;

    Ok(Envelope::single(review).created())
}

pub async fn update_review(
    State(st): State<AppState>,
    caller: Identity,
    EntityId(id): EntityId,
    ValidatedJson(payload): ValidatedJson<UpdateReviewRequest>,
) -> Result<Envelope<Review>, AppError> {
    let review = st.review_service.update(&caller, id, payload.into()).await?;
    Ok(Envelope::single(review))
}

pub async fn delete_review(
    State(st): State<AppState>,
    caller: Identity,
    EntityId(id): EntityId,
) -> Result<Envelope<Value>, AppError> {
    st.review_service.delete(&caller, id).await?;
    Ok(Envelope::empty())
}
