//! Admin account management under `/auth/users`.

use axum::extract::State;
use axum::http::StatusCode;
use serde_json::Value;

use crate::api::dto::auth::{CreateUserRequest, UpdateUserRequest};
use crate::api::dto::envelope::Envelope;
use crate::api::extract::{EntityId, ListQuery, ValidatedJson};
use crate::domain::entities::User;
use crate::error::AppError;
use crate::state::AppState;

pub async fn list_users(
    State(st): State<AppState>,
    ListQuery(query): ListQuery<User>,
) -> Result<Envelope<Vec<Value>>, AppError> {
    let page = st.user_service.list(&query).await?;
    Ok(Envelope::page(page))
}

pub async fn get_user(
    State(st): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Envelope<User>, AppError> {
    let user = st.user_service.get(id).await?;
    Ok(Envelope::single(user))
}

/// Creates an account with any role, `admin` included.
pub async fn create_user(
    State(st): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Envelope<User>), AppError> {
    let user = st.user_service.create(payload.into()).await?;
    Ok(Envelope::single(user).created())
}

pub async fn update_user(
    State(st): State<AppState>,
    EntityId(id): EntityId,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> Result<Envelope<User>, AppError> {
    let user = st.user_service.update(id, payload.into()).await?;
    Ok(Envelope::single(user))
}

pub async fn delete_user(
    State(st): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Envelope<Value>, AppError> {
    st.user_service.delete(id).await?;
    Ok(Envelope::empty())
}
