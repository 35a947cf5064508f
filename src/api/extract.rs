//! Request extractors that reject with [`AppError`] so every failure goes
//! through the same error body.

use axum::extract::{FromRequest, FromRequestParts, Json, Path, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::domain::query::{QueryDescriptor, Resource};
use crate::error::AppError;
use crate::state::AppState;

/// JSON body that has passed `validator` rules.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::validation(rejection.body_text()))?;

        value.validate()?;
        Ok(Self(value))
    }
}

/// The list query of a collection endpoint, translated from the raw query
/// string with the configured paging defaults.
#[derive(Debug)]
pub struct ListQuery<R>(pub QueryDescriptor<R>);

impl<R: Resource> FromRequestParts<AppState> for ListQuery<R> {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let raw = parts.uri.query().unwrap_or_default();
        let pairs = url::form_urlencoded::parse(raw.as_bytes());

        QueryDescriptor::from_pairs(pairs, state.paging).map(Self)
    }
}

/// Numeric id taken from the single `{id}`-style path parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityId(pub i64);

impl<S: Send + Sync> FromRequestParts<S> for EntityId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::validation(rejection.body_text()))?;

        parse_id(&raw).map(Self)
    }
}

/// Parses a positive id; anything else reads as a missing resource.
pub fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::not_found(format!("Resource not found with id of {raw}")))
}
