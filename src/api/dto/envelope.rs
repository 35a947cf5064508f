//! The uniform success body returned by every endpoint.
//!
//! Failures never pass through here; they are rendered by
//! [`crate::error::AppError`] as `{"success": false, "error": ...}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::pagination::{Page, Pagination};

/// `{success, count?, pagination?, data}`.
///
/// `count` is the length of the returned list, not the total number of
/// matching rows.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    pub data: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn single(data: T) -> Self {
        Self {
            success: true,
            count: None,
            pagination: None,
            data,
        }
    }

    /// Wraps an unpaged list.
    pub fn list(items: Vec<T>) -> Envelope<Vec<T>> {
        Envelope {
            success: true,
            count: Some(items.len()),
            pagination: None,
            data: items,
        }
    }

    /// Wraps a page from the list pipeline. `pagination` is always present,
    /// even when it has neither link.
    pub fn page(page: Page<T>) -> Envelope<Vec<T>> {
        Envelope {
            success: true,
            count: Some(page.items.len()),
            pagination: Some(page.pagination),
            data: page.items,
        }
    }

    /// Same body with `201 Created`.
    pub fn created(self) -> (StatusCode, Self) {
        (StatusCode::CREATED, self)
    }
}

impl Envelope<Value> {
    /// `{"success": true, "data": {}}`, returned by deletes and logout.
    pub fn empty() -> Self {
        Envelope::single(Value::Object(Map::new()))
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// `{success, token}` returned by login, register and password change.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub success: bool,
    pub token: String,
}

impl TokenResponse {
    pub fn new(token: String) -> Self {
        Self {
            success: true,
            token,
        }
    }
}
