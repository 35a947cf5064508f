//! Handlers for `/auth`: registration, login and the caller's own account.
//!
//! Every handler that issues a token also sets it as an http-only `token`
//! cookie, so browser clients can skip the `Authorization` header.

use axum::{
    Json,
    extract::State,
    http::{HeaderValue, header::SET_COOKIE},
    response::{AppendHeaders, IntoResponse},
};

use crate::api::dto::auth::{LoginRequest, RegisterRequest, UpdateDetailsRequest, UpdatePasswordRequest};
use crate::api::dto::envelope::{Envelope, TokenResponse};
use crate::api::extract::ValidatedJson;
use crate::api::middleware::auth::TOKEN_COOKIE;
use crate::application::services::Session;
use crate::domain::entities::User;
use crate::domain::identity::Identity;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a `user` or `publisher` account and signs it in.
///
/// # Endpoint
///
/// `POST /api/v1/auth/register`
///
/// # Request Body
///
/// ```json
/// { "name": "John Doe", "email": "john@gmail.com", "password": "123456", "role": "publisher" }
/// ```
///
/// # Response
///
/// ```json
/// { "success": true, "token": "eyJhbGciOiJIUzI1NiJ9..." }
/// ```
///
/// # Errors
///
/// - **400**: invalid body, `admin` role requested, or email already registered
pub async fn register(
    State(st): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let session = st.auth_service.register(payload.into()).await?;
    token_response(&st, session)
}

/// # Errors
///
/// - **400**: email or password missing
/// - **401**: unknown email or wrong password (same message for both)
pub async fn login(
    State(st): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let session = st
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;
    token_response(&st, session)
}

/// Clears the token cookie. Bearer tokens stay valid until they expire.
pub async fn logout(State(st): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let cookie = cookie_header("none", 0, st.cookie_secure)?;
    Ok((AppendHeaders([(SET_COOKIE, cookie)]), Envelope::empty()))
}

pub async fn me(
    State(st): State<AppState>,
    caller: Identity,
) -> Result<Envelope<User>, AppError> {
    let user = st.auth_service.me(&caller).await?;
    Ok(Envelope::single(user))
}

/// Changes the caller's name and/or email.
pub async fn update_details(
    State(st): State<AppState>,
    caller: Identity,
    ValidatedJson(payload): ValidatedJson<UpdateDetailsRequest>,
) -> Result<Envelope<User>, AppError> {
    let user = st
        .auth_service
        .update_details(&caller, payload.name, payload.email)
        .await?;
    Ok(Envelope::single(user))
}

/// Changes the caller's password and returns a fresh token.
///
/// # Errors
///
/// - **401**: `currentPassword` does not match
pub async fn update_password(
    State(st): State<AppState>,
    caller: Identity,
    ValidatedJson(payload): ValidatedJson<UpdatePasswordRequest>,
) -> Result<impl IntoResponse, AppError> {
    let session = st
        .auth_service
        .update_password(&caller, &payload.current_password, payload.new_password)
        .await?;
    token_response(&st, session)
}

fn token_response(st: &AppState, session: Session) -> Result<impl IntoResponse + use<>, AppError> {
    let max_age = st.auth_service.token_ttl().num_seconds();
    let cookie = cookie_header(&session.token, max_age, st.cookie_secure)?;

    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(TokenResponse::new(session.token)),
    ))
}

fn cookie_header(token: &str, max_age: i64, secure: bool) -> Result<HeaderValue, AppError> {
    let mut cookie = format!("{TOKEN_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}");
    if secure {
        cookie.push_str("; Secure");
    }

    HeaderValue::from_str(&cookie).map_err(|e| {
        tracing::error!(error = %e, "token is not a valid cookie value");
        AppError::server("Server Error")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_header_flags() {
        let cookie = cookie_header("abc", 60, false).unwrap();
        assert_eq!(
            cookie.to_str().unwrap(),
            "token=abc; Path=/; HttpOnly; SameSite=Lax; Max-Age=60"
        );

        let cookie = cookie_header("abc", 60, true).unwrap();
        assert!(cookie.to_str().unwrap().ends_with("; Secure"));
    }

    #[test]
    fn test_cookie_header_rejects_control_characters() {
        assert!(cookie_header("bad\ntoken", 60, false).is_err());
    }
}
