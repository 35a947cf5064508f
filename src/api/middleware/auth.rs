//! Access gate: `authenticate` resolves the caller from a token, `authorize`
//! checks the caller's role against a [`RoutePolicy`].
//!
//! Both are plain `from_fn` middlewares, applied in that order with
//! `route_layer` so unmatched paths still produce 404 rather than 401.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header::COOKIE, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::domain::identity::{Identity, RoutePolicy};
use crate::error::AppError;
use crate::state::AppState;

/// Name of the cookie carrying the identity token.
pub const TOKEN_COOKIE: &str = "token";

const NOT_AUTHORIZED: &str = "Not authorized to access this route";

/// Resolves the caller and stores their [`Identity`] in request extensions.
///
/// # Token Sources
///
/// 1. `Authorization: Bearer <token>`
/// 2. `Cookie: token=<token>`
///
/// # Errors
///
/// Returns `401 Unauthorized` if no token is present, the token fails
/// verification, or its user no longer exists.
pub async fn authenticate(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let token = match AuthBearer::from_request_parts(&mut parts, &()).await {
        Ok(AuthBearer(token)) => Some(token),
        Err(_) => token_from_cookie(&parts.headers),
    };

    let Some(token) = token.filter(|t| !t.is_empty()) else {
        reject("missing_token");
        return Err(AppError::unauthenticated(NOT_AUTHORIZED));
    };

    let identity = st.auth_service.resolve(&token).await.inspect_err(|_| {
        reject("invalid_token");
    })?;

    tracing::debug!(user_id = identity.id, role = %identity.role, "request authenticated");

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

/// Lets the request through only if the caller's role is in `policy`.
///
/// # Errors
///
/// Returns `403 Forbidden` for a role outside the policy, and `500` when
/// no [`Identity`] was attached, meaning `authenticate` is missing from the
/// route's layers.
pub async fn authorize(
    State(policy): State<RoutePolicy>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(identity) = req.extensions().get::<Identity>() else {
        tracing::error!(
            path = %req.uri().path(),
            "authorize ran without an authenticated identity"
        );
        return Err(AppError::server("Server Error"));
    };

    policy.check(identity).inspect_err(|_| {
        reject("forbidden_role");
    })?;

    Ok(next.run(req).await)
}

/// Handlers behind `authenticate` take the caller as an argument.
impl<S: Send + Sync> FromRequestParts<S> for Identity {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<Identity>().copied().ok_or_else(|| {
            tracing::error!(path = %parts.uri.path(), "handler expects an identity but none was attached");
            AppError::server("Server Error")
        })
    }
}

/// Reads the `token` cookie, ignoring any other cookies.
pub fn token_from_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|cookie| {
            let mut parts = cookie.trim().splitn(2, '=');
            match (parts.next(), parts.next()) {
                (Some(TOKEN_COOKIE), Some(value)) => Some(value.to_string()),
                _ => None,
            }
        })
}

fn reject(stage: &'static str) {
    metrics::counter!("auth_rejections_total", "stage" => stage).increment(1);
}
