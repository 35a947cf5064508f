//! Account sessions: registration, login and identity tokens.
//!
//! Tokens are HS256 JWTs carrying the user id in `sub`. Verification only
//! proves the token was issued here; [`AuthService::resolve`] additionally
//! loads the account so deleted users and role changes take effect at once.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use super::password::{hash_password, verify_password};
use crate::domain::entities::{NewUser, UpdateUser, User};
use crate::domain::identity::{Identity, Role};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

const NOT_AUTHORIZED: &str = "Not authorized to access this route";

/// JWT payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

/// Token signing parameters.
#[derive(Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub expire_hours: i64,
}

impl fmt::Debug for JwtSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtSettings")
            .field("secret", &"***")
            .field("expire_hours", &self.expire_hours)
            .finish()
    }
}

/// A freshly issued token and the account it belongs to.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Self-service registration input. The password is plain text.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expire_hours: i64,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, jwt: &JwtSettings, bcrypt_cost: u32) -> Self {
        Self {
            users,
            encoding_key: EncodingKey::from_secret(jwt.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(jwt.secret.as_bytes()),
            expire_hours: jwt.expire_hours,
            bcrypt_cost,
        }
    }

    /// Lifetime of issued tokens, also used for the session cookie.
    pub fn token_ttl(&self) -> Duration {
        Duration::hours(self.expire_hours)
    }

    /// Creates an account and signs it in.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ValidationFailed`] when asking for the admin role
    /// and [`AppError::DuplicateKey`] for an email already registered.
    pub async fn register(&self, registration: Registration) -> Result<Session, AppError> {
        if registration.role == Role::Admin {
            return Err(AppError::validation("Role admin cannot be self-assigned"));
        }

        let password_hash = hash_password(registration.password, self.bcrypt_cost).await?;
        let user = self
            .users
            .create(NewUser {
                name: registration.name,
                email: registration.email,
                role: registration.role,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = user.id, role = %user.role, "user registered");
        self.session(user)
    }

    /// # Errors
    ///
    /// Returns [`AppError::Unauthenticated`] ("Invalid credentials") whether
    /// the email is unknown or the password is wrong.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AppError> {
        if email.is_empty() || password.is_empty() {
            return Err(AppError::validation("Please provide an email and password"));
        }

        let Some(user) = self.users.find_by_email(email).await? else {
            metrics::counter!("auth_login_failures_total").increment(1);
            return Err(AppError::unauthenticated("Invalid credentials"));
        };

        if !verify_password(password.to_string(), user.password_hash.clone()).await? {
            metrics::counter!("auth_login_failures_total").increment(1);
            return Err(AppError::unauthenticated("Invalid credentials"));
        }

        self.session(user)
    }

    pub fn issue_token(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            role: user.role,
            iat: now.timestamp(),
            exp: (now + self.token_ttl()).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "failed to sign token");
            AppError::server("Server Error")
        })
    }

    /// Checks signature and expiry.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthenticated`] for malformed, expired or
    /// foreign tokens.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<Claims>(token, &self.decoding_key, &validation)?;
        Ok(data.claims)
    }

    /// Verifies `token` and loads the identity of its account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthenticated`] if the token is invalid or the
    /// account no longer exists.
    pub async fn resolve(&self, token: &str) -> Result<Identity, AppError> {
        let claims = self.verify_token(token)?;
        let id: i64 = claims
            .sub
            .parse()
            .map_err(|_| AppError::unauthenticated(NOT_AUTHORIZED))?;

        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::unauthenticated(NOT_AUTHORIZED))?;

        Ok(user.identity())
    }

    /// The caller's own account.
    pub async fn me(&self, caller: &Identity) -> Result<User, AppError> {
        self.users
            .find_by_id(caller.id)
            .await?
            .ok_or_else(|| AppError::unauthenticated(NOT_AUTHORIZED))
    }

    /// Updates the caller's name and email; the role cannot change here.
    pub async fn update_details(
        &self,
        caller: &Identity,
        name: Option<String>,
        email: Option<String>,
    ) -> Result<User, AppError> {
        self.users
            .update(
                caller.id,
                UpdateUser {
                    name,
                    email,
                    role: None,
                },
            )
            .await
    }

    /// Replaces the caller's password and issues a new token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthenticated`] ("Password is incorrect") when
    /// `current` does not match.
    pub async fn update_password(
        &self,
        caller: &Identity,
        current: &str,
        new_password: String,
    ) -> Result<Session, AppError> {
        let user = self.me(caller).await?;

        if !verify_password(current.to_string(), user.password_hash.clone()).await? {
            return Err(AppError::unauthenticated("Password is incorrect"));
        }

        let hash = hash_password(new_password, self.bcrypt_cost).await?;
        self.users.set_password(user.id, hash).await?;
        tracing::info!(user_id = user.id, "password changed");

        self.session(user)
    }

    fn session(&self, user: User) -> Result<Session, AppError> {
        let token = self.issue_token(&user)?;
        Ok(Session { token, user })
    }
}
