//! Request bodies for `/auth` endpoints.

use serde::Deserialize;
use validator::Validate;

use crate::application::services::{NewAccount, Registration};
use crate::domain::entities::UpdateUser;
use crate::domain::identity::Role;

/// Body of `POST /auth/register`. `role` defaults to `user`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Please add a name"))]
    pub name: String,

    #[serde(default)]
    #[validate(email(message = "Please add a valid email"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[serde(default)]
    pub role: Role,
}

impl From<RegisterRequest> for Registration {
    fn from(req: RegisterRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            password: req.password,
            role: req.role,
        }
    }
}

/// Body of `POST /auth/login`. Emptiness is checked by the service so a
/// missing field and a wrong password are told apart.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Body of `PUT /auth/updatedetails`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateDetailsRequest {
    #[validate(length(min = 1, message = "Please add a name"))]
    pub name: Option<String>,

    #[validate(email(message = "Please add a valid email"))]
    pub email: Option<String>,
}

/// Body of `PUT /auth/updatepassword`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Please add the current password"))]
    pub current_password: String,

    #[serde(default)]
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub new_password: String,
}

/// Body of `POST /auth/users` (admin). Any role may be assigned.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Please add a name"))]
    pub name: String,

    #[serde(default)]
    #[validate(email(message = "Please add a valid email"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[serde(default)]
    pub role: Role,
}

impl From<CreateUserRequest> for NewAccount {
    fn from(req: CreateUserRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            password: req.password,
            role: req.role,
        }
    }
}

/// Body of `PUT /auth/users/{id}` (admin).
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, message = "Please add a name"))]
    pub name: Option<String>,

    #[validate(email(message = "Please add a valid email"))]
    pub email: Option<String>,

    pub role: Option<Role>,
}

impl From<UpdateUserRequest> for UpdateUser {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            role: req.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_register_defaults_to_user_role() {
        let req: RegisterRequest = serde_json::from_value(json!({
            "name": "John Doe",
            "email": "john@gmail.com",
            "password": "123456"
        }))
        .unwrap();

        assert!(req.validate().is_ok());
        assert_eq!(req.role, Role::User);
    }

    #[test]
    fn test_register_rejects_short_password_and_bad_email() {
        let req: RegisterRequest = serde_json::from_value(json!({
            "name": "John Doe",
            "email": "not-an-email",
            "password": "123"
        }))
        .unwrap();

        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_unknown_role_fails_to_deserialize() {
        let result = serde_json::from_value::<UpdateUserRequest>(json!({"role": "owner"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_update_password_uses_camel_case() {
        let req: UpdatePasswordRequest = serde_json::from_value(json!({
            "currentPassword": "123456",
            "newPassword": "abcdef"
        }))
        .unwrap();
        assert!(req.validate().is_ok());
    }
}
