//! Caller identity, roles, and per-route role policies.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Authorization tier attached to every user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Publisher,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::User, Role::Publisher, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Publisher => "publisher",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "publisher" => Ok(Role::Publisher),
            "admin" => Ok(Role::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = UnknownRole;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// The authenticated caller, attached to the request after token verification.
///
/// Lives only as long as the request that resolved it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub id: i64,
    pub role: Role,
}

impl Identity {
    pub fn new(id: i64, role: Role) -> Self {
        Self { id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Passes when the caller owns the resource or is an admin.
    pub fn ensure_owner_or_admin(
        &self,
        owner_id: i64,
        message: impl FnOnce() -> String,
    ) -> Result<(), AppError> {
        if self.id == owner_id || self.is_admin() {
            Ok(())
        } else {
            Err(AppError::forbidden(message()))
        }
    }
}

/// Roles permitted to reach a route.
#[derive(Debug, Clone, Copy)]
pub struct RoutePolicy {
    required_roles: &'static [Role],
}

impl RoutePolicy {
    pub const fn new(required_roles: &'static [Role]) -> Self {
        Self { required_roles }
    }

    pub fn required_roles(&self) -> &'static [Role] {
        self.required_roles
    }

    pub fn permits(&self, identity: &Identity) -> bool {
        self.required_roles.contains(&identity.role)
    }

    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] when the identity's role is not listed.
    pub fn check(&self, identity: &Identity) -> Result<(), AppError> {
        if self.permits(identity) {
            Ok(())
        } else {
            Err(AppError::forbidden(format!(
                "User role {} is not authorized to access this route",
                identity.role
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUBLISHERS: RoutePolicy = RoutePolicy::new(&[Role::Publisher, Role::Admin]);

    #[test]
    fn test_role_round_trips_through_str() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("root".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Role::Publisher).unwrap(), "publisher");
    }

    #[test]
    fn test_policy_rejects_user_role() {
        let caller = Identity::new(1, Role::User);

        let err = PUBLISHERS.check(&caller).unwrap_err();

        assert!(matches!(err, AppError::Forbidden(_)));
        assert_eq!(
            err.message(),
            "User role user is not authorized to access this route"
        );
    }

    #[test]
    fn test_policy_admits_listed_roles() {
        assert!(PUBLISHERS.check(&Identity::new(1, Role::Publisher)).is_ok());
        assert!(PUBLISHERS.check(&Identity::new(1, Role::Admin)).is_ok());
    }

    #[test]
    fn test_owner_or_admin() {
        let owner = Identity::new(5, Role::Publisher);
        let stranger = Identity::new(6, Role::Publisher);
        let admin = Identity::new(7, Role::Admin);

        assert!(owner.ensure_owner_or_admin(5, String::new).is_ok());
        assert!(admin.ensure_owner_or_admin(5, String::new).is_ok());
        assert!(matches!(
            stranger.ensure_owner_or_admin(5, || "not yours".into()),
            Err(AppError::Forbidden(_))
        ));
    }
}
