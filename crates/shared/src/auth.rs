//! Authentication types for JWT tokens and login payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims for access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: Uuid,
    /// User's role ("admin" or "portal").
    pub role: String,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a user.
    #[must_use]
    pub fn new(user_id: Uuid, role: &str, expires_at: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            role: role.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the user ID from claims.
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.sub
    }

    /// Returns true if the token carries the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

/// Token returned after successful authentication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Access token.
    pub access_token: String,
    /// Access token expiration in seconds.
    pub expires_in: i64,
}

impl TokenPair {
    /// Creates a new token pair.
    #[must_use]
    pub const fn new(access_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            expires_in,
        }
    }
}

/// Login request payload. `email` also accepts a login name.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// User email or login name.
    pub email: String,
    /// User password.
    pub password: String,
}

/// Signup request payload.
#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    /// Display name.
    pub name: String,
    /// User email.
    pub email: String,
    /// Optional login name, defaults to email.
    pub login: Option<String>,
    /// User password.
    pub password: String,
    /// Requested role, anything but "admin" becomes "portal".
    pub role: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_claims_roundtrip_fields() {
        let user_id = Uuid::new_v4();
        let expires = Utc::now() + Duration::hours(1);
        let claims = Claims::new(user_id, "admin", expires);

        assert_eq!(claims.user_id(), user_id);
        assert!(claims.is_admin());
        assert_eq!(claims.exp, expires.timestamp());
    }

    #[test]
    fn test_portal_role_is_not_admin() {
        let claims = Claims::new(Uuid::new_v4(), "portal", Utc::now());
        assert!(!claims.is_admin());
    }
}
