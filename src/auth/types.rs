//! Types for the auth endpoint

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Session;

/// The user record held by the managed auth service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    /// The user id, referenced by every owned row
    pub id: Uuid,

    /// The user's email address
    pub email: Option<String>,

    /// When the email address was confirmed
    pub email_confirmed_at: Option<DateTime<Utc>>,

    /// The last sign-in time
    pub last_sign_in_at: Option<DateTime<Utc>>,

    /// The creation time
    pub created_at: Option<DateTime<Utc>>,

    /// The update time
    pub updated_at: Option<DateTime<Utc>>,

    /// The user's role
    pub role: Option<String>,
}

/// Response from the signup endpoint.
///
/// When email confirmation is required the token fields are absent and only
/// the unconfirmed user is returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The access token, present once the user is confirmed
    pub access_token: Option<String>,

    /// The refresh token
    pub refresh_token: Option<String>,

    /// The token type
    pub token_type: Option<String>,

    /// Token lifetime in seconds
    pub expires_in: Option<i64>,

    /// Expiry as a unix timestamp
    pub expires_at: Option<i64>,

    /// The user data
    pub user: Option<AuthUser>,
}

impl AuthResponse {
    /// Build a session out of the response, if it carries one
    pub fn session(&self) -> Option<Session> {
        match (&self.access_token, &self.refresh_token, &self.user) {
            (Some(access_token), Some(refresh_token), Some(user)) => Some(Session {
                access_token: access_token.clone(),
                refresh_token: refresh_token.clone(),
                token_type: self.token_type.clone().unwrap_or_else(|| "bearer".to_string()),
                expires_in: self.expires_in.unwrap_or(0),
                expires_at: self.expires_at,
                user: user.clone(),
            }),
            _ => None,
        }
    }
}
