//! Session data returned by the auth endpoint

use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use super::AuthUser;

/// An authenticated session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// The access token presented on every data and storage request
    pub access_token: String,

    /// The refresh token
    pub refresh_token: String,

    /// The token type, normally "bearer"
    pub token_type: String,

    /// Token lifetime in seconds
    pub expires_in: i64,

    /// Expiry as a unix timestamp
    pub expires_at: Option<i64>,

    /// The authenticated user
    pub user: AuthUser,
}

impl Session {
    /// The owning user's id
    pub fn user_id(&self) -> Uuid {
        self.user.id
    }

    /// Check if the session has expired
    pub fn is_expired(&self) -> bool {
        if let Some(expires_at) = self.expires_at {
            let now = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or(Duration::from_secs(0))
                .as_secs() as i64;

            now >= expires_at
        } else {
            false
        }
    }
}
