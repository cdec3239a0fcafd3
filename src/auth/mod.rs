//! Registration, login and session management, delegated to Supabase Auth
//!
//! Nothing here implements authentication: every call proxies to the managed
//! GoTrue endpoint and the returned session token is what the database and
//! storage clients present so row security applies to the caller.

mod session;
mod types;

use reqwest::Client;
use serde_json::json;
use std::sync::{Arc, Mutex};

use crate::config::ClientOptions;
use crate::error::Error;
use crate::fetch::Fetch;

pub use session::*;
pub use types::*;

/// Client for Supabase Auth
pub struct Auth {
    /// The base URL for the Supabase project
    url: String,

    /// The anonymous API key for the Supabase project
    key: String,

    /// HTTP client used for requests
    client: Client,

    /// The current session
    session: Arc<Mutex<Option<Session>>>,

    /// Client options
    options: ClientOptions,
}

impl Auth {
    /// Create a new Auth client
    pub(crate) fn new(url: &str, key: &str, client: Client, options: ClientOptions) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            key: key.to_string(),
            client,
            session: Arc::new(Mutex::new(None)),
            options,
        }
    }

    fn get_auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1{}", self.url, path)
    }

    /// Register a new user with email and password.
    ///
    /// The confirmation email links back to the site's `/auth/confirmed`
    /// page. Depending on project settings the response may carry a session
    /// immediately or only the unconfirmed user.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthResponse, Error> {
        let url = self.get_auth_url("/signup");

        let body = json!({
            "email": email,
            "password": password,
        });

        let response = Fetch::post(&self.client, &url)
            .apikey(&self.key)
            .query_param("redirect_to", &self.options.confirmation_redirect_url())
            .json(&body)?
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(Error::auth(format!("Registration failed ({}): {}", status, text)));
        }

        let result = response.json::<AuthResponse>().await?;

        if let Some(session) = result.session() {
            let mut current_session = self.session.lock().unwrap();
            *current_session = Some(session);
        }

        Ok(result)
    }

    /// Sign in a user with email and password
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, Error> {
        let url = self.get_auth_url("/token");

        let body = json!({
            "email": email,
            "password": password,
        });

        let response = Fetch::post(&self.client, &url)
            .apikey(&self.key)
            .query_param("grant_type", "password")
            .json(&body)?
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(Error::auth(format!("Login failed ({}): {}", status, text)));
        }

        let session = response.json::<Session>().await?;

        {
            let mut current_session = self.session.lock().unwrap();
            *current_session = Some(session.clone());
        }

        Ok(session)
    }

    /// Sign out the current user and clear the stored session
    pub async fn sign_out(&self) -> Result<(), Error> {
        let url = self.get_auth_url("/logout");

        let token = {
            let current_session = self.session.lock().unwrap();
            match *current_session {
                Some(ref session) => session.access_token.clone(),
                None => return Err(Error::auth("Not logged in")),
            }
        };

        Fetch::post(&self.client, &url)
            .apikey(&self.key)
            .bearer_auth(&token)
            .send()
            .await?;

        let mut current_session = self.session.lock().unwrap();
        *current_session = None;

        Ok(())
    }

    /// Re-send the signup confirmation email
    pub async fn resend_confirmation(&self, email: &str) -> Result<(), Error> {
        let url = self.get_auth_url("/resend");

        let body = json!({
            "type": "signup",
            "email": email,
        });

        let response = Fetch::post(&self.client, &url)
            .apikey(&self.key)
            .query_param("redirect_to", &self.options.confirmation_redirect_url())
            .json(&body)?
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(Error::auth(format!(
                "Could not resend confirmation ({}): {}",
                status, text
            )));
        }

        Ok(())
    }

    /// Exchange the stored refresh token for a fresh session
    pub async fn refresh_session(&self) -> Result<Session, Error> {
        let url = self.get_auth_url("/token");

        let refresh_token = {
            let current_session = self.session.lock().unwrap();
            match *current_session {
                Some(ref session) => session.refresh_token.clone(),
                None => return Err(Error::auth("Not logged in")),
            }
        };

        let body = json!({ "refresh_token": refresh_token });

        let response = Fetch::post(&self.client, &url)
            .apikey(&self.key)
            .query_param("grant_type", "refresh_token")
            .json(&body)?
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(Error::auth(format!("Token refresh failed ({}): {}", status, text)));
        }

        let session = response.json::<Session>().await?;

        {
            let mut current_session = self.session.lock().unwrap();
            *current_session = Some(session.clone());
        }

        Ok(session)
    }

    /// Fetch the user record for the current session
    pub async fn get_user(&self) -> Result<AuthUser, Error> {
        let url = self.get_auth_url("/user");

        let token = {
            let current_session = self.session.lock().unwrap();
            match *current_session {
                Some(ref session) => session.access_token.clone(),
                None => return Err(Error::auth("Not logged in")),
            }
        };

        let response = Fetch::get(&self.client, &url)
            .apikey(&self.key)
            .bearer_auth(&token)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(Error::auth(format!("Could not load user ({}): {}", status, text)));
        }

        let user = response.json::<AuthUser>().await?;
        Ok(user)
    }

    /// Get a copy of the current session, if any
    pub fn current_session(&self) -> Option<Session> {
        self.session.lock().unwrap().clone()
    }
}
