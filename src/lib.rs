//! qfolders, a folder-organized question notebook backed by Supabase
//!
//! Users register and log in through Supabase Auth, organize "questions"
//! (notes with description, links, code and an optional PDF reference) into
//! folders, and accumulate a per-day contribution count. All persistence and
//! authorization is delegated to the managed database: every table carries
//! owner-scoped Row Level Security policies, so this crate only issues
//! requests under the caller's session token and lets the database decide
//! which rows exist.

pub mod auth;
pub mod db;
pub mod storage;
pub mod notes;
pub mod error;
pub mod config;
pub mod fetch;

use reqwest::Client;

use crate::auth::{Auth, Session};
use crate::config::ClientOptions;
use crate::db::{RpcClient, TableClient};
use crate::notes::Notes;
use crate::storage::StorageClient;

/// The main entry point for the qfolders client
pub struct Qfolders {
    /// The base URL for the Supabase project
    pub url: String,
    /// The anonymous API key for the Supabase project
    pub key: String,
    /// HTTP client used for requests
    pub http_client: Client,
    /// Auth client for registration, login and session management
    pub auth: Auth,
    /// Client options
    pub options: ClientOptions,
}

impl Qfolders {
    /// Create a new client for a Supabase project
    ///
    /// # Example
    ///
    /// ```
    /// use qfolders::Qfolders;
    ///
    /// let app = Qfolders::new("https://your-project.supabase.co", "your-anon-key");
    /// ```
    pub fn new(supabase_url: &str, supabase_key: &str) -> Self {
        Self::new_with_options(supabase_url, supabase_key, ClientOptions::default())
    }

    /// Create a new client with custom options
    pub fn new_with_options(supabase_url: &str, supabase_key: &str, options: ClientOptions) -> Self {
        let http_client = Client::new();

        let auth = Auth::new(supabase_url, supabase_key, http_client.clone(), options.clone());

        Self {
            url: supabase_url.trim_end_matches('/').to_string(),
            key: supabase_key.to_string(),
            http_client,
            auth,
            options,
        }
    }

    /// Get a reference to the auth client
    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    /// Create a table client for database operations on a specific table.
    ///
    /// The session is a required parameter: every data request runs under the
    /// caller's access token, so the database's row security policies apply to
    /// the caller rather than the anonymous role.
    pub fn from(&self, table: &str, session: &Session) -> TableClient {
        TableClient::new(
            &self.url,
            &self.key,
            &session.access_token,
            table,
            self.http_client.clone(),
        )
    }

    /// Create a client for calling database functions under the caller's
    /// session
    pub fn rpc(&self, session: &Session) -> RpcClient {
        RpcClient::new(
            &self.url,
            &self.key,
            &session.access_token,
            self.http_client.clone(),
        )
    }

    /// Get a storage client bound to the caller's session
    pub fn storage(&self, session: &Session) -> StorageClient {
        StorageClient::new(
            &self.url,
            &self.key,
            &session.access_token,
            self.http_client.clone(),
        )
    }

    /// Get the notes operations layer (folders, questions, contributions)
    /// for an authenticated session
    pub fn notes<'a>(&'a self, session: &Session) -> Notes<'a> {
        Notes::new(self, session.clone())
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::auth::Session;
    pub use crate::config::ClientOptions;
    pub use crate::error::Error;
    pub use crate::Qfolders;
}
