//! Database operations through the PostgREST API
//!
//! Authorization lives entirely in the database's row security policies, so
//! the caller's access token is a required constructor argument rather than
//! ambient state: a `TableClient` cannot be built without deciding whose rows
//! it operates on.

mod query;

use reqwest::Client;
use serde::Serialize;

pub use query::*;

/// Client for database operations on one table or view
pub struct TableClient {
    /// The base URL for the Supabase project
    url: String,

    /// The anonymous API key for the Supabase project
    key: String,

    /// The caller's access token
    token: String,

    /// The table or view name
    table: String,

    /// HTTP client
    client: Client,
}

impl TableClient {
    /// Create a new TableClient
    pub(crate) fn new(url: &str, key: &str, token: &str, table: &str, client: Client) -> Self {
        Self {
            url: url.to_string(),
            key: key.to_string(),
            token: token.to_string(),
            table: table.to_string(),
            client,
        }
    }

    fn get_url(&self) -> String {
        format!("{}/rest/v1/{}", self.url, self.table)
    }

    /// Select specific columns from the table
    pub fn select(&self, columns: &str) -> SelectBuilder {
        SelectBuilder::new(
            self.get_url(),
            self.key.clone(),
            self.token.clone(),
            columns,
            self.client.clone(),
        )
    }

    /// Insert data into the table
    pub fn insert<T: Serialize>(&self, values: T) -> InsertBuilder<T> {
        InsertBuilder::new(
            self.get_url(),
            self.key.clone(),
            self.token.clone(),
            values,
            self.client.clone(),
        )
    }

    /// Update data in the table
    pub fn update<T: Serialize>(&self, values: T) -> UpdateBuilder<T> {
        UpdateBuilder::new(
            self.get_url(),
            self.key.clone(),
            self.token.clone(),
            values,
            self.client.clone(),
        )
    }

    /// Delete data from the table
    pub fn delete(&self) -> DeleteBuilder {
        DeleteBuilder::new(
            self.get_url(),
            self.key.clone(),
            self.token.clone(),
            self.client.clone(),
        )
    }
}

/// Client for calling database functions through PostgREST
pub struct RpcClient {
    url: String,
    key: String,
    token: String,
    client: Client,
}

impl RpcClient {
    /// Create a new RpcClient
    pub(crate) fn new(url: &str, key: &str, token: &str, client: Client) -> Self {
        Self {
            url: url.to_string(),
            key: key.to_string(),
            token: token.to_string(),
            client,
        }
    }

    /// Call a stored procedure or function
    pub fn call<T: Serialize>(&self, function: &str, params: T) -> RpcBuilder<T> {
        let url = format!("{}/rest/v1/rpc/{}", self.url, function);
        RpcBuilder::new(url, self.key.clone(), self.token.clone(), params, self.client.clone())
    }
}
