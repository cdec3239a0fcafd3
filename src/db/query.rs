//! Query builders for TableClient

use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::Error;
use crate::fetch::Fetch;

/// Base query builder.
///
/// Parameters are kept as ordered pairs, not a map: PostgREST filters repeat
/// the column name (`contribution_date=gte.…&contribution_date=lte.…`).
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    /// Query parameters
    params: Vec<(String, String)>,
}

impl QueryBuilder {
    /// Create a new QueryBuilder
    pub fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Add a parameter to the query
    pub fn add_param(&mut self, key: &str, value: &str) {
        self.params.push((key.to_string(), value.to_string()));
    }

    /// Get the query parameters
    pub fn get_params(&self) -> &Vec<(String, String)> {
        &self.params
    }
}

/// Check a PostgREST response, mapping failures (constraint violations,
/// policy violations) into database errors
async fn check_status(response: Response) -> Result<Response, Error> {
    if !response.status().is_success() {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        return Err(Error::database(format!("{}: {}", status, text)));
    }
    Ok(response)
}

/// Builder for SELECT queries
pub struct SelectBuilder {
    url: String,
    key: String,
    token: String,
    client: Client,
    query: QueryBuilder,
}

impl SelectBuilder {
    /// Create a new SelectBuilder
    pub fn new(url: String, key: String, token: String, columns: &str, client: Client) -> Self {
        let mut query = QueryBuilder::new();
        query.add_param("select", columns);

        Self {
            url,
            key,
            token,
            client,
            query,
        }
    }

    /// Filter rows where column equals a value
    pub fn eq<T: ToString>(mut self, column: &str, value: T) -> Self {
        let filter = format!("eq.{}", value.to_string());
        self.query.add_param(column, &filter);
        self
    }

    /// Filter rows where column is greater than or equal to a value
    pub fn gte<T: ToString>(mut self, column: &str, value: T) -> Self {
        let filter = format!("gte.{}", value.to_string());
        self.query.add_param(column, &filter);
        self
    }

    /// Filter rows where column is less than or equal to a value
    pub fn lte<T: ToString>(mut self, column: &str, value: T) -> Self {
        let filter = format!("lte.{}", value.to_string());
        self.query.add_param(column, &filter);
        self
    }

    /// Limit the number of rows returned
    pub fn limit(mut self, count: i32) -> Self {
        self.query.add_param("limit", &count.to_string());
        self
    }

    /// Order the results by a column
    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let direction = if ascending { "asc" } else { "desc" };
        self.query.add_param("order", &format!("{}.{}", column, direction));
        self
    }

    /// Execute the query and return the matching rows.
    ///
    /// Rows filtered out by row security are simply absent: the result is an
    /// empty vec, never an authorization error.
    pub async fn execute<T: DeserializeOwned>(self) -> Result<Vec<T>, Error> {
        let response = Fetch::get(&self.client, &self.url)
            .apikey(&self.key)
            .bearer_auth(&self.token)
            .query(self.query.get_params().clone())
            .send()
            .await?;

        let response = check_status(response).await?;
        let rows = response.json::<Vec<T>>().await?;
        Ok(rows)
    }

    /// Execute the query and return the first row, if any
    pub async fn execute_one<T: DeserializeOwned>(self) -> Result<Option<T>, Error> {
        let rows = self.limit(1).execute::<T>().await?;
        Ok(rows.into_iter().next())
    }
}

/// Builder for INSERT queries
pub struct InsertBuilder<T: Serialize> {
    url: String,
    key: String,
    token: String,
    values: T,
    client: Client,
}

impl<T: Serialize> InsertBuilder<T> {
    /// Create a new InsertBuilder
    pub fn new(url: String, key: String, token: String, values: T, client: Client) -> Self {
        Self {
            url,
            key,
            token,
            values,
            client,
        }
    }

    /// Execute the insert and return the created rows
    pub async fn execute<R: DeserializeOwned>(self) -> Result<Vec<R>, Error> {
        let response = Fetch::post(&self.client, &self.url)
            .apikey(&self.key)
            .bearer_auth(&self.token)
            .header("Prefer", "return=representation")
            .json(&self.values)?
            .send()
            .await?;

        let response = check_status(response).await?;
        let rows = response.json::<Vec<R>>().await?;
        Ok(rows)
    }

    /// Execute the insert without returning the created rows
    pub async fn execute_no_return(self) -> Result<(), Error> {
        let response = Fetch::post(&self.client, &self.url)
            .apikey(&self.key)
            .bearer_auth(&self.token)
            .header("Prefer", "return=minimal")
            .json(&self.values)?
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }
}

/// Builder for UPDATE queries
pub struct UpdateBuilder<T: Serialize> {
    url: String,
    key: String,
    token: String,
    values: T,
    client: Client,
    query: QueryBuilder,
}

impl<T: Serialize> UpdateBuilder<T> {
    /// Create a new UpdateBuilder
    pub fn new(url: String, key: String, token: String, values: T, client: Client) -> Self {
        Self {
            url,
            key,
            token,
            values,
            client,
            query: QueryBuilder::new(),
        }
    }

    /// Filter rows where column equals a value
    pub fn eq<V: ToString>(mut self, column: &str, value: V) -> Self {
        let filter = format!("eq.{}", value.to_string());
        self.query.add_param(column, &filter);
        self
    }

    /// Execute the update and return the changed rows
    pub async fn execute<R: DeserializeOwned>(self) -> Result<Vec<R>, Error> {
        let response = Fetch::patch(&self.client, &self.url)
            .apikey(&self.key)
            .bearer_auth(&self.token)
            .header("Prefer", "return=representation")
            .query(self.query.get_params().clone())
            .json(&self.values)?
            .send()
            .await?;

        let response = check_status(response).await?;
        let rows = response.json::<Vec<R>>().await?;
        Ok(rows)
    }

    /// Execute the update without returning the changed rows
    pub async fn execute_no_return(self) -> Result<(), Error> {
        let response = Fetch::patch(&self.client, &self.url)
            .apikey(&self.key)
            .bearer_auth(&self.token)
            .header("Prefer", "return=minimal")
            .query(self.query.get_params().clone())
            .json(&self.values)?
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }
}

/// Builder for DELETE queries
pub struct DeleteBuilder {
    url: String,
    key: String,
    token: String,
    client: Client,
    query: QueryBuilder,
}

impl DeleteBuilder {
    /// Create a new DeleteBuilder
    pub fn new(url: String, key: String, token: String, client: Client) -> Self {
        Self {
            url,
            key,
            token,
            client,
            query: QueryBuilder::new(),
        }
    }

    /// Filter rows where column equals a value
    pub fn eq<V: ToString>(mut self, column: &str, value: V) -> Self {
        let filter = format!("eq.{}", value.to_string());
        self.query.add_param(column, &filter);
        self
    }

    /// Execute the delete without returning the removed rows
    pub async fn execute_no_return(self) -> Result<(), Error> {
        let response = Fetch::delete(&self.client, &self.url)
            .apikey(&self.key)
            .bearer_auth(&self.token)
            .header("Prefer", "return=minimal")
            .query(self.query.get_params().clone())
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }
}

/// Builder for RPC (database function) calls
pub struct RpcBuilder<T: Serialize> {
    url: String,
    key: String,
    token: String,
    params: T,
    client: Client,
}

impl<T: Serialize> RpcBuilder<T> {
    /// Create a new RpcBuilder
    pub fn new(url: String, key: String, token: String, params: T, client: Client) -> Self {
        Self {
            url,
            key,
            token,
            params,
            client,
        }
    }

    /// Execute the call and return the result
    pub async fn execute<R: DeserializeOwned>(self) -> Result<R, Error> {
        let response = Fetch::post(&self.client, &self.url)
            .apikey(&self.key)
            .bearer_auth(&self.token)
            .json(&self.params)?
            .send()
            .await?;

        let response = check_status(response).await?;
        let result = response.json::<R>().await?;
        Ok(result)
    }
}
