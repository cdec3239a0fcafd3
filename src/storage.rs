//! File storage operations for uploaded PDF references
//!
//! Objects live in a per-project bucket under `user_id/question_id/file_name`
//! paths. Like the database client, the storage client carries the caller's
//! access token so bucket policies see the real owner.

use reqwest::{multipart, Client};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Error;
use crate::fetch::{Fetch, CLIENT_INFO};

/// Client for Supabase Storage
pub struct StorageClient {
    /// The base URL for the Supabase project
    url: String,

    /// The anonymous API key for the Supabase project
    key: String,

    /// The caller's access token
    token: String,

    /// HTTP client used for requests
    client: Client,
}

/// Client for a specific storage bucket
pub struct BucketClient<'a> {
    /// Reference to the storage client
    storage: &'a StorageClient,

    /// The bucket ID
    bucket_id: String,
}

/// An object stored in a bucket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileObject {
    /// The object key within the bucket
    #[serde(alias = "Key")]
    pub key: Option<String>,

    /// The object id
    pub id: Option<String>,
}

impl StorageClient {
    /// Create a new StorageClient
    pub(crate) fn new(url: &str, key: &str, token: &str, client: Client) -> Self {
        Self {
            url: url.to_string(),
            key: key.to_string(),
            token: token.to_string(),
            client,
        }
    }

    fn get_url(&self, path: &str) -> String {
        format!("{}/storage/v1{}", self.url, path)
    }

    /// Get a client for a specific bucket
    pub fn from(&self, bucket_id: &str) -> BucketClient {
        BucketClient {
            storage: self,
            bucket_id: bucket_id.to_string(),
        }
    }
}

impl<'a> BucketClient<'a> {
    /// Upload a file to the bucket
    pub async fn upload(&self, path: &str, file_data: Vec<u8>) -> Result<FileObject, Error> {
        let url = self
            .storage
            .get_url(&format!("/object/{}/{}", self.bucket_id, path));

        let file_name = Path::new(path)
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "file".to_string());

        let form = multipart::Form::new().part(
            "file",
            multipart::Part::bytes(file_data).file_name(file_name),
        );

        let response = self
            .storage
            .client
            .post(&url)
            .header("apikey", &self.storage.key)
            .header("Authorization", format!("Bearer {}", self.storage.token))
            .header("X-Client-Info", CLIENT_INFO)
            .header("x-upsert", "true")
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(Error::storage(format!(
                "Upload failed with status {}: {}",
                status, text
            )));
        }

        let file_object = response.json::<FileObject>().await?;
        Ok(file_object)
    }

    /// Download a file from the bucket
    pub async fn download(&self, path: &str) -> Result<Vec<u8>, Error> {
        let url = self
            .storage
            .get_url(&format!("/object/{}/{}", self.bucket_id, path));

        let response = Fetch::get(&self.storage.client, &url)
            .apikey(&self.storage.key)
            .bearer_auth(&self.storage.token)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(Error::storage(format!(
                "Download failed with status {}: {}",
                status, text
            )));
        }

        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }

    /// Remove a file from the bucket
    pub async fn remove(&self, path: &str) -> Result<(), Error> {
        let url = self
            .storage
            .get_url(&format!("/object/{}/{}", self.bucket_id, path));

        let response = Fetch::delete(&self.storage.client, &url)
            .apikey(&self.storage.key)
            .bearer_auth(&self.storage.token)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(Error::storage(format!(
                "Remove failed with status {}: {}",
                status, text
            )));
        }

        Ok(())
    }

    /// Public URL for an object, valid when the bucket itself is public
    pub fn public_url(&self, path: &str) -> String {
        self.storage
            .get_url(&format!("/object/public/{}/{}", self.bucket_id, path))
    }
}
