//! Folder operations

use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use super::{Folder, Notes};
use crate::error::Error;

#[derive(Serialize)]
struct NewFolderRow<'a> {
    user_id: Uuid,
    name: &'a str,
}

impl<'a> Notes<'a> {
    /// Create a folder owned by the current user
    pub async fn create_folder(&self, name: &str) -> Result<Folder, Error> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::general("Folder name is required"));
        }

        let row = NewFolderRow {
            user_id: self.session().user_id(),
            name,
        };

        let rows = self.table("folders").insert(row).execute::<Folder>().await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| Error::database("Insert returned no folder row"))
    }

    /// List the current user's folders, most recently created first
    pub async fn list_folders(&self) -> Result<Vec<Folder>, Error> {
        self.table("folders")
            .select("*")
            .order("created_at", false)
            .execute::<Folder>()
            .await
    }

    /// Load one folder. Returns None when the folder does not exist or is
    /// owned by someone else; row security filters it out silently.
    pub async fn get_folder(&self, id: Uuid) -> Result<Option<Folder>, Error> {
        self.table("folders")
            .select("*")
            .eq("id", id)
            .execute_one::<Folder>()
            .await
    }

    /// Delete a folder and, through the cascade, every question inside it.
    /// Returns false when the folder was not visible to the caller.
    pub async fn delete_folder(&self, id: Uuid) -> Result<bool, Error> {
        if self.get_folder(id).await?.is_none() {
            return Ok(false);
        }

        self.table("folders")
            .delete()
            .eq("id", id)
            .execute_no_return()
            .await?;

        Ok(true)
    }

    /// Bump a folder's last-accessed time
    pub async fn touch_folder(&self, id: Uuid) -> Result<(), Error> {
        self.table("folders")
            .update(json!({ "last_accessed": Utc::now() }))
            .eq("id", id)
            .execute_no_return()
            .await
    }
}
