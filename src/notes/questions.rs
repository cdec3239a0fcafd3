//! Question operations

use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use super::{parse_links, Notes, Question, QuestionDraft, QuestionPatch};
use crate::error::Error;

#[derive(Serialize)]
struct NewQuestionRow<'a> {
    user_id: Uuid,
    folder_id: Uuid,
    title: &'a str,
    description: Option<&'a str>,
    notes: Option<&'a str>,
    links: Option<Vec<String>>,
    code: Option<&'a str>,
}

impl<'a> Notes<'a> {
    /// Create a question inside a folder.
    ///
    /// The folder is loaded under the caller's token first, so a question can
    /// never be attached to a folder the caller does not own: the owner of
    /// the question always matches the owner of its folder.
    pub async fn create_question(
        &self,
        folder_id: Uuid,
        draft: &QuestionDraft,
    ) -> Result<Question, Error> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(Error::general("Question title is required"));
        }

        if self.get_folder(folder_id).await?.is_none() {
            return Err(Error::database("Folder not found"));
        }

        let row = NewQuestionRow {
            user_id: self.session().user_id(),
            folder_id,
            title,
            description: draft.description.as_deref(),
            notes: draft.notes.as_deref(),
            links: draft.links.as_deref().and_then(parse_links),
            code: draft.code.as_deref(),
        };

        let rows = self
            .table("questions")
            .insert(row)
            .execute::<Question>()
            .await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| Error::database("Insert returned no question row"))
    }

    /// List a folder's questions, most recently created first
    pub async fn list_questions(&self, folder_id: Uuid) -> Result<Vec<Question>, Error> {
        self.table("questions")
            .select("*")
            .eq("folder_id", folder_id)
            .order("created_at", false)
            .execute::<Question>()
            .await
    }

    /// Load one question. Returns None when it does not exist or belongs to
    /// someone else.
    pub async fn get_question(&self, id: Uuid) -> Result<Option<Question>, Error> {
        self.table("questions")
            .select("*")
            .eq("id", id)
            .execute_one::<Question>()
            .await
    }

    /// Apply a partial update and bump the last-updated time
    pub async fn update_question(&self, id: Uuid, patch: &QuestionPatch) -> Result<Question, Error> {
        let mut values = serde_json::to_value(patch)?;
        if let Some(map) = values.as_object_mut() {
            map.insert("last_updated".to_string(), json!(Utc::now()));
        }

        let rows = self
            .table("questions")
            .update(values)
            .eq("id", id)
            .execute::<Question>()
            .await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| Error::database("Question not found"))
    }

    /// Set the three independent star flags
    pub async fn set_stars(
        &self,
        id: Uuid,
        star1: bool,
        star2: bool,
        star3: bool,
    ) -> Result<Question, Error> {
        let rows = self
            .table("questions")
            .update(json!({
                "star1": star1,
                "star2": star2,
                "star3": star3,
                "last_updated": Utc::now(),
            }))
            .eq("id", id)
            .execute::<Question>()
            .await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| Error::database("Question not found"))
    }

    /// Mark a question completed or not
    pub async fn set_completed(&self, id: Uuid, is_completed: bool) -> Result<Question, Error> {
        let rows = self
            .table("questions")
            .update(json!({
                "is_completed": is_completed,
                "last_updated": Utc::now(),
            }))
            .eq("id", id)
            .execute::<Question>()
            .await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| Error::database("Question not found"))
    }

    /// Delete a question
    pub async fn delete_question(&self, id: Uuid) -> Result<(), Error> {
        self.table("questions")
            .delete()
            .eq("id", id)
            .execute_no_return()
            .await
    }

    /// Upload a PDF reference for a question and record its metadata.
    ///
    /// The object is stored under `user_id/question_id/file_name`, so each
    /// question's attachment lives in its own prefix.
    pub async fn attach_pdf(
        &self,
        id: Uuid,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Question, Error> {
        if self.get_question(id).await?.is_none() {
            return Err(Error::database("Question not found"));
        }

        let size = bytes.len() as i64;
        let path = format!("{}/{}/{}", self.session().user_id(), id, file_name);

        let storage = self.client.storage(&self.session);
        storage
            .from(&self.client.options.pdf_bucket)
            .upload(&path, bytes)
            .await?;

        let now = Utc::now();
        let rows = self
            .table("questions")
            .update(json!({
                "pdf_file_name": file_name,
                "pdf_file_path": path,
                "pdf_file_size": size,
                "pdf_file_uploaded_at": now,
                "last_updated": now,
            }))
            .eq("id", id)
            .execute::<Question>()
            .await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| Error::database("Question not found"))
    }

    /// Remove a question's PDF reference, deleting the stored object and
    /// clearing the metadata columns
    pub async fn detach_pdf(&self, id: Uuid) -> Result<Question, Error> {
        let question = self
            .get_question(id)
            .await?
            .ok_or_else(|| Error::database("Question not found"))?;

        if let Some(path) = &question.pdf_file_path {
            let storage = self.client.storage(&self.session);
            storage
                .from(&self.client.options.pdf_bucket)
                .remove(path)
                .await?;
        }

        let rows = self
            .table("questions")
            .update(json!({
                "pdf_file_name": null,
                "pdf_file_path": null,
                "pdf_file_size": null,
                "pdf_file_uploaded_at": null,
                "last_updated": Utc::now(),
            }))
            .eq("id", id)
            .execute::<Question>()
            .await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| Error::database("Question not found"))
    }
}
