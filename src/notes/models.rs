//! Row types for the folders, questions and contributions tables

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A folder owned by one user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Folder {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub last_accessed: Option<DateTime<Utc>>,
    pub last_updated: Option<DateTime<Utc>>,
}

/// A question note inside a folder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: Uuid,
    pub user_id: Uuid,
    pub folder_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub notes: Option<String>,
    /// Ordered list of reference URLs, stored as a JSON array
    pub links: Option<Vec<String>>,
    pub code: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub star1: bool,
    #[serde(default)]
    pub star2: bool,
    #[serde(default)]
    pub star3: bool,
    #[serde(default)]
    pub is_completed: bool,
    pub pdf_file_name: Option<String>,
    /// Object key in the PDF bucket
    pub pdf_file_path: Option<String>,
    /// Attachment size in bytes
    pub pdf_file_size: Option<i64>,
    pub pdf_file_uploaded_at: Option<DateTime<Utc>>,
    pub last_updated: Option<DateTime<Utc>>,
}

/// One user's activity count for one calendar day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contribution {
    pub id: Uuid,
    pub user_id: Uuid,
    pub contribution_date: NaiveDate,
    pub contribution_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a question
#[derive(Debug, Clone, Default)]
pub struct QuestionDraft {
    pub title: String,
    pub description: Option<String>,
    pub notes: Option<String>,
    /// Raw links input, one URL per line
    pub links: Option<String>,
    pub code: Option<String>,
}

/// Partial update for a question; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize)]
pub struct QuestionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Parse a links textarea into the stored list: one URL per line, blank
/// lines dropped. Returns None when nothing remains.
pub fn parse_links(raw: &str) -> Option<Vec<String>> {
    let links: Vec<String> = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    if links.is_empty() {
        None
    } else {
        Some(links)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_links_splits_lines_and_drops_blanks() {
        let raw = "https://example.com/a\n\n  https://example.com/b  \n\t\n";
        let links = parse_links(raw).unwrap();
        assert_eq!(links, vec!["https://example.com/a", "https://example.com/b"]);
    }

    #[test]
    fn parse_links_returns_none_for_empty_input() {
        assert_eq!(parse_links(""), None);
        assert_eq!(parse_links("   \n  \n"), None);
    }

    #[test]
    fn question_patch_skips_absent_fields() {
        let patch = QuestionPatch {
            notes: Some("updated".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value, serde_json::json!({ "notes": "updated" }));
    }
}
