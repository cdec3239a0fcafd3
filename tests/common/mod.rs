//! Shared fixtures for the wiremock-backed tests
#![allow(dead_code)]

use qfolders::auth::{AuthUser, Session};
use qfolders::Qfolders;
use serde_json::{json, Value};
use uuid::Uuid;

pub const TEST_ANON_KEY: &str = "test-anon-key";
pub const TEST_ACCESS_TOKEN: &str = "test-access-token";

/// A client pointed at the mock server
pub fn test_client(server_uri: &str) -> Qfolders {
    Qfolders::new(server_uri, TEST_ANON_KEY)
}

/// A session for a fixed test user
pub fn test_session(user_id: Uuid) -> Session {
    Session {
        access_token: TEST_ACCESS_TOKEN.to_string(),
        refresh_token: "test-refresh-token".to_string(),
        token_type: "bearer".to_string(),
        expires_in: 3600,
        expires_at: None,
        user: AuthUser {
            id: user_id,
            email: Some("user-a@example.com".to_string()),
            email_confirmed_at: None,
            last_sign_in_at: None,
            created_at: None,
            updated_at: None,
            role: Some("authenticated".to_string()),
        },
    }
}

/// A folder row as PostgREST would return it
pub fn folder_json(id: Uuid, user_id: Uuid, name: &str) -> Value {
    json!({
        "id": id,
        "user_id": user_id,
        "name": name,
        "created_at": "2026-08-01T10:00:00Z",
        "last_accessed": "2026-08-01T10:00:00Z",
        "last_updated": "2026-08-01T10:00:00Z",
    })
}

/// A question row as PostgREST would return it
pub fn question_json(id: Uuid, user_id: Uuid, folder_id: Uuid, title: &str) -> Value {
    json!({
        "id": id,
        "user_id": user_id,
        "folder_id": folder_id,
        "title": title,
        "description": null,
        "notes": null,
        "links": null,
        "code": null,
        "created_at": "2026-08-01T10:05:00Z",
        "star1": false,
        "star2": false,
        "star3": false,
        "is_completed": false,
        "pdf_file_name": null,
        "pdf_file_path": null,
        "pdf_file_size": null,
        "pdf_file_uploaded_at": null,
        "last_updated": "2026-08-01T10:05:00Z",
    })
}
