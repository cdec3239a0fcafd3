#![cfg(feature = "integration-tests")]

//! End-to-end tests against a real Supabase project.
//!
//! Requires SUPABASE_URL, SUPABASE_ANON_KEY, SUPABASE_TEST_EMAIL and
//! SUPABASE_TEST_PASSWORD (a confirmed test account) in the environment or a
//! .env file, with the migration set applied:
//!
//!     cargo test --features integration-tests

use dotenvy::dotenv;
use qfolders::notes::QuestionDraft;
use qfolders::Qfolders;
use std::env;

struct TestConfig {
    url: String,
    key: String,
    email: String,
    password: String,
}

fn config() -> TestConfig {
    dotenv().ok();
    TestConfig {
        url: env::var("SUPABASE_URL").expect("SUPABASE_URL must be set for integration tests"),
        key: env::var("SUPABASE_ANON_KEY")
            .expect("SUPABASE_ANON_KEY must be set for integration tests"),
        email: env::var("SUPABASE_TEST_EMAIL")
            .expect("SUPABASE_TEST_EMAIL must be set for integration tests"),
        password: env::var("SUPABASE_TEST_PASSWORD")
            .expect("SUPABASE_TEST_PASSWORD must be set for integration tests"),
    }
}

#[tokio::test]
async fn folder_question_round_trip() {
    let config = config();
    let client = Qfolders::new(&config.url, &config.key);

    let session = client
        .auth()
        .sign_in(&config.email, &config.password)
        .await
        .expect("sign in should succeed");
    let notes = client.notes(&session);

    let folder = notes
        .create_folder("integration-test-folder")
        .await
        .expect("create folder");

    let question = notes
        .create_question(
            folder.id,
            &QuestionDraft {
                title: "integration-test-question".to_string(),
                links: Some("https://example.com/a\nhttps://example.com/b".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("create question");

    assert_eq!(question.folder_id, folder.id);
    assert_eq!(question.user_id, session.user_id());
    assert_eq!(
        question.links.as_deref(),
        Some(&["https://example.com/a".to_string(), "https://example.com/b".to_string()][..])
    );

    let listed = notes.list_questions(folder.id).await.expect("list questions");
    assert!(listed.iter().any(|q| q.id == question.id));

    let starred = notes
        .set_stars(question.id, true, false, false)
        .await
        .expect("set stars");
    assert!(starred.star1);

    let contribution = notes.record_today().await.expect("record contribution");
    assert!(contribution.contribution_count >= 1);

    // Cascade removes the question with its folder
    let deleted = notes.delete_folder(folder.id).await.expect("delete folder");
    assert!(deleted);
    let remaining = notes.list_questions(folder.id).await.expect("list questions");
    assert!(remaining.is_empty());
}
