mod common;

use common::{test_client, test_session, TEST_ACCESS_TOKEN, TEST_ANON_KEY};
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn upload_posts_the_object_under_the_callers_token() {
    let mock_server = MockServer::start().await;
    let user_id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path("/storage/v1/object/question-pdfs/notes/solution.pdf"))
        .and(header("apikey", TEST_ANON_KEY))
        .and(header(
            "Authorization",
            format!("Bearer {}", TEST_ACCESS_TOKEN).as_str(),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Key": "question-pdfs/notes/solution.pdf"
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let session = test_session(user_id);

    let object = client
        .storage(&session)
        .from("question-pdfs")
        .upload("notes/solution.pdf", b"%PDF".to_vec())
        .await
        .expect("upload should succeed");

    assert_eq!(object.key, Some("question-pdfs/notes/solution.pdf".to_string()));
}

#[tokio::test]
async fn upload_failure_is_a_storage_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/storage/v1/object/question-pdfs/notes/solution.pdf"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "message": "new row violates row-level security policy"
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let session = test_session(Uuid::new_v4());

    let result = client
        .storage(&session)
        .from("question-pdfs")
        .upload("notes/solution.pdf", b"%PDF".to_vec())
        .await;

    assert!(matches!(result, Err(qfolders::error::Error::Storage(_))));
}

#[tokio::test]
async fn download_returns_the_object_bytes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/storage/v1/object/question-pdfs/notes/solution.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.7".to_vec()))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let session = test_session(Uuid::new_v4());

    let bytes = client
        .storage(&session)
        .from("question-pdfs")
        .download("notes/solution.pdf")
        .await
        .expect("download should succeed");

    assert_eq!(bytes, b"%PDF-1.7");
}

#[tokio::test]
async fn remove_deletes_the_object() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/storage/v1/object/question-pdfs/notes/solution.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Successfully deleted"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let session = test_session(Uuid::new_v4());

    client
        .storage(&session)
        .from("question-pdfs")
        .remove("notes/solution.pdf")
        .await
        .expect("remove should succeed");
}

#[tokio::test]
async fn public_url_points_into_the_bucket() {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server.uri());
    let session = test_session(Uuid::new_v4());

    let storage = client.storage(&session);
    let url = storage.from("question-pdfs").public_url("notes/solution.pdf");

    assert_eq!(
        url,
        format!(
            "{}/storage/v1/object/public/question-pdfs/notes/solution.pdf",
            mock_server.uri()
        )
    );
}
