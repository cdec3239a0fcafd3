mod common;

use common::{folder_json, test_client, test_session, TEST_ACCESS_TOKEN, TEST_ANON_KEY};
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn create_folder_inserts_under_the_callers_token() {
    let mock_server = MockServer::start().await;
    let user_id = Uuid::new_v4();
    let folder_id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path("/rest/v1/folders"))
        .and(header("apikey", TEST_ANON_KEY))
        .and(header(
            "Authorization",
            format!("Bearer {}", TEST_ACCESS_TOKEN).as_str(),
        ))
        .and(body_partial_json(json!({
            "user_id": user_id,
            "name": "Algorithms"
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!([folder_json(folder_id, user_id, "Algorithms")])),
        )
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let session = test_session(user_id);

    let folder = client
        .notes(&session)
        .create_folder("  Algorithms  ")
        .await
        .expect("create should succeed");

    assert_eq!(folder.id, folder_id);
    assert_eq!(folder.user_id, user_id);
    assert_eq!(folder.name, "Algorithms");
}

#[tokio::test]
async fn create_folder_rejects_an_empty_name_without_a_request() {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server.uri());
    let session = test_session(Uuid::new_v4());

    let result = client.notes(&session).create_folder("   ").await;
    assert!(matches!(result, Err(qfolders::error::Error::General(_))));
}

#[tokio::test]
async fn list_folders_orders_by_recency() {
    let mock_server = MockServer::start().await;
    let user_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/folders"))
        .and(query_param("select", "*"))
        .and(query_param("order", "created_at.desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            folder_json(Uuid::new_v4(), user_id, "Algorithms"),
            folder_json(Uuid::new_v4(), user_id, "System Design"),
        ])))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let session = test_session(user_id);

    let folders = client
        .notes(&session)
        .list_folders()
        .await
        .expect("list should succeed");

    assert_eq!(folders.len(), 2);
    assert_eq!(folders[0].name, "Algorithms");
    assert_eq!(folders[1].name, "System Design");
}

#[tokio::test]
async fn row_security_filtering_yields_an_empty_list_not_an_error() {
    let mock_server = MockServer::start().await;

    // Another user's folders exist, but the policies filter them out: the
    // response is an empty set, never an authorization error.
    Mock::given(method("GET"))
        .and(path("/rest/v1/folders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let session = test_session(Uuid::new_v4());

    let folders = client
        .notes(&session)
        .list_folders()
        .await
        .expect("list should succeed");
    assert!(folders.is_empty());
}

#[tokio::test]
async fn get_folder_returns_none_when_filtered_out() {
    let mock_server = MockServer::start().await;
    let folder_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/folders"))
        .and(query_param("id", format!("eq.{}", folder_id).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let session = test_session(Uuid::new_v4());

    let folder = client
        .notes(&session)
        .get_folder(folder_id)
        .await
        .expect("get should succeed");
    assert!(folder.is_none());
}

#[tokio::test]
async fn delete_folder_removes_a_visible_folder() {
    let mock_server = MockServer::start().await;
    let user_id = Uuid::new_v4();
    let folder_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/folders"))
        .and(query_param("id", format!("eq.{}", folder_id).as_str()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([folder_json(folder_id, user_id, "Algorithms")])),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/folders"))
        .and(query_param("id", format!("eq.{}", folder_id).as_str()))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let session = test_session(user_id);

    let deleted = client
        .notes(&session)
        .delete_folder(folder_id)
        .await
        .expect("delete should succeed");
    assert!(deleted);
}

#[tokio::test]
async fn delete_folder_is_a_no_op_for_an_invisible_folder() {
    let mock_server = MockServer::start().await;
    let folder_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/folders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    // No DELETE mock mounted: issuing one would fail the test
    let client = test_client(&mock_server.uri());
    let session = test_session(Uuid::new_v4());

    let deleted = client
        .notes(&session)
        .delete_folder(folder_id)
        .await
        .expect("delete should succeed");
    assert!(!deleted);
}

#[tokio::test]
async fn touch_folder_bumps_last_accessed() {
    let mock_server = MockServer::start().await;
    let folder_id = Uuid::new_v4();

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/folders"))
        .and(query_param("id", format!("eq.{}", folder_id).as_str()))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let session = test_session(Uuid::new_v4());

    client
        .notes(&session)
        .touch_folder(folder_id)
        .await
        .expect("touch should succeed");
}
