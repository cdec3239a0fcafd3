mod common;

use chrono::NaiveDate;
use common::{test_client, test_session};
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn contribution_json(user_id: Uuid, date: &str, count: i32) -> serde_json::Value {
    json!({
        "id": Uuid::new_v4(),
        "user_id": user_id,
        "contribution_date": date,
        "contribution_count": count,
        "created_at": "2026-08-06T09:00:00Z",
        "updated_at": "2026-08-06T09:00:00Z",
    })
}

#[tokio::test]
async fn record_contribution_calls_the_upsert_function() {
    let mock_server = MockServer::start().await;
    let user_id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path("/rest/v1/rpc/record_contribution"))
        .and(body_json(json!({ "day": "2026-08-06" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([contribution_json(user_id, "2026-08-06", 1)])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let session = test_session(user_id);

    let day = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
    let contribution = client
        .notes(&session)
        .record_contribution(day)
        .await
        .expect("record should succeed");

    assert_eq!(contribution.contribution_date, day);
    assert_eq!(contribution.contribution_count, 1);
}

#[tokio::test]
async fn repeated_same_day_activity_merges_into_one_incremented_row() {
    let mock_server = MockServer::start().await;
    let user_id = Uuid::new_v4();

    // The database function resolves the conflict by incrementing the
    // existing row, so the second call still yields exactly one row.
    Mock::given(method("POST"))
        .and(path("/rest/v1/rpc/record_contribution"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([contribution_json(user_id, "2026-08-06", 2)])),
        )
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let session = test_session(user_id);

    let day = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
    let contribution = client
        .notes(&session)
        .record_contribution(day)
        .await
        .expect("record should succeed");

    assert_eq!(contribution.contribution_count, 2);
}

#[tokio::test]
async fn list_contributions_filters_the_date_range() {
    let mock_server = MockServer::start().await;
    let user_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/contributions"))
        .and(query_param("contribution_date", "gte.2026-08-01"))
        .and(query_param("order", "contribution_date.asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            contribution_json(user_id, "2026-08-01", 3),
            contribution_json(user_id, "2026-08-05", 1),
        ])))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let session = test_session(user_id);

    let from = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
    let to = NaiveDate::from_ymd_opt(2026, 8, 31).unwrap();

    let contributions = client
        .notes(&session)
        .list_contributions(from, to)
        .await
        .expect("list should succeed");

    assert_eq!(contributions.len(), 2);
    assert_eq!(contributions[0].contribution_count, 3);
    assert_eq!(contributions[1].contribution_date, NaiveDate::from_ymd_opt(2026, 8, 5).unwrap());
}
