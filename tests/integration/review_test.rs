//! Review comment threads against PostgreSQL.

use http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use pitchhub_database::repositories::ReviewRepository;
use pitchhub_entity::review::CreateReview;
use pitchhub_entity::user::UserRole;

use crate::helpers::TestApp;

/// Insert a review straight into the table, skipping the booking gate.
async fn seed_review(app: &TestApp, user_id: Uuid, pitch_id: &str) -> String {
    ReviewRepository::new(app.db_pool.clone())
        .create(&CreateReview {
            user_id,
            pitch_id: pitch_id.parse().unwrap(),
            rating: 4,
            content: "Good lights".into(),
        })
        .await
        .expect("Failed to seed review")
        .id
        .to_string()
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_comment_and_reply_thread() {
    let app = TestApp::new().await;
    let admin = app.user_token("admin", UserRole::Admin).await;
    let user_id = app.create_user("minh", UserRole::User).await;
    let user = app.login("minh").await;
    let (pitch_id, _) = app.seed_pitch(&admin).await;
    let review_id = seed_review(&app, user_id, &pitch_id).await;
    let uri = format!("/api/reviews/{review_id}/comments");

    let top = app
        .request("POST", &uri, Some(json!({ "content": "  Parking?  " })), Some(&user))
        .await;
    assert_eq!(top.status, StatusCode::CREATED, "{}", top.body);
    assert_eq!(top.data()["content"], "Parking?");
    let top_id = top.data()["id"].as_str().unwrap().to_string();

    let reply = app
        .request(
            "POST",
            &uri,
            Some(json!({ "content": "Free after 17:00", "parent_id": top_id })),
            Some(&admin),
        )
        .await;
    assert_eq!(reply.status, StatusCode::CREATED, "{}", reply.body);
    assert_eq!(reply.data()["parent_id"], top_id.as_str());

    let thread = app.request("GET", &uri, None, None).await;
    assert_eq!(thread.status, StatusCode::OK);
    let roots = thread.data().as_array().unwrap();
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0]["username"], "minh");
    assert_eq!(roots[0]["replies"][0]["content"], "Free after 17:00");
    assert_eq!(roots[0]["replies"][0]["username"], "admin");
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_reply_must_stay_on_its_review() {
    let app = TestApp::new().await;
    let admin = app.user_token("admin", UserRole::Admin).await;
    let first_id = app.create_user("minh", UserRole::User).await;
    let second_id = app.create_user("lan", UserRole::User).await;
    let user = app.login("minh").await;
    let (pitch_id, _) = app.seed_pitch(&admin).await;
    let first = seed_review(&app, first_id, &pitch_id).await;
    let second = seed_review(&app, second_id, &pitch_id).await;

    let on_first = app
        .request(
            "POST",
            &format!("/api/reviews/{first}/comments"),
            Some(json!({ "content": "Agreed" })),
            Some(&user),
        )
        .await;
    let parent = on_first.data()["id"].as_str().unwrap().to_string();

    let crossed = app
        .request(
            "POST",
            &format!("/api/reviews/{second}/comments"),
            Some(json!({ "content": "Wrong thread", "parent_id": parent })),
            Some(&user),
        )
        .await;
    assert_eq!(crossed.status, StatusCode::BAD_REQUEST);
    assert_eq!(crossed.body["details"]["field"], "parent_id");
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_comment_access() {
    let app = TestApp::new().await;
    let guest = app.user_token("visitor", UserRole::Guest).await;
    let user = app.user_token("minh", UserRole::User).await;
    let body = json!({ "content": "Hello" });

    let missing = format!("/api/reviews/{}/comments", Uuid::now_v7());
    let not_found = app.request("GET", &missing, None, None).await;
    assert_eq!(not_found.status, StatusCode::NOT_FOUND);
    let not_found = app
        .request("POST", &missing, Some(body.clone()), Some(&user))
        .await;
    assert_eq!(not_found.status, StatusCode::NOT_FOUND);

    let forbidden = app.request("POST", &missing, Some(body), Some(&guest)).await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);
}
