//! Registration, activation and login against PostgreSQL.

use http::StatusCode;
use serde_json::json;

use pitchhub_entity::user::UserRole;

use crate::helpers::{PASSWORD, TestApp};

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_register_activate_login() {
    let app = TestApp::new().await;

    let registered = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "username": "tuan",
                "email": "Tuan@Example.com",
                "full_name": "Tuan Nguyen",
                "password": PASSWORD,
            })),
            None,
        )
        .await;
    assert_eq!(registered.status, StatusCode::CREATED, "{}", registered.body);
    assert_eq!(registered.data()["is_active"], false);
    assert_eq!(registered.data()["email"], "tuan@example.com");

    let early = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "tuan", "password": PASSWORD })),
            None,
        )
        .await;
    assert_eq!(early.status, StatusCode::UNAUTHORIZED);

    let sent = app.mailer.sent().await;
    assert_eq!(sent.len(), 1);
    let token = sent[0]
        .body
        .split("/api/auth/activate/")
        .nth(1)
        .and_then(|rest| rest.split_whitespace().next())
        .expect("activation link in e-mail")
        .to_string();

    let activated = app
        .request("GET", &format!("/api/auth/activate/{token}"), None, None)
        .await;
    assert_eq!(activated.status, StatusCode::OK, "{}", activated.body);

    let access = app.login("tuan").await;
    let me = app.request("GET", "/api/auth/me", None, Some(&access)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.data()["username"], "tuan");
    assert_eq!(me.data()["role"], "user");
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_duplicate_username_conflicts() {
    let app = TestApp::new().await;
    app.create_user("hoa", UserRole::User).await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "username": "hoa",
                "email": "someone-else@example.com",
                "password": PASSWORD,
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT, "{}", response.body);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_wrong_password() {
    let app = TestApp::new().await;
    app.create_user("binh", UserRole::User).await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "binh", "password": "nope" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_unknown_activation_token() {
    let app = TestApp::new().await;
    let response = app
        .request("GET", "/api/auth/activate/not-a-token", None, None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
