//! Catalogue maintenance and public browsing against PostgreSQL.

use http::StatusCode;
use serde_json::json;

use pitchhub_entity::user::UserRole;

use crate::helpers::{TestApp, days_ahead};

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_admin_builds_catalogue() {
    let app = TestApp::new().await;
    let admin = app.user_token("admin", UserRole::Admin).await;
    let (pitch_id, _) = app.seed_pitch(&admin).await;

    let search = app.request("GET", "/api/pitches?q=phu", None, None).await;
    assert_eq!(search.status, StatusCode::OK);
    assert_eq!(search.data()["total_items"], 1);

    let detail = app
        .request("GET", &format!("/api/pitches/{pitch_id}"), None, None)
        .await;
    assert_eq!(detail.status, StatusCode::OK);
    assert_eq!(detail.data()["slots"].as_array().unwrap().len(), 1);

    let board = app
        .request(
            "GET",
            &format!("/api/pitches/{pitch_id}/slots?date={}", days_ahead(1)),
            None,
            None,
        )
        .await;
    assert_eq!(board.status, StatusCode::OK);
    assert_eq!(board.data()[0]["available"], true);
    assert_eq!(board.data()[0]["duration_hours"], "1.50");
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_price_range_filter() {
    let app = TestApp::new().await;
    let admin = app.user_token("admin", UserRole::Admin).await;
    app.seed_pitch(&admin).await;

    let cheap = app
        .request("GET", "/api/pitches?price_range=0-100000", None, None)
        .await;
    assert_eq!(cheap.data()["total_items"], 0);

    let mid = app
        .request("GET", "/api/pitches?price_range=100000-200000", None, None)
        .await;
    assert_eq!(mid.data()["total_items"], 1);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_user_cannot_edit_catalogue() {
    let app = TestApp::new().await;
    let user = app.user_token("minh", UserRole::User).await;

    let response = app
        .request(
            "POST",
            "/api/admin/pitch-types",
            Some(json!({ "name": "7-a-side" })),
            Some(&user),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_inverted_time_slot() {
    let app = TestApp::new().await;
    let admin = app.user_token("admin", UserRole::Admin).await;

    let response = app
        .request(
            "POST",
            "/api/admin/time-slots",
            Some(json!({ "name": "Broken", "start_time": "10:00:00", "end_time": "09:00:00" })),
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["details"]["field"], "end_time");
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_favorite_toggle() {
    let app = TestApp::new().await;
    let admin = app.user_token("admin", UserRole::Admin).await;
    let user = app.user_token("minh", UserRole::User).await;
    let (pitch_id, _) = app.seed_pitch(&admin).await;
    let uri = format!("/api/pitches/{pitch_id}/favorite");

    let first = app.request("POST", &uri, None, Some(&user)).await;
    assert_eq!(first.data()["favorited"], true);
    let listed = app.request("GET", "/api/favorites", None, Some(&user)).await;
    assert_eq!(listed.data().as_array().unwrap().len(), 1);

    let second = app.request("POST", &uri, None, Some(&user)).await;
    assert_eq!(second.data()["favorited"], false);
    let listed = app.request("GET", "/api/favorites", None, Some(&user)).await;
    assert!(listed.data().as_array().unwrap().is_empty());
}

/// Three pitches sharing the evening slot: Binh Thanh 200k, An Phu 90k, Chu Van An 150k.
async fn seed_three_pitches(app: &TestApp, admin: &str) -> [(String, String); 3] {
    let (type_id, slot_id) = app.seed_type_and_slot(admin).await;
    [
        app.add_pitch(admin, &type_id, &slot_id, "Binh Thanh", "12 Dien Bien Phu", "200000")
            .await,
        app.add_pitch(admin, &type_id, &slot_id, "An Phu", "3 Song Hanh", "90000")
            .await,
        app.add_pitch(admin, &type_id, &slot_id, "Chu Van An", "8 Le Loi", "150000")
            .await,
    ]
}

fn names(page: &serde_json::Value) -> Vec<String> {
    page["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_sort_by_price_and_name() {
    let app = TestApp::new().await;
    let admin = app.user_token("admin", UserRole::Admin).await;
    seed_three_pitches(&app, &admin).await;

    let by_price = app.request("GET", "/api/pitches?sort=price", None, None).await;
    assert_eq!(by_price.status, StatusCode::OK);
    assert_eq!(names(by_price.data()), ["An Phu", "Chu Van An", "Binh Thanh"]);

    let by_price_desc = app.request("GET", "/api/pitches?sort=-price", None, None).await;
    assert_eq!(names(by_price_desc.data()), ["Binh Thanh", "Chu Van An", "An Phu"]);

    let by_name_desc = app.request("GET", "/api/pitches?sort=-name", None, None).await;
    assert_eq!(names(by_name_desc.data()), ["Chu Van An", "Binh Thanh", "An Phu"]);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_keyword_matches_name_or_address_ignoring_case() {
    let app = TestApp::new().await;
    let admin = app.user_token("admin", UserRole::Admin).await;
    seed_three_pitches(&app, &admin).await;

    let by_name = app.request("GET", "/api/pitches?q=BINH", None, None).await;
    assert_eq!(names(by_name.data()), ["Binh Thanh"]);

    let by_address = app.request("GET", "/api/pitches?q=song%20hanh", None, None).await;
    assert_eq!(names(by_address.data()), ["An Phu"]);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_booking_date_excludes_booked_and_unavailable_pitches() {
    let app = TestApp::new().await;
    let admin = app.user_token("admin", UserRole::Admin).await;
    let user = app.user_token("minh", UserRole::User).await;
    let [(booked_id, booked_slot), (closed_id, _), _] = seed_three_pitches(&app, &admin).await;
    let date = days_ahead(2);

    let booked = app
        .request(
            "POST",
            "/api/bookings",
            Some(json!({
                "pitch_id": booked_id,
                "time_slot_id": booked_slot,
                "booking_date": date,
            })),
            Some(&user),
        )
        .await;
    assert_eq!(booked.status, StatusCode::CREATED, "{}", booked.body);

    let closed = app
        .request(
            "PUT",
            &format!("/api/admin/pitches/{closed_id}"),
            Some(json!({ "is_available": false })),
            Some(&admin),
        )
        .await;
    assert_eq!(closed.status, StatusCode::OK, "{}", closed.body);

    let on_date = app
        .request("GET", &format!("/api/pitches?booking_date={date}"), None, None)
        .await;
    assert_eq!(on_date.status, StatusCode::OK);
    assert_eq!(names(on_date.data()), ["Chu Van An"]);

    // The booked pitch is still free on other days.
    let other_day = app
        .request(
            "GET",
            &format!("/api/pitches?booking_date={}&sort=name", days_ahead(3)),
            None,
            None,
        )
        .await;
    assert_eq!(names(other_day.data()), ["Binh Thanh", "Chu Van An"]);
}
