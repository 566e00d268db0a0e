//! Booking lifecycle against PostgreSQL.

use http::StatusCode;
use serde_json::json;

use pitchhub_entity::user::UserRole;

use crate::helpers::{TestApp, days_ahead};

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_book_approve_review() {
    let app = TestApp::new().await;
    let admin = app.user_token("admin", UserRole::Admin).await;
    let user = app.user_token("minh", UserRole::User).await;
    let (pitch_id, slot_id) = app.seed_pitch(&admin).await;

    let created = app
        .request(
            "POST",
            "/api/bookings",
            Some(json!({
                "pitch_id": pitch_id,
                "time_slot_id": slot_id,
                "booking_date": days_ahead(2),
                "note": "  bring bibs  ",
            })),
            Some(&user),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED, "{}", created.body);
    let booking = &created.data()["booking"];
    assert_eq!(booking["final_price"], "180000.00");
    assert_eq!(booking["note"], "bring bibs");
    let booking_id = booking["id"].as_str().unwrap().to_string();

    let review = json!({ "rating": 5, "content": "Great turf" });
    let early = app
        .request(
            "POST",
            &format!("/api/pitches/{pitch_id}/reviews"),
            Some(review.clone()),
            Some(&user),
        )
        .await;
    assert_eq!(early.status, StatusCode::BAD_REQUEST);

    let approved = app
        .request(
            "POST",
            &format!("/api/admin/bookings/{booking_id}/approve"),
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(approved.status, StatusCode::OK, "{}", approved.body);

    let reviewed = app
        .request(
            "POST",
            &format!("/api/pitches/{pitch_id}/reviews"),
            Some(review),
            Some(&user),
        )
        .await;
    assert_eq!(reviewed.status, StatusCode::CREATED, "{}", reviewed.body);

    let reviews = app
        .request("GET", &format!("/api/pitches/{pitch_id}/reviews"), None, None)
        .await;
    assert_eq!(reviews.data()["total_items"], 1);

    let subjects: Vec<String> = app
        .mailer
        .sent()
        .await
        .into_iter()
        .map(|m| m.subject)
        .collect();
    assert!(subjects.iter().any(|s| s.starts_with("Booking received")));
    assert!(subjects.iter().any(|s| s.starts_with("Booking approved")));
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_second_booking_for_slot_is_refused() {
    let app = TestApp::new().await;
    let admin = app.user_token("admin", UserRole::Admin).await;
    let first = app.user_token("minh", UserRole::User).await;
    let second = app.user_token("lan", UserRole::User).await;
    let (pitch_id, slot_id) = app.seed_pitch(&admin).await;
    let body = json!({
        "pitch_id": pitch_id,
        "time_slot_id": slot_id,
        "booking_date": days_ahead(3),
    });

    let ok = app
        .request("POST", "/api/bookings", Some(body.clone()), Some(&first))
        .await;
    assert_eq!(ok.status, StatusCode::CREATED, "{}", ok.body);

    let taken = app
        .request("POST", "/api/bookings", Some(body), Some(&second))
        .await;
    assert_eq!(taken.status, StatusCode::BAD_REQUEST);
    assert_eq!(taken.body["details"]["field"], "time_slot");
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_voucher_applies_once_per_user() {
    let app = TestApp::new().await;
    let admin = app.user_token("admin", UserRole::Admin).await;
    let user = app.user_token("minh", UserRole::User).await;
    let (pitch_id, slot_id) = app.seed_pitch(&admin).await;

    let voucher = app
        .request(
            "POST",
            "/api/admin/vouchers",
            Some(json!({ "code": "SUMMER10", "discount_percent": 10 })),
            Some(&admin),
        )
        .await;
    assert_eq!(voucher.status, StatusCode::CREATED, "{}", voucher.body);

    let book = |days: i64| {
        json!({
            "pitch_id": pitch_id,
            "time_slot_id": slot_id,
            "booking_date": days_ahead(days),
            "voucher_code": "SUMMER10",
        })
    };

    let first = app
        .request("POST", "/api/bookings", Some(book(1)), Some(&user))
        .await;
    assert_eq!(first.status, StatusCode::CREATED, "{}", first.body);
    assert_eq!(first.data()["booking"]["final_price"], "162000.00");
    assert_eq!(first.data()["booking"]["voucher_code"], "SUMMER10");

    let second = app
        .request("POST", "/api/bookings", Some(book(2)), Some(&user))
        .await;
    assert_eq!(second.status, StatusCode::CREATED, "{}", second.body);
    assert_eq!(second.data()["booking"]["final_price"], "180000.00");
    assert_eq!(second.data()["warnings"].as_array().unwrap().len(), 1);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_cancel_frees_slot() {
    let app = TestApp::new().await;
    let admin = app.user_token("admin", UserRole::Admin).await;
    let user = app.user_token("minh", UserRole::User).await;
    let (pitch_id, slot_id) = app.seed_pitch(&admin).await;
    let body = json!({
        "pitch_id": pitch_id,
        "time_slot_id": slot_id,
        "booking_date": days_ahead(5),
    });

    let created = app
        .request("POST", "/api/bookings", Some(body.clone()), Some(&user))
        .await;
    let booking_id = created.data()["booking"]["id"].as_str().unwrap().to_string();

    let cancelled = app
        .request(
            "POST",
            &format!("/api/bookings/{booking_id}/cancel"),
            None,
            Some(&user),
        )
        .await;
    assert_eq!(cancelled.status, StatusCode::OK);
    assert_eq!(cancelled.data()["status"], "cancelled");

    let again = app
        .request("POST", "/api/bookings", Some(body), Some(&user))
        .await;
    assert_eq!(again.status, StatusCode::CREATED, "{}", again.body);
}
