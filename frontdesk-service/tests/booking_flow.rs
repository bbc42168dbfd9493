mod common;

use chrono::{Duration, Utc};
use common::TestApp;
use rust_decimal::Decimal;
use std::str::FromStr;

fn date(offset_days: i64) -> String {
    (Utc::now().date_naive() + Duration::days(offset_days))
        .format("%Y-%m-%d")
        .to_string()
}

async fn create_reservation(
    app: &TestApp,
    client_id: &str,
    room_id: &str,
    check_in: &str,
    check_out: &str,
    status: &str,
) -> reqwest::Response {
    app.client
        .post(format!("{}/reservations", app.address))
        .json(&serde_json::json!({
            "client_id": client_id,
            "room_id": room_id,
            "check_in": check_in,
            "check_out": check_out,
            "status": status
        }))
        .send()
        .await
        .expect("Failed to create reservation")
}

fn total_amount(invoice: &serde_json::Value) -> Decimal {
    Decimal::from_str(invoice["total_amount"].as_str().expect("total_amount set"))
        .expect("total_amount parses")
}

#[tokio::test]
async fn confirmed_stay_derives_invoice_and_occupies_room() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    let room_id = app.create_room("101", "50000").await;
    let client_id = app.create_client("guest1@example.com").await;

    let response =
        create_reservation(&app, &client_id, &room_id, &date(0), &date(2), "confirmed").await;
    assert_eq!(response.status(), 201);
    let reservation: serde_json::Value = response.json().await.unwrap();
    let reservation_id = reservation["reservation_id"].as_str().unwrap();

    // Two nights at 50000
    let response = app
        .client
        .get(format!(
            "{}/reservations/{}/invoice",
            app.address, reservation_id
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let invoice: serde_json::Value = response.json().await.unwrap();
    assert_eq!(total_amount(&invoice), Decimal::from(100_000));
    assert_eq!(invoice["status"], "unpaid");

    // Confirmed stay covering today marks the room occupied
    let response = app
        .client
        .get(format!("{}/rooms/{}", app.address, room_id))
        .send()
        .await
        .unwrap();
    let room: serde_json::Value = response.json().await.unwrap();
    assert_eq!(room["status"], "occupied");

    app.cleanup().await;
}

#[tokio::test]
async fn same_day_checkout_still_bills_one_night() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    let room_id = app.create_room("102", "30000").await;
    let client_id = app.create_client("guest2@example.com").await;

    // check_in == check_out is rejected, so the shortest billable stay is
    // one night
    let response =
        create_reservation(&app, &client_id, &room_id, &date(1), &date(2), "pending").await;
    assert_eq!(response.status(), 201);
    let reservation: serde_json::Value = response.json().await.unwrap();
    let reservation_id = reservation["reservation_id"].as_str().unwrap();

    let response = app
        .client
        .get(format!(
            "{}/reservations/{}/invoice",
            app.address, reservation_id
        ))
        .send()
        .await
        .unwrap();
    let invoice: serde_json::Value = response.json().await.unwrap();
    assert_eq!(total_amount(&invoice), Decimal::from(30_000));

    app.cleanup().await;
}

#[tokio::test]
async fn invoice_total_is_frozen_after_first_computation() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    let room_id = app.create_room("103", "40000").await;
    let client_id = app.create_client("guest3@example.com").await;

    let response =
        create_reservation(&app, &client_id, &room_id, &date(1), &date(3), "pending").await;
    assert_eq!(response.status(), 201);
    let reservation: serde_json::Value = response.json().await.unwrap();
    let reservation_id = reservation["reservation_id"].as_str().unwrap();

    // Extend the stay; the invoiced amount stays at the original two nights
    let response = app
        .client
        .put(format!("{}/reservations/{}", app.address, reservation_id))
        .json(&serde_json::json!({ "check_out": date(6) }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let response = app
        .client
        .get(format!(
            "{}/reservations/{}/invoice",
            app.address, reservation_id
        ))
        .send()
        .await
        .unwrap();
    let invoice: serde_json::Value = response.json().await.unwrap();
    assert_eq!(total_amount(&invoice), Decimal::from(80_000));

    app.cleanup().await;
}

#[tokio::test]
async fn pending_reservation_leaves_room_free() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    let room_id = app.create_room("104", "25000").await;
    let client_id = app.create_client("guest4@example.com").await;

    let response =
        create_reservation(&app, &client_id, &room_id, &date(0), &date(2), "pending").await;
    assert_eq!(response.status(), 201);

    let response = app
        .client
        .get(format!("{}/rooms/{}", app.address, room_id))
        .send()
        .await
        .unwrap();
    let room: serde_json::Value = response.json().await.unwrap();
    assert_eq!(room["status"], "free");

    app.cleanup().await;
}

#[tokio::test]
async fn cancelling_active_reservation_frees_room() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    let room_id = app.create_room("105", "25000").await;
    let client_id = app.create_client("guest5@example.com").await;

    let response =
        create_reservation(&app, &client_id, &room_id, &date(0), &date(2), "confirmed").await;
    assert_eq!(response.status(), 201);
    let reservation: serde_json::Value = response.json().await.unwrap();
    let reservation_id = reservation["reservation_id"].as_str().unwrap();

    let response = app
        .client
        .put(format!(
            "{}/reservations/{}/status",
            app.address, reservation_id
        ))
        .json(&serde_json::json!({ "status": "cancelled" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let response = app
        .client
        .get(format!("{}/rooms/{}", app.address, room_id))
        .send()
        .await
        .unwrap();
    let room: serde_json::Value = response.json().await.unwrap();
    assert_eq!(room["status"], "free");

    app.cleanup().await;
}

#[tokio::test]
async fn deleting_active_reservation_frees_room() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    let room_id = app.create_room("106", "25000").await;
    let client_id = app.create_client("guest6@example.com").await;

    let response =
        create_reservation(&app, &client_id, &room_id, &date(0), &date(2), "confirmed").await;
    assert_eq!(response.status(), 201);
    let reservation: serde_json::Value = response.json().await.unwrap();
    let reservation_id = reservation["reservation_id"].as_str().unwrap();

    let response = app
        .client
        .delete(format!("{}/reservations/{}", app.address, reservation_id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 204);

    let response = app
        .client
        .get(format!("{}/rooms/{}", app.address, room_id))
        .send()
        .await
        .unwrap();
    let room: serde_json::Value = response.json().await.unwrap();
    assert_eq!(room["status"], "free");

    app.cleanup().await;
}

#[tokio::test]
async fn reassigning_to_unknown_client_is_not_found() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    let room_id = app.create_room("108", "25000").await;
    let client_id = app.create_client("guest8@example.com").await;

    let response =
        create_reservation(&app, &client_id, &room_id, &date(1), &date(3), "pending").await;
    assert_eq!(response.status(), 201);
    let reservation: serde_json::Value = response.json().await.unwrap();
    let reservation_id = reservation["reservation_id"].as_str().unwrap();

    let response = app
        .client
        .put(format!("{}/reservations/{}", app.address, reservation_id))
        .json(&serde_json::json!({ "client_id": uuid::Uuid::new_v4() }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);

    app.cleanup().await;
}

#[tokio::test]
async fn moving_reservation_frees_the_vacated_room() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    let room_a = app.create_room("109", "25000").await;
    let room_b = app.create_room("110", "25000").await;
    let client_id = app.create_client("guest9@example.com").await;

    let response =
        create_reservation(&app, &client_id, &room_a, &date(0), &date(2), "confirmed").await;
    assert_eq!(response.status(), 201);
    let reservation: serde_json::Value = response.json().await.unwrap();
    let reservation_id = reservation["reservation_id"].as_str().unwrap();

    let response = app
        .client
        .put(format!("{}/reservations/{}", app.address, reservation_id))
        .json(&serde_json::json!({ "room_id": room_b }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    for (room_id, expected) in [(&room_a, "free"), (&room_b, "occupied")] {
        let response = app
            .client
            .get(format!("{}/rooms/{}", app.address, room_id))
            .send()
            .await
            .unwrap();
        let room: serde_json::Value = response.json().await.unwrap();
        assert_eq!(room["status"], expected, "room {room_id}");
    }

    app.cleanup().await;
}

#[tokio::test]
async fn maintenance_room_is_never_resynced() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    let room_id = app.create_room("107", "25000").await;
    let client_id = app.create_client("guest7@example.com").await;

    let response = app
        .client
        .put(format!("{}/rooms/{}/status", app.address, room_id))
        .json(&serde_json::json!({ "status": "maintenance" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let response =
        create_reservation(&app, &client_id, &room_id, &date(0), &date(2), "confirmed").await;
    assert_eq!(response.status(), 201);

    let response = app
        .client
        .get(format!("{}/rooms/{}", app.address, room_id))
        .send()
        .await
        .unwrap();
    let room: serde_json::Value = response.json().await.unwrap();
    assert_eq!(room["status"], "maintenance");

    app.cleanup().await;
}
