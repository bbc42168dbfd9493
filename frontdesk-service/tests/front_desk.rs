mod common;

use chrono::{Duration, Utc};
use common::TestApp;

fn date(offset_days: i64) -> String {
    (Utc::now().date_naive() + Duration::days(offset_days))
        .format("%Y-%m-%d")
        .to_string()
}

#[tokio::test]
async fn duplicate_room_number_conflicts() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    app.create_room("301", "50000").await;

    let response = app
        .client
        .post(format!("{}/rooms", app.address))
        .json(&serde_json::json!({
            "number": "301",
            "category": "double",
            "price_per_night": "60000",
            "capacity": 3
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 409);

    app.cleanup().await;
}

#[tokio::test]
async fn empty_room_number_fails_validation() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    let response = app
        .client
        .post(format!("{}/rooms", app.address))
        .json(&serde_json::json!({
            "number": "",
            "category": "simple",
            "price_per_night": "50000",
            "capacity": 2
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 422);

    app.cleanup().await;
}

#[tokio::test]
async fn duplicate_client_email_conflicts() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    app.create_client("desk1@example.com").await;

    let response = app
        .client
        .post(format!("{}/clients", app.address))
        .json(&serde_json::json!({
            "first_name": "Other",
            "last_name": "Guest",
            "email": "desk1@example.com",
            "phone": "11111111",
            "id_document": "CNI-OTHER"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 409);

    app.cleanup().await;
}

#[tokio::test]
async fn unknown_room_returns_not_found() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    let response = app
        .client
        .get(format!(
            "{}/rooms/{}",
            app.address,
            uuid::Uuid::new_v4()
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);

    app.cleanup().await;
}

#[tokio::test]
async fn payments_accumulate_without_flipping_invoice_status() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    let room_id = app.create_room("302", "50000").await;
    let client_id = app.create_client("desk2@example.com").await;

    let response = app
        .client
        .post(format!("{}/reservations", app.address))
        .json(&serde_json::json!({
            "client_id": client_id,
            "room_id": room_id,
            "check_in": date(1),
            "check_out": date(3),
            "status": "confirmed"
        }))
        .send()
        .await
        .unwrap();
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
    let invoice_id = invoice["invoice_id"].as_str().unwrap();

    for amount in ["60000", "40000"] {
        let response = app
            .client
            .post(format!("{}/invoices/{}/payments", app.address, invoice_id))
            .json(&serde_json::json!({ "amount": amount, "method": "cash" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 201);
    }

    let response = app
        .client
        .get(format!("{}/invoices/{}/payments", app.address, invoice_id))
        .send()
        .await
        .unwrap();
    let payments: serde_json::Value = response.json().await.unwrap();
    assert_eq!(payments.as_array().unwrap().len(), 2);

    // Fully paid in sums, still unpaid until staff say otherwise
    let response = app
        .client
        .get(format!("{}/invoices/{}", app.address, invoice_id))
        .send()
        .await
        .unwrap();
    let invoice: serde_json::Value = response.json().await.unwrap();
    assert_eq!(invoice["status"], "unpaid");

    let response = app
        .client
        .put(format!("{}/invoices/{}/status", app.address, invoice_id))
        .json(&serde_json::json!({ "status": "paid" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let invoice: serde_json::Value = response.json().await.unwrap();
    assert_eq!(invoice["status"], "paid");

    app.cleanup().await;
}

#[tokio::test]
async fn negative_payment_is_rejected() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    let response = app
        .client
        .post(format!(
            "{}/invoices/{}/payments",
            app.address,
            uuid::Uuid::new_v4()
        ))
        .json(&serde_json::json!({ "amount": "-100", "method": "card" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    app.cleanup().await;
}

#[tokio::test]
async fn staff_user_can_be_registered_and_listed() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    let response = app
        .client
        .post(format!("{}/users", app.address))
        .json(&serde_json::json!({
            "username": "reception1",
            "full_name": "Desk One",
            "email": "reception1@example.com",
            "role": "receptionist"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);

    let response = app
        .client
        .get(format!("{}/users", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let users: serde_json::Value = response.json().await.unwrap();
    assert_eq!(users.as_array().unwrap().len(), 1);
    assert_eq!(users[0]["role"], "receptionist");

    app.cleanup().await;
}

#[tokio::test]
async fn dashboard_reports_occupancy_and_counts() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    let room_a = app.create_room("303", "50000").await;
    app.create_room("304", "50000").await;
    let client_id = app.create_client("desk3@example.com").await;

    let response = app
        .client
        .post(format!("{}/reservations", app.address))
        .json(&serde_json::json!({
            "client_id": client_id,
            "room_id": room_a,
            "check_in": date(0),
            "check_out": date(2),
            "status": "confirmed"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);

    let response = app
        .client
        .get(format!("{}/dashboard", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let stats: serde_json::Value = response.json().await.unwrap();
    assert_eq!(stats["total_rooms"], 2);
    assert_eq!(stats["occupied_rooms"], 1);
    assert_eq!(stats["occupation_rate"], 50.0);
    assert_eq!(stats["total_clients"], 1);
    assert_eq!(stats["upcoming_reservations"], 1);

    app.cleanup().await;
}
