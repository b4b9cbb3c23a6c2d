//! Integration tests for the internal-order lifecycle: the outbound sibling
//! of the restock flow, with ACCEPTED/REFUSED/CANCELED branches and picked
//! RFIDs recorded on COMPLETED.

mod common;

use axum::http::{Method, StatusCode};
use common::{response_json, TestApp};
use serde_json::json;

const RFID_A: &str = "12345678901234567890123456789016";

async fn create_order(app: &TestApp) -> i32 {
    let payload = json!({
        "issueDate": "2022/04/04 10:00",
        "products": [{ "SKUId": 1, "description": "a product", "price": 10.99, "qty": 3 }],
        "customerId": 1,
    });
    let response = app
        .request(Method::POST, "/api/internalOrders", Some(payload))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    body["id"].as_i64().expect("created order id") as i32
}

#[tokio::test]
async fn create_lands_in_issued() {
    let app = TestApp::new().await;
    let order_id = create_order(&app).await;

    let response = app
        .request(
            Method::GET,
            &format!("/api/internalOrders/{}", order_id),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["state"], "ISSUED");
    assert_eq!(body["customerId"], 1);
    assert_eq!(body["products"][0]["SKUId"], 1);
    assert_eq!(body["products"][0]["qty"], 3);
}

#[tokio::test]
async fn create_rejects_malformed_payloads() {
    let app = TestApp::new().await;

    let cases = [
        json!({
            "issueDate": "not a date",
            "products": [{ "SKUId": 1, "description": "d", "price": 1, "qty": 1 }],
            "customerId": 1,
        }),
        json!({
            "issueDate": "2022/04/04",
            "products": [{ "SKUId": 0, "description": "d", "price": 1, "qty": 1 }],
            "customerId": 1,
        }),
        json!({
            "issueDate": "2022/04/04",
            "products": [{ "SKUId": 1, "description": "d", "price": 0, "qty": 1 }],
            "customerId": 1,
        }),
        json!({
            "issueDate": "2022/04/04",
            "products": [{ "SKUId": 1, "description": "d", "price": 1, "qty": -2 }],
            "customerId": 1,
        }),
    ];

    for payload in cases {
        let response = app
            .request(Method::POST, "/api/internalOrders", Some(payload.clone()))
            .await;
        assert_eq!(
            response.status(),
            StatusCode::UNPROCESSABLE_ENTITY,
            "payload should be rejected: {}",
            payload
        );
    }
}

#[tokio::test]
async fn state_changes_and_filtering() {
    let app = TestApp::new().await;
    let order_id = create_order(&app).await;
    let _other = create_order(&app).await;

    let response = app
        .request(
            Method::PUT,
            &format!("/api/internalOrders/{}", order_id),
            Some(json!({ "newState": "accepted" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .request(Method::GET, "/api/internalOrders?state=ACCEPTED", None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["id"], order_id);

    // Restock-only tokens are not recognized here.
    let response = app
        .request(
            Method::PUT,
            &format!("/api/internalOrders/{}", order_id),
            Some(json!({ "newState": "DELIVERY" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = app
        .request(
            Method::PUT,
            "/api/internalOrders/9999",
            Some(json!({ "newState": "REFUSED" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn completed_records_picked_rfids() {
    let app = TestApp::new().await;
    let order_id = create_order(&app).await;

    // COMPLETED without the picked items is rejected.
    let response = app
        .request(
            Method::PUT,
            &format!("/api/internalOrders/{}", order_id),
            Some(json!({ "newState": "COMPLETED" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = app
        .request(
            Method::PUT,
            &format!("/api/internalOrders/{}", order_id),
            Some(json!({
                "newState": "COMPLETED",
                "products": [{ "SKUId": 1, "RFID": RFID_A }],
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .request(
            Method::GET,
            &format!("/api/internalOrders/{}", order_id),
            None,
        )
        .await;
    let body = response_json(response).await;
    assert_eq!(body["state"], "COMPLETED");
    assert_eq!(body["deliveredItems"][0]["RFID"], RFID_A);
}

#[tokio::test]
async fn delete_is_idempotent() {
    let app = TestApp::new().await;
    let order_id = create_order(&app).await;

    let response = app
        .request(
            Method::DELETE,
            &format!("/api/internalOrders/{}", order_id),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .request(
            Method::DELETE,
            &format!("/api/internalOrders/{}", order_id),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .request(
            Method::GET,
            &format!("/api/internalOrders/{}", order_id),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
