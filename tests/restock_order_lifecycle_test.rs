//! Integration tests for the restock-order lifecycle.
//!
//! Covers:
//! - Creation lands in ISSUED
//! - Payload validation (dates, products, supplier reference)
//! - State overwrites, including the COMPLETED items requirement
//! - DELIVERED-gated instance registration
//! - DELIVERY-gated transport note with the issue-date ordering rule
//! - Return-item reads over COMPLETEDRETURN orders
//! - Idempotent deletion

mod common;

use axum::http::{Method, StatusCode};
use common::{response_json, TestApp};
use serde_json::json;

const RFID_A: &str = "12345678901234567890123456789016";
const RFID_B: &str = "12345678901234567890123456789017";

async fn create_order(app: &TestApp, supplier_id: i32) -> i32 {
    let payload = json!({
        "issueDate": "2022/04/04",
        "products": [{ "SKUId": 1, "description": "d", "price": 1, "qty": 1 }],
        "supplierId": supplier_id,
    });
    let response = app
        .request(Method::POST, "/api/restockOrder", Some(payload))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    body["id"].as_i64().expect("created order id") as i32
}

// ==================== Creation ====================

#[tokio::test]
async fn create_lands_in_issued_with_no_received_items() {
    let app = TestApp::new().await;
    let supplier_id = app.seed_supplier("ACME Logistics").await;

    let order_id = create_order(&app, supplier_id).await;

    let response = app
        .request(
            Method::GET,
            &format!("/api/restockOrders/{}", order_id),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["state"], "ISSUED");
    assert_eq!(body["supplierId"], supplier_id);
    assert_eq!(body["products"][0]["SKUId"], 1);
    assert_eq!(body["products"][0]["qty"], 1);
    assert_eq!(body["skuItems"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn create_rejects_malformed_payloads() {
    let app = TestApp::new().await;
    let supplier_id = app.seed_supplier("ACME Logistics").await;

    let cases = [
        // wrong date separator
        json!({
            "issueDate": "2022-04-04",
            "products": [{ "SKUId": 1, "description": "d", "price": 1, "qty": 1 }],
            "supplierId": supplier_id,
        }),
        // future issue date
        json!({
            "issueDate": "2093/04/04",
            "products": [{ "SKUId": 1, "description": "d", "price": 1, "qty": 1 }],
            "supplierId": supplier_id,
        }),
        // non-positive SKU reference
        json!({
            "issueDate": "2022/04/04",
            "products": [{ "SKUId": 0, "description": "d", "price": 1, "qty": 1 }],
            "supplierId": supplier_id,
        }),
        // non-positive price
        json!({
            "issueDate": "2022/04/04",
            "products": [{ "SKUId": 1, "description": "d", "price": 0, "qty": 1 }],
            "supplierId": supplier_id,
        }),
        // negative quantity
        json!({
            "issueDate": "2022/04/04",
            "products": [{ "SKUId": 1, "description": "d", "price": 1, "qty": -1 }],
            "supplierId": supplier_id,
        }),
        // fractional quantity
        json!({
            "issueDate": "2022/04/04",
            "products": [{ "SKUId": 1, "description": "d", "price": 1, "qty": 1.5 }],
            "supplierId": supplier_id,
        }),
        // non-positive itemId when present
        json!({
            "issueDate": "2022/04/04",
            "products": [{ "SKUId": 1, "itemId": 0, "description": "d", "price": 1, "qty": 1 }],
            "supplierId": supplier_id,
        }),
        // non-positive supplier id
        json!({
            "issueDate": "2022/04/04",
            "products": [{ "SKUId": 1, "description": "d", "price": 1, "qty": 1 }],
            "supplierId": 0,
        }),
    ];

    for payload in cases {
        let response = app
            .request(Method::POST, "/api/restockOrder", Some(payload.clone()))
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
async fn create_with_dangling_supplier_is_not_found() {
    let app = TestApp::new().await;

    let payload = json!({
        "issueDate": "2022/04/04",
        "products": [{ "SKUId": 1, "description": "d", "price": 1, "qty": 1 }],
        "supplierId": 9999,
    });
    let response = app
        .request(Method::POST, "/api/restockOrder", Some(payload))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ==================== State overwrites ====================

#[tokio::test]
async fn change_state_accepts_any_recognized_token() {
    let app = TestApp::new().await;
    let supplier_id = app.seed_supplier("ACME Logistics").await;
    let order_id = create_order(&app, supplier_id).await;

    // Forward order is not enforced: TESTED straight from ISSUED is legal.
    let response = app
        .request(
            Method::PUT,
            &format!("/api/restockOrder/{}", order_id),
            Some(json!({ "newState": "TESTED" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Tokens are trimmed and case-insensitive.
    let response = app
        .request(
            Method::PUT,
            &format!("/api/restockOrder/{}", order_id),
            Some(json!({ "newState": "  delivery " })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .request(
            Method::GET,
            &format!("/api/restockOrders/{}", order_id),
            None,
        )
        .await;
    let body = response_json(response).await;
    assert_eq!(body["state"], "DELIVERY");
}

#[tokio::test]
async fn change_state_rejects_unknown_tokens_and_missing_orders() {
    let app = TestApp::new().await;
    let supplier_id = app.seed_supplier("ACME Logistics").await;
    let order_id = create_order(&app, supplier_id).await;

    let response = app
        .request(
            Method::PUT,
            &format!("/api/restockOrder/{}", order_id),
            Some(json!({ "newState": "SHIPPED" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = app
        .request(
            Method::PUT,
            "/api/restockOrder/9999",
            Some(json!({ "newState": "DELIVERY" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn completed_requires_well_formed_items() {
    let app = TestApp::new().await;
    let supplier_id = app.seed_supplier("ACME Logistics").await;
    let order_id = create_order(&app, supplier_id).await;

    // No items array: rejected.
    let response = app
        .request(
            Method::PUT,
            &format!("/api/restockOrder/{}", order_id),
            Some(json!({ "newState": "COMPLETED" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Malformed RFID: rejected.
    let response = app
        .request(
            Method::PUT,
            &format!("/api/restockOrder/{}", order_id),
            Some(json!({
                "newState": "COMPLETED",
                "products": [{ "SKUId": 1, "RFID": "123" }],
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Well-formed pairs: state moves and the items are stored unchanged.
    let response = app
        .request(
            Method::PUT,
            &format!("/api/restockOrder/{}", order_id),
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
            &format!("/api/restockOrders/{}", order_id),
            None,
        )
        .await;
    let body = response_json(response).await;
    assert_eq!(body["state"], "COMPLETED");
    assert_eq!(body["skuItems"][0]["SKUId"], 1);
    assert_eq!(body["skuItems"][0]["rfid"], RFID_A);
}

// ==================== Delivered-instance registration ====================

#[tokio::test]
async fn sku_items_attach_only_in_delivered() {
    let app = TestApp::new().await;
    let supplier_id = app.seed_supplier("ACME Logistics").await;
    let order_id = create_order(&app, supplier_id).await;

    let items = json!({
        "skuItems": [
            { "SKUId": 1, "itemId": 10, "rfid": RFID_A },
            { "SKUId": 1, "itemId": 10, "rfid": RFID_B },
        ]
    });

    // Still ISSUED: wrong state.
    let response = app
        .request(
            Method::PUT,
            &format!("/api/restockOrder/{}/skuItems", order_id),
            Some(items.clone()),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = response_json(response).await;
    assert!(
        body["message"]
            .as_str()
            .unwrap_or_default()
            .contains("not DELIVERED"),
        "unexpected message: {}",
        body
    );

    // Unknown order: not found.
    let response = app
        .request(
            Method::PUT,
            "/api/restockOrder/9999/skuItems",
            Some(items.clone()),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Move to DELIVERED and retry.
    let response = app
        .request(
            Method::PUT,
            &format!("/api/restockOrder/{}", order_id),
            Some(json!({ "newState": "DELIVERED" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .request(
            Method::PUT,
            &format!("/api/restockOrder/{}/skuItems", order_id),
            Some(items),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .request(
            Method::GET,
            &format!("/api/restockOrders/{}", order_id),
            None,
        )
        .await;
    let body = response_json(response).await;
    assert_eq!(body["skuItems"].as_array().map(Vec::len), Some(2));

    // Malformed entries never reach persistence.
    let response = app
        .request(
            Method::PUT,
            &format!("/api/restockOrder/{}/skuItems", order_id),
            Some(json!({ "skuItems": [{ "SKUId": 1, "itemId": 0, "rfid": RFID_A }] })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// ==================== Transport note ====================

#[tokio::test]
async fn transport_note_requires_delivery_state_and_date_ordering() {
    let app = TestApp::new().await;
    let supplier_id = app.seed_supplier("ACME Logistics").await;
    let order_id = create_order(&app, supplier_id).await;

    // A delivery date before the issue date is rejected in any state.
    let response = app
        .request(
            Method::PUT,
            &format!("/api/restockOrder/{}/transportNote", order_id),
            Some(json!({ "transportNote": { "deliveryDate": "2021/12/31" } })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = response_json(response).await;
    assert!(
        body["message"]
            .as_str()
            .unwrap_or_default()
            .contains("Delivery Date Before Issue Date"),
        "unexpected message: {}",
        body
    );

    // Valid date but still ISSUED: wrong state.
    let response = app
        .request(
            Method::PUT,
            &format!("/api/restockOrder/{}/transportNote", order_id),
            Some(json!({ "transportNote": { "deliveryDate": "2022/04/05" } })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Move to DELIVERY and attach.
    let response = app
        .request(
            Method::PUT,
            &format!("/api/restockOrder/{}", order_id),
            Some(json!({ "newState": "DELIVERY" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .request(
            Method::PUT,
            &format!("/api/restockOrder/{}/transportNote", order_id),
            Some(json!({ "transportNote": { "deliveryDate": "2022/04/05" } })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .request(
            Method::GET,
            &format!("/api/restockOrders/{}", order_id),
            None,
        )
        .await;
    let body = response_json(response).await;
    assert_eq!(body["transportNote"]["deliveryDate"], "2022/04/05");

    // Unknown order id.
    let response = app
        .request(
            Method::PUT,
            "/api/restockOrder/9999/transportNote",
            Some(json!({ "transportNote": { "deliveryDate": "2022/04/05" } })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Malformed date.
    let response = app
        .request(
            Method::PUT,
            &format!("/api/restockOrder/{}/transportNote", order_id),
            Some(json!({ "transportNote": { "deliveryDate": "05/04/2022" } })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// ==================== Return items ====================

#[tokio::test]
async fn return_items_read_requires_completedreturn() {
    let app = TestApp::new().await;
    let supplier_id = app.seed_supplier("ACME Logistics").await;
    let order_id = create_order(&app, supplier_id).await;

    // Record some received instances first.
    let response = app
        .request(
            Method::PUT,
            &format!("/api/restockOrder/{}", order_id),
            Some(json!({ "newState": "DELIVERED" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = app
        .request(
            Method::PUT,
            &format!("/api/restockOrder/{}/skuItems", order_id),
            Some(json!({ "skuItems": [{ "SKUId": 1, "itemId": 10, "rfid": RFID_A }] })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Not COMPLETEDRETURN yet: wrong state.
    let response = app
        .request(
            Method::GET,
            &format!("/api/restockOrders/{}/returnItems", order_id),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = response_json(response).await;
    assert!(
        body["message"]
            .as_str()
            .unwrap_or_default()
            .contains("not COMPLETEDRETURN"),
        "unexpected message: {}",
        body
    );

    // Unknown order id.
    let response = app
        .request(Method::GET, "/api/restockOrders/9999/returnItems", None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Move to COMPLETEDRETURN and read the items back.
    let response = app
        .request(
            Method::PUT,
            &format!("/api/restockOrder/{}", order_id),
            Some(json!({ "newState": "COMPLETEDRETURN" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .request(
            Method::GET,
            &format!("/api/restockOrders/{}/returnItems", order_id),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body[0]["SKUId"], 1);
    assert_eq!(body[0]["rfid"], RFID_A);
}

// ==================== Listing and deletion ====================

#[tokio::test]
async fn list_supports_state_filter() {
    let app = TestApp::new().await;
    let supplier_id = app.seed_supplier("ACME Logistics").await;
    let first = create_order(&app, supplier_id).await;
    let _second = create_order(&app, supplier_id).await;

    let response = app
        .request(
            Method::PUT,
            &format!("/api/restockOrder/{}", first),
            Some(json!({ "newState": "DELIVERY" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.request(Method::GET, "/api/restockOrders", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body.as_array().map(Vec::len), Some(2));

    let response = app
        .request(Method::GET, "/api/restockOrders?state=ISSUED", None)
        .await;
    let body = response_json(response).await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));

    let response = app
        .request(Method::GET, "/api/restockOrders?state=BOGUS", None)
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn delete_is_idempotent() {
    let app = TestApp::new().await;
    let supplier_id = app.seed_supplier("ACME Logistics").await;
    let order_id = create_order(&app, supplier_id).await;

    // Deleting an id that never existed still reports success.
    let response = app
        .request(Method::DELETE, "/api/restockOrder/9999", None)
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .request(
            Method::DELETE,
            &format!("/api/restockOrder/{}", order_id),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .request(
            Method::GET,
            &format!("/api/restockOrders/{}", order_id),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Non-positive ids never reach the service.
    let response = app
        .request(Method::DELETE, "/api/restockOrder/0", None)
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
