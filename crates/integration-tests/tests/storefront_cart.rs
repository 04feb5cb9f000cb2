//! Session cart behaviour: adding, merging, updating and totals.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use belle_integration_tests::{TestClient, storefront_app, test_store};
use belle_storefront::services::payment::MockGateway;
use rust_decimal_macros::dec;
use serde_json::json;

fn client() -> TestClient {
    let store = test_store();
    TestClient::new(storefront_app(&store, MockGateway::always_approve()))
}

#[tokio::test]
async fn empty_cart_has_zero_totals() {
    let mut client = client();

    let res = client.get("/cart").await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body["lines"].as_array().unwrap().is_empty());
    assert_eq!(res.body["totals"]["item_count"], 0);
    let total: rust_decimal::Decimal =
        serde_json::from_value(res.body["totals"]["total"].clone()).unwrap();
    assert_eq!(total, rust_decimal::Decimal::ZERO);
}

#[tokio::test]
async fn add_merges_quantities_for_the_same_product() {
    let mut client = client();

    client
        .post("/cart/add", json!({ "product_id": 1, "quantity": 1 }))
        .await;
    let res = client
        .post("/cart/add", json!({ "product_id": 1, "quantity": 2 }))
        .await;

    assert_eq!(res.status, StatusCode::OK);
    let lines = res.body["lines"].as_array().unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["quantity"], 3);

    let count = client.get("/cart/count").await;
    assert_eq!(count.field("count"), 3);
}

#[tokio::test]
async fn add_unknown_product_is_not_found() {
    let mut client = client();

    let res = client.post("/cart/add", json!({ "product_id": 999 })).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_to_zero_removes_the_line() {
    let mut client = client();

    client.post("/cart/add", json!({ "product_id": 1 })).await;
    client.post("/cart/add", json!({ "product_id": 8 })).await;

    let res = client
        .post("/cart/update", json!({ "product_id": 1, "quantity": 0 }))
        .await;
    assert_eq!(res.status, StatusCode::OK);

    let lines = res.body["lines"].as_array().unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["product"]["id"], 8);
}

#[tokio::test]
async fn remove_and_clear() {
    let mut client = client();

    client.post("/cart/add", json!({ "product_id": 1 })).await;
    client.post("/cart/add", json!({ "product_id": 2 })).await;

    let res = client
        .post("/cart/remove", json!({ "product_id": 1 }))
        .await;
    assert_eq!(res.body["lines"].as_array().unwrap().len(), 1);

    let res = client.post("/cart/clear", json!({})).await;
    assert!(res.body["lines"].as_array().unwrap().is_empty());
    assert_eq!(res.body["totals"]["item_count"], 0);
}

#[tokio::test]
async fn totals_apply_discount_vat_and_shipping_fee() {
    let mut client = client();

    // Product 8: 25.99 EUR, no discount. Below the 50 EUR free shipping bar.
    let res = client.post("/cart/add", json!({ "product_id": 8 })).await;

    let totals = &res.body["totals"];
    let subtotal: rust_decimal::Decimal =
        serde_json::from_value(totals["subtotal"].clone()).unwrap();
    let shipping: rust_decimal::Decimal =
        serde_json::from_value(totals["shipping"].clone()).unwrap();
    let tax: rust_decimal::Decimal = serde_json::from_value(totals["tax"].clone()).unwrap();
    let total: rust_decimal::Decimal = serde_json::from_value(totals["total"].clone()).unwrap();

    assert_eq!(subtotal, dec!(25.99));
    assert_eq!(shipping, dec!(4.99));
    assert_eq!(tax, subtotal * dec!(0.20));
    assert_eq!(total, subtotal + tax + shipping);
}

#[tokio::test]
async fn free_shipping_over_the_threshold() {
    let mut client = client();

    // Product 5: 89.00 EUR, comfortably over 50 EUR.
    let res = client.post("/cart/add", json!({ "product_id": 5 })).await;

    let shipping: rust_decimal::Decimal =
        serde_json::from_value(res.body["totals"]["shipping"].clone()).unwrap();
    assert_eq!(shipping, rust_decimal::Decimal::ZERO);
}

#[tokio::test]
async fn discounted_unit_price_feeds_line_totals() {
    let mut client = client();

    // Product 3: 38.50 EUR with a 15% discount.
    let res = client.post("/cart/add", json!({ "product_id": 3 })).await;

    let line = &res.body["lines"][0];
    let unit: rust_decimal::Decimal = serde_json::from_value(line["unit_price"].clone()).unwrap();
    assert_eq!(unit, dec!(38.50) * dec!(0.85));
}
