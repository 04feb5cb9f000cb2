//! Full checkout flows, with the mock gateway approving or declining.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use belle_integration_tests::{TestClient, storefront_app, test_store};
use belle_storefront::services::payment::MockGateway;
use serde_json::{Value, json};

fn shipping_form() -> Value {
    json!({
        "full_name": "Claire Dubois",
        "email": "claire@exemple.fr",
        "address": "12 rue des Lilas",
        "city": "Lyon",
        "postal_code": "69003",
        "country": "France",
        "method": "express"
    })
}

fn card() -> Value {
    json!({
        "type": "card",
        "number": "4242 4242 4242 4242",
        "holder": "Claire Dubois",
        "expiry": "12/28",
        "cvc": "123"
    })
}

#[tokio::test]
async fn happy_path_places_an_order_and_empties_the_cart() {
    let store = test_store();
    let mut client = TestClient::new(storefront_app(&store, MockGateway::always_approve()));

    client
        .post("/cart/add", json!({ "product_id": 1, "quantity": 2 }))
        .await;

    let res = client.post("/checkout/shipping", shipping_form()).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.field("step"), "payment");

    let res = client.post("/checkout/payment", card()).await;
    assert_eq!(res.status, StatusCode::OK);

    let order = &res.body["order"];
    let number = order["number"].as_str().unwrap();
    assert!(number.starts_with("CMD-"), "got order number {number}");
    assert_eq!(order["status"], "paid");
    assert_eq!(order["email"], "claire@exemple.fr");
    assert_eq!(order["shipping"]["method"], "express");
    assert_eq!(order["lines"].as_array().unwrap().len(), 1);

    // Cart and checkout both reset after completion
    let count = client.get("/cart/count").await;
    assert_eq!(count.field("count"), 0);
    let checkout = client.get("/checkout").await;
    assert_eq!(checkout.field("step"), "shipping");

    // The order landed in the shared store
    let stored = store.read(|state| state.orders.len());
    assert_eq!(stored, 1);
}

#[tokio::test]
async fn declined_charge_keeps_cart_and_payment_step() {
    let store = test_store();
    let mut client = TestClient::new(storefront_app(&store, MockGateway::always_decline()));

    client.post("/cart/add", json!({ "product_id": 1 })).await;
    client.post("/checkout/shipping", shipping_form()).await;

    let res = client.post("/checkout/payment", card()).await;
    assert_eq!(res.status, StatusCode::PAYMENT_REQUIRED);

    // Still on the payment step with the cart intact, so the customer can retry
    let checkout = client.get("/checkout").await;
    assert_eq!(checkout.field("step"), "payment");
    let count = client.get("/cart/count").await;
    assert_eq!(count.field("count"), 1);
    assert_eq!(store.read(|state| state.orders.len()), 0);
}

#[tokio::test]
async fn shipping_requires_a_non_empty_cart() {
    let store = test_store();
    let mut client = TestClient::new(storefront_app(&store, MockGateway::always_approve()));

    let res = client.post("/checkout/shipping", shipping_form()).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn incomplete_shipping_form_is_unprocessable() {
    let store = test_store();
    let mut client = TestClient::new(storefront_app(&store, MockGateway::always_approve()));

    client.post("/cart/add", json!({ "product_id": 1 })).await;

    let res = client
        .post(
            "/checkout/shipping",
            json!({ "full_name": "Claire Dubois", "email": "claire@exemple.fr" }),
        )
        .await;
    assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);

    let checkout = client.get("/checkout").await;
    assert_eq!(checkout.field("step"), "shipping");
}

#[tokio::test]
async fn payment_before_shipping_conflicts() {
    let store = test_store();
    let mut client = TestClient::new(storefront_app(&store, MockGateway::always_approve()));

    client.post("/cart/add", json!({ "product_id": 1 })).await;

    let res = client.post("/checkout/payment", card()).await;
    assert_eq!(res.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn malformed_card_is_unprocessable() {
    let store = test_store();
    let mut client = TestClient::new(storefront_app(&store, MockGateway::always_approve()));

    client.post("/cart/add", json!({ "product_id": 1 })).await;
    client.post("/checkout/shipping", shipping_form()).await;

    let res = client
        .post(
            "/checkout/payment",
            json!({
                "type": "card",
                "number": "4242",
                "holder": "Claire Dubois",
                "expiry": "12/28",
                "cvc": "123"
            }),
        )
        .await;
    assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(store.read(|state| state.orders.len()), 0);
}

#[tokio::test]
async fn cash_on_delivery_needs_no_card_details() {
    let store = test_store();
    let mut client = TestClient::new(storefront_app(&store, MockGateway::always_approve()));

    client.post("/cart/add", json!({ "product_id": 8 })).await;
    client.post("/checkout/shipping", shipping_form()).await;

    let res = client
        .post("/checkout/payment", json!({ "type": "cash_on_delivery" }))
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["order"]["status"], "paid");
}

#[tokio::test]
async fn order_history_shows_the_placed_order() {
    let store = test_store();
    let mut client = TestClient::new(storefront_app(&store, MockGateway::always_approve()));

    client
        .post(
            "/auth/register",
            json!({
                "email": "claire@exemple.fr",
                "name": "Claire Dubois",
                "password": "belle-demo-2024"
            }),
        )
        .await;
    client.post("/cart/add", json!({ "product_id": 2 })).await;
    client.post("/checkout/shipping", shipping_form()).await;
    let placed = client.post("/checkout/payment", card()).await;
    let number = placed.body["order"]["number"].as_str().unwrap().to_owned();

    let orders = client.get("/account/orders").await;
    assert_eq!(orders.status, StatusCode::OK);
    let list = orders.body.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["number"], number);
}
