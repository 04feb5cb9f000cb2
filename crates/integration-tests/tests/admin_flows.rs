//! Admin panel flows: authentication, catalog CRUD, order management.
//!
//! The admin and storefront apps share one in-memory store in these tests,
//! the same way both binaries share one snapshot file in production.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use belle_integration_tests::{TestClient, admin_app, storefront_app, test_store};
use belle_storefront::services::payment::MockGateway;
use serde_json::{Value, json};

async fn login(client: &mut TestClient) {
    let res = client
        .post(
            "/auth/login",
            json!({ "identifier": "1234", "password": "1456" }),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
}

/// Place one order through the storefront so the admin has data to manage.
async fn place_order(store: &belle_core::store::SharedStore) -> String {
    let mut shop = TestClient::new(storefront_app(store, MockGateway::always_approve()));
    shop.post("/cart/add", json!({ "product_id": 5 })).await;
    shop.post(
        "/checkout/shipping",
        json!({
            "full_name": "Claire Dubois",
            "email": "claire@exemple.fr",
            "address": "12 rue des Lilas",
            "city": "Lyon",
            "postal_code": "69003",
            "country": "France",
            "method": "standard"
        }),
    )
    .await;
    let placed = shop
        .post(
            "/checkout/payment",
            json!({
                "type": "card",
                "number": "4242424242424242",
                "holder": "Claire Dubois",
                "expiry": "12/28",
                "cvc": "123"
            }),
        )
        .await;
    assert_eq!(placed.status, StatusCode::OK);
    placed.body["order"]["number"].as_str().unwrap().to_owned()
}

#[tokio::test]
async fn login_requires_the_demo_pair_or_an_admin_account() {
    let store = test_store();
    let mut client = TestClient::new(admin_app(&store));

    let res = client
        .post(
            "/auth/login",
            json!({ "identifier": "1234", "password": "wrong" }),
        )
        .await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    login(&mut client).await;
    let dashboard = client.get("/dashboard").await;
    assert_eq!(dashboard.status, StatusCode::OK);
}

#[tokio::test]
async fn customer_accounts_cannot_enter_the_admin_panel() {
    let store = test_store();

    // Register a regular customer on the storefront side
    let mut shop = TestClient::new(storefront_app(&store, MockGateway::always_approve()));
    shop.post(
        "/auth/register",
        json!({
            "email": "claire@exemple.fr",
            "name": "Claire Dubois",
            "password": "belle-demo-2024"
        }),
    )
    .await;

    let mut admin = TestClient::new(admin_app(&store));
    let res = admin
        .post(
            "/auth/login",
            json!({ "identifier": "claire@exemple.fr", "password": "belle-demo-2024" }),
        )
        .await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn protected_routes_reject_anonymous_requests() {
    let store = test_store();
    let mut client = TestClient::new(admin_app(&store));

    for path in ["/dashboard", "/products", "/orders", "/customers"] {
        let res = client.get(path).await;
        assert_eq!(res.status, StatusCode::UNAUTHORIZED, "path {path}");
    }
}

#[tokio::test]
async fn logout_closes_the_admin_session() {
    let store = test_store();
    let mut client = TestClient::new(admin_app(&store));
    login(&mut client).await;

    let res = client.post("/auth/logout", json!({})).await;
    assert_eq!(res.status, StatusCode::OK);

    let dashboard = client.get("/dashboard").await;
    assert_eq!(dashboard.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn dashboard_reports_orders_and_customers() {
    let store = test_store();
    place_order(&store).await;

    let mut client = TestClient::new(admin_app(&store));
    login(&mut client).await;

    let res = client.get("/dashboard").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["metrics"]["order_count"], 1);
    assert_eq!(res.body["metrics"]["product_count"], 8);
    // The demo admin account is not a customer
    assert_eq!(res.body["metrics"]["customer_count"], 0);

    let recent = res.body["recent_orders"].as_array().unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0]["customer_name"], "Claire Dubois");
    assert_eq!(recent[0]["status"], "paid");
}

#[tokio::test]
async fn product_crud_overlays_the_base_catalog() {
    let store = test_store();
    let mut client = TestClient::new(admin_app(&store));
    login(&mut client).await;

    let draft = json!({
        "name": "Masque Purifiant à l'Argile",
        "price": "19.90",
        "image": "https://images.example.com/products/masque-argile.jpg",
        "category": "skincare",
        "brand": "Pure",
        "skin_types": ["oily", "combination"],
        "description": "Un masque à l'argile verte qui purifie les pores.",
        "is_new": true
    });

    let created = client.post("/products", draft.clone()).await;
    assert_eq!(created.status, StatusCode::CREATED);
    let id = created.body["id"].as_i64().unwrap();
    assert!(id > 8, "new ids extend the base catalog, got {id}");

    let listed = client.get("/products").await;
    assert_eq!(listed.body["total"], 9);

    let mut updated_draft: Value = draft;
    updated_draft["price"] = json!("17.50");
    let updated = client.put(&format!("/products/{id}"), updated_draft).await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["price"]["amount"], "17.50");

    let deleted = client.delete(&format!("/products/{id}")).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.field("deleted"), true);

    let after = client.get("/products").await;
    assert_eq!(after.body["total"], 8);
}

#[tokio::test]
async fn deleting_a_base_product_hides_it_from_the_storefront() {
    let store = test_store();
    let mut client = TestClient::new(admin_app(&store));
    login(&mut client).await;

    let res = client.delete("/products/1").await;
    assert_eq!(res.status, StatusCode::OK);

    let mut shop = TestClient::new(storefront_app(&store, MockGateway::always_approve()));
    assert_eq!(shop.get("/products/1").await.status, StatusCode::NOT_FOUND);
    assert_eq!(shop.get("/products").await.field("total"), 7);

    // Deleting twice is not found
    let again = client.delete("/products/1").await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_product_draft_is_unprocessable() {
    let store = test_store();
    let mut client = TestClient::new(admin_app(&store));
    login(&mut client).await;

    let res = client
        .post(
            "/products",
            json!({
                "name": "",
                "price": "10.00",
                "image": "https://images.example.com/products/x.jpg",
                "category": "skincare",
                "brand": "Pure"
            }),
        )
        .await;
    assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn order_status_walks_forward_but_not_backward() {
    let store = test_store();
    let number = place_order(&store).await;

    let mut client = TestClient::new(admin_app(&store));
    login(&mut client).await;

    for status in ["paid", "shipped", "delivered"] {
        let res = client
            .post(
                &format!("/orders/{number}/status"),
                json!({ "status": status }),
            )
            .await;
        assert_eq!(res.status, StatusCode::OK, "transition to {status}");
        assert_eq!(res.body["status"], status);
    }

    // A delivered order can no longer be cancelled
    let res = client
        .post(
            &format!("/orders/{number}/status"),
            json!({ "status": "cancelled" }),
        )
        .await;
    assert_eq!(res.status, StatusCode::CONFLICT);

    let shown = client.get(&format!("/orders/{number}")).await;
    assert_eq!(shown.body["status"], "delivered");
}

#[tokio::test]
async fn order_lookup_normalizes_the_number() {
    let store = test_store();
    let number = place_order(&store).await;

    let mut client = TestClient::new(admin_app(&store));
    login(&mut client).await;

    let lowered = number.to_lowercase();
    let res = client.get(&format!("/orders/{lowered}")).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["number"], number);

    let missing = client.get("/orders/CMD-000000000000").await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn customer_list_hides_password_hashes() {
    let store = test_store();
    let mut shop = TestClient::new(storefront_app(&store, MockGateway::always_approve()));
    shop.post(
        "/auth/register",
        json!({
            "email": "claire@exemple.fr",
            "name": "Claire Dubois",
            "password": "belle-demo-2024"
        }),
    )
    .await;

    let mut client = TestClient::new(admin_app(&store));
    login(&mut client).await;

    let res = client.get("/customers").await;
    assert_eq!(res.status, StatusCode::OK);

    // Logging in materialized the demo admin account next to the customer
    let customers = res.body["customers"].as_array().unwrap();
    assert_eq!(customers.len(), 2);
    assert!(
        customers
            .iter()
            .any(|c| c["email"] == "claire@exemple.fr" && c["is_admin"] == false)
    );
    for customer in customers {
        assert!(customer.get("password_hash").is_none());
    }
}
