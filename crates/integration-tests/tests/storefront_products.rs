//! Product listing filters, sorting and detail pages.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use belle_integration_tests::{TestClient, storefront_app, test_store};
use belle_storefront::services::payment::MockGateway;
use rust_decimal::Decimal;

fn client() -> TestClient {
    let store = test_store();
    TestClient::new(storefront_app(&store, MockGateway::always_approve()))
}

#[tokio::test]
async fn lists_the_whole_catalog_by_default() {
    let mut client = client();

    let res = client.get("/products").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.field("total"), 8);
    assert_eq!(res.body["products"].as_array().unwrap().len(), 8);
}

#[tokio::test]
async fn filters_by_category_and_brand() {
    let mut client = client();

    let res = client.get("/products?category=makeup").await;
    assert_eq!(res.field("total"), 3);

    let res = client.get("/products?category=makeup&brand=lumi%C3%A8re").await;
    assert_eq!(res.field("total"), 2);
}

#[tokio::test]
async fn unknown_category_is_a_bad_request() {
    let mut client = client();

    let res = client.get("/products?category=gadgets").await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn filters_by_skin_type_and_flags() {
    let mut client = client();

    let res = client.get("/products?skin_type=oily").await;
    assert_eq!(res.field("total"), 1);
    assert_eq!(res.body["products"][0]["id"], 6);

    let res = client.get("/products?best_seller=true").await;
    assert_eq!(res.field("total"), 3);

    let res = client.get("/products?new=true").await;
    assert_eq!(res.field("total"), 2);
}

#[tokio::test]
async fn price_bounds_use_the_discounted_price() {
    let mut client = client();

    // Product 3 lists at 38.50 but sells at 32.725 after its 15% discount
    let res = client.get("/products?max_price=33&min_price=30").await;
    let ids: Vec<i64> = res.body["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert!(ids.contains(&3), "got {ids:?}");
}

#[tokio::test]
async fn text_search_matches_name_and_brand() {
    let mut client = client();

    let res = client.get("/products?q=s%C3%A9rum").await;
    assert_eq!(res.field("total"), 1);
    assert_eq!(res.body["products"][0]["id"], 1);

    let res = client.get("/products?q=lumi%C3%A8re").await;
    assert_eq!(res.field("total"), 2);
}

#[tokio::test]
async fn sorts_by_price_ascending() {
    let mut client = client();

    let res = client.get("/products?sort=price-asc").await;
    let prices: Vec<Decimal> = res.body["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| {
            // Sort order is on the selling price, discount included
            let list: Decimal = serde_json::from_value(p["price"]["amount"].clone()).unwrap();
            match p["discount"].as_u64() {
                Some(d) => list * Decimal::from(100 - d) / Decimal::from(100u8),
                None => list,
            }
        })
        .collect();
    let mut sorted = prices.clone();
    sorted.sort();
    assert_eq!(prices, sorted);
}

#[tokio::test]
async fn detail_includes_related_products_from_the_category() {
    let mut client = client();

    let res = client.get("/products/8").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["product"]["id"], 8);

    let related = res.body["related"].as_array().unwrap();
    assert!(!related.is_empty() && related.len() <= 4);
    for p in related {
        assert_eq!(p["category"], "makeup");
        assert_ne!(p["id"], 8);
    }
}

#[tokio::test]
async fn unknown_product_is_not_found() {
    let mut client = client();

    let res = client.get("/products/999").await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}
