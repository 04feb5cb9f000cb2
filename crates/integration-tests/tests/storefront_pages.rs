//! Home payload and markdown-backed informational pages.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use belle_integration_tests::{TestClient, storefront_app, test_store};
use belle_storefront::services::payment::MockGateway;

fn client() -> TestClient {
    let store = test_store();
    TestClient::new(storefront_app(&store, MockGateway::always_approve()))
}

#[tokio::test]
async fn home_sections_are_capped_at_four() {
    let mut client = client();

    let res = client.get("/").await;
    assert_eq!(res.status, StatusCode::OK);

    let new_products = res.body["new_products"].as_array().unwrap();
    assert!(!new_products.is_empty() && new_products.len() <= 4);
    for p in new_products {
        assert_eq!(p["is_new"], true);
    }

    let best_sellers = res.body["best_sellers"].as_array().unwrap();
    assert!(!best_sellers.is_empty() && best_sellers.len() <= 4);

    assert_eq!(res.body["testimonials"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn page_index_lists_slugs_alphabetically() {
    let mut client = client();

    let res = client.get("/pages").await;
    assert_eq!(res.status, StatusCode::OK);

    let slugs: Vec<&str> = res
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["slug"].as_str().unwrap())
        .collect();
    assert!(slugs.contains(&"livraison"));
    assert!(slugs.contains(&"faq"));

    let mut sorted = slugs.clone();
    sorted.sort_unstable();
    assert_eq!(slugs, sorted);
}

#[tokio::test]
async fn page_renders_markdown_to_html() {
    let mut client = client();

    let res = client.get("/pages/livraison").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.field("slug"), "livraison");
    assert!(res.field("title").is_string());

    let html = res.body["content_html"].as_str().unwrap();
    assert!(html.contains("<h2>") || html.contains("<p>"), "got {html}");
}

#[tokio::test]
async fn unknown_page_is_not_found() {
    let mut client = client();

    let res = client.get("/pages/nonexistent").await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_endpoints_respond() {
    let mut client = client();

    let res = client.get("/health").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.field("status"), "ok");

    let res = client.get("/health/ready").await;
    assert_eq!(res.status, StatusCode::OK);
}
