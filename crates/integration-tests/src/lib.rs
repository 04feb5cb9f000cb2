//! In-process test harness for the Belle Cosmetics services.
//!
//! Tests drive the full storefront and admin routers through
//! [`tower::ServiceExt::oneshot`] instead of a live server, carrying session
//! cookies between requests the way a browser would. Both apps can share a
//! single in-memory store to exercise cross-service flows (an order placed on
//! the storefront showing up in the admin panel).

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use secrecy::SecretString;
use serde_json::Value;
use tower::ServiceExt;

use belle_core::store::{MemorySnapshot, SharedStore};
use belle_storefront::services::payment::MockGateway;

/// A fresh store backed by an in-memory snapshot.
#[must_use]
pub fn test_store() -> SharedStore {
    SharedStore::open(Arc::new(MemorySnapshot::new()))
}

fn test_secret() -> SecretString {
    SecretString::from("k9mNx2pQv7rTw4yZb8cFh3jLd6gSe1uA5oIkPnBqXzEr")
}

/// Build the storefront router against `store` with the given gateway.
#[must_use]
pub fn storefront_app(store: &SharedStore, gateway: MockGateway) -> Router {
    let config = belle_storefront::config::StorefrontConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 3000,
        base_url: "http://localhost:3000".to_owned(),
        session_secret: test_secret(),
        store_path: PathBuf::from("data/store.json"),
        payment_success_rate: 1.0,
        sentry_dsn: None,
    };
    let content = belle_storefront::content::ContentStore::load(
        &Path::new(env!("CARGO_MANIFEST_DIR")).join("../storefront/content"),
    )
    .unwrap();
    let state = belle_storefront::state::AppState::new(
        config,
        store.clone(),
        content,
        Arc::new(gateway),
    )
    .unwrap();
    belle_storefront::app(state)
}

/// Build the admin router against `store`.
#[must_use]
pub fn admin_app(store: &SharedStore) -> Router {
    let config = belle_admin::config::AdminConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 3001,
        base_url: "http://localhost:3001".to_owned(),
        session_secret: test_secret(),
        store_path: PathBuf::from("data/store.json"),
        sentry_dsn: None,
    };
    let state = belle_admin::state::AppState::new(config, store.clone());
    belle_admin::app(state)
}

/// Response captured from an in-process request.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestResponse {
    /// Owned body field, for terse assertions against literals.
    #[must_use]
    pub fn field(&self, name: &str) -> Value {
        self.body[name].clone()
    }
}

/// An HTTP client for one router, with a browser-style cookie jar.
pub struct TestClient {
    app: Router,
    cookies: Vec<(String, String)>,
}

impl TestClient {
    #[must_use]
    pub fn new(app: Router) -> Self {
        Self {
            app,
            cookies: Vec::new(),
        }
    }

    pub async fn get(&mut self, path: &str) -> TestResponse {
        self.request(Method::GET, path, None).await
    }

    pub async fn post(&mut self, path: &str, body: Value) -> TestResponse {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn put(&mut self, path: &str, body: Value) -> TestResponse {
        self.request(Method::PUT, path, Some(body)).await
    }

    pub async fn delete(&mut self, path: &str) -> TestResponse {
        self.request(Method::DELETE, path, None).await
    }

    /// Send a request, replaying stored cookies and capturing new ones.
    pub async fn request(
        &mut self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder()
            .method(method)
            .uri(path)
            // Rate limiting keys on the forwarded client address
            .header("x-forwarded-for", "127.0.0.1");

        if !self.cookies.is_empty() {
            let jar = self
                .cookies
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; ");
            builder = builder.header(header::COOKIE, jar);
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();

        for set_cookie in response.headers().get_all(header::SET_COOKIE) {
            let raw = set_cookie.to_str().unwrap();
            let pair = raw.split(';').next().unwrap();
            if let Some((name, value)) = pair.split_once('=') {
                self.cookies.retain(|(n, _)| n != name);
                self.cookies.push((name.to_owned(), value.to_owned()));
            }
        }

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        TestResponse { status, body }
    }
}
