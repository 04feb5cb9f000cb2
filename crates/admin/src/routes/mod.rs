//! HTTP route handlers for the admin panel.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                  - Liveness check
//! GET    /health/ready            - Readiness check (store flush)
//!
//! POST   /auth/login              - Admin login
//! POST   /auth/logout             - Logout
//!
//! GET    /dashboard               - Metrics and recent orders
//!
//! GET    /products                - Effective catalog
//! POST   /products                - Create a product
//! GET    /products/{id}           - One product
//! PUT    /products/{id}           - Replace a product
//! DELETE /products/{id}           - Remove a product
//!
//! GET    /orders                  - Every order
//! GET    /orders/{number}         - One order
//! POST   /orders/{number}/status  - Transition an order
//!
//! GET    /customers               - Registered accounts
//! ```
//!
//! Everything except `/health` and `/auth/login` requires an admin session.

pub mod auth;
pub mod customers;
pub mod dashboard;
pub mod orders;
pub mod products;

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use serde_json::{Value, json};

use crate::error::Result;
use crate::state::AppState;

/// `GET /health` - liveness.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// `GET /health/ready` - readiness: the store must be writable.
pub async fn ready(State(state): State<AppState>) -> Result<Json<Value>> {
    state.store().flush()?;
    Ok(Json(json!({ "status": "ready" })))
}

/// Create all routes for the admin panel.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(ready))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/dashboard", get(dashboard::show))
        .route("/products", get(products::index).post(products::create))
        .route(
            "/products/{id}",
            get(products::show)
                .put(products::update)
                .delete(products::delete),
        )
        .route("/orders", get(orders::index))
        .route("/orders/{number}", get(orders::show))
        .route("/orders/{number}/status", post(orders::set_status))
        .route("/customers", get(customers::index))
}
