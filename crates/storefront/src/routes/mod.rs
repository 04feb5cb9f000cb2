//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home payload (new products, best sellers, testimonials)
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (store flush)
//!
//! # Products
//! GET  /products               - Product listing (filters + sort)
//! GET  /products/{id}          - Product detail + related products
//!
//! # Cart (session-backed)
//! GET  /cart                   - Current cart with totals
//! POST /cart/add               - Add a product (merges quantities)
//! POST /cart/update            - Set a line quantity (0 removes)
//! POST /cart/remove            - Remove a line
//! POST /cart/clear             - Empty the cart
//! GET  /cart/count             - Cart badge count
//!
//! # Checkout
//! GET  /checkout               - Current step and totals
//! POST /checkout/shipping      - Submit shipping, advance to payment
//! POST /checkout/payment       - Charge the gateway, complete the order
//!
//! # Auth
//! POST /auth/register          - Create an account
//! POST /auth/login             - Login (email, or the demo admin pair)
//! POST /auth/logout            - Logout
//!
//! # Account (requires auth)
//! GET  /account                - Account overview
//! GET  /account/orders         - Order history
//!
//! # Pages
//! GET  /pages                  - Page index
//! GET  /pages/{slug}           - Rendered markdown page
//! ```

pub mod account;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod home;
pub mod pages;
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

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(checkout::show))
        .route("/shipping", post(checkout::submit_shipping))
        .route("/payment", post(checkout::submit_payment))
}

/// Create the account routes router.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(account::index))
        .route("/orders", get(account::orders))
}

/// Create the pages routes router.
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::index))
        .route("/{slug}", get(pages::show))
}

/// Create all routes for the storefront.
///
/// Auth endpoints carry a tighter rate limit than the rest of the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/health", get(health))
        .route("/health/ready", get(ready))
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .nest("/checkout", checkout_routes())
        .nest("/account", account_routes())
        .nest(
            "/auth",
            auth_routes().layer(crate::middleware::auth_rate_limiter()),
        )
        .nest("/pages", page_routes())
}
