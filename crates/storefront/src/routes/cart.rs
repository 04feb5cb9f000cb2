//! Cart route handlers.
//!
//! The cart lives in the session. Every mutation responds with the full cart
//! payload so clients can re-render without a second round-trip.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_sessions::Session;
use tracing::instrument;

use belle_core::ProductId;
use belle_core::cart::Cart;
use belle_core::pricing::{CartTotals, ShippingMethod, unit_price};

use crate::error::{AppError, Result};
use crate::models::session::keys;
use crate::state::AppState;

/// A cart line as returned to clients, with computed prices.
#[derive(Debug, Serialize)]
pub struct CartLineView {
    pub product: belle_core::catalog::Product,
    pub quantity: u32,
    pub unit_price: rust_decimal::Decimal,
    pub line_total: rust_decimal::Decimal,
}

/// The full cart payload.
#[derive(Debug, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub totals: CartTotals,
}

impl CartView {
    fn build(cart: &Cart, method: ShippingMethod) -> Self {
        let lines = cart
            .lines()
            .iter()
            .map(|line| {
                let unit = unit_price(&line.product);
                CartLineView {
                    unit_price: unit,
                    line_total: unit * rust_decimal::Decimal::from(line.quantity),
                    product: line.product.clone(),
                    quantity: line.quantity,
                }
            })
            .collect();
        Self {
            lines,
            totals: CartTotals::compute(cart, method),
        }
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Get the cart from the session, defaulting to an empty cart.
pub async fn load_cart(session: &Session) -> Cart {
    session
        .get::<Cart>(keys::CART)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Persist the cart back into the session.
pub async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session
        .insert(keys::CART, cart)
        .await
        .map_err(|e| AppError::Internal(format!("session write failed: {e}")))
}

/// Add to cart payload.
#[derive(Debug, Deserialize)]
pub struct AddToCartBody {
    pub product_id: ProductId,
    pub quantity: Option<u32>,
}

/// Update cart payload.
#[derive(Debug, Deserialize)]
pub struct UpdateCartBody {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Remove from cart payload.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartBody {
    pub product_id: ProductId,
}

// =============================================================================
// Handlers
// =============================================================================

/// `GET /cart` - current cart with totals (standard shipping).
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Json<CartView>> {
    let cart = load_cart(&session).await;
    Ok(Json(CartView::build(&cart, ShippingMethod::Standard)))
}

/// `POST /cart/add` - add a product, merging quantities.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<AddToCartBody>,
) -> Result<Json<CartView>> {
    let product = state
        .catalog()
        .into_iter()
        .find(|p| p.id == body.product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {}", body.product_id)))?;

    let mut cart = load_cart(&session).await;
    cart.add(product, body.quantity.unwrap_or(1));
    save_cart(&session, &cart).await?;

    Ok(Json(CartView::build(&cart, ShippingMethod::Standard)))
}

/// `POST /cart/update` - set a line's quantity; 0 removes the line.
#[instrument(skip(session))]
pub async fn update(
    session: Session,
    Json(body): Json<UpdateCartBody>,
) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session).await;
    cart.update_quantity(body.product_id, body.quantity)?;
    save_cart(&session, &cart).await?;

    Ok(Json(CartView::build(&cart, ShippingMethod::Standard)))
}

/// `POST /cart/remove` - drop a line.
#[instrument(skip(session))]
pub async fn remove(
    session: Session,
    Json(body): Json<RemoveFromCartBody>,
) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session).await;
    cart.remove(body.product_id)?;
    save_cart(&session, &cart).await?;

    Ok(Json(CartView::build(&cart, ShippingMethod::Standard)))
}

/// `POST /cart/clear` - empty the cart.
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session).await;
    cart.clear();
    save_cart(&session, &cart).await?;

    Ok(Json(CartView::build(&cart, ShippingMethod::Standard)))
}

/// `GET /cart/count` - badge count only.
#[instrument(skip(session))]
pub async fn count(session: Session) -> Json<Value> {
    let cart = load_cart(&session).await;
    Json(json!({ "count": cart.item_count() }))
}
