//! Checkout route handlers.
//!
//! Checkout state lives in the session next to the cart. A declined charge
//! leaves the checkout on the payment step so the customer can retry; a
//! successful charge writes the order to the store and clears both cart and
//! checkout.

use axum::{Json, extract::State};
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use belle_core::cart::Cart;
use belle_core::checkout::{Checkout, CheckoutState, PaymentMethod, ShippingForm};
use belle_core::order::Order;
use belle_core::pricing::{CartTotals, ShippingMethod};

use crate::db::OrderRepository;
use crate::error::{AppError, Result};
use crate::models::session::keys;
use crate::routes::cart::{load_cart, save_cart};
use crate::services::payment::ChargeRequest;
use crate::state::AppState;

/// Checkout payload returned by every checkout endpoint.
#[derive(Debug, Serialize)]
pub struct CheckoutView {
    #[serde(flatten)]
    pub state: CheckoutState,
    pub totals: CartTotals,
}

impl CheckoutView {
    fn build(checkout: &Checkout, cart: &Cart) -> Self {
        let method = checkout
            .shipping()
            .map_or(ShippingMethod::Standard, |s| s.method);
        Self {
            state: checkout.state().clone(),
            totals: CartTotals::compute(cart, method),
        }
    }
}

/// Get the checkout from the session, defaulting to a fresh one.
async fn load_checkout(session: &Session) -> Checkout {
    session
        .get::<Checkout>(keys::CHECKOUT)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Persist the checkout back into the session.
async fn save_checkout(session: &Session, checkout: &Checkout) -> Result<()> {
    session
        .insert(keys::CHECKOUT, checkout)
        .await
        .map_err(|e| AppError::Internal(format!("session write failed: {e}")))
}

/// Drop the checkout from the session after completion.
async fn clear_checkout(session: &Session) -> Result<()> {
    session
        .remove::<Checkout>(keys::CHECKOUT)
        .await
        .map_err(|e| AppError::Internal(format!("session write failed: {e}")))?;
    Ok(())
}

/// `GET /checkout` - current step and totals.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Json<CheckoutView>> {
    let cart = load_cart(&session).await;
    let checkout = load_checkout(&session).await;
    Ok(Json(CheckoutView::build(&checkout, &cart)))
}

/// `POST /checkout/shipping` - validate the form and advance to payment.
#[instrument(skip(session, form))]
pub async fn submit_shipping(
    session: Session,
    Json(form): Json<ShippingForm>,
) -> Result<Json<CheckoutView>> {
    let cart = load_cart(&session).await;
    if cart.is_empty() {
        return Err(AppError::BadRequest("cart is empty".to_string()));
    }

    let mut checkout = load_checkout(&session).await;
    checkout.submit_shipping(form)?;
    save_checkout(&session, &checkout).await?;

    Ok(Json(CheckoutView::build(&checkout, &cart)))
}

/// Completed-order payload.
#[derive(Debug, Serialize)]
pub struct OrderConfirmation {
    pub order: Order,
}

/// `POST /checkout/payment` - charge the gateway and complete the order.
///
/// Responds `402` when the gateway declines; the checkout stays on the
/// payment step and the cart is untouched.
#[instrument(skip(state, session, method))]
pub async fn submit_payment(
    State(state): State<AppState>,
    session: Session,
    Json(method): Json<PaymentMethod>,
) -> Result<Json<OrderConfirmation>> {
    let mut cart = load_cart(&session).await;
    if cart.is_empty() {
        return Err(AppError::BadRequest("cart is empty".to_string()));
    }

    let mut checkout = load_checkout(&session).await;
    let shipping = checkout.authorize_payment(&method)?.clone();

    let totals = CartTotals::compute(&cart, shipping.method);
    state
        .gateway()
        .authorize(ChargeRequest {
            amount: totals.total,
            currency_code: totals.currency_code,
            method,
        })
        .await?;

    let order = Order::from_cart(&cart, shipping);
    checkout.complete(order.number.clone())?;
    OrderRepository::new(state.store()).insert(order.clone())?;

    tracing::info!(order_number = %order.number, total = %order.totals.total, "Order placed");

    cart.clear();
    save_cart(&session, &cart).await?;
    clear_checkout(&session).await?;

    Ok(Json(OrderConfirmation { order }))
}
