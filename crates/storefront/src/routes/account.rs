//! Account route handlers. All require a logged-in session.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use belle_core::order::Order;

use crate::db::OrderRepository;
use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::CurrentUser;
use crate::state::AppState;

/// Account overview payload.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub user: CurrentUser,
    pub order_count: usize,
}

/// `GET /account` - profile overview.
#[instrument(skip(state, user), fields(user_id = %user.0.id))]
pub async fn index(
    State(state): State<AppState>,
    user: RequireAuth,
) -> Result<Json<AccountResponse>> {
    let RequireAuth(user) = user;
    let order_count = OrderRepository::new(state.store())
        .list_for_email(&user.email)
        .len();

    Ok(Json(AccountResponse { user, order_count }))
}

/// `GET /account/orders` - order history, newest first.
#[instrument(skip(state, user), fields(user_id = %user.0.id))]
pub async fn orders(
    State(state): State<AppState>,
    user: RequireAuth,
) -> Result<Json<Vec<Order>>> {
    let RequireAuth(user) = user;
    let orders = OrderRepository::new(state.store()).list_for_email(&user.email);
    Ok(Json(orders))
}
