//! Order administration routes.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use belle_core::order::{Order, OrderNumber, OrderStatus};

use crate::db::OrderRepository;
use crate::error::{AdminError, Result};
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Order listing payload.
#[derive(Debug, Serialize)]
pub struct OrderListResponse {
    pub orders: Vec<Order>,
    pub total: usize,
}

/// Status change request body.
#[derive(Debug, Deserialize)]
pub struct StatusBody {
    pub status: OrderStatus,
}

/// `GET /orders` - every order, newest first.
#[instrument(skip(state, _admin))]
pub async fn index(
    State(state): State<AppState>,
    _admin: RequireAdminAuth,
) -> Result<Json<OrderListResponse>> {
    let orders = OrderRepository::new(state.store()).list();
    let total = orders.len();
    Ok(Json(OrderListResponse { orders, total }))
}

/// `GET /orders/{number}` - one order.
#[instrument(skip(state, _admin))]
pub async fn show(
    State(state): State<AppState>,
    _admin: RequireAdminAuth,
    Path(number): Path<String>,
) -> Result<Json<Order>> {
    let number = OrderNumber::parse(&number);
    OrderRepository::new(state.store())
        .get(&number)
        .map(Json)
        .ok_or_else(|| AdminError::NotFound(format!("order {number}")))
}

/// `POST /orders/{number}/status` - transition an order.
#[instrument(skip(state, _admin, body))]
pub async fn set_status(
    State(state): State<AppState>,
    _admin: RequireAdminAuth,
    Path(number): Path<String>,
    Json(body): Json<StatusBody>,
) -> Result<Json<Order>> {
    let number = OrderNumber::parse(&number);
    let updated = OrderRepository::new(state.store())
        .set_status(&number, body.status)?
        .ok_or_else(|| AdminError::NotFound(format!("order {number}")))??;

    tracing::info!(order = %updated.number, status = ?updated.status, "Order status changed");
    Ok(Json(updated))
}
