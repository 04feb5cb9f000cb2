//! Dashboard route handler.

use axum::{Json, extract::State};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::instrument;

use belle_core::order::{Order, OrderStatus};

use crate::db::{CustomerRepository, OrderRepository};
use crate::error::Result;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Dashboard metrics.
#[derive(Debug, Serialize)]
pub struct DashboardMetrics {
    pub order_count: usize,
    /// Sum of order totals, cancelled orders excluded.
    pub revenue: Decimal,
    pub customer_count: usize,
    pub product_count: usize,
}

/// Condensed order line for the dashboard.
#[derive(Debug, Serialize)]
pub struct RecentOrderView {
    pub number: String,
    pub customer_name: String,
    pub total: Decimal,
    pub status: OrderStatus,
}

impl From<&Order> for RecentOrderView {
    fn from(order: &Order) -> Self {
        Self {
            number: order.number.to_string(),
            customer_name: order.shipping.full_name.clone(),
            total: order.totals.total,
            status: order.status,
        }
    }
}

/// Dashboard payload.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub metrics: DashboardMetrics,
    pub recent_orders: Vec<RecentOrderView>,
}

/// `GET /dashboard` - store-wide metrics and recent orders.
#[instrument(skip(state, _admin))]
pub async fn show(
    State(state): State<AppState>,
    _admin: RequireAdminAuth,
) -> Result<Json<DashboardResponse>> {
    let orders = OrderRepository::new(state.store()).list();

    let revenue: Decimal = orders
        .iter()
        .filter(|o| o.status != OrderStatus::Cancelled)
        .map(|o| o.totals.total)
        .sum();

    let metrics = DashboardMetrics {
        order_count: orders.len(),
        revenue,
        customer_count: CustomerRepository::new(state.store()).customer_count(),
        product_count: state.catalog().len(),
    };

    let recent_orders = orders.iter().take(5).map(RecentOrderView::from).collect();

    Ok(Json(DashboardResponse {
        metrics,
        recent_orders,
    }))
}
