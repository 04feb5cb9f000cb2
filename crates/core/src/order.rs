//! Order records and order-number generation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cart::Cart;
use crate::checkout::ShippingInfo;
use crate::pricing::{self, CartTotals};
use crate::types::{Email, ProductId};

/// A customer-facing order number.
///
/// Derived from a UUIDv4 so numbers are unique without coordination. The
/// `CMD-` prefix is kept from the store's historical numbering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Generate a fresh order number, e.g. `CMD-9F86D081884C`.
    #[must_use]
    pub fn generate() -> Self {
        let uuid = Uuid::new_v4().simple().to_string().to_uppercase();
        let short = uuid.get(..12).unwrap_or(uuid.as_str());
        Self(format!("CMD-{short}"))
    }

    /// Wrap an order number received from a client, normalizing case.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        Self(s.trim().to_uppercase())
    }

    /// The order number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
    Shipped,
    Delivered,
    Cancelled,
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("unknown order status: {s}")),
        }
    }
}

/// Errors raised by order transitions.
#[derive(Debug, Clone, thiserror::Error)]
pub enum OrderError {
    /// Delivered orders are final and cannot be cancelled.
    #[error("a delivered order cannot be cancelled")]
    CannotCancel,
    /// Cancelled orders cannot move to another status.
    #[error("order is cancelled")]
    Cancelled,
}

/// A snapshot of one purchased line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
    /// Unit price with any discount applied, at purchase time.
    pub unit_price: Decimal,
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub number: OrderNumber,
    pub email: Email,
    pub lines: Vec<OrderLine>,
    pub totals: CartTotals,
    pub shipping: ShippingInfo,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Build an order from a paid cart.
    ///
    /// Orders are created already `Paid`: the mock gateway answered before
    /// this record exists.
    #[must_use]
    pub fn from_cart(cart: &Cart, shipping: ShippingInfo) -> Self {
        let totals = CartTotals::compute(cart, shipping.method);
        let lines = cart
            .lines()
            .iter()
            .map(|line| OrderLine {
                product_id: line.product.id,
                name: line.product.name.clone(),
                quantity: line.quantity,
                unit_price: pricing::unit_price(&line.product),
            })
            .collect();

        Self {
            number: OrderNumber::generate(),
            email: shipping.email.clone(),
            lines,
            totals,
            shipping,
            status: OrderStatus::Paid,
            created_at: Utc::now(),
        }
    }

    /// Move the order to a new status.
    ///
    /// # Errors
    ///
    /// Delivered orders cannot be cancelled and cancelled orders are final.
    pub fn set_status(&mut self, status: OrderStatus) -> Result<(), OrderError> {
        match (self.status, status) {
            (OrderStatus::Delivered, OrderStatus::Cancelled) => Err(OrderError::CannotCancel),
            (OrderStatus::Cancelled, s) if s != OrderStatus::Cancelled => {
                Err(OrderError::Cancelled)
            }
            _ => {
                self.status = status;
                Ok(())
            }
        }
    }
}
