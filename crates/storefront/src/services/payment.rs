//! Payment gateway port and the mock implementation.
//!
//! Checkout talks to a [`PaymentGateway`] trait so the mock gateway can be
//! swapped for a real processor without touching the checkout routes. The
//! mock approves a configurable fraction of charges after a short simulated
//! round-trip.

use async_trait::async_trait;
use rand::Rng;
use rust_decimal::Decimal;
use std::time::Duration;
use thiserror::Error;

use belle_core::CurrencyCode;
use belle_core::checkout::PaymentMethod;
use belle_core::order::OrderNumber;

/// Errors returned by a payment gateway.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// The gateway refused the charge.
    #[error("payment declined")]
    Declined,
}

/// A charge to authorize.
#[derive(Debug, Clone)]
pub struct ChargeRequest {
    pub amount: Decimal,
    pub currency_code: CurrencyCode,
    pub method: PaymentMethod,
}

/// Proof of an authorized charge.
#[derive(Debug, Clone)]
pub struct PaymentReceipt {
    pub reference: OrderNumber,
    pub amount: Decimal,
}

/// Gateway abstraction over payment processors.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Authorize a charge, returning a receipt on approval.
    async fn authorize(&self, charge: ChargeRequest) -> Result<PaymentReceipt, PaymentError>;
}

/// Mock gateway approving a configurable fraction of charges.
#[derive(Debug, Clone)]
pub struct MockGateway {
    success_rate: f64,
    delay: Duration,
}

impl MockGateway {
    /// Simulated processor round-trip.
    const DEFAULT_DELAY: Duration = Duration::from_millis(400);

    /// Create a gateway approving `success_rate` of charges, clamped to `[0, 1]`.
    #[must_use]
    pub fn new(success_rate: f64) -> Self {
        Self {
            success_rate: success_rate.clamp(0.0, 1.0),
            delay: Self::DEFAULT_DELAY,
        }
    }

    /// Create a gateway that approves every charge instantly. Test helper.
    #[must_use]
    pub const fn always_approve() -> Self {
        Self {
            success_rate: 1.0,
            delay: Duration::ZERO,
        }
    }

    /// Create a gateway that declines every charge instantly. Test helper.
    #[must_use]
    pub const fn always_decline() -> Self {
        Self {
            success_rate: 0.0,
            delay: Duration::ZERO,
        }
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new(0.9)
    }
}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn authorize(&self, charge: ChargeRequest) -> Result<PaymentReceipt, PaymentError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let roll = rand::rng().random::<f64>();
        if roll >= self.success_rate {
            tracing::info!(
                amount = %charge.amount,
                method = ?charge.method,
                "Mock gateway declined charge"
            );
            return Err(PaymentError::Declined);
        }

        Ok(PaymentReceipt {
            reference: OrderNumber::generate(),
            amount: charge.amount,
        })
    }
}
