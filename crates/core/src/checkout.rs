//! The checkout state machine: shipping → payment → completed.
//!
//! Each step has an explicit, typed payload. The payment step is only
//! reachable once a shipping form with a non-empty address has been
//! accepted, and completion is only reachable from the payment step.

use serde::{Deserialize, Serialize};

use crate::order::OrderNumber;
use crate::pricing::ShippingMethod;
use crate::types::{Email, EmailError};

/// Validated shipping details for an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingInfo {
    pub full_name: String,
    pub email: Email,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub method: ShippingMethod,
}

/// Field-level errors for the shipping form.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ShippingValidationError {
    #[error("full name is required")]
    MissingFullName,
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),
    #[error("address is required")]
    MissingAddress,
    #[error("city is required")]
    MissingCity,
    #[error("postal code is required")]
    MissingPostalCode,
    #[error("country is required")]
    MissingCountry,
}

/// Raw shipping form input, as posted by the client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShippingForm {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub method: ShippingMethod,
}

impl ShippingForm {
    /// Validate the form into a [`ShippingInfo`].
    ///
    /// # Errors
    ///
    /// Returns the first failing field check.
    pub fn validate(self) -> Result<ShippingInfo, ShippingValidationError> {
        if self.full_name.trim().is_empty() {
            return Err(ShippingValidationError::MissingFullName);
        }
        let email = Email::parse(self.email.trim())?;
        if self.address.trim().is_empty() {
            return Err(ShippingValidationError::MissingAddress);
        }
        if self.city.trim().is_empty() {
            return Err(ShippingValidationError::MissingCity);
        }
        if self.postal_code.trim().is_empty() {
            return Err(ShippingValidationError::MissingPostalCode);
        }
        if self.country.trim().is_empty() {
            return Err(ShippingValidationError::MissingCountry);
        }

        Ok(ShippingInfo {
            full_name: self.full_name.trim().to_owned(),
            email,
            address: self.address.trim().to_owned(),
            city: self.city.trim().to_owned(),
            postal_code: self.postal_code.trim().to_owned(),
            country: self.country.trim().to_owned(),
            phone: self
                .phone
                .map(|p| p.trim().to_owned())
                .filter(|p| !p.is_empty()),
            method: self.method,
        })
    }
}

/// A payment method with its step-specific payload.
///
/// Card details are validated for shape only; nothing here talks to a real
/// gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PaymentMethod {
    Card {
        number: String,
        holder: String,
        expiry: String,
        cvc: String,
    },
    Paypal,
    ApplePay,
    CashOnDelivery,
}

/// Field-level errors for the payment form.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PaymentValidationError {
    #[error("card number is incomplete")]
    IncompleteCardNumber,
    #[error("card holder name is required")]
    MissingHolder,
    #[error("card expiry is invalid")]
    InvalidExpiry,
    #[error("card security code is invalid")]
    InvalidCvc,
}

impl PaymentMethod {
    /// Shape-check the payment payload.
    ///
    /// # Errors
    ///
    /// Returns the first failing card field check. Wallet and
    /// cash-on-delivery methods carry no fields to check.
    pub fn validate(&self) -> Result<(), PaymentValidationError> {
        let Self::Card {
            number,
            holder,
            expiry,
            cvc,
        } = self
        else {
            return Ok(());
        };

        let digits = number.chars().filter(char::is_ascii_digit).count();
        if digits < 16 {
            return Err(PaymentValidationError::IncompleteCardNumber);
        }
        if holder.trim().len() < 3 {
            return Err(PaymentValidationError::MissingHolder);
        }
        // MM/YY
        if expiry.len() != 5 || expiry.as_bytes().get(2) != Some(&b'/') {
            return Err(PaymentValidationError::InvalidExpiry);
        }
        let cvc_digits = cvc.chars().filter(char::is_ascii_digit).count();
        if !(3..=4).contains(&cvc_digits) || cvc_digits != cvc.len() {
            return Err(PaymentValidationError::InvalidCvc);
        }
        Ok(())
    }
}

/// Errors raised by checkout state transitions.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CheckoutError {
    /// Shipping has not been submitted yet; the payment step is locked.
    #[error("shipping step is not complete")]
    ShippingNotComplete,
    /// The checkout already completed; no further transitions allowed.
    #[error("checkout is already completed")]
    AlreadyCompleted,
    #[error(transparent)]
    InvalidShipping(#[from] ShippingValidationError),
    #[error(transparent)]
    InvalidPayment(#[from] PaymentValidationError),
}

/// The current checkout step, serialized into the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum CheckoutState {
    Shipping,
    Payment { shipping: ShippingInfo },
    Completed { order_number: OrderNumber },
}

/// A customer's checkout in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkout {
    state: CheckoutState,
}

impl Default for Checkout {
    fn default() -> Self {
        Self::new()
    }
}

impl Checkout {
    /// Start a fresh checkout at the shipping step.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: CheckoutState::Shipping,
        }
    }

    /// The current step.
    #[must_use]
    pub const fn state(&self) -> &CheckoutState {
        &self.state
    }

    /// The accepted shipping details, once past the shipping step.
    #[must_use]
    pub const fn shipping(&self) -> Option<&ShippingInfo> {
        match &self.state {
            CheckoutState::Payment { shipping } => Some(shipping),
            CheckoutState::Shipping | CheckoutState::Completed { .. } => None,
        }
    }

    /// Submit the shipping form and advance to the payment step.
    ///
    /// Re-submitting while already on the payment step replaces the
    /// shipping details (the customer went back to edit the form).
    ///
    /// # Errors
    ///
    /// Validation failures leave the state unchanged;
    /// [`CheckoutError::AlreadyCompleted`] if the checkout finished.
    pub fn submit_shipping(&mut self, form: ShippingForm) -> Result<(), CheckoutError> {
        if matches!(self.state, CheckoutState::Completed { .. }) {
            return Err(CheckoutError::AlreadyCompleted);
        }
        let shipping = form.validate()?;
        self.state = CheckoutState::Payment { shipping };
        Ok(())
    }

    /// Check that a payment attempt is allowed and its payload well-formed.
    ///
    /// Called before the gateway charge; a declined charge keeps the state
    /// on the payment step so the customer can retry.
    ///
    /// # Errors
    ///
    /// [`CheckoutError::ShippingNotComplete`] when the payment step is
    /// locked, [`CheckoutError::AlreadyCompleted`] after completion, or a
    /// payload validation error.
    pub fn authorize_payment(&self, method: &PaymentMethod) -> Result<&ShippingInfo, CheckoutError> {
        match &self.state {
            CheckoutState::Shipping => Err(CheckoutError::ShippingNotComplete),
            CheckoutState::Completed { .. } => Err(CheckoutError::AlreadyCompleted),
            CheckoutState::Payment { shipping } => {
                method.validate()?;
                Ok(shipping)
            }
        }
    }

    /// Record a successful charge and move to the completed step.
    ///
    /// # Errors
    ///
    /// [`CheckoutError::ShippingNotComplete`] when called from the shipping
    /// step, [`CheckoutError::AlreadyCompleted`] when called twice.
    pub fn complete(&mut self, order_number: OrderNumber) -> Result<(), CheckoutError> {
        match self.state {
            CheckoutState::Shipping => Err(CheckoutError::ShippingNotComplete),
            CheckoutState::Completed { .. } => Err(CheckoutError::AlreadyCompleted),
            CheckoutState::Payment { .. } => {
                self.state = CheckoutState::Completed { order_number };
                Ok(())
            }
        }
    }
}
