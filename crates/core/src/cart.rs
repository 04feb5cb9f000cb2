//! Cart lines and mutation rules.
//!
//! A cart is a list of product snapshots with quantities. Lines always carry
//! a quantity of at least 1; setting a quantity to zero removes the line.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::types::ProductId;

/// A single cart line: a product snapshot plus quantity.
///
/// The product is snapshotted at add time so a later admin price edit does
/// not silently reprice a cart mid-session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

/// Errors raised by cart mutations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CartError {
    /// The referenced product has no line in the cart.
    #[error("product {0} is not in the cart")]
    LineNotFound(ProductId),
}

/// A shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// The cart lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Look up a line by product ID.
    #[must_use]
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product.id == product_id)
    }

    /// Add `quantity` units of a product.
    ///
    /// If the product is already in the cart its quantity is increased;
    /// otherwise a new line is appended. A `quantity` of zero is treated
    /// as one, matching the "add to cart" button semantics.
    pub fn add(&mut self, product: Product, quantity: u32) {
        let quantity = quantity.max(1);
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product.id == product.id)
        {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.lines.push(CartLine { product, quantity });
        }
    }

    /// Set the quantity of an existing line.
    ///
    /// A quantity of zero removes the line entirely.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if the product is not in the cart.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return self.remove(product_id);
        }

        let line = self
            .lines
            .iter_mut()
            .find(|line| line.product.id == product_id)
            .ok_or(CartError::LineNotFound(product_id))?;
        line.quantity = quantity;
        Ok(())
    }

    /// Remove a line from the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if the product is not in the cart.
    pub fn remove(&mut self, product_id: ProductId) -> Result<(), CartError> {
        let before = self.lines.len();
        self.lines.retain(|line| line.product.id != product_id);
        if self.lines.len() == before {
            return Err(CartError::LineNotFound(product_id));
        }
        Ok(())
    }

    /// Remove all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
