//! Cart pricing: subtotal, VAT, shipping and total.
//!
//! All arithmetic uses exact decimals. The contract, for any cart `C`:
//!
//! - `unit_price = price × (1 − discount/100)` when a discount is set
//! - `subtotal = Σ unit_price × quantity`
//! - `tax = subtotal × 20%`
//! - `shipping = 0` once `subtotal ≥ 50.00`, else the selected method's fee
//! - `total = subtotal + tax + shipping`
//!
//! The standard shipping fee is canonically 4.99 €. The source data this
//! store was migrated from quoted both 4.90 and 4.99 depending on the page;
//! 4.99 won (see DESIGN.md).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::catalog::Product;
use crate::types::CurrencyCode;

/// VAT rate applied to every order (20%).
#[must_use]
pub fn vat_rate() -> Decimal {
    Decimal::new(20, 2)
}

/// Subtotal at and above which shipping is free (50.00 €).
#[must_use]
pub fn free_shipping_threshold() -> Decimal {
    Decimal::new(50_00, 2)
}

/// Available shipping methods with their flat fees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ShippingMethod {
    /// Home delivery in 2-3 business days.
    #[default]
    Standard,
    /// Home delivery in 24h.
    Express,
    /// Delivery to a pickup point.
    PickupPoint,
}

impl ShippingMethod {
    /// Flat shipping fee for this method, before the free-shipping rule.
    #[must_use]
    pub fn fee(&self) -> Decimal {
        match self {
            Self::Standard => Decimal::new(4_99, 2),
            Self::Express => Decimal::new(9_90, 2),
            Self::PickupPoint => Decimal::new(3_90, 2),
        }
    }
}

/// Effective unit price of a product, with any discount applied.
///
/// Always at most the list price: discounts are validated into `[0, 100)`
/// at the catalog boundary.
#[must_use]
pub fn unit_price(product: &Product) -> Decimal {
    match product.discount {
        // price × (100 − d) / 100, kept exact
        Some(d) if d < 100 => product.price.amount * Decimal::new(i64::from(100 - d), 2),
        _ => product.price.amount,
    }
}

/// A fully computed price breakdown for a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
    pub item_count: u32,
    pub currency_code: CurrencyCode,
}

impl CartTotals {
    /// Compute the breakdown for a cart and shipping method.
    #[must_use]
    pub fn compute(cart: &Cart, method: ShippingMethod) -> Self {
        let subtotal: Decimal = cart
            .lines()
            .iter()
            .map(|line| unit_price(&line.product) * Decimal::from(line.quantity))
            .sum();

        let tax = subtotal * vat_rate();
        // No fee on an empty cart; there is nothing to ship yet.
        let shipping = if cart.is_empty() || subtotal >= free_shipping_threshold() {
            Decimal::ZERO
        } else {
            method.fee()
        };

        Self {
            subtotal,
            tax,
            shipping,
            total: subtotal + tax + shipping,
            item_count: cart.item_count(),
            currency_code: CurrencyCode::EUR,
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::catalog::demo_products;
    use crate::types::{Price, ProductId};

    fn priced_product(id: i32, price: Decimal, discount: Option<u8>) -> Product {
        let mut p = demo_products().into_iter().next().expect("demo product");
        p.id = ProductId::new(id);
        p.price = Price::eur(price);
        p.discount = discount;
        p
    }

    #[test]
    fn test_unit_price_without_discount() {
        let p = priced_product(1, dec!(45.99), None);
        assert_eq!(unit_price(&p), dec!(45.99));
    }

    #[test]
    fn test_unit_price_with_discount() {
        let p = priced_product(1, dec!(69.99), Some(10));
        assert_eq!(unit_price(&p), dec!(62.991));
    }

    #[test]
    fn test_unit_price_never_exceeds_list_price() {
        for d in 0..100 {
            let p = priced_product(1, dec!(38.50), Some(d));
            assert!(unit_price(&p) <= p.price.amount, "discount {d}");
        }
    }

    #[test]
    fn test_mixed_cart_breakdown() {
        // cart = [{45.99 × 1}, {69.99 at −10% × 2}]
        let mut cart = Cart::new();
        cart.add(priced_product(1, dec!(45.99), None), 1);
        cart.add(priced_product(2, dec!(69.99), Some(10)), 2);

        let totals = CartTotals::compute(&cart, ShippingMethod::Standard);
        assert_eq!(totals.subtotal, dec!(171.972));
        assert_eq!(totals.tax, dec!(34.3944));
        assert_eq!(totals.shipping, Decimal::ZERO);
        assert_eq!(totals.total, dec!(206.3664));
        assert_eq!(totals.item_count, 3);
    }

    #[test]
    fn test_total_is_sum_of_parts() {
        let mut cart = Cart::new();
        for (i, product) in demo_products().into_iter().enumerate() {
            cart.add(product, (i % 3 + 1) as u32);
        }
        for method in [
            ShippingMethod::Standard,
            ShippingMethod::Express,
            ShippingMethod::PickupPoint,
        ] {
            let t = CartTotals::compute(&cart, method);
            assert_eq!(t.total, t.subtotal + t.tax + t.shipping);
        }
    }

    #[test]
    fn test_empty_cart_owes_nothing() {
        let totals = CartTotals::compute(&Cart::new(), ShippingMethod::Express);
        assert_eq!(totals.shipping, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::ZERO);
    }

    #[test]
    fn test_shipping_free_at_threshold() {
        let mut cart = Cart::new();
        cart.add(priced_product(1, dec!(50.00), None), 1);
        let totals = CartTotals::compute(&cart, ShippingMethod::Express);
        assert_eq!(totals.shipping, Decimal::ZERO);
    }

    #[test]
    fn test_shipping_fee_below_threshold() {
        let mut cart = Cart::new();
        cart.add(priced_product(1, dec!(49.99), None), 1);

        let standard = CartTotals::compute(&cart, ShippingMethod::Standard);
        assert_eq!(standard.shipping, dec!(4.99));

        let express = CartTotals::compute(&cart, ShippingMethod::Express);
        assert_eq!(express.shipping, dec!(9.90));

        let pickup = CartTotals::compute(&cart, ShippingMethod::PickupPoint);
        assert_eq!(pickup.shipping, dec!(3.90));
    }

    #[test]
    fn test_empty_cart_still_charges_shipping_fee_only_on_total() {
        // An empty cart is rejected before checkout; totals stay consistent anyway.
        let totals = CartTotals::compute(&Cart::new(), ShippingMethod::Standard);
        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.total, totals.shipping);
    }
}
