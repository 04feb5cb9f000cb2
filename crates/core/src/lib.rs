//! Belle Core - Shared domain library.
//!
//! This crate provides the domain model used across all Belle Cosmetics
//! components:
//! - `storefront` - Public-facing e-commerce API
//! - `admin` - Internal administration API
//! - `cli` - Command-line tools for seeding and management
//!
//! # Architecture
//!
//! The core crate contains the domain types and pure domain logic (catalog,
//! cart, pricing, checkout, orders) plus the persistence snapshot port. It
//! has no HTTP or async code, which keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices and emails
//! - [`catalog`] - Product records and the seeded demo catalog
//! - [`cart`] - Cart lines and mutation rules
//! - [`pricing`] - Subtotal / VAT / shipping / total computation
//! - [`checkout`] - The shipping → payment → completed state machine
//! - [`order`] - Order records and order-number generation
//! - [`store`] - The snapshot persistence port and its JSON file backend

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod order;
pub mod pricing;
pub mod store;
pub mod types;

pub use types::*;
