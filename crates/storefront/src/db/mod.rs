//! Data access for the storefront JSON snapshot store.
//!
//! The storefront keeps its mutable state (accounts, orders, catalog edits) in
//! a single [`belle_core::store::StoreState`] snapshot behind a
//! [`belle_core::store::SharedStore`]. Repositories here are thin typed views
//! over that store, so route handlers never touch `StoreState` directly.
//!
//! ## Collections
//!
//! - `users` - Site authentication accounts
//! - `orders` - Orders placed through checkout
//! - `product_overrides` / `removed_products` - Admin catalog edits layered
//!   over the built-in demo catalog

pub mod orders;
pub mod users;

pub use orders::OrderRepository;
pub use users::UserRepository;
