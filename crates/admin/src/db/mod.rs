//! Typed views over the shared snapshot store.
//!
//! Each repository borrows the [`SharedStore`](belle_core::store::SharedStore)
//! and exposes the operations the admin routes need.

pub mod customers;
pub mod orders;
pub mod products;

pub use customers::CustomerRepository;
pub use orders::OrderRepository;
pub use products::{ProductDraft, ProductRepository};
