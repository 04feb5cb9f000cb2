//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `auth` - Account registration and password login
//! - `payment` - Payment gateway port and the mock gateway implementation

pub mod auth;
pub mod payment;
