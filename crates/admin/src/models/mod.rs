//! Data models for the admin panel.

pub mod session;

pub use session::{CurrentAdmin, session_keys};
