//! Session data models for the admin panel.

use belle_core::store::UserRecord;
use belle_core::types::{Email, UserId};
use serde::{Deserialize, Serialize};

/// The currently authenticated admin, stored in the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    pub id: UserId,
    pub email: Email,
    pub name: String,
}

impl From<&UserRecord> for CurrentAdmin {
    fn from(user: &UserRecord) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
        }
    }
}

/// Session storage keys.
pub mod session_keys {
    /// Key for the current admin.
    pub const CURRENT_ADMIN: &str = "current_admin";
}
