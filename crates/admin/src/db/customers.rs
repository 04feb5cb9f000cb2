//! Customer listing over the shared snapshot store.

use belle_core::store::{SharedStore, UserRecord};

/// Repository for customer account reads.
pub struct CustomerRepository<'a> {
    store: &'a SharedStore,
}

impl<'a> CustomerRepository<'a> {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(store: &'a SharedStore) -> Self {
        Self { store }
    }

    /// List every registered account, newest first.
    #[must_use]
    pub fn list(&self) -> Vec<UserRecord> {
        self.store.read(|state| {
            let mut users = state.users.clone();
            users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            users
        })
    }

    /// Number of customer accounts (admins excluded).
    #[must_use]
    pub fn customer_count(&self) -> usize {
        self.store
            .read(|state| state.users.iter().filter(|u| !u.is_admin).count())
    }
}
