//! User repository over the shared snapshot store.

use chrono::Utc;

use belle_core::store::{SharedStore, StoreError, UserRecord};
use belle_core::{Email, UserId};

/// Repository for user account operations.
pub struct UserRepository<'a> {
    store: &'a SharedStore,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(store: &'a SharedStore) -> Self {
        Self { store }
    }

    /// Get a user by their email address.
    #[must_use]
    pub fn get_by_email(&self, email: &Email) -> Option<UserRecord> {
        self.store
            .read(|state| state.users.iter().find(|u| u.email == *email).cloned())
    }

    /// Get a user by their ID.
    #[must_use]
    pub fn get_by_id(&self, id: UserId) -> Option<UserRecord> {
        self.store
            .read(|state| state.users.iter().find(|u| u.id == id).cloned())
    }

    /// Create a new user.
    ///
    /// Returns `None` if the email is already taken; the caller decides how to
    /// surface the conflict.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the snapshot cannot be persisted.
    pub fn create(
        &self,
        email: &Email,
        name: &str,
        password_hash: &str,
        is_admin: bool,
    ) -> Result<Option<UserRecord>, StoreError> {
        self.store.mutate(|state| {
            if state.users.iter().any(|u| u.email == *email) {
                return None;
            }
            let record = UserRecord {
                id: state.next_user_id(),
                email: email.clone(),
                name: name.to_string(),
                password_hash: password_hash.to_string(),
                is_admin,
                created_at: Utc::now(),
            };
            state.users.push(record.clone());
            Some(record)
        })
    }

    /// List all registered users, newest first.
    #[must_use]
    pub fn list(&self) -> Vec<UserRecord> {
        self.store.read(|state| {
            let mut users = state.users.clone();
            users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            users
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use belle_core::store::MemorySnapshot;
    use std::sync::Arc;

    fn test_store() -> SharedStore {
        SharedStore::open(Arc::new(MemorySnapshot::default()))
    }

    #[test]
    fn test_create_and_lookup() {
        let store = test_store();
        let repo = UserRepository::new(&store);
        let email = Email::parse("claire@exemple.fr").unwrap();

        let created = repo.create(&email, "Claire", "$argon2$fake", false).unwrap();
        let created = created.unwrap();
        assert_eq!(created.name, "Claire");
        assert!(!created.is_admin);

        let found = repo.get_by_email(&email).unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(repo.get_by_id(created.id).unwrap().email, email);
    }

    #[test]
    fn test_create_duplicate_email_returns_none() {
        let store = test_store();
        let repo = UserRepository::new(&store);
        let email = Email::parse("claire@exemple.fr").unwrap();

        repo.create(&email, "Claire", "h1", false).unwrap();
        let second = repo.create(&email, "Autre", "h2", false).unwrap();
        assert!(second.is_none());
    }

    #[test]
    fn test_ids_are_sequential() {
        let store = test_store();
        let repo = UserRepository::new(&store);

        let a = repo
            .create(&Email::parse("a@exemple.fr").unwrap(), "A", "h", false)
            .unwrap()
            .unwrap();
        let b = repo
            .create(&Email::parse("b@exemple.fr").unwrap(), "B", "h", false)
            .unwrap()
            .unwrap();
        assert!(b.id > a.id);
    }
}
