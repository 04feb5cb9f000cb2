//! Admin authentication service.
//!
//! Verifies credentials against the shared store and only admits accounts
//! carrying the admin flag. The demo back-office pair resolves to the
//! seeded administrator account, creating it on first use.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use thiserror::Error;

use belle_core::store::{SharedStore, StoreError, UserRecord};
use belle_core::types::Email;

/// Demo back-office identifier accepted at the login endpoint.
const DEMO_ADMIN_IDENTIFIER: &str = "1234";
/// Password paired with [`DEMO_ADMIN_IDENTIFIER`].
const DEMO_ADMIN_PASSWORD: &str = "1456";
/// Email of the account the demo identifier resolves to.
const DEMO_ADMIN_EMAIL: &str = "admin@bellecosmetics.example";

/// Errors raised by admin authentication.
#[derive(Debug, Error)]
pub enum AdminAuthError {
    /// Unknown identifier or wrong password.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Valid credentials, but the account lacks the admin flag.
    #[error("account is not an admin")]
    NotAnAdmin,

    /// Store persistence failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Admin authentication against the shared store.
pub struct AdminAuthService<'a> {
    store: &'a SharedStore,
}

impl<'a> AdminAuthService<'a> {
    /// Create a new admin authentication service.
    #[must_use]
    pub const fn new(store: &'a SharedStore) -> Self {
        Self { store }
    }

    /// Login with an identifier and password.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCredentials` for unknown accounts or wrong passwords,
    /// and `NotAnAdmin` for valid customer accounts.
    pub fn login(&self, identifier: &str, password: &str) -> Result<UserRecord, AdminAuthError> {
        if identifier == DEMO_ADMIN_IDENTIFIER {
            if password != DEMO_ADMIN_PASSWORD {
                return Err(AdminAuthError::InvalidCredentials);
            }
            return self.ensure_demo_admin();
        }

        let email =
            Email::parse(identifier).map_err(|_| AdminAuthError::InvalidCredentials)?;
        let user = self
            .store
            .read(|state| state.users.iter().find(|u| u.email == email).cloned())
            .ok_or(AdminAuthError::InvalidCredentials)?;

        verify_password(password, &user.password_hash)?;

        if !user.is_admin {
            return Err(AdminAuthError::NotAnAdmin);
        }
        Ok(user)
    }

    /// Resolve the seeded administrator account, creating it if missing.
    fn ensure_demo_admin(&self) -> Result<UserRecord, AdminAuthError> {
        let email =
            Email::parse(DEMO_ADMIN_EMAIL).map_err(|_| AdminAuthError::InvalidCredentials)?;

        if let Some(admin) = self
            .store
            .read(|state| state.users.iter().find(|u| u.email == email).cloned())
        {
            return Ok(admin);
        }

        let password_hash = hash_password(DEMO_ADMIN_PASSWORD)?;
        let record = self.store.mutate(|state| {
            let record = UserRecord {
                id: state.next_user_id(),
                email: email.clone(),
                name: "Administrateur".to_string(),
                password_hash: password_hash.clone(),
                is_admin: true,
                created_at: Utc::now(),
            };
            state.users.push(record.clone());
            record
        })?;
        Ok(record)
    }
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AdminAuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AdminAuthError::InvalidCredentials)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AdminAuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AdminAuthError::InvalidCredentials)?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AdminAuthError::InvalidCredentials)
}
