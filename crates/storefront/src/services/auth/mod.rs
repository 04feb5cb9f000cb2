//! Authentication service.
//!
//! Provides password-based registration and login backed by the snapshot
//! store. Passwords are hashed with Argon2id.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use belle_core::Email;
use belle_core::store::{SharedStore, UserRecord};

use crate::db::users::UserRepository;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Demo back-office identifier accepted at the login endpoint.
const DEMO_ADMIN_IDENTIFIER: &str = "1234";
/// Password paired with [`DEMO_ADMIN_IDENTIFIER`].
const DEMO_ADMIN_PASSWORD: &str = "1456";
/// Email of the account the demo identifier resolves to.
const DEMO_ADMIN_EMAIL: &str = "admin@bellecosmetics.example";

/// Authentication service.
///
/// Handles user registration and login against the shared store.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    store: &'a SharedStore,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(store: &'a SharedStore) -> Self {
        Self {
            users: UserRepository::new(store),
            store,
        }
    }

    /// Register a new user with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::WeakPassword` if the password doesn't meet requirements.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    pub fn register(&self, email: &str, name: &str, password: &str) -> Result<UserRecord, AuthError> {
        let email = Email::parse(email)?;
        validate_password(password)?;
        let password_hash = hash_password(password)?;

        let name = name.trim();
        if name.is_empty() {
            return Err(AuthError::WeakPassword("name is required".to_string()));
        }

        self.users
            .create(&email, name, &password_hash, false)?
            .ok_or(AuthError::UserAlreadyExists)
    }

    /// Login with an identifier and password.
    ///
    /// The identifier is normally an email address. The demo back-office pair
    /// (`1234` / `1456`) resolves to the seeded administrator account,
    /// creating it on first use.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the identifier/password is wrong.
    pub fn login(&self, identifier: &str, password: &str) -> Result<UserRecord, AuthError> {
        if identifier == DEMO_ADMIN_IDENTIFIER {
            if password != DEMO_ADMIN_PASSWORD {
                return Err(AuthError::InvalidCredentials);
            }
            return self.ensure_demo_admin();
        }

        let email = Email::parse(identifier).map_err(|_| AuthError::InvalidCredentials)?;
        let user = self
            .users
            .get_by_email(&email)
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &user.password_hash)?;
        Ok(user)
    }

    /// Resolve the seeded administrator account, creating it if missing.
    fn ensure_demo_admin(&self) -> Result<UserRecord, AuthError> {
        let email =
            Email::parse(DEMO_ADMIN_EMAIL).map_err(|e| AuthError::Hash(e.to_string()))?;
        if let Some(admin) = self.users.get_by_email(&email) {
            return Ok(admin);
        }
        let hash = hash_password(DEMO_ADMIN_PASSWORD)?;
        self.users
            .create(&email, "Administrateur", &hash, true)?
            .ok_or(AuthError::UserAlreadyExists)
    }

    /// Access the underlying store, used by handlers needing raw reads.
    #[must_use]
    pub const fn store(&self) -> &'a SharedStore {
        self.store
    }
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `AuthError::Hash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hash(e.to_string()))
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
