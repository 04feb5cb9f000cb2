//! Admin account management commands.
//!
//! # Usage
//!
//! ```bash
//! belle-cli admin create -e chef@bellecosmetics.example -n "Chef" -p "un-mot-de-passe-long"
//! ```

use std::path::Path;
use std::sync::Arc;

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use chrono::Utc;

use belle_core::store::{JsonFileStore, SharedStore, UserRecord};
use belle_core::types::Email;

use super::CliError;

/// Minimum password length, matching the storefront registration rule.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Create a new admin account in the store at `path`.
pub fn create(path: &Path, email: &str, name: &str, password: &str) -> Result<(), CliError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(CliError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    let store = SharedStore::open(Arc::new(JsonFileStore::new(path)));

    let record = insert_account(&store, email, name, password, true)?;
    tracing::info!(
        "Admin account created! ID: {}, Email: {}",
        record.id.as_i32(),
        record.email
    );
    Ok(())
}

/// Insert an account, failing if the email is taken.
///
/// Shared by `seed` and `admin create`. Password policy is the caller's
/// responsibility: the seeded demo credentials are deliberately short.
pub fn insert_account(
    store: &SharedStore,
    email: &str,
    name: &str,
    password: &str,
    is_admin: bool,
) -> Result<UserRecord, CliError> {
    let email = Email::parse(email)?;
    let password_hash = hash_password(password)?;

    let created = store.mutate(|state| {
        if state.users.iter().any(|u| u.email == email) {
            return None;
        }
        let record = UserRecord {
            id: state.next_user_id(),
            email: email.clone(),
            name: name.to_string(),
            password_hash: password_hash.clone(),
            is_admin,
            created_at: Utc::now(),
        };
        state.users.push(record.clone());
        Some(record)
    })?;

    created.ok_or_else(|| CliError::UserExists(email.to_string()))
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, CliError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| CliError::Hash(e.to_string()))
}
