//! Admin panel configuration loaded from environment variables.
//!
//! Required: `ADMIN_BASE_URL`, `ADMIN_SESSION_SECRET` (min 32 chars, high
//! entropy). Optional: `ADMIN_HOST` (127.0.0.1), `ADMIN_PORT` (3001),
//! `BELLE_STORE_PATH` (data/store.json, shared with the storefront),
//! `SENTRY_DSN`.

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the admin panel
    pub base_url: String,
    /// Session signing secret
    pub session_secret: SecretString,
    /// Path to the JSON snapshot file shared with the storefront
    pub store_path: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

impl AdminConfig {
    /// Load configuration from environment variables, reading a `.env` file
    /// first if one is present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or malformed,
    /// or if the session secret looks like a placeholder or has low entropy.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        Ok(Self {
            host: parse_env("ADMIN_HOST", "127.0.0.1")?,
            port: parse_env("ADMIN_PORT", "3001")?,
            base_url: require_env("ADMIN_BASE_URL")?,
            session_secret: session_secret_from_env("ADMIN_SESSION_SECRET")?,
            store_path: PathBuf::from(env_or("BELLE_STORE_PATH", "data/store.json")),
            sentry_dsn: std::env::var("SENTRY_DSN").ok(),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn require_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_owned()))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    env_or(key, default)
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_owned(), e.to_string()))
}

fn session_secret_from_env(key: &str) -> Result<SecretString, ConfigError> {
    let secret = SecretString::from(require_env(key)?);
    check_secret(secret.expose_secret(), key)?;
    Ok(secret)
}

const MIN_SECRET_LENGTH: usize = 32;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Reject short, placeholder-looking, or low-entropy secrets. The admin
/// session gates catalog and order mutation, so the bar matches the
/// storefront's.
fn check_secret(value: &str, key: &str) -> Result<(), ConfigError> {
    let fail = |reason: String| Err(ConfigError::InsecureSecret(key.to_owned(), reason));

    if value.len() < MIN_SECRET_LENGTH {
        return fail(format!(
            "must be at least {MIN_SECRET_LENGTH} characters (got {})",
            value.len()
        ));
    }

    let lower = value.to_lowercase();
    let placeholders = [
        "your-", "changeme", "replace", "placeholder", "example", "secret", "password", "xxx",
        "todo", "fixme", "insert", "enter-", "put-your", "add-your",
    ];
    if let Some(hit) = placeholders.iter().find(|p| lower.contains(**p)) {
        return fail(format!("appears to be a placeholder (contains '{hit}')"));
    }

    let entropy = shannon_entropy(value);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return fail(format!(
            "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}); \
             use a randomly generated value"
        ));
    }

    Ok(())
}

/// Shannon entropy in bits per character.
#[allow(clippy::cast_precision_loss)]
fn shannon_entropy(s: &str) -> f64 {
    let counts = s.chars().fold(HashMap::<char, usize>::new(), |mut m, c| {
        *m.entry(c).or_default() += 1;
        m
    });
    let len = s.chars().count() as f64;
    counts
        .values()
        .map(|&n| {
            let p = n as f64 / len;
            -p * p.log2()
        })
        .sum()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_check_secret_rejects_short_and_weak_values() {
        assert!(check_secret("short", "TEST_VAR").is_err());
        assert!(check_secret(&"ab".repeat(20), "TEST_VAR").is_err());
        assert!(check_secret("changeme-changeme-changeme-changeme", "TEST_VAR").is_err());
    }

    #[test]
    fn test_check_secret_accepts_random_values() {
        assert!(check_secret("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6j", "TEST_VAR").is_ok());
    }

    #[test]
    fn test_socket_addr() {
        let config = AdminConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3001,
            base_url: "http://localhost:3001".to_owned(),
            session_secret: SecretString::from("x".repeat(32)),
            store_path: PathBuf::from("data/store.json"),
            sentry_dsn: None,
        };
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3001");
    }
}
