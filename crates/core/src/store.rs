//! The persistence snapshot port and its backends.
//!
//! The original store kept everything in browser local storage; here the
//! same idea becomes an explicit port: the whole application state is one
//! serializable [`StoreState`] snapshot, loaded once at startup and saved
//! after every mutation. Backends implement [`SnapshotPort`]; the default
//! is a JSON file, and tests use an in-memory snapshot.
//!
//! A missing or malformed snapshot always loads as empty state, never a
//! crash.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::order::Order;
use crate::types::{Email, ProductId, UserId};

/// A stored user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub email: Email,
    pub name: String,
    /// Argon2 PHC-format hash.
    pub password_hash: String,
    #[serde(default)]
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

/// The complete persisted application state.
///
/// This is the explicit JSON shape of the snapshot file. Unknown fields are
/// ignored on load; absent fields default, so hand-edited or older files
/// still open.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreState {
    #[serde(default)]
    pub users: Vec<UserRecord>,
    #[serde(default)]
    pub orders: Vec<Order>,
    /// Admin-edited products, overriding the base catalog by ID. Products
    /// with IDs beyond the base catalog are admin-created.
    #[serde(default)]
    pub product_overrides: Vec<Product>,
    /// Base-catalog products the admin removed.
    #[serde(default)]
    pub removed_products: Vec<ProductId>,
}

impl StoreState {
    /// Resolve the effective catalog: the base catalog with admin overrides
    /// applied, removals dropped and admin-created products appended.
    #[must_use]
    pub fn effective_catalog(&self, base: &[Product]) -> Vec<Product> {
        let mut catalog: Vec<Product> = base
            .iter()
            .filter(|p| !self.removed_products.contains(&p.id))
            .map(|p| {
                self.product_overrides
                    .iter()
                    .find(|o| o.id == p.id)
                    .unwrap_or(p)
                    .clone()
            })
            .collect();

        for extra in &self.product_overrides {
            if !base.iter().any(|p| p.id == extra.id)
                && !self.removed_products.contains(&extra.id)
            {
                catalog.push(extra.clone());
            }
        }

        catalog
    }

    /// Next free user ID.
    #[must_use]
    pub fn next_user_id(&self) -> UserId {
        let max = self.users.iter().map(|u| u.id.as_i32()).max().unwrap_or(0);
        UserId::new(max + 1)
    }

    /// Next free product ID, above both the base catalog and overrides.
    #[must_use]
    pub fn next_product_id(&self, base: &[Product]) -> ProductId {
        let max = base
            .iter()
            .map(|p| p.id.as_i32())
            .chain(self.product_overrides.iter().map(|p| p.id.as_i32()))
            .max()
            .unwrap_or(0);
        ProductId::new(max + 1)
    }
}

/// Errors raised when persisting a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to write snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A persistence backend for [`StoreState`] snapshots.
pub trait SnapshotPort: Send + Sync {
    /// Load the last saved state. Missing or unreadable snapshots load as
    /// empty state.
    fn load(&self) -> StoreState;

    /// Persist the state.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the snapshot cannot be written.
    fn save(&self, state: &StoreState) -> Result<(), StoreError>;
}

/// JSON-file-backed snapshot port.
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// crash mid-write never corrupts the previous snapshot.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by the given file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The snapshot file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotPort for JsonFileStore {
    fn load(&self) -> StoreState {
        match std::fs::read(&self.path) {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_default(),
            Err(_) => StoreState::default(),
        }
    }

    fn save(&self, state: &StoreState) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_vec_pretty(state)?;

        let tmp = self.path.with_extension("json.tmp");
        {
            let mut file = std::fs::File::create(&tmp)?;
            file.write_all(&json)?;
            file.sync_all()?;
        }
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// In-memory snapshot port for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemorySnapshot {
    state: RwLock<StoreState>,
}

impl MemorySnapshot {
    /// Create an empty in-memory snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotPort for MemorySnapshot {
    fn load(&self) -> StoreState {
        self.state.read().clone()
    }

    fn save(&self, state: &StoreState) -> Result<(), StoreError> {
        *self.state.write() = state.clone();
        Ok(())
    }
}

struct SharedStoreInner {
    state: RwLock<StoreState>,
    port: Arc<dyn SnapshotPort>,
}

/// The live application state: an in-memory [`StoreState`] guarded by a
/// lock, written through to its [`SnapshotPort`] after every mutation.
///
/// Cheaply cloneable via `Arc`; handlers in both services share one
/// instance.
#[derive(Clone)]
pub struct SharedStore {
    inner: Arc<SharedStoreInner>,
}

impl SharedStore {
    /// Open a store, loading the last snapshot from the port.
    #[must_use]
    pub fn open(port: Arc<dyn SnapshotPort>) -> Self {
        let state = port.load();
        Self {
            inner: Arc::new(SharedStoreInner {
                state: RwLock::new(state),
                port,
            }),
        }
    }

    /// Read from the current state.
    pub fn read<R>(&self, f: impl FnOnce(&StoreState) -> R) -> R {
        f(&self.inner.state.read())
    }

    /// Mutate the state and persist the result.
    ///
    /// The mutation is applied under the write lock; the snapshot is saved
    /// before the lock is released so concurrent mutations serialize their
    /// writes.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the snapshot cannot be persisted; the
    /// in-memory mutation still applies.
    pub fn mutate<R>(&self, f: impl FnOnce(&mut StoreState) -> R) -> Result<R, StoreError> {
        let mut state = self.inner.state.write();
        let result = f(&mut state);
        self.inner.port.save(&state)?;
        Ok(result)
    }

    /// Persist the current state unchanged. Used by readiness checks.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the snapshot cannot be persisted.
    pub fn flush(&self) -> Result<(), StoreError> {
        let state = self.inner.state.read();
        self.inner.port.save(&state)
    }
}
