//! Seed the snapshot store with the demo accounts.
//!
//! Idempotent: accounts that already exist are left alone.

use std::path::Path;
use std::sync::Arc;

use belle_core::store::{JsonFileStore, SharedStore};

use super::{CliError, admin::insert_account};

/// Demo administrator credentials, matching the back-office login pair.
const DEMO_ADMIN_EMAIL: &str = "admin@bellecosmetics.example";
const DEMO_ADMIN_NAME: &str = "Administrateur";
const DEMO_ADMIN_PASSWORD: &str = "1456";

/// Demo customer account for walking through the shop.
const DEMO_CUSTOMER_EMAIL: &str = "claire@exemple.fr";
const DEMO_CUSTOMER_NAME: &str = "Claire Dubois";
const DEMO_CUSTOMER_PASSWORD: &str = "belle-demo-2024";

/// Write the demo accounts into the store at `path`.
pub fn run(path: &Path) -> Result<(), CliError> {
    let store = SharedStore::open(Arc::new(JsonFileStore::new(path)));

    match insert_account(
        &store,
        DEMO_ADMIN_EMAIL,
        DEMO_ADMIN_NAME,
        DEMO_ADMIN_PASSWORD,
        true,
    ) {
        Ok(record) => tracing::info!("Seeded demo admin ({})", record.email),
        Err(CliError::UserExists(_)) => tracing::info!("Demo admin already present"),
        Err(e) => return Err(e),
    }

    match insert_account(
        &store,
        DEMO_CUSTOMER_EMAIL,
        DEMO_CUSTOMER_NAME,
        DEMO_CUSTOMER_PASSWORD,
        false,
    ) {
        Ok(record) => tracing::info!("Seeded demo customer ({})", record.email),
        Err(CliError::UserExists(_)) => tracing::info!("Demo customer already present"),
        Err(e) => return Err(e),
    }

    tracing::info!("Store seeded at {}", path.display());
    Ok(())
}
