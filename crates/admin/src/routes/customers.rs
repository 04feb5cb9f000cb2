//! Customer listing routes.

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::instrument;

use belle_core::store::UserRecord;

use crate::db::CustomerRepository;
use crate::error::Result;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Account view without the password hash.
#[derive(Debug, Serialize)]
pub struct CustomerView {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&UserRecord> for CustomerView {
    fn from(user: &UserRecord) -> Self {
        Self {
            id: user.id.as_i32(),
            email: user.email.to_string(),
            name: user.name.clone(),
            is_admin: user.is_admin,
            created_at: user.created_at,
        }
    }
}

/// Customer listing payload.
#[derive(Debug, Serialize)]
pub struct CustomerListResponse {
    pub customers: Vec<CustomerView>,
    pub total: usize,
}

/// `GET /customers` - every registered account, newest first.
#[instrument(skip(state, _admin))]
pub async fn index(
    State(state): State<AppState>,
    _admin: RequireAdminAuth,
) -> Result<Json<CustomerListResponse>> {
    let customers: Vec<CustomerView> = CustomerRepository::new(state.store())
        .list()
        .iter()
        .map(CustomerView::from)
        .collect();
    let total = customers.len();
    Ok(Json(CustomerListResponse { customers, total }))
}
