//! Admin authentication routes.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_sessions::Session;
use tracing::instrument;

use belle_core::store::UserRecord;

use crate::error::{AdminError, Result};
use crate::middleware::{clear_current_admin, set_current_admin};
use crate::models::CurrentAdmin;
use crate::services::auth::AdminAuthService;
use crate::state::AppState;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginBody {
    /// Email address, or the demo back-office identifier.
    pub identifier: String,
    pub password: String,
}

/// Admin view returned after login.
#[derive(Debug, Serialize)]
pub struct AdminView {
    pub id: i32,
    pub email: String,
    pub name: String,
}

impl From<&UserRecord> for AdminView {
    fn from(user: &UserRecord) -> Self {
        Self {
            id: user.id.as_i32(),
            email: user.email.to_string(),
            name: user.name.clone(),
        }
    }
}

/// `POST /auth/login` - authenticate an admin account.
#[instrument(skip(state, session, body))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<LoginBody>,
) -> Result<Json<AdminView>> {
    let auth = AdminAuthService::new(state.store());
    let admin = auth.login(&body.identifier, &body.password)?;

    // Rotate the session ID on privilege change
    session
        .cycle_id()
        .await
        .map_err(|e| AdminError::Internal(e.to_string()))?;
    set_current_admin(&session, &CurrentAdmin::from(&admin))
        .await
        .map_err(|e| AdminError::Internal(e.to_string()))?;

    tracing::info!(admin_id = admin.id.as_i32(), "Admin logged in");
    Ok(Json(AdminView::from(&admin)))
}

/// `POST /auth/logout` - end the admin session.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Json<Value>> {
    clear_current_admin(&session)
        .await
        .map_err(|e| AdminError::Internal(e.to_string()))?;
    session
        .flush()
        .await
        .map_err(|e| AdminError::Internal(e.to_string()))?;

    Ok(Json(json!({ "logged_out": true })))
}
