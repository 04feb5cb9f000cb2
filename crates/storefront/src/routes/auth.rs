//! Authentication route handlers.
//!
//! Registration and login run against the snapshot store; the logged-in
//! user is stored in the session.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_sessions::Session;
use tracing::instrument;

use belle_core::store::UserRecord;

use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginBody {
    /// Email address, or the demo back-office identifier.
    pub identifier: String,
    pub password: String,
}

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    pub email: String,
    pub name: String,
    pub password: String,
}

/// Public view of an account, returned after login/registration.
#[derive(Debug, Serialize)]
pub struct UserView {
    pub id: belle_core::UserId,
    pub email: String,
    pub name: String,
    pub is_admin: bool,
}

impl From<&UserRecord> for UserView {
    fn from(user: &UserRecord) -> Self {
        Self {
            id: user.id,
            email: user.email.as_str().to_string(),
            name: user.name.clone(),
            is_admin: user.is_admin,
        }
    }
}

/// Store the account in the session and tag Sentry events with it.
async fn establish_session(session: &Session, user: &UserRecord) -> Result<()> {
    // Rotate the session id on privilege change
    session
        .cycle_id()
        .await
        .map_err(|e| AppError::Internal(format!("session rotation failed: {e}")))?;

    let current = CurrentUser {
        id: user.id,
        email: user.email.clone(),
        name: user.name.clone(),
        is_admin: user.is_admin,
    };
    set_current_user(session, &current)
        .await
        .map_err(|e| AppError::Internal(format!("session write failed: {e}")))?;
    set_sentry_user(&user.id, Some(user.email.as_str()));
    Ok(())
}

/// `POST /auth/register` - create an account and log it in.
#[instrument(skip(state, session, body))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<RegisterBody>,
) -> Result<Json<UserView>> {
    let auth = AuthService::new(state.store());
    let user = auth.register(&body.email, &body.name, &body.password)?;
    establish_session(&session, &user).await?;

    tracing::info!(user_id = %user.id, "Account registered");
    Ok(Json(UserView::from(&user)))
}

/// `POST /auth/login` - authenticate and open a session.
#[instrument(skip(state, session, body))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<LoginBody>,
) -> Result<Json<UserView>> {
    let auth = AuthService::new(state.store());
    let user = auth.login(&body.identifier, &body.password)?;
    establish_session(&session, &user).await?;

    tracing::info!(user_id = %user.id, "Login");
    Ok(Json(UserView::from(&user)))
}

/// `POST /auth/logout` - drop the session.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Json<Value>> {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session: {}", e);
    }

    // Also destroy the entire session (cart included)
    if let Err(e) = session.flush().await {
        tracing::error!("Failed to flush session: {}", e);
    }
    clear_sentry_user();

    Ok(Json(json!({ "logged_out": true })))
}
