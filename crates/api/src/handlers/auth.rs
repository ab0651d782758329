//! Handlers for the `/auth` resource (register, login, me).

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use prepvault_core::error::{require_text, CoreError};
use prepvault_db::models::user::{CreateUser, UserProfile};
use prepvault_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Same message for unknown email and wrong password.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserProfile,
}

/// Passwords are taken verbatim, but a blank one counts as missing.
fn required_password(password: Option<String>) -> Result<String, CoreError> {
    password
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| CoreError::Validation("Missing required field: password".into()))
}

/// Emails are stored and looked up lowercased.
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    let email = normalize_email(&require_text("email", input.email.as_deref())?);
    let password = required_password(input.password)?;

    if !email.validate_email() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Invalid email address: {email}"
        ))));
    }
    validate_password_strength(&password, state.config.password_min_length)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    if UserRepo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "An account with this email already exists".into(),
        )));
    }

    let password_hash = hash_password(&password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let name = input
        .name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());

    // A concurrent registration for the same email still hits `uq_users_email` (409).
    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email,
            password_hash,
            name,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UserProfile::from(&user),
        }),
    ))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password and return a bearer access token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let email = normalize_email(&require_text("email", input.email.as_deref())?);
    let password = required_password(input.password)?;

    let unauthorized = || AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into()));

    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(unauthorized)?;

    // Accounts created through an external provider have no password.
    let Some(hash) = user.password_hash.as_deref() else {
        return Err(unauthorized());
    };

    let password_valid = verify_password(&password, hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(user_id = user.id, "Login rejected: wrong password");
        return Err(unauthorized());
    }

    UserRepo::record_login(&state.pool, user.id).await?;

    let access_token = generate_access_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(LoginResponse {
        access_token,
        token_type: "Bearer",
        expires_in: state.config.jwt.expires_in_secs(),
        user: UserProfile::from(&user),
    }))
}

/// GET /api/v1/auth/me
pub async fn me(auth: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::Unauthorized(
            "Account no longer exists".into(),
        )))?;

    Ok(Json(DataResponse {
        data: UserProfile::from(&user),
    }))
}
