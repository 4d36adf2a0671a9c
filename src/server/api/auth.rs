//! Account and session endpoints, plus the Google OAuth redirect pair.

use axum::{
  extract::{Path, Query, State},
  http::HeaderMap,
  response::Redirect,
  Json,
};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use uuid::Uuid;

use super::{
  current_user, extract_token_from_headers, parse_role, require_super_admin, ApiError, AppState,
};
use crate::db::{OtpPurpose, StoreUser};
use crate::mail::{password_reset_mail, verification_mail};
use crate::server::auth as authn;
use crate::server::oauth;
use crate::site::Role;

fn email_regex() -> &'static regex::Regex {
  static RE: OnceLock<regex::Regex> = OnceLock::new();
  RE.get_or_init(|| regex::Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap())
}

fn validate_email(email: &str) -> Result<String, ApiError> {
  let email = email.trim().to_lowercase();
  if !email_regex().is_match(&email) {
    return Err(ApiError::BadRequest("Enter a valid email address".into()));
  }
  Ok(email)
}

#[derive(Serialize)]
pub(crate) struct UserResponse {
  id: String,
  email: String,
  display_name: String,
  role: String,
  email_verified: bool,
  created_at: String,
}

impl From<StoreUser> for UserResponse {
  fn from(u: StoreUser) -> Self {
    Self {
      id: u.id.to_string(),
      email: u.email,
      display_name: u.display_name,
      role: u.role.to_string(),
      email_verified: u.email_verified,
      created_at: u.created_at.to_rfc3339(),
    }
  }
}

#[derive(Serialize)]
pub(crate) struct LoginResponse {
  token: String,
  user: UserResponse,
}

async fn start_session(state: &AppState, user: StoreUser) -> Result<LoginResponse, ApiError> {
  let session_token = authn::generate_session_token();
  let session_hash = authn::hash_session_token(&session_token);
  let expires_at = Utc::now() + Duration::days(state.config.auth.session_ttl_days);
  state
    .backend
    .create_session(user.id, &session_hash, expires_at)
    .await?;
  Ok(LoginResponse {
    token: format!("session_{}", session_token),
    user: user.into(),
  })
}

async fn issue_otp(
  state: &AppState,
  user_id: Uuid,
  purpose: OtpPurpose,
) -> Result<String, ApiError> {
  let code = authn::generate_otp();
  let expires_at = Utc::now() + Duration::minutes(state.config.auth.otp_ttl_minutes);
  state
    .backend
    .upsert_otp(user_id, purpose, &authn::hash_otp(&code), expires_at)
    .await?;
  Ok(code)
}

// =============================================================================
// Register / login / logout / status
// =============================================================================

#[derive(Deserialize)]
pub(crate) struct RegisterRequest {
  email: String,
  display_name: String,
  password: String,
  confirm_password: String,
}

/// POST /api/auth/register - create an account and send a verification code
pub(crate) async fn api_register(
  State(state): State<AppState>,
  Json(req): Json<RegisterRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
  let email = validate_email(&req.email)?;
  if req.display_name.trim().len() < 2 {
    return Err(ApiError::BadRequest("Name must be at least 2 characters".into()));
  }
  if req.password.len() < 8 {
    return Err(ApiError::BadRequest(
      "Password must be at least 8 characters".into(),
    ));
  }
  if req.password != req.confirm_password {
    return Err(ApiError::BadRequest("Passwords do not match".into()));
  }
  if state.backend.get_user_by_email(&email).await?.is_some() {
    return Err(ApiError::BadRequest("Email is already registered".into()));
  }

  let password_hash = authn::hash_password(&req.password)
    .map_err(|e| ApiError::Internal(anyhow::anyhow!("Password hash error: {}", e)))?;
  let user = state
    .backend
    .create_user(&email, req.display_name.trim(), &password_hash, Role::Customer, false)
    .await?;

  let code = issue_otp(&state, user.id, OtpPurpose::VerifyEmail).await?;
  state
    .mailer
    .send(verification_mail(&user.email, &code))
    .await?;

  Ok(Json(serde_json::json!({
    "message": "Account created. Check your email for a verification code."
  })))
}

#[derive(Deserialize)]
pub(crate) struct LoginRequest {
  email: String,
  password: String,
}

/// POST /api/auth/login
pub(crate) async fn api_login(
  State(state): State<AppState>,
  Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
  let email = req.email.trim().to_lowercase();
  let (user, password_hash) = state
    .backend
    .get_user_by_email(&email)
    .await?
    .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

  if !authn::verify_password(&req.password, &password_hash) {
    return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
  }

  Ok(Json(start_session(&state, user).await?))
}

/// POST /api/auth/logout - invalidate the current session
pub(crate) async fn api_logout(
  State(state): State<AppState>,
  headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ApiError> {
  if let Some((session, _)) = current_user(&state, &headers).await? {
    state.backend.delete_session(session.id).await?;
  }
  Ok(Json(serde_json::json!({"message": "Logged out"})))
}

#[derive(Serialize)]
pub(crate) struct AuthStatusResponse {
  logged_in: bool,
  user: Option<UserResponse>,
}

/// GET /api/auth/status
pub(crate) async fn api_status(
  State(state): State<AppState>,
  headers: HeaderMap,
) -> Result<Json<AuthStatusResponse>, ApiError> {
  // A stale or malformed token is simply "not logged in", never an error.
  if extract_token_from_headers(&headers).is_some() {
    if let Some((_, user)) = current_user(&state, &headers).await? {
      return Ok(Json(AuthStatusResponse {
        logged_in: true,
        user: Some(user.into()),
      }));
    }
  }
  Ok(Json(AuthStatusResponse {
    logged_in: false,
    user: None,
  }))
}

// =============================================================================
// Password reset
// =============================================================================

#[derive(Deserialize)]
pub(crate) struct ForgotPasswordRequest {
  email: String,
}

/// POST /api/auth/forgot-password - always answers the same way so the
/// endpoint does not leak which addresses exist.
pub(crate) async fn api_forgot_password(
  State(state): State<AppState>,
  Json(req): Json<ForgotPasswordRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
  let email = validate_email(&req.email)?;
  if let Some((user, _)) = state.backend.get_user_by_email(&email).await? {
    let code = issue_otp(&state, user.id, OtpPurpose::ResetPassword).await?;
    state
      .mailer
      .send(password_reset_mail(&user.email, &code))
      .await?;
  }
  Ok(Json(serde_json::json!({
    "message": "If that address has an account, a reset code is on its way."
  })))
}

#[derive(Deserialize)]
pub(crate) struct ResetPasswordRequest {
  email: String,
  code: String,
  password: String,
  confirm_password: String,
}

/// POST /api/auth/reset-password
pub(crate) async fn api_reset_password(
  State(state): State<AppState>,
  Json(req): Json<ResetPasswordRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
  let email = validate_email(&req.email)?;
  if req.password.len() < 8 {
    return Err(ApiError::BadRequest(
      "Password must be at least 8 characters".into(),
    ));
  }
  if req.password != req.confirm_password {
    return Err(ApiError::BadRequest("Passwords do not match".into()));
  }
  let (user, _) = state
    .backend
    .get_user_by_email(&email)
    .await?
    .ok_or_else(|| ApiError::BadRequest("Invalid or expired code".to_string()))?;

  let consumed = state
    .backend
    .consume_otp(user.id, OtpPurpose::ResetPassword, &authn::hash_otp(req.code.trim()))
    .await?;
  if !consumed {
    return Err(ApiError::BadRequest("Invalid or expired code".into()));
  }

  let password_hash = authn::hash_password(&req.password)
    .map_err(|e| ApiError::Internal(anyhow::anyhow!("Password hash error: {}", e)))?;
  state
    .backend
    .update_user_password(user.id, &password_hash)
    .await?;

  Ok(Json(serde_json::json!({
    "message": "Password updated. You can sign in now."
  })))
}

// =============================================================================
// Email verification
// =============================================================================

#[derive(Deserialize)]
pub(crate) struct VerifyEmailRequest {
  email: String,
  code: String,
}

async fn verify_email_inner(state: &AppState, email: &str, code: &str) -> Result<bool, ApiError> {
  let Some((user, _)) = state.backend.get_user_by_email(email).await? else {
    return Ok(false);
  };
  let consumed = state
    .backend
    .consume_otp(user.id, OtpPurpose::VerifyEmail, &authn::hash_otp(code.trim()))
    .await?;
  if consumed {
    state.backend.set_email_verified(user.id, true).await?;
  }
  Ok(consumed)
}

/// POST /api/auth/verify-email - the six-digit code variant
pub(crate) async fn api_verify_email(
  State(state): State<AppState>,
  Json(req): Json<VerifyEmailRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
  let email = validate_email(&req.email)?;
  if verify_email_inner(&state, &email, &req.code).await? {
    Ok(Json(serde_json::json!({"message": "Email verified."})))
  } else {
    Err(ApiError::BadRequest("Invalid or expired code".into()))
  }
}

#[derive(Deserialize)]
pub(crate) struct VerifyEmailLinkQuery {
  email: String,
  code: String,
}

/// GET /api/auth/verify-email - the link-in-mail variant; lands back on
/// the login page either way.
pub(crate) async fn api_verify_email_link(
  State(state): State<AppState>,
  Query(query): Query<VerifyEmailLinkQuery>,
) -> Result<Redirect, ApiError> {
  let email = validate_email(&query.email)?;
  let ok = verify_email_inner(&state, &email, &query.code).await?;
  let target = format!(
    "{}/login?verified={}",
    state.config.server.public_url,
    if ok { "1" } else { "0" }
  );
  Ok(Redirect::temporary(&target))
}

#[derive(Deserialize)]
pub(crate) struct ResendVerificationRequest {
  email: String,
}

/// POST /api/auth/resend-verification - explicit user action, the only
/// retry path there is.
pub(crate) async fn api_resend_verification(
  State(state): State<AppState>,
  Json(req): Json<ResendVerificationRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
  let email = validate_email(&req.email)?;
  if let Some((user, _)) = state.backend.get_user_by_email(&email).await? {
    if !user.email_verified {
      let code = issue_otp(&state, user.id, OtpPurpose::VerifyEmail).await?;
      state
        .mailer
        .send(verification_mail(&user.email, &code))
        .await?;
    }
  }
  Ok(Json(serde_json::json!({
    "message": "If that address needs verification, a new code is on its way."
  })))
}

// =============================================================================
// Google OAuth
// =============================================================================

fn oauth_redirect_uri(state: &AppState) -> String {
  format!(
    "{}/api/auth/oauth/google/callback",
    state.config.server.public_url
  )
}

fn popup_redirect(state: &AppState, query: &str) -> Redirect {
  Redirect::temporary(&format!(
    "{}/oauth/callback?{}",
    state.config.server.public_url, query
  ))
}

/// GET /api/auth/oauth/google - send the popup to the provider
pub(crate) async fn api_oauth_google(State(state): State<AppState>) -> Result<Redirect, ApiError> {
  let google = &state.config.oauth.google;
  if !google.is_configured() {
    return Err(ApiError::BadRequest(
      "Google sign-in is not configured".into(),
    ));
  }
  let url = oauth::authorize_url(google, &oauth_redirect_uri(&state));
  Ok(Redirect::temporary(&url))
}

#[derive(Deserialize)]
pub(crate) struct OauthCallbackQuery {
  code: Option<String>,
  error: Option<String>,
}

/// GET /api/auth/oauth/google/callback - exchange the code, sign the user
/// in, and bounce back to the popup route with `token` or `error`.
pub(crate) async fn api_oauth_google_callback(
  State(state): State<AppState>,
  Query(query): Query<OauthCallbackQuery>,
) -> Result<Redirect, ApiError> {
  if let Some(error) = query.error {
    return Ok(popup_redirect(
      &state,
      &format!("error={}", oauth::urlencode(&error)),
    ));
  }
  let Some(code) = query.code else {
    return Ok(popup_redirect(&state, "error=missing_code"));
  };

  let google = state.config.oauth.google.clone();
  let identity = match oauth::exchange_code(&google, &code, &oauth_redirect_uri(&state)).await {
    Ok(identity) => identity,
    Err(e) => {
      tracing::warn!("OAuth exchange failed: {:#}", e);
      return Ok(popup_redirect(&state, "error=exchange_failed"));
    }
  };

  let email = identity.email.trim().to_lowercase();
  let user = match state.backend.get_user_by_email(&email).await? {
    Some((user, _)) => user,
    None => {
      // First sign-in: provision an account with an unusable password.
      let placeholder = authn::hash_password(&authn::generate_session_token())
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("Password hash error: {}", e)))?;
      let display_name = identity.name.clone().unwrap_or_else(|| email.clone());
      state
        .backend
        .create_user(
          &email,
          &display_name,
          &placeholder,
          Role::Customer,
          identity.email_verified.unwrap_or(true),
        )
        .await?
    }
  };

  let login = start_session(&state, user).await?;
  Ok(popup_redirect(&state, &format!("token={}", login.token)))
}

// =============================================================================
// User administration (super admin)
// =============================================================================

/// GET /api/admin/users
pub(crate) async fn api_admin_list_users(
  State(state): State<AppState>,
  headers: HeaderMap,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
  require_super_admin(&state, &headers).await?;
  let users = state.backend.list_users().await?;
  Ok(Json(users.into_iter().map(|u| u.into()).collect()))
}

#[derive(Deserialize)]
pub(crate) struct UpdateRoleRequest {
  role: String,
}

/// PUT /api/admin/users/{id}/role
pub(crate) async fn api_admin_update_user_role(
  State(state): State<AppState>,
  headers: HeaderMap,
  Path(id): Path<Uuid>,
  Json(req): Json<UpdateRoleRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
  let acting = require_super_admin(&state, &headers).await?;
  if acting.id == id {
    return Err(ApiError::BadRequest("You cannot change your own role".into()));
  }
  let role = parse_role(&req.role)?;
  if !state.backend.update_user_role(id, role).await? {
    return Err(ApiError::NotFound("User not found".into()));
  }
  Ok(Json(serde_json::json!({"message": "Role updated"})))
}
