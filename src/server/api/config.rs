//! Site configuration and footer endpoints. Public reads serve the
//! normalized record; writes are super-admin only and always answer with
//! the record as re-read from storage.

use axum::{extract::State, http::HeaderMap, Json};
use serde::Deserialize;

use super::{require_super_admin, ApiError, AppState};
use crate::site::{FooterContent, SiteConfig};

/// GET /api/site-config - the record every visitor themes from
pub(crate) async fn api_get_site_config(
  State(state): State<AppState>,
) -> Result<Json<SiteConfig>, ApiError> {
  Ok(Json(state.site.current()))
}

/// GET /api/admin/site-config - the same record over the authenticated
/// surface; the admin UI reads and writes through this route only.
pub(crate) async fn api_admin_get_site_config(
  State(state): State<AppState>,
) -> Result<Json<SiteConfig>, ApiError> {
  Ok(Json(state.site.current()))
}

/// PUT /api/admin/site-config - replace the record wholesale
pub(crate) async fn api_admin_put_site_config(
  State(state): State<AppState>,
  headers: HeaderMap,
  Json(config): Json<SiteConfig>,
) -> Result<Json<SiteConfig>, ApiError> {
  require_super_admin(&state, &headers).await?;
  let saved = state.site.replace(config).await?;
  Ok(Json(saved))
}

/// GET /api/footer
pub(crate) async fn api_get_footer(
  State(state): State<AppState>,
) -> Result<Json<FooterContent>, ApiError> {
  Ok(Json(state.site.footer().await?))
}

/// PUT /api/admin/footer - any admin; the route already sits behind the
/// admin middleware
pub(crate) async fn api_admin_put_footer(
  State(state): State<AppState>,
  Json(footer): Json<FooterContent>,
) -> Result<Json<FooterContent>, ApiError> {
  Ok(Json(state.site.replace_footer(footer).await?))
}

#[derive(Deserialize)]
pub(crate) struct NewsletterRequest {
  email: String,
}

/// POST /api/newsletter
pub(crate) async fn api_subscribe_newsletter(
  State(state): State<AppState>,
  Json(req): Json<NewsletterRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
  if !state.site.current().is_feature_enabled("newsletter") {
    return Err(ApiError::BadRequest("Newsletter signup is disabled".into()));
  }
  let email = req.email.trim().to_lowercase();
  if email.is_empty() || !email.contains('@') {
    return Err(ApiError::BadRequest("Enter a valid email address".into()));
  }
  let added = state.backend.subscribe_newsletter(&email).await?;
  let message = if added {
    "Subscribed. Welcome aboard!"
  } else {
    "You are already subscribed."
  };
  Ok(Json(serde_json::json!({ "message": message })))
}
