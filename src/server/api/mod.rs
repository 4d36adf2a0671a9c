//! REST API server: public storefront routes, auth, and the admin back
//! office, with the CSR bundle served as the SPA fallback.

mod auth;
mod catalog;
mod config;
mod orders;

use axum::extract::Request;
use axum::{
  http::{HeaderMap, StatusCode},
  middleware::Next,
  response::{IntoResponse, Response},
  routing::{delete, get, post, put},
  Json, Router,
};
use std::sync::Arc;
use tokio::sync::broadcast;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};

use super::auth as authn;
use super::store::SiteStore;
use super::ServerConfig;
use crate::db::{Session, StoreBackend, StoreUser};
use crate::mail::SharedMailer;
use crate::site::Role;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
  pub backend: Arc<dyn StoreBackend>,
  pub site: Arc<SiteStore>,
  pub mailer: SharedMailer,
  pub config: ServerConfig,
}

pub struct ApiServer {
  state: AppState,
  shutdown_rx: broadcast::Receiver<()>,
}

impl ApiServer {
  pub fn new(state: AppState, shutdown_rx: broadcast::Receiver<()>) -> Self {
    Self { state, shutdown_rx }
  }

  pub async fn run(mut self, addr: &str) -> Result<(), anyhow::Error> {
    let state = self.state.clone();

    let mut app = Router::new()
      // Health endpoints (no /api prefix for k8s probes) - always public
      .route("/health", get(health_check))
      .route("/ready", get(readiness_check))
      // Site configuration and footer - public reads
      .route("/api/site-config", get(config::api_get_site_config))
      .route("/api/footer", get(config::api_get_footer))
      .route("/api/newsletter", post(config::api_subscribe_newsletter))
      // Catalog - public reads
      .route("/api/products", get(catalog::api_list_products))
      .route("/api/products/{slug}", get(catalog::api_get_product))
      .route("/api/categories", get(catalog::api_list_categories))
      .route("/api/brands", get(catalog::api_list_brands))
      // Authentication
      .route("/api/auth/register", post(auth::api_register))
      .route("/api/auth/login", post(auth::api_login))
      .route("/api/auth/logout", post(auth::api_logout))
      .route("/api/auth/status", get(auth::api_status))
      .route("/api/auth/forgot-password", post(auth::api_forgot_password))
      .route("/api/auth/reset-password", post(auth::api_reset_password))
      .route(
        "/api/auth/verify-email",
        get(auth::api_verify_email_link).post(auth::api_verify_email),
      )
      .route(
        "/api/auth/resend-verification",
        post(auth::api_resend_verification),
      )
      .route("/api/auth/oauth/google", get(auth::api_oauth_google))
      .route(
        "/api/auth/oauth/google/callback",
        get(auth::api_oauth_google_callback),
      )
      // Orders and wishlist (session checked per-handler; guest checkout
      // is a feature flag)
      .route("/api/orders", post(orders::api_place_order))
      .route("/api/orders", get(orders::api_list_my_orders))
      .route("/api/orders/{id}", get(orders::api_get_order))
      .route("/api/wishlist", get(orders::api_list_wishlist))
      .route("/api/wishlist/{product_id}", put(orders::api_add_wishlist))
      .route(
        "/api/wishlist/{product_id}",
        delete(orders::api_remove_wishlist),
      );

    // Admin API routes (protected by admin auth; super-admin checks are
    // per-handler)
    let admin_routes = Router::new()
      .route(
        "/api/admin/site-config",
        get(config::api_admin_get_site_config).put(config::api_admin_put_site_config),
      )
      .route("/api/admin/footer", put(config::api_admin_put_footer))
      .route(
        "/api/admin/products",
        get(catalog::api_admin_list_products).post(catalog::api_create_product),
      )
      .route(
        "/api/admin/products/{id}",
        put(catalog::api_update_product).delete(catalog::api_delete_product),
      )
      .route("/api/admin/categories", post(catalog::api_upsert_category))
      .route(
        "/api/admin/categories/{id}",
        delete(catalog::api_delete_category),
      )
      .route("/api/admin/brands", post(catalog::api_upsert_brand))
      .route("/api/admin/brands/{id}", delete(catalog::api_delete_brand))
      .route("/api/admin/orders", get(orders::api_admin_list_orders))
      .route(
        "/api/admin/orders/{id}/status",
        put(orders::api_admin_update_order_status),
      )
      .route("/api/admin/users", get(auth::api_admin_list_users))
      .route(
        "/api/admin/users/{id}/role",
        put(auth::api_admin_update_user_role),
      )
      .layer(axum::middleware::from_fn_with_state(
        state.clone(),
        admin_auth_middleware,
      ));
    app = app.merge(admin_routes);

    // Build CORS layer based on config
    let cors = if state.config.server.cors_origins.is_empty()
      || state.config.server.cors_origins.iter().any(|o| o == "*")
    {
      CorsLayer::permissive()
    } else {
      let origins: Vec<_> = state
        .config
        .server
        .cors_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();
      CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
    };

    // Serve the WASM bundle, falling back to index.html for SPA routing
    let app = app
      .fallback_service(
        ServeDir::new("target/shop").not_found_service(ServeFile::new("target/shop/index.html")),
      )
      .layer(cors)
      .with_state(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Storefront at http://{}", addr);

    axum::serve(listener, app.into_make_service())
      .with_graceful_shutdown(async move {
        let _ = self.shutdown_rx.recv().await;
        tracing::info!("API server shutting down");
      })
      .await?;
    Ok(())
  }
}

async fn health_check() -> StatusCode {
  StatusCode::OK
}

async fn readiness_check(
  axum::extract::State(state): axum::extract::State<AppState>,
) -> StatusCode {
  match state.backend.list_categories().await {
    Ok(_) => StatusCode::OK,
    Err(_) => StatusCode::SERVICE_UNAVAILABLE,
  }
}

// =============================================================================
// Session helpers
// =============================================================================

/// Extract token from headers only
pub(crate) fn extract_token_from_headers(headers: &HeaderMap) -> Option<String> {
  headers
    .get("Authorization")
    .and_then(|v| v.to_str().ok())
    .and_then(|s| s.strip_prefix("Bearer "))
    .map(|s| s.to_string())
}

/// Resolve the current viewer from a bearer token, if any.
pub(crate) async fn current_user(
  state: &AppState,
  headers: &HeaderMap,
) -> Result<Option<(Session, StoreUser)>, ApiError> {
  let Some(token) = extract_token_from_headers(headers) else {
    return Ok(None);
  };
  let Some(session_token) = token.strip_prefix("session_") else {
    return Ok(None);
  };
  let hash = authn::hash_session_token(session_token);
  Ok(state.backend.validate_session(&hash).await?)
}

pub(crate) async fn require_user(
  state: &AppState,
  headers: &HeaderMap,
) -> Result<StoreUser, ApiError> {
  current_user(state, headers)
    .await?
    .map(|(_, user)| user)
    .ok_or_else(|| ApiError::Unauthorized("Not logged in".to_string()))
}

pub(crate) async fn require_admin(
  state: &AppState,
  headers: &HeaderMap,
) -> Result<StoreUser, ApiError> {
  let user = require_user(state, headers).await?;
  if !user.role.is_admin() {
    return Err(ApiError::Forbidden("Admin access required".to_string()));
  }
  Ok(user)
}

pub(crate) async fn require_super_admin(
  state: &AppState,
  headers: &HeaderMap,
) -> Result<StoreUser, ApiError> {
  let user = require_user(state, headers).await?;
  if !user.role.is_super_admin() {
    return Err(ApiError::Forbidden(
      "Super admin access required".to_string(),
    ));
  }
  Ok(user)
}

/// Auth middleware for the admin API surface. Role checks beyond "some
/// admin" stay in the handlers.
async fn admin_auth_middleware(
  axum::extract::State(state): axum::extract::State<AppState>,
  req: Request,
  next: Next,
) -> Response {
  match require_admin(&state, req.headers()).await {
    Ok(_) => next.run(req).await,
    Err(err) => err.into_response(),
  }
}

pub(crate) fn parse_role(s: &str) -> Result<Role, ApiError> {
  s.parse()
    .map_err(|_| ApiError::BadRequest(format!("Unknown role: {}", s)))
}

// =============================================================================
// Error type
// =============================================================================

pub enum ApiError {
  Internal(anyhow::Error),
  NotFound(String),
  BadRequest(String),
  Unauthorized(String),
  Forbidden(String),
}

impl From<anyhow::Error> for ApiError {
  fn from(e: anyhow::Error) -> Self {
    Self::Internal(e)
  }
}

impl From<serde_json::Error> for ApiError {
  fn from(e: serde_json::Error) -> Self {
    Self::Internal(e.into())
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, msg) = match self {
      Self::Internal(e) => {
        tracing::error!("internal error: {:#}", e);
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          "Internal server error".to_string(),
        )
      }
      Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
      Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
      Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
      Self::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
    };
    (status, Json(serde_json::json!({ "error": msg }))).into_response()
  }
}
