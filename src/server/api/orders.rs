//! Checkout, order history, and wishlist endpoints.

use axum::{
  extract::{Path, Query, State},
  http::HeaderMap,
  Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use super::{current_user, require_super_admin, require_user, ApiError, AppState};
use crate::catalog::{order_total_cents, Order, OrderLine, OrderStatus, Product};
use crate::db::OrderRecord;

#[derive(Deserialize)]
pub(crate) struct CheckoutLine {
  product_id: String,
  quantity: u32,
}

#[derive(Deserialize)]
pub(crate) struct CheckoutRequest {
  #[serde(default)]
  email: Option<String>,
  lines: Vec<CheckoutLine>,
  #[serde(default)]
  shipping_address: String,
}

/// POST /api/orders - place an order.
///
/// Totals and line prices come from the stored products, never from the
/// client. Stock is decremented per line; the first line that cannot be
/// satisfied fails the whole checkout.
pub(crate) async fn api_place_order(
  State(state): State<AppState>,
  headers: HeaderMap,
  Json(req): Json<CheckoutRequest>,
) -> Result<Json<Order>, ApiError> {
  let viewer = current_user(&state, &headers).await?;
  let site = state.site.current();

  let (user_id, email) = match &viewer {
    Some((_, user)) => (Some(user.id), user.email.clone()),
    None => {
      if !site.is_feature_enabled("guest_checkout") {
        return Err(ApiError::Unauthorized("Sign in to check out".into()));
      }
      let email = req
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| e.contains('@'))
        .ok_or_else(|| ApiError::BadRequest("A contact email is required".to_string()))?;
      (None, email.to_lowercase())
    }
  };

  if req.lines.is_empty() {
    return Err(ApiError::BadRequest("Your cart is empty".into()));
  }
  if req.shipping_address.trim().is_empty() {
    return Err(ApiError::BadRequest("A shipping address is required".into()));
  }

  let mut lines: Vec<OrderLine> = Vec::with_capacity(req.lines.len());
  let mut currency = "USD".to_string();
  for line in &req.lines {
    if line.quantity == 0 {
      return Err(ApiError::BadRequest("Quantities must be at least 1".into()));
    }
    let product_id: Uuid = line
      .product_id
      .parse()
      .map_err(|_| ApiError::BadRequest("Unknown product in cart".to_string()))?;
    let product = state
      .backend
      .get_product(product_id)
      .await?
      .filter(|p| p.active)
      .ok_or_else(|| ApiError::BadRequest("Unknown product in cart".to_string()))?;
    let taken = state
      .backend
      .decrement_stock(product_id, line.quantity as i64)
      .await?;
    if !taken {
      return Err(ApiError::BadRequest(format!(
        "Not enough stock for {}",
        product.name
      )));
    }
    currency = product.currency.clone();
    lines.push(OrderLine {
      product_id: product.id.to_string(),
      product_name: product.name,
      unit_price_cents: product.price_cents,
      quantity: line.quantity,
    });
  }

  let record = OrderRecord {
    id: Uuid::new_v4(),
    user_id,
    email,
    total_cents: order_total_cents(&lines),
    lines,
    currency,
    status: OrderStatus::Pending,
    payment_method: site.payment.method,
    shipping_address: req.shipping_address.trim().to_string(),
    created_at: Utc::now(),
  };
  let created = state.backend.create_order(record).await?;
  Ok(Json(created.into()))
}

/// GET /api/orders - the signed-in user's order history
pub(crate) async fn api_list_my_orders(
  State(state): State<AppState>,
  headers: HeaderMap,
) -> Result<Json<Vec<Order>>, ApiError> {
  let user = require_user(&state, &headers).await?;
  let orders = state.backend.list_orders_for_user(user.id).await?;
  Ok(Json(orders.into_iter().map(Order::from).collect()))
}

/// GET /api/orders/{id} - an order the viewer is allowed to see
pub(crate) async fn api_get_order(
  State(state): State<AppState>,
  headers: HeaderMap,
  Path(id): Path<Uuid>,
) -> Result<Json<Order>, ApiError> {
  let user = require_user(&state, &headers).await?;
  let order = state
    .backend
    .get_order(id)
    .await?
    .ok_or_else(|| ApiError::NotFound("Order not found".to_string()))?;
  if order.user_id != Some(user.id) && !user.role.is_admin() {
    return Err(ApiError::NotFound("Order not found".into()));
  }
  Ok(Json(order.into()))
}

// =============================================================================
// Wishlist
// =============================================================================

fn wishlist_enabled(state: &AppState) -> Result<(), ApiError> {
  if state.site.current().is_feature_enabled("wishlist") {
    Ok(())
  } else {
    Err(ApiError::BadRequest("Wishlist is disabled".into()))
  }
}

/// GET /api/wishlist - the viewer's saved products
pub(crate) async fn api_list_wishlist(
  State(state): State<AppState>,
  headers: HeaderMap,
) -> Result<Json<Vec<Product>>, ApiError> {
  wishlist_enabled(&state)?;
  let user = require_user(&state, &headers).await?;
  let ids = state.backend.list_wishlist(user.id).await?;
  let mut products = Vec::with_capacity(ids.len());
  for id in ids {
    if let Some(record) = state.backend.get_product(id).await? {
      if record.active {
        products.push(record.into());
      }
    }
  }
  Ok(Json(products))
}

/// PUT /api/wishlist/{product_id}
pub(crate) async fn api_add_wishlist(
  State(state): State<AppState>,
  headers: HeaderMap,
  Path(product_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
  wishlist_enabled(&state)?;
  let user = require_user(&state, &headers).await?;
  if state.backend.get_product(product_id).await?.is_none() {
    return Err(ApiError::NotFound("Product not found".into()));
  }
  state.backend.add_wishlist_item(user.id, product_id).await?;
  Ok(Json(serde_json::json!({"message": "Saved"})))
}

/// DELETE /api/wishlist/{product_id}
pub(crate) async fn api_remove_wishlist(
  State(state): State<AppState>,
  headers: HeaderMap,
  Path(product_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
  wishlist_enabled(&state)?;
  let user = require_user(&state, &headers).await?;
  state
    .backend
    .remove_wishlist_item(user.id, product_id)
    .await?;
  Ok(Json(serde_json::json!({"message": "Removed"})))
}

// =============================================================================
// Admin
// =============================================================================

#[derive(Deserialize)]
pub(crate) struct AdminOrdersQuery {
  limit: Option<usize>,
  offset: Option<usize>,
}

/// GET /api/admin/orders
pub(crate) async fn api_admin_list_orders(
  State(state): State<AppState>,
  Query(query): Query<AdminOrdersQuery>,
) -> Result<Json<Vec<Order>>, ApiError> {
  let orders = state
    .backend
    .list_orders(Some(query.limit.unwrap_or(50).min(200)), query.offset)
    .await?;
  Ok(Json(orders.into_iter().map(Order::from).collect()))
}

#[derive(Deserialize)]
pub(crate) struct UpdateStatusRequest {
  status: String,
}

/// PUT /api/admin/orders/{id}/status - super admin only
pub(crate) async fn api_admin_update_order_status(
  State(state): State<AppState>,
  headers: HeaderMap,
  Path(id): Path<Uuid>,
  Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
  require_super_admin(&state, &headers).await?;
  let status: OrderStatus = req
    .status
    .parse()
    .map_err(|_| ApiError::BadRequest(format!("Unknown status: {}", req.status)))?;
  if !state.backend.update_order_status(id, status).await? {
    return Err(ApiError::NotFound("Order not found".into()));
  }
  Ok(Json(serde_json::json!({"message": "Status updated"})))
}
