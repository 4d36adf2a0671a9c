use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::catalog::{Order, OrderLine, OrderStatus, Product};
use crate::site::config::PaymentMethod;
use crate::site::Role;

/// Storefront user as stored, without the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreUser {
  pub id: Uuid,
  pub email: String,
  pub display_name: String,
  pub role: Role,
  pub email_verified: bool,
  pub created_at: DateTime<Utc>,
}

/// An authenticated session; the token itself is only ever stored hashed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
  pub id: Uuid,
  pub user_id: Uuid,
  pub expires_at: DateTime<Utc>,
}

/// What a one-time code is good for. One live code per (user, purpose).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpPurpose {
  VerifyEmail,
  ResetPassword,
}

impl fmt::Display for OtpPurpose {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      OtpPurpose::VerifyEmail => "verify_email",
      OtpPurpose::ResetPassword => "reset_password",
    };
    write!(f, "{}", s)
  }
}

impl FromStr for OtpPurpose {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "verify_email" => Ok(OtpPurpose::VerifyEmail),
      "reset_password" => Ok(OtpPurpose::ResetPassword),
      other => Err(format!("unknown otp purpose: {}", other)),
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
  pub id: Uuid,
  pub slug: String,
  pub name: String,
  pub description: String,
  pub price_cents: i64,
  pub currency: String,
  pub images: Vec<String>,
  pub brand_slug: Option<String>,
  pub category_slug: Option<String>,
  pub stock: i64,
  pub active: bool,
  pub created_at: DateTime<Utc>,
}

impl From<ProductRecord> for Product {
  fn from(r: ProductRecord) -> Self {
    Product {
      id: r.id.to_string(),
      slug: r.slug,
      name: r.name,
      description: r.description,
      price_cents: r.price_cents,
      currency: r.currency,
      images: r.images,
      brand: r.brand_slug,
      category: r.category_slug,
      stock: r.stock,
      active: r.active,
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRecord {
  pub id: Uuid,
  pub slug: String,
  pub name: String,
  pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandRecord {
  pub id: Uuid,
  pub slug: String,
  pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRecord {
  pub id: Uuid,
  pub user_id: Option<Uuid>,
  pub email: String,
  pub lines: Vec<OrderLine>,
  pub total_cents: i64,
  pub currency: String,
  pub status: OrderStatus,
  pub payment_method: PaymentMethod,
  pub shipping_address: String,
  pub created_at: DateTime<Utc>,
}

impl From<OrderRecord> for Order {
  fn from(r: OrderRecord) -> Self {
    Order {
      id: r.id.to_string(),
      user_id: r.user_id.map(|id| id.to_string()),
      email: r.email,
      lines: r.lines,
      total_cents: r.total_cents,
      currency: r.currency,
      status: r.status,
      payment_method: r.payment_method,
      shipping_address: r.shipping_address,
      created_at: r.created_at.to_rfc3339(),
    }
  }
}

/// Product listing filter; fields combine with AND.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
  pub category_slug: Option<String>,
  pub brand_slug: Option<String>,
  pub search: Option<String>,
  pub include_inactive: bool,
  pub limit: Option<usize>,
  pub offset: Option<usize>,
}

/// Abstract store backend. Both engines implement the same contract; the
/// API layer never sees SQL.
#[allow(clippy::too_many_arguments)]
#[async_trait]
pub trait StoreBackend: Send + Sync {
  async fn init_schema(&self) -> Result<(), anyhow::Error>;

  // Site documents (site configuration, footer content). Stored as raw
  // JSON and replaced wholesale; merging over defaults is the domain
  // layer's job.
  async fn get_site_document(
    &self,
    name: &str,
  ) -> Result<Option<serde_json::Value>, anyhow::Error>;
  async fn put_site_document(
    &self,
    name: &str,
    data: serde_json::Value,
  ) -> Result<(), anyhow::Error>;

  // Users
  async fn create_user(
    &self,
    email: &str,
    display_name: &str,
    password_hash: &str,
    role: Role,
    email_verified: bool,
  ) -> Result<StoreUser, anyhow::Error>;
  async fn get_user_by_email(
    &self,
    email: &str,
  ) -> Result<Option<(StoreUser, String)>, anyhow::Error>;
  async fn get_user(&self, id: Uuid) -> Result<Option<StoreUser>, anyhow::Error>;
  async fn list_users(&self) -> Result<Vec<StoreUser>, anyhow::Error>;
  async fn set_email_verified(&self, id: Uuid, verified: bool) -> Result<bool, anyhow::Error>;
  async fn update_user_password(
    &self,
    id: Uuid,
    password_hash: &str,
  ) -> Result<bool, anyhow::Error>;
  async fn update_user_role(&self, id: Uuid, role: Role) -> Result<bool, anyhow::Error>;

  // Sessions
  async fn create_session(
    &self,
    user_id: Uuid,
    token_hash: &str,
    expires_at: DateTime<Utc>,
  ) -> Result<Session, anyhow::Error>;
  async fn validate_session(
    &self,
    token_hash: &str,
  ) -> Result<Option<(Session, StoreUser)>, anyhow::Error>;
  async fn delete_session(&self, session_id: Uuid) -> Result<bool, anyhow::Error>;
  async fn cleanup_expired_sessions(&self) -> Result<u64, anyhow::Error>;

  // One-time codes. Upsert replaces any previous code for the same
  // (user, purpose); consume deletes on a successful, unexpired match.
  async fn upsert_otp(
    &self,
    user_id: Uuid,
    purpose: OtpPurpose,
    code_hash: &str,
    expires_at: DateTime<Utc>,
  ) -> Result<(), anyhow::Error>;
  async fn consume_otp(
    &self,
    user_id: Uuid,
    purpose: OtpPurpose,
    code_hash: &str,
  ) -> Result<bool, anyhow::Error>;

  // Catalog
  async fn list_products(
    &self,
    filter: &ProductFilter,
  ) -> Result<Vec<ProductRecord>, anyhow::Error>;
  async fn get_product(&self, id: Uuid) -> Result<Option<ProductRecord>, anyhow::Error>;
  async fn get_product_by_slug(&self, slug: &str) -> Result<Option<ProductRecord>, anyhow::Error>;
  async fn create_product(&self, record: ProductRecord) -> Result<ProductRecord, anyhow::Error>;
  async fn update_product(
    &self,
    record: ProductRecord,
  ) -> Result<Option<ProductRecord>, anyhow::Error>;
  async fn delete_product(&self, id: Uuid) -> Result<bool, anyhow::Error>;
  /// Atomically decrement stock; false when not enough is left.
  async fn decrement_stock(&self, id: Uuid, quantity: i64) -> Result<bool, anyhow::Error>;

  async fn list_categories(&self) -> Result<Vec<CategoryRecord>, anyhow::Error>;
  async fn upsert_category(
    &self,
    record: CategoryRecord,
  ) -> Result<CategoryRecord, anyhow::Error>;
  async fn delete_category(&self, id: Uuid) -> Result<bool, anyhow::Error>;

  async fn list_brands(&self) -> Result<Vec<BrandRecord>, anyhow::Error>;
  async fn upsert_brand(&self, record: BrandRecord) -> Result<BrandRecord, anyhow::Error>;
  async fn delete_brand(&self, id: Uuid) -> Result<bool, anyhow::Error>;

  // Orders
  async fn create_order(&self, record: OrderRecord) -> Result<OrderRecord, anyhow::Error>;
  async fn get_order(&self, id: Uuid) -> Result<Option<OrderRecord>, anyhow::Error>;
  async fn list_orders_for_user(&self, user_id: Uuid) -> Result<Vec<OrderRecord>, anyhow::Error>;
  async fn list_orders(
    &self,
    limit: Option<usize>,
    offset: Option<usize>,
  ) -> Result<Vec<OrderRecord>, anyhow::Error>;
  async fn update_order_status(
    &self,
    id: Uuid,
    status: OrderStatus,
  ) -> Result<bool, anyhow::Error>;

  // Wishlist
  async fn add_wishlist_item(&self, user_id: Uuid, product_id: Uuid) -> Result<(), anyhow::Error>;
  async fn remove_wishlist_item(
    &self,
    user_id: Uuid,
    product_id: Uuid,
  ) -> Result<bool, anyhow::Error>;
  async fn list_wishlist(&self, user_id: Uuid) -> Result<Vec<Uuid>, anyhow::Error>;

  // Newsletter. Returns false when the address was already subscribed.
  async fn subscribe_newsletter(&self, email: &str) -> Result<bool, anyhow::Error>;
}
