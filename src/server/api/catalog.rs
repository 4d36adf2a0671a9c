//! Catalog endpoints: public browse routes and admin CRUD.

use axum::{
  extract::{Path, Query, State},
  Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use super::{ApiError, AppState};
use crate::catalog::{Brand, Category, Product};
use crate::db::{BrandRecord, CategoryRecord, ProductFilter, ProductRecord};

const MAX_PAGE_SIZE: usize = 100;

#[derive(Deserialize)]
pub(crate) struct ListProductsQuery {
  category: Option<String>,
  brand: Option<String>,
  search: Option<String>,
  limit: Option<usize>,
  offset: Option<usize>,
}

/// GET /api/products
pub(crate) async fn api_list_products(
  State(state): State<AppState>,
  Query(query): Query<ListProductsQuery>,
) -> Result<Json<Vec<Product>>, ApiError> {
  let filter = ProductFilter {
    category_slug: query.category,
    brand_slug: query.brand,
    search: query.search,
    include_inactive: false,
    limit: Some(query.limit.unwrap_or(24).min(MAX_PAGE_SIZE)),
    offset: query.offset,
  };
  let products = state.backend.list_products(&filter).await?;
  Ok(Json(products.into_iter().map(Product::from).collect()))
}

/// GET /api/products/{slug}
pub(crate) async fn api_get_product(
  State(state): State<AppState>,
  Path(slug): Path<String>,
) -> Result<Json<Product>, ApiError> {
  let product = state
    .backend
    .get_product_by_slug(&slug)
    .await?
    .filter(|p| p.active)
    .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))?;
  Ok(Json(product.into()))
}

/// GET /api/categories
pub(crate) async fn api_list_categories(
  State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, ApiError> {
  let categories = state.backend.list_categories().await?;
  Ok(Json(
    categories
      .into_iter()
      .map(|c| Category {
        id: c.id.to_string(),
        slug: c.slug,
        name: c.name,
        description: c.description,
      })
      .collect(),
  ))
}

/// GET /api/brands
pub(crate) async fn api_list_brands(
  State(state): State<AppState>,
) -> Result<Json<Vec<Brand>>, ApiError> {
  let brands = state.backend.list_brands().await?;
  Ok(Json(
    brands
      .into_iter()
      .map(|b| Brand {
        id: b.id.to_string(),
        slug: b.slug,
        name: b.name,
      })
      .collect(),
  ))
}

// =============================================================================
// Admin CRUD
// =============================================================================

/// GET /api/admin/products - includes inactive products
pub(crate) async fn api_admin_list_products(
  State(state): State<AppState>,
  Query(query): Query<ListProductsQuery>,
) -> Result<Json<Vec<Product>>, ApiError> {
  let filter = ProductFilter {
    category_slug: query.category,
    brand_slug: query.brand,
    search: query.search,
    include_inactive: true,
    limit: Some(query.limit.unwrap_or(MAX_PAGE_SIZE).min(MAX_PAGE_SIZE)),
    offset: query.offset,
  };
  let products = state.backend.list_products(&filter).await?;
  Ok(Json(products.into_iter().map(Product::from).collect()))
}

#[derive(Deserialize)]
pub(crate) struct ProductInput {
  slug: String,
  name: String,
  #[serde(default)]
  description: String,
  price_cents: i64,
  #[serde(default = "default_currency")]
  currency: String,
  #[serde(default)]
  images: Vec<String>,
  #[serde(default)]
  brand: Option<String>,
  #[serde(default)]
  category: Option<String>,
  #[serde(default)]
  stock: i64,
  #[serde(default = "default_active")]
  active: bool,
}

fn default_currency() -> String {
  "USD".into()
}
fn default_active() -> bool {
  true
}

fn validate_product(input: &ProductInput) -> Result<(), ApiError> {
  if input.slug.trim().is_empty() || input.name.trim().is_empty() {
    return Err(ApiError::BadRequest("Slug and name are required".into()));
  }
  if !input
    .slug
    .bytes()
    .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
  {
    return Err(ApiError::BadRequest(
      "Slug may only contain lowercase letters, digits, and dashes".into(),
    ));
  }
  if input.price_cents < 0 || input.stock < 0 {
    return Err(ApiError::BadRequest(
      "Price and stock cannot be negative".into(),
    ));
  }
  Ok(())
}

/// POST /api/admin/products
pub(crate) async fn api_create_product(
  State(state): State<AppState>,
  Json(input): Json<ProductInput>,
) -> Result<Json<Product>, ApiError> {
  validate_product(&input)?;
  if state
    .backend
    .get_product_by_slug(input.slug.trim())
    .await?
    .is_some()
  {
    return Err(ApiError::BadRequest("Slug is already in use".into()));
  }
  let record = ProductRecord {
    id: Uuid::new_v4(),
    slug: input.slug.trim().to_string(),
    name: input.name.trim().to_string(),
    description: input.description,
    price_cents: input.price_cents,
    currency: input.currency,
    images: input.images,
    brand_slug: input.brand,
    category_slug: input.category,
    stock: input.stock,
    active: input.active,
    created_at: Utc::now(),
  };
  let created = state.backend.create_product(record).await?;
  Ok(Json(created.into()))
}

/// PUT /api/admin/products/{id}
pub(crate) async fn api_update_product(
  State(state): State<AppState>,
  Path(id): Path<Uuid>,
  Json(input): Json<ProductInput>,
) -> Result<Json<Product>, ApiError> {
  validate_product(&input)?;
  let existing = state
    .backend
    .get_product(id)
    .await?
    .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))?;
  let record = ProductRecord {
    id,
    slug: input.slug.trim().to_string(),
    name: input.name.trim().to_string(),
    description: input.description,
    price_cents: input.price_cents,
    currency: input.currency,
    images: input.images,
    brand_slug: input.brand,
    category_slug: input.category,
    stock: input.stock,
    active: input.active,
    created_at: existing.created_at,
  };
  let updated = state
    .backend
    .update_product(record)
    .await?
    .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))?;
  Ok(Json(updated.into()))
}

/// DELETE /api/admin/products/{id}
pub(crate) async fn api_delete_product(
  State(state): State<AppState>,
  Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
  if !state.backend.delete_product(id).await? {
    return Err(ApiError::NotFound("Product not found".into()));
  }
  Ok(Json(serde_json::json!({"message": "Product deleted"})))
}

#[derive(Deserialize)]
pub(crate) struct CategoryInput {
  #[serde(default)]
  id: Option<Uuid>,
  slug: String,
  name: String,
  #[serde(default)]
  description: String,
}

/// POST /api/admin/categories - create or update by id
pub(crate) async fn api_upsert_category(
  State(state): State<AppState>,
  Json(input): Json<CategoryInput>,
) -> Result<Json<Category>, ApiError> {
  if input.slug.trim().is_empty() || input.name.trim().is_empty() {
    return Err(ApiError::BadRequest("Slug and name are required".into()));
  }
  let record = CategoryRecord {
    id: input.id.unwrap_or_else(Uuid::new_v4),
    slug: input.slug.trim().to_string(),
    name: input.name.trim().to_string(),
    description: input.description,
  };
  let saved = state.backend.upsert_category(record).await?;
  Ok(Json(Category {
    id: saved.id.to_string(),
    slug: saved.slug,
    name: saved.name,
    description: saved.description,
  }))
}

/// DELETE /api/admin/categories/{id}
pub(crate) async fn api_delete_category(
  State(state): State<AppState>,
  Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
  if !state.backend.delete_category(id).await? {
    return Err(ApiError::NotFound("Category not found".into()));
  }
  Ok(Json(serde_json::json!({"message": "Category deleted"})))
}

#[derive(Deserialize)]
pub(crate) struct BrandInput {
  #[serde(default)]
  id: Option<Uuid>,
  slug: String,
  name: String,
}

/// POST /api/admin/brands - create or update by id
pub(crate) async fn api_upsert_brand(
  State(state): State<AppState>,
  Json(input): Json<BrandInput>,
) -> Result<Json<Brand>, ApiError> {
  if input.slug.trim().is_empty() || input.name.trim().is_empty() {
    return Err(ApiError::BadRequest("Slug and name are required".into()));
  }
  let record = BrandRecord {
    id: input.id.unwrap_or_else(Uuid::new_v4),
    slug: input.slug.trim().to_string(),
    name: input.name.trim().to_string(),
  };
  let saved = state.backend.upsert_brand(record).await?;
  Ok(Json(Brand {
    id: saved.id.to_string(),
    slug: saved.slug,
    name: saved.name,
  }))
}

/// DELETE /api/admin/brands/{id}
pub(crate) async fn api_delete_brand(
  State(state): State<AppState>,
  Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
  if !state.backend.delete_brand(id).await? {
    return Err(ApiError::NotFound("Brand not found".into()));
  }
  Ok(Json(serde_json::json!({"message": "Brand deleted"})))
}
