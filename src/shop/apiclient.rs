//! API client for communicating with the server

#[cfg(feature = "csr")]
use gloo_net::http::{Request, RequestBuilder};
#[cfg(feature = "csr")]
use gloo_storage::{LocalStorage, Storage};
#[cfg(feature = "csr")]
use serde::{de::DeserializeOwned, Serialize};

#[cfg(feature = "csr")]
use crate::catalog::{Brand, CartItem, Category, Order, Product};
#[cfg(feature = "csr")]
use crate::shop::state::{AuthStatus, UserInfo};
#[cfg(feature = "csr")]
use crate::site::{FooterContent, SiteConfig};

pub const TOKEN_KEY: &str = "wicker_session";
pub const ROLE_KEY: &str = "wicker_role";
pub const CART_KEY: &str = "wicker_cart";

#[cfg(feature = "csr")]
pub fn get_stored_token() -> Option<String> {
  LocalStorage::get(TOKEN_KEY).ok()
}

#[cfg(feature = "csr")]
pub fn set_stored_token(token: &str) {
  let _ = LocalStorage::set(TOKEN_KEY, token);
}

#[cfg(feature = "csr")]
pub fn get_stored_role() -> Option<String> {
  LocalStorage::get(ROLE_KEY).ok()
}

#[cfg(feature = "csr")]
pub fn set_stored_role(role: &str) {
  let _ = LocalStorage::set(ROLE_KEY, role);
}

#[cfg(feature = "csr")]
pub fn clear_stored_session() {
  LocalStorage::delete(TOKEN_KEY);
  LocalStorage::delete(ROLE_KEY);
}

#[cfg(feature = "csr")]
pub fn load_cart() -> Vec<CartItem> {
  LocalStorage::get(CART_KEY).unwrap_or_default()
}

#[cfg(feature = "csr")]
pub fn save_cart(cart: &[CartItem]) {
  let _ = LocalStorage::set(CART_KEY, cart);
}

#[cfg(feature = "csr")]
fn add_auth_header(req: RequestBuilder) -> RequestBuilder {
  if let Some(token) = get_stored_token() {
    req.header("Authorization", &format!("Bearer {}", token))
  } else {
    req
  }
}

/// Pull the server's message field out of an error body, if there is one.
#[cfg(feature = "csr")]
async fn error_message(resp: gloo_net::http::Response) -> String {
  #[derive(serde::Deserialize)]
  struct ErrorBody {
    error: String,
  }
  let status = resp.status();
  match resp.json::<ErrorBody>().await {
    Ok(body) => body.error,
    Err(_) => format!("HTTP error: {}", status),
  }
}

#[cfg(feature = "csr")]
async fn fetch_with_auth<T: DeserializeOwned>(url: &str) -> Result<T, String> {
  let req = add_auth_header(Request::get(url));
  let resp = req.send().await.map_err(|e| e.to_string())?;
  if !resp.ok() {
    return Err(error_message(resp).await);
  }
  resp.json().await.map_err(|e| e.to_string())
}

#[cfg(feature = "csr")]
async fn post_with_auth<T: Serialize, R: DeserializeOwned>(url: &str, body: &T) -> Result<R, String> {
  let req = add_auth_header(Request::post(url)).json(body).map_err(|e| e.to_string())?;
  let resp = req.send().await.map_err(|e| e.to_string())?;
  if !resp.ok() {
    return Err(error_message(resp).await);
  }
  resp.json().await.map_err(|e| e.to_string())
}

#[cfg(feature = "csr")]
async fn put_with_auth<T: Serialize, R: DeserializeOwned>(url: &str, body: &T) -> Result<R, String> {
  let req = add_auth_header(Request::put(url)).json(body).map_err(|e| e.to_string())?;
  let resp = req.send().await.map_err(|e| e.to_string())?;
  if !resp.ok() {
    return Err(error_message(resp).await);
  }
  resp.json().await.map_err(|e| e.to_string())
}

#[cfg(feature = "csr")]
async fn put_empty_with_auth<R: DeserializeOwned>(url: &str) -> Result<R, String> {
  let req = add_auth_header(Request::put(url)).json(&serde_json::json!({})).map_err(|e| e.to_string())?;
  let resp = req.send().await.map_err(|e| e.to_string())?;
  if !resp.ok() {
    return Err(error_message(resp).await);
  }
  resp.json().await.map_err(|e| e.to_string())
}

#[cfg(feature = "csr")]
async fn delete_with_auth<R: DeserializeOwned>(url: &str) -> Result<R, String> {
  let req = add_auth_header(Request::delete(url));
  let resp = req.send().await.map_err(|e| e.to_string())?;
  if !resp.ok() {
    return Err(error_message(resp).await);
  }
  resp.json().await.map_err(|e| e.to_string())
}

// =============================================================================
// Site configuration
// =============================================================================

/// Admins read the authenticated endpoint so the record they edit is the
/// one the server will accept back; everyone else reads the public one.
/// This is endpoint *selection* only - authorization happens server-side.
#[cfg(feature = "csr")]
fn site_config_url() -> &'static str {
  match get_stored_role().as_deref() {
    Some("admin") | Some("super_admin") => "/api/admin/site-config",
    _ => "/api/site-config",
  }
}

#[cfg(feature = "csr")]
pub async fn fetch_site_config() -> Result<SiteConfig, String> {
  match fetch_with_auth(site_config_url()).await {
    Ok(config) => Ok(config),
    // A stale admin marker must never break theming; fall back to the
    // public record.
    Err(_) if site_config_url() != "/api/site-config" => {
      fetch_with_auth("/api/site-config").await
    }
    Err(e) => Err(e),
  }
}

#[cfg(feature = "csr")]
pub async fn update_site_config(config: &SiteConfig) -> Result<SiteConfig, String> {
  put_with_auth("/api/admin/site-config", config).await
}

#[cfg(feature = "csr")]
pub async fn fetch_footer() -> Result<FooterContent, String> {
  fetch_with_auth("/api/footer").await
}

#[cfg(feature = "csr")]
pub async fn update_footer(footer: &FooterContent) -> Result<FooterContent, String> {
  put_with_auth("/api/admin/footer", footer).await
}

#[cfg(feature = "csr")]
pub async fn subscribe_newsletter(email: &str) -> Result<serde_json::Value, String> {
  #[derive(Serialize)]
  struct Req<'a> {
    email: &'a str,
  }
  post_with_auth("/api/newsletter", &Req { email }).await
}

// =============================================================================
// Auth
// =============================================================================

#[cfg(feature = "csr")]
#[derive(serde::Deserialize)]
pub struct LoginResponse {
  pub token: String,
  pub user: UserInfo,
}

#[cfg(feature = "csr")]
pub async fn register(
  email: &str,
  display_name: &str,
  password: &str,
  confirm_password: &str,
) -> Result<serde_json::Value, String> {
  #[derive(Serialize)]
  struct Req<'a> {
    email: &'a str,
    display_name: &'a str,
    password: &'a str,
    confirm_password: &'a str,
  }
  post_with_auth(
    "/api/auth/register",
    &Req {
      email,
      display_name,
      password,
      confirm_password,
    },
  )
  .await
}

#[cfg(feature = "csr")]
pub async fn login(email: &str, password: &str) -> Result<LoginResponse, String> {
  #[derive(Serialize)]
  struct Req<'a> {
    email: &'a str,
    password: &'a str,
  }
  let resp: LoginResponse = post_with_auth("/api/auth/login", &Req { email, password }).await?;
  set_stored_token(&resp.token);
  set_stored_role(&resp.user.role);
  Ok(resp)
}

#[cfg(feature = "csr")]
pub async fn logout() -> Result<(), String> {
  let _: serde_json::Value = post_with_auth("/api/auth/logout", &serde_json::json!({})).await?;
  clear_stored_session();
  Ok(())
}

#[cfg(feature = "csr")]
pub async fn fetch_auth_status() -> Result<AuthStatus, String> {
  fetch_with_auth("/api/auth/status").await
}

#[cfg(feature = "csr")]
pub async fn forgot_password(email: &str) -> Result<serde_json::Value, String> {
  #[derive(Serialize)]
  struct Req<'a> {
    email: &'a str,
  }
  post_with_auth("/api/auth/forgot-password", &Req { email }).await
}

#[cfg(feature = "csr")]
pub async fn reset_password(
  email: &str,
  code: &str,
  password: &str,
  confirm_password: &str,
) -> Result<serde_json::Value, String> {
  #[derive(Serialize)]
  struct Req<'a> {
    email: &'a str,
    code: &'a str,
    password: &'a str,
    confirm_password: &'a str,
  }
  post_with_auth(
    "/api/auth/reset-password",
    &Req {
      email,
      code,
      password,
      confirm_password,
    },
  )
  .await
}

#[cfg(feature = "csr")]
pub async fn verify_email(email: &str, code: &str) -> Result<serde_json::Value, String> {
  #[derive(Serialize)]
  struct Req<'a> {
    email: &'a str,
    code: &'a str,
  }
  post_with_auth("/api/auth/verify-email", &Req { email, code }).await
}

#[cfg(feature = "csr")]
pub async fn resend_verification(email: &str) -> Result<serde_json::Value, String> {
  #[derive(Serialize)]
  struct Req<'a> {
    email: &'a str,
  }
  post_with_auth("/api/auth/resend-verification", &Req { email }).await
}

// =============================================================================
// Catalog
// =============================================================================

#[cfg(feature = "csr")]
pub async fn fetch_products(
  category: Option<&str>,
  brand: Option<&str>,
  search: Option<&str>,
) -> Result<Vec<Product>, String> {
  let mut url = String::from("/api/products?limit=60");
  if let Some(category) = category {
    url.push_str(&format!("&category={}", category));
  }
  if let Some(brand) = brand {
    url.push_str(&format!("&brand={}", brand));
  }
  if let Some(search) = search {
    if !search.is_empty() {
      url.push_str(&format!("&search={}", search));
    }
  }
  fetch_with_auth(&url).await
}

#[cfg(feature = "csr")]
pub async fn fetch_product(slug: &str) -> Result<Product, String> {
  fetch_with_auth(&format!("/api/products/{}", slug)).await
}

#[cfg(feature = "csr")]
pub async fn fetch_categories() -> Result<Vec<Category>, String> {
  fetch_with_auth("/api/categories").await
}

#[cfg(feature = "csr")]
pub async fn fetch_brands() -> Result<Vec<Brand>, String> {
  fetch_with_auth("/api/brands").await
}

#[cfg(feature = "csr")]
pub async fn fetch_admin_products() -> Result<Vec<Product>, String> {
  fetch_with_auth("/api/admin/products").await
}

#[cfg(feature = "csr")]
pub async fn create_product(product: &serde_json::Value) -> Result<Product, String> {
  post_with_auth("/api/admin/products", product).await
}

#[cfg(feature = "csr")]
pub async fn update_product(id: &str, product: &serde_json::Value) -> Result<Product, String> {
  put_with_auth(&format!("/api/admin/products/{}", id), product).await
}

#[cfg(feature = "csr")]
pub async fn delete_product(id: &str) -> Result<serde_json::Value, String> {
  delete_with_auth(&format!("/api/admin/products/{}", id)).await
}

#[cfg(feature = "csr")]
pub async fn upsert_category(category: &serde_json::Value) -> Result<Category, String> {
  post_with_auth("/api/admin/categories", category).await
}

#[cfg(feature = "csr")]
pub async fn delete_category(id: &str) -> Result<serde_json::Value, String> {
  delete_with_auth(&format!("/api/admin/categories/{}", id)).await
}

#[cfg(feature = "csr")]
pub async fn upsert_brand(brand: &serde_json::Value) -> Result<Brand, String> {
  post_with_auth("/api/admin/brands", brand).await
}

#[cfg(feature = "csr")]
pub async fn delete_brand(id: &str) -> Result<serde_json::Value, String> {
  delete_with_auth(&format!("/api/admin/brands/{}", id)).await
}

// =============================================================================
// Orders and wishlist
// =============================================================================

#[cfg(feature = "csr")]
pub async fn place_order(
  email: Option<&str>,
  lines: &[CartItem],
  shipping_address: &str,
) -> Result<Order, String> {
  #[derive(Serialize)]
  struct Req<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    lines: &'a [CartItem],
    shipping_address: &'a str,
  }
  post_with_auth(
    "/api/orders",
    &Req {
      email,
      lines,
      shipping_address,
    },
  )
  .await
}

#[cfg(feature = "csr")]
pub async fn fetch_my_orders() -> Result<Vec<Order>, String> {
  fetch_with_auth("/api/orders").await
}

#[cfg(feature = "csr")]
pub async fn fetch_admin_orders() -> Result<Vec<Order>, String> {
  fetch_with_auth("/api/admin/orders").await
}

#[cfg(feature = "csr")]
pub async fn update_order_status(id: &str, status: &str) -> Result<serde_json::Value, String> {
  #[derive(Serialize)]
  struct Req<'a> {
    status: &'a str,
  }
  put_with_auth(&format!("/api/admin/orders/{}/status", id), &Req { status }).await
}

#[cfg(feature = "csr")]
pub async fn fetch_wishlist() -> Result<Vec<Product>, String> {
  fetch_with_auth("/api/wishlist").await
}

#[cfg(feature = "csr")]
pub async fn add_to_wishlist(product_id: &str) -> Result<serde_json::Value, String> {
  put_empty_with_auth(&format!("/api/wishlist/{}", product_id)).await
}

#[cfg(feature = "csr")]
pub async fn remove_from_wishlist(product_id: &str) -> Result<serde_json::Value, String> {
  delete_with_auth(&format!("/api/wishlist/{}", product_id)).await
}

// =============================================================================
// Users (super admin)
// =============================================================================

#[cfg(feature = "csr")]
pub async fn fetch_users() -> Result<Vec<UserInfo>, String> {
  fetch_with_auth("/api/admin/users").await
}

#[cfg(feature = "csr")]
pub async fn update_user_role(id: &str, role: &str) -> Result<serde_json::Value, String> {
  #[derive(Serialize)]
  struct Req<'a> {
    role: &'a str,
  }
  put_with_auth(&format!("/api/admin/users/{}/role", id), &Req { role }).await
}
