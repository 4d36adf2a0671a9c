//! SQLite backend integration tests over an in-memory database.

use chrono::{Duration, Utc};
use uuid::Uuid;

use wicker::catalog::{OrderLine, OrderStatus};
use wicker::db::{
  BrandRecord, CategoryRecord, OrderRecord, OtpPurpose, ProductFilter, ProductRecord,
  SqliteBackend, StoreBackend,
};
use wicker::site::config::PaymentMethod;
use wicker::site::Role;

async fn backend() -> SqliteBackend {
  let backend = SqliteBackend::in_memory().await.unwrap();
  backend.init_schema().await.unwrap();
  backend
}

fn product(slug: &str, price_cents: i64, stock: i64) -> ProductRecord {
  ProductRecord {
    id: Uuid::new_v4(),
    slug: slug.into(),
    name: format!("Product {slug}"),
    description: String::new(),
    price_cents,
    currency: "USD".into(),
    images: vec!["https://example.com/a.jpg".into()],
    brand_slug: None,
    category_slug: None,
    stock,
    active: true,
    created_at: Utc::now(),
  }
}

// =============================================================================
// Site documents
// =============================================================================

#[tokio::test]
async fn test_site_documents_roundtrip_and_replace() {
  let backend = backend().await;
  assert!(backend.get_site_document("site_config").await.unwrap().is_none());

  let doc = serde_json::json!({"site_name": "Corner Shop"});
  backend.put_site_document("site_config", doc.clone()).await.unwrap();
  assert_eq!(
    backend.get_site_document("site_config").await.unwrap(),
    Some(doc)
  );

  // Replaced wholesale, not merged.
  let doc2 = serde_json::json!({"tagline": "hello"});
  backend.put_site_document("site_config", doc2.clone()).await.unwrap();
  assert_eq!(
    backend.get_site_document("site_config").await.unwrap(),
    Some(doc2)
  );
}

// =============================================================================
// Users and sessions
// =============================================================================

#[tokio::test]
async fn test_user_lifecycle() {
  let backend = backend().await;
  let user = backend
    .create_user("shopper@example.com", "Shopper", "hash", Role::Customer, false)
    .await
    .unwrap();
  assert_eq!(user.role, Role::Customer);
  assert!(!user.email_verified);

  let (found, hash) = backend
    .get_user_by_email("shopper@example.com")
    .await
    .unwrap()
    .unwrap();
  assert_eq!(found.id, user.id);
  assert_eq!(hash, "hash");

  assert!(backend.set_email_verified(user.id, true).await.unwrap());
  assert!(backend.update_user_password(user.id, "hash2").await.unwrap());
  assert!(backend.update_user_role(user.id, Role::Admin).await.unwrap());

  let reloaded = backend.get_user(user.id).await.unwrap().unwrap();
  assert!(reloaded.email_verified);
  assert_eq!(reloaded.role, Role::Admin);

  assert_eq!(backend.list_users().await.unwrap().len(), 1);
  assert!(backend.get_user_by_email("nobody@example.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_session_validation_and_expiry() {
  let backend = backend().await;
  let user = backend
    .create_user("a@example.com", "A", "hash", Role::Customer, true)
    .await
    .unwrap();

  let live = backend
    .create_session(user.id, "live-hash", Utc::now() + Duration::days(1))
    .await
    .unwrap();
  backend
    .create_session(user.id, "stale-hash", Utc::now() - Duration::minutes(1))
    .await
    .unwrap();

  let (session, found) = backend.validate_session("live-hash").await.unwrap().unwrap();
  assert_eq!(session.id, live.id);
  assert_eq!(found.id, user.id);

  // Expired or unknown tokens do not resolve.
  assert!(backend.validate_session("stale-hash").await.unwrap().is_none());
  assert!(backend.validate_session("missing").await.unwrap().is_none());

  assert_eq!(backend.cleanup_expired_sessions().await.unwrap(), 1);
  assert!(backend.delete_session(live.id).await.unwrap());
  assert!(backend.validate_session("live-hash").await.unwrap().is_none());
}

// =============================================================================
// One-time codes
// =============================================================================

#[tokio::test]
async fn test_otp_single_use() {
  let backend = backend().await;
  let user = backend
    .create_user("b@example.com", "B", "hash", Role::Customer, false)
    .await
    .unwrap();

  backend
    .upsert_otp(user.id, OtpPurpose::VerifyEmail, "code-hash", Utc::now() + Duration::minutes(10))
    .await
    .unwrap();

  // Wrong code leaves the stored one intact.
  assert!(!backend
    .consume_otp(user.id, OtpPurpose::VerifyEmail, "wrong")
    .await
    .unwrap());
  // Wrong purpose too.
  assert!(!backend
    .consume_otp(user.id, OtpPurpose::ResetPassword, "code-hash")
    .await
    .unwrap());
  // Right code consumes exactly once.
  assert!(backend
    .consume_otp(user.id, OtpPurpose::VerifyEmail, "code-hash")
    .await
    .unwrap());
  assert!(!backend
    .consume_otp(user.id, OtpPurpose::VerifyEmail, "code-hash")
    .await
    .unwrap());
}

#[tokio::test]
async fn test_otp_upsert_replaces_and_expiry_blocks() {
  let backend = backend().await;
  let user = backend
    .create_user("c@example.com", "C", "hash", Role::Customer, false)
    .await
    .unwrap();

  backend
    .upsert_otp(user.id, OtpPurpose::ResetPassword, "old", Utc::now() + Duration::minutes(10))
    .await
    .unwrap();
  backend
    .upsert_otp(user.id, OtpPurpose::ResetPassword, "new", Utc::now() + Duration::minutes(10))
    .await
    .unwrap();
  // A resend invalidates the previous code.
  assert!(!backend
    .consume_otp(user.id, OtpPurpose::ResetPassword, "old")
    .await
    .unwrap());
  assert!(backend
    .consume_otp(user.id, OtpPurpose::ResetPassword, "new")
    .await
    .unwrap());

  backend
    .upsert_otp(user.id, OtpPurpose::ResetPassword, "late", Utc::now() - Duration::minutes(1))
    .await
    .unwrap();
  assert!(!backend
    .consume_otp(user.id, OtpPurpose::ResetPassword, "late")
    .await
    .unwrap());
}

// =============================================================================
// Catalog
// =============================================================================

#[tokio::test]
async fn test_product_crud_and_filters() {
  let backend = backend().await;
  let mut basket = product("willow-basket", 3400, 5);
  basket.category_slug = Some("living".into());
  backend.create_product(basket.clone()).await.unwrap();

  let mut mug = product("stone-mug", 1600, 0);
  mug.category_slug = Some("kitchen".into());
  mug.active = false;
  backend.create_product(mug).await.unwrap();

  // Default listing hides inactive products.
  let visible = backend.list_products(&ProductFilter::default()).await.unwrap();
  assert_eq!(visible.len(), 1);
  assert_eq!(visible[0].slug, "willow-basket");

  let all = backend
    .list_products(&ProductFilter {
      include_inactive: true,
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(all.len(), 2);

  let by_category = backend
    .list_products(&ProductFilter {
      category_slug: Some("living".into()),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(by_category.len(), 1);

  let by_search = backend
    .list_products(&ProductFilter {
      search: Some("WILLOW".into()),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(by_search.len(), 1);

  let fetched = backend.get_product_by_slug("willow-basket").await.unwrap().unwrap();
  assert_eq!(fetched.images.len(), 1);

  basket.price_cents = 3600;
  let updated = backend.update_product(basket.clone()).await.unwrap().unwrap();
  assert_eq!(updated.price_cents, 3600);

  assert!(backend.delete_product(basket.id).await.unwrap());
  assert!(backend.get_product(basket.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_decrement_stock_never_oversells() {
  let backend = backend().await;
  let p = product("oak-board", 2800, 3);
  backend.create_product(p.clone()).await.unwrap();

  assert!(backend.decrement_stock(p.id, 2).await.unwrap());
  // Only 1 left; a request for 2 must fail and change nothing.
  assert!(!backend.decrement_stock(p.id, 2).await.unwrap());
  assert!(backend.decrement_stock(p.id, 1).await.unwrap());
  assert_eq!(backend.get_product(p.id).await.unwrap().unwrap().stock, 0);
}

#[tokio::test]
async fn test_categories_and_brands_upsert() {
  let backend = backend().await;
  let mut category = CategoryRecord {
    id: Uuid::new_v4(),
    slug: "kitchen".into(),
    name: "Kitchen".into(),
    description: String::new(),
  };
  backend.upsert_category(category.clone()).await.unwrap();
  category.name = "Kitchen & dining".into();
  backend.upsert_category(category.clone()).await.unwrap();

  let listed = backend.list_categories().await.unwrap();
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0].name, "Kitchen & dining");
  assert!(backend.delete_category(category.id).await.unwrap());

  let brand = BrandRecord {
    id: Uuid::new_v4(),
    slug: "heartwood".into(),
    name: "Heartwood".into(),
  };
  backend.upsert_brand(brand.clone()).await.unwrap();
  assert_eq!(backend.list_brands().await.unwrap().len(), 1);
  assert!(backend.delete_brand(brand.id).await.unwrap());
}

// =============================================================================
// Orders, wishlist, newsletter
// =============================================================================

#[tokio::test]
async fn test_order_roundtrip_and_status() {
  let backend = backend().await;
  let user = backend
    .create_user("d@example.com", "D", "hash", Role::Customer, true)
    .await
    .unwrap();

  let order = OrderRecord {
    id: Uuid::new_v4(),
    user_id: Some(user.id),
    email: "d@example.com".into(),
    lines: vec![OrderLine {
      product_id: Uuid::new_v4().to_string(),
      product_name: "Willow basket".into(),
      unit_price_cents: 3400,
      quantity: 2,
    }],
    total_cents: 6800,
    currency: "USD".into(),
    status: OrderStatus::Pending,
    payment_method: PaymentMethod::CashOnDelivery,
    shipping_address: "12 Elm Street".into(),
    created_at: Utc::now(),
  };
  backend.create_order(order.clone()).await.unwrap();

  let loaded = backend.get_order(order.id).await.unwrap().unwrap();
  assert_eq!(loaded.lines.len(), 1);
  assert_eq!(loaded.lines[0].quantity, 2);
  assert_eq!(loaded.payment_method, PaymentMethod::CashOnDelivery);

  assert_eq!(backend.list_orders_for_user(user.id).await.unwrap().len(), 1);
  assert_eq!(backend.list_orders(Some(10), None).await.unwrap().len(), 1);

  assert!(backend
    .update_order_status(order.id, OrderStatus::Shipped)
    .await
    .unwrap());
  assert_eq!(
    backend.get_order(order.id).await.unwrap().unwrap().status,
    OrderStatus::Shipped
  );
}

#[tokio::test]
async fn test_wishlist_set_semantics() {
  let backend = backend().await;
  let user = backend
    .create_user("e@example.com", "E", "hash", Role::Customer, true)
    .await
    .unwrap();
  let p = product("wool-throw", 7200, 4);
  backend.create_product(p.clone()).await.unwrap();

  backend.add_wishlist_item(user.id, p.id).await.unwrap();
  backend.add_wishlist_item(user.id, p.id).await.unwrap();
  assert_eq!(backend.list_wishlist(user.id).await.unwrap(), vec![p.id]);

  assert!(backend.remove_wishlist_item(user.id, p.id).await.unwrap());
  assert!(!backend.remove_wishlist_item(user.id, p.id).await.unwrap());
  assert!(backend.list_wishlist(user.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_newsletter_dedupes() {
  let backend = backend().await;
  assert!(backend.subscribe_newsletter("n@example.com").await.unwrap());
  assert!(!backend.subscribe_newsletter("n@example.com").await.unwrap());
}
