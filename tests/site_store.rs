//! SiteStore tests - the single-writer configuration record over a real
//! (in-memory) backend: defaults when nothing is stored, persist-then-
//! reload on replace, and watch notification.

use std::sync::Arc;

use wicker::db::{SqliteBackend, StoreBackend};
use wicker::server::{SiteStore, SITE_CONFIG_DOC};
use wicker::site::{FooterContent, SiteConfig};

async fn store() -> (Arc<dyn StoreBackend>, SiteStore) {
  let backend: Arc<dyn StoreBackend> = Arc::new(SqliteBackend::in_memory().await.unwrap());
  backend.init_schema().await.unwrap();
  let store = SiteStore::load(backend.clone()).await.unwrap();
  (backend, store)
}

#[tokio::test]
async fn test_empty_backend_yields_normalized_defaults() {
  let (_backend, store) = store().await;
  let config = store.current();
  assert_eq!(config.site_name, "Wicker");
  // Normalization filled the feature flags even though nothing is stored.
  assert!(config.features.is_some());
  assert!(!config.is_maintenance_mode());
}

#[tokio::test]
async fn test_replace_persists_and_reconciles() {
  let (backend, store) = store().await;

  let mut config = store.current();
  config.site_name = "Corner Shop".into();
  // A malformed color goes in; the published record must come back from
  // storage through normalization, repaired.
  config.colors.brand.primary = "not-a-color".into();
  config.maintenance_mode = true;

  let saved = store.replace(config).await.unwrap();
  assert_eq!(saved.site_name, "Corner Shop");
  assert_eq!(saved.colors.brand.primary, "#2563EB");
  assert!(saved.is_maintenance_mode());

  // The stored document kept the raw value; only the published record is
  // normalized.
  let doc = backend.get_site_document(SITE_CONFIG_DOC).await.unwrap().unwrap();
  assert_eq!(doc["colors"]["brand"]["primary"], "not-a-color");

  // A fresh load sees the same record the watchers saw.
  let reloaded = SiteStore::load(backend).await.unwrap();
  assert_eq!(reloaded.current(), saved);
}

#[tokio::test]
async fn test_watchers_observe_whole_record_replacement() {
  let (_backend, store) = store().await;
  let mut rx = store.subscribe();
  assert_eq!(rx.borrow().site_name, "Wicker");

  let mut config = store.current();
  config.site_name = "Corner Shop".into();
  store.replace(config).await.unwrap();

  rx.changed().await.unwrap();
  assert_eq!(rx.borrow().site_name, "Corner Shop");
}

#[tokio::test]
async fn test_refresh_rereads_storage() {
  let (backend, store) = store().await;
  backend
    .put_site_document(SITE_CONFIG_DOC, serde_json::json!({"tagline": "fresh"}))
    .await
    .unwrap();
  // The store still holds the old record until asked.
  assert_ne!(store.current().tagline, "fresh");
  let refreshed = store.refresh().await.unwrap();
  assert_eq!(refreshed.tagline, "fresh");
  assert_eq!(store.current().tagline, "fresh");
}

#[tokio::test]
async fn test_footer_is_independent_of_the_main_record() {
  let (_backend, store) = store().await;
  assert_eq!(store.footer().await.unwrap(), FooterContent::default());

  let mut footer = FooterContent::default();
  footer.copyright = "© Corner Shop".into();
  let saved = store.replace_footer(footer).await.unwrap();
  assert_eq!(saved.copyright, "© Corner Shop");

  // The main record is untouched.
  assert_eq!(store.current(), SiteConfig::default().normalized());
}
