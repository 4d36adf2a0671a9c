//! In-memory holder for the site configuration: a single-writer record
//! replaced wholesale and broadcast to subscribers over a watch channel.

use std::sync::Arc;
use tokio::sync::{watch, Mutex};

use crate::db::StoreBackend;
use crate::site::{FooterContent, SiteConfig};

pub const SITE_CONFIG_DOC: &str = "site_config";
pub const FOOTER_DOC: &str = "footer";

pub struct SiteStore {
  backend: Arc<dyn StoreBackend>,
  config_tx: watch::Sender<SiteConfig>,
  // Serializes persist-then-reload so two admin saves cannot interleave.
  write_lock: Mutex<()>,
}

impl SiteStore {
  /// Read the stored record (if any), merge it over the defaults, and
  /// start the watch channel from the result.
  pub async fn load(backend: Arc<dyn StoreBackend>) -> Result<Self, anyhow::Error> {
    let config = read_config(backend.as_ref()).await?;
    let (config_tx, _) = watch::channel(config);
    Ok(Self {
      backend,
      config_tx,
      write_lock: Mutex::new(()),
    })
  }

  /// Clone of the current record.
  pub fn current(&self) -> SiteConfig {
    self.config_tx.borrow().clone()
  }

  pub fn subscribe(&self) -> watch::Receiver<SiteConfig> {
    self.config_tx.subscribe()
  }

  /// Persist the full record, then re-read the stored document as the
  /// source of truth and publish the result. No optimistic merge: what
  /// subscribers see is always what a fresh fetch would return.
  pub async fn replace(&self, config: SiteConfig) -> Result<SiteConfig, anyhow::Error> {
    let _guard = self.write_lock.lock().await;
    let doc = serde_json::to_value(&config)?;
    self.backend.put_site_document(SITE_CONFIG_DOC, doc).await?;
    let reloaded = read_config(self.backend.as_ref()).await?;
    self.config_tx.send_replace(reloaded.clone());
    Ok(reloaded)
  }

  /// Re-read without writing (manual refresh).
  pub async fn refresh(&self) -> Result<SiteConfig, anyhow::Error> {
    let _guard = self.write_lock.lock().await;
    let reloaded = read_config(self.backend.as_ref()).await?;
    self.config_tx.send_replace(reloaded.clone());
    Ok(reloaded)
  }

  /// Footer content is independent of the main record and read on demand.
  pub async fn footer(&self) -> Result<FooterContent, anyhow::Error> {
    match self.backend.get_site_document(FOOTER_DOC).await? {
      Some(doc) => Ok(serde_json::from_value(doc).unwrap_or_default()),
      None => Ok(FooterContent::default()),
    }
  }

  pub async fn replace_footer(
    &self,
    footer: FooterContent,
  ) -> Result<FooterContent, anyhow::Error> {
    let doc = serde_json::to_value(&footer)?;
    self.backend.put_site_document(FOOTER_DOC, doc).await?;
    self.footer().await
  }
}

async fn read_config(backend: &dyn StoreBackend) -> Result<SiteConfig, anyhow::Error> {
  let config = match backend.get_site_document(SITE_CONFIG_DOC).await? {
    Some(doc) => serde_json::from_value(doc).unwrap_or_default(),
    None => SiteConfig::default(),
  };
  Ok(config.normalized())
}
