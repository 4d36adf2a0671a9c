use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;

use super::api::{ApiServer, AppState};
use super::store::SiteStore;
use super::ServerConfig;
use crate::db::StoreBackend;
use crate::mail::{LogMailer, SharedMailer};

pub struct Daemon {
  config: ServerConfig,
  backend: Arc<dyn StoreBackend>,
  mailer: SharedMailer,
  shutdown_tx: broadcast::Sender<()>,
}

impl Daemon {
  pub fn new(config: ServerConfig, backend: Arc<dyn StoreBackend>) -> Self {
    let (shutdown_tx, _) = broadcast::channel(1);
    // Only log delivery exists today.
    let mailer: SharedMailer = Arc::new(LogMailer);
    Self {
      config,
      backend,
      mailer,
      shutdown_tx,
    }
  }

  /// Trigger graceful shutdown of all servers
  pub fn shutdown(&self) {
    tracing::info!("Initiating graceful shutdown...");
    let _ = self.shutdown_tx.send(());
  }

  pub async fn run(&self) -> Result<(), anyhow::Error> {
    tracing::info!("Initializing database schema...");
    self.backend.init_schema().await?;

    let site = Arc::new(SiteStore::load(self.backend.clone()).await?);
    let site_config = site.current();
    if site_config.is_maintenance_mode() {
      tracing::warn!("Maintenance mode is ON: {}", site_config.maintenance_message());
    }

    // Periodic session cleanup
    let cleanup_backend = self.backend.clone();
    tokio::spawn(async move {
      loop {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        match cleanup_backend.cleanup_expired_sessions().await {
          Ok(0) => {}
          Ok(n) => tracing::info!("Removed {} expired sessions", n),
          Err(e) => tracing::warn!("Session cleanup failed: {}", e),
        }
      }
    });

    let state = AppState {
      backend: self.backend.clone(),
      site,
      mailer: self.mailer.clone(),
      config: self.config.clone(),
    };

    let server = ApiServer::new(state, self.shutdown_tx.subscribe());
    server.run(&self.config.address()).await
  }
}
