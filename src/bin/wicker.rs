//! Ops CLI: operates directly on the configured database, no HTTP.

use clap::{Parser, Subcommand};
use colored::Colorize;
use comfy_table::Table;
use std::sync::Arc;
use uuid::Uuid;

use wicker::db::{
  BrandRecord, CategoryRecord, PostgresBackend, ProductRecord, SqliteBackend, StoreBackend,
};
use wicker::server::{auth, BackendType, ServerConfig, SiteStore};
use wicker::site::Role;

#[derive(Parser)]
#[command(name = "wicker", about = "Wicker storefront admin tool", version)]
struct Args {
  #[arg(short, long)]
  config: Option<String>,
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Create (or promote) a super admin account
  Admin {
    #[arg(long)]
    email: String,
    #[arg(long, default_value = "Store admin")]
    name: String,
    #[arg(long, env = "WICKER_ADMIN_PASSWORD")]
    password: String,
  },
  /// Turn maintenance mode on or off
  Maintenance {
    #[arg(value_parser = ["on", "off"])]
    state: String,
    #[arg(long)]
    message: Option<String>,
  },
  /// Show the current site configuration
  Config,
  /// Seed a small demo catalog
  Seed,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
  let args = Args::parse();

  let config = if let Some(path) = &args.config {
    ServerConfig::from_file(path)?
  } else {
    ServerConfig::find_and_load()?.unwrap_or_default()
  };

  let backend: Arc<dyn StoreBackend> = match config.backend {
    BackendType::Postgres => Arc::new(PostgresBackend::new(
      &config.postgres.url,
      config.postgres.max_connections,
    )?),
    BackendType::Sqlite => Arc::new(SqliteBackend::new(&config.sqlite.path).await?),
  };
  backend.init_schema().await?;

  match args.command {
    Commands::Admin {
      email,
      name,
      password,
    } => create_admin(backend, &email, &name, &password).await,
    Commands::Maintenance { state, message } => {
      set_maintenance(backend, state == "on", message).await
    }
    Commands::Config => show_config(backend).await,
    Commands::Seed => seed(backend).await,
  }
}

async fn create_admin(
  backend: Arc<dyn StoreBackend>,
  email: &str,
  name: &str,
  password: &str,
) -> Result<(), anyhow::Error> {
  if password.len() < 8 {
    anyhow::bail!("Password must be at least 8 characters");
  }
  let email = email.trim().to_lowercase();

  if let Some((user, _)) = backend.get_user_by_email(&email).await? {
    backend.update_user_role(user.id, Role::SuperAdmin).await?;
    println!("{} {}", "Promoted to super admin:".green(), email);
    return Ok(());
  }

  let hash =
    auth::hash_password(password).map_err(|e| anyhow::anyhow!("Password hash error: {}", e))?;
  backend
    .create_user(&email, name, &hash, Role::SuperAdmin, true)
    .await?;
  println!("{} {}", "Created super admin:".green(), email);
  Ok(())
}

async fn set_maintenance(
  backend: Arc<dyn StoreBackend>,
  on: bool,
  message: Option<String>,
) -> Result<(), anyhow::Error> {
  let store = SiteStore::load(backend).await?;
  let mut config = store.current();
  config.maintenance_mode = on;
  if let Some(message) = message {
    config.maintenance_message = Some(message);
  }
  store.replace(config).await?;
  if on {
    println!("{}", "Maintenance mode is ON".yellow());
  } else {
    println!("{}", "Maintenance mode is OFF".green());
  }
  Ok(())
}

async fn show_config(backend: Arc<dyn StoreBackend>) -> Result<(), anyhow::Error> {
  let store = SiteStore::load(backend).await?;
  let config = store.current();

  let mut table = Table::new();
  table.set_header(vec!["Setting", "Value"]);
  table.add_row(vec!["Store name", config.site_name.as_str()]);
  table.add_row(vec!["Tagline", config.tagline.as_str()]);
  table.add_row(vec!["Contact email", config.contact.email.as_str()]);
  table.add_row(vec![
    "Maintenance".to_string(),
    if config.maintenance_mode {
      "on".to_string()
    } else {
      "off".to_string()
    },
  ]);
  table.add_row(vec![
    "Maintenance message".to_string(),
    config.maintenance_message().to_string(),
  ]);
  table.add_row(vec![
    "Payment method".to_string(),
    config.payment.method.to_string(),
  ]);
  if let Some(flags) = &config.features {
    for (name, enabled) in flags {
      table.add_row(vec![
        format!("feature:{}", name),
        if *enabled { "on".into() } else { "off".to_string() },
      ]);
    }
  }
  println!("{table}");
  Ok(())
}

async fn seed(backend: Arc<dyn StoreBackend>) -> Result<(), anyhow::Error> {
  let categories = [
    ("kitchen", "Kitchen", "Pots, boards, and tools"),
    ("living", "Living", "Things for the living room"),
  ];
  for (slug, name, description) in categories {
    backend
      .upsert_category(CategoryRecord {
        id: Uuid::new_v4(),
        slug: slug.into(),
        name: name.into(),
        description: description.into(),
      })
      .await?;
  }

  let brands = [("heartwood", "Heartwood"), ("rivermoss", "Rivermoss")];
  for (slug, name) in brands {
    backend
      .upsert_brand(BrandRecord {
        id: Uuid::new_v4(),
        slug: slug.into(),
        name: name.into(),
      })
      .await?;
  }

  let products: [(&str, &str, i64, &str, &str); 4] = [
    ("willow-basket", "Willow basket", 3400, "living", "heartwood"),
    ("oak-board", "Oak serving board", 2800, "kitchen", "heartwood"),
    ("stone-mug", "Stoneware mug", 1600, "kitchen", "rivermoss"),
    ("wool-throw", "Wool throw", 7200, "living", "rivermoss"),
  ];
  for (slug, name, price_cents, category, brand) in products {
    if backend.get_product_by_slug(slug).await?.is_some() {
      continue;
    }
    backend
      .create_product(ProductRecord {
        id: Uuid::new_v4(),
        slug: slug.into(),
        name: name.into(),
        description: format!("{}, made to last.", name),
        price_cents,
        currency: "USD".into(),
        images: Vec::new(),
        brand_slug: Some(brand.into()),
        category_slug: Some(category.into()),
        stock: 20,
        active: true,
        created_at: chrono::Utc::now(),
      })
      .await?;
  }

  println!("{}", "Seeded demo catalog".green());
  Ok(())
}
