use async_trait::async_trait;
use chrono::{DateTime, Utc};
use deadpool_postgres::{Config, ManagerConfig, Pool, RecyclingMethod, Runtime};
use tokio_postgres::types::ToSql;
use tokio_postgres::NoTls;
use uuid::Uuid;

use super::backend::{
  BrandRecord, CategoryRecord, OrderRecord, OtpPurpose, ProductFilter, ProductRecord, Session,
  StoreBackend, StoreUser,
};
use crate::catalog::OrderStatus;
use crate::site::Role;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS site_documents (
    name VARCHAR(64) PRIMARY KEY,
    data JSONB NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE IF NOT EXISTS users (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    email VARCHAR(255) NOT NULL UNIQUE,
    display_name VARCHAR(255) NOT NULL,
    password_hash TEXT NOT NULL,
    role VARCHAR(32) NOT NULL,
    email_verified BOOLEAN NOT NULL DEFAULT FALSE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
CREATE INDEX IF NOT EXISTS idx_users_email ON users(email);

CREATE TABLE IF NOT EXISTS sessions (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    token_hash VARCHAR(64) NOT NULL,
    expires_at TIMESTAMPTZ NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_sessions_token_hash ON sessions(token_hash);

CREATE TABLE IF NOT EXISTS otp_codes (
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    purpose VARCHAR(32) NOT NULL,
    code_hash VARCHAR(64) NOT NULL,
    expires_at TIMESTAMPTZ NOT NULL,
    PRIMARY KEY (user_id, purpose)
);

CREATE TABLE IF NOT EXISTS products (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    slug VARCHAR(255) NOT NULL UNIQUE,
    name VARCHAR(255) NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    price_cents BIGINT NOT NULL,
    currency VARCHAR(8) NOT NULL,
    images JSONB NOT NULL DEFAULT '[]',
    brand_slug VARCHAR(255),
    category_slug VARCHAR(255),
    stock BIGINT NOT NULL DEFAULT 0,
    active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
CREATE INDEX IF NOT EXISTS idx_products_category ON products(category_slug);
CREATE INDEX IF NOT EXISTS idx_products_brand ON products(brand_slug);

CREATE TABLE IF NOT EXISTS categories (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    slug VARCHAR(255) NOT NULL UNIQUE,
    name VARCHAR(255) NOT NULL,
    description TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS brands (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    slug VARCHAR(255) NOT NULL UNIQUE,
    name VARCHAR(255) NOT NULL
);

CREATE TABLE IF NOT EXISTS orders (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID REFERENCES users(id) ON DELETE SET NULL,
    email VARCHAR(255) NOT NULL,
    lines JSONB NOT NULL,
    total_cents BIGINT NOT NULL,
    currency VARCHAR(8) NOT NULL,
    status VARCHAR(16) NOT NULL,
    payment_method VARCHAR(32) NOT NULL,
    shipping_address TEXT NOT NULL DEFAULT '',
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
CREATE INDEX IF NOT EXISTS idx_orders_user ON orders(user_id);

CREATE TABLE IF NOT EXISTS wishlist_items (
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    product_id UUID NOT NULL REFERENCES products(id) ON DELETE CASCADE,
    added_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    PRIMARY KEY (user_id, product_id)
);

CREATE TABLE IF NOT EXISTS newsletter_subscribers (
    email VARCHAR(255) PRIMARY KEY,
    subscribed_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
"#;

pub struct PostgresBackend {
  pool: Pool,
}

impl PostgresBackend {
  pub fn new(url: &str, _max_connections: usize) -> Result<Self, anyhow::Error> {
    let mut cfg = Config::new();
    cfg.url = Some(url.into());
    cfg.manager = Some(ManagerConfig {
      recycling_method: RecyclingMethod::Fast,
    });
    let pool = cfg.create_pool(Some(Runtime::Tokio1), NoTls)?;
    Ok(Self { pool })
  }
}

#[async_trait]
impl StoreBackend for PostgresBackend {
  async fn init_schema(&self) -> Result<(), anyhow::Error> {
    self.pool.get().await?.batch_execute(SCHEMA).await?;
    tracing::info!("PostgreSQL schema initialized");
    Ok(())
  }

  // ===========================================================================
  // Site documents
  // ===========================================================================

  async fn get_site_document(
    &self,
    name: &str,
  ) -> Result<Option<serde_json::Value>, anyhow::Error> {
    let rows = self
      .pool
      .get()
      .await?
      .query("SELECT data FROM site_documents WHERE name = $1", &[&name])
      .await?;
    Ok(rows.first().map(|row| row.get(0)))
  }

  async fn put_site_document(
    &self,
    name: &str,
    data: serde_json::Value,
  ) -> Result<(), anyhow::Error> {
    self
      .pool
      .get()
      .await?
      .execute(
        "INSERT INTO site_documents (name, data, updated_at) VALUES ($1, $2, NOW())
         ON CONFLICT (name) DO UPDATE SET data = EXCLUDED.data, updated_at = NOW()",
        &[&name, &data],
      )
      .await?;
    Ok(())
  }

  // ===========================================================================
  // Users
  // ===========================================================================

  async fn create_user(
    &self,
    email: &str,
    display_name: &str,
    password_hash: &str,
    role: Role,
    email_verified: bool,
  ) -> Result<StoreUser, anyhow::Error> {
    let role_str = role.to_string();
    let row = self
      .pool
      .get()
      .await?
      .query_one(
        "INSERT INTO users (email, display_name, password_hash, role, email_verified)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING id, email, display_name, role, email_verified, created_at",
        &[&email, &display_name, &password_hash, &role_str, &email_verified],
      )
      .await?;
    Ok(row_to_user(&row))
  }

  async fn get_user_by_email(
    &self,
    email: &str,
  ) -> Result<Option<(StoreUser, String)>, anyhow::Error> {
    let rows = self
      .pool
      .get()
      .await?
      .query(
        "SELECT id, email, display_name, role, email_verified, created_at, password_hash
         FROM users WHERE email = $1",
        &[&email],
      )
      .await?;
    if rows.is_empty() {
      return Ok(None);
    }
    let row = &rows[0];
    Ok(Some((row_to_user(row), row.get(6))))
  }

  async fn get_user(&self, id: Uuid) -> Result<Option<StoreUser>, anyhow::Error> {
    let rows = self
      .pool
      .get()
      .await?
      .query(
        "SELECT id, email, display_name, role, email_verified, created_at FROM users WHERE id = $1",
        &[&id],
      )
      .await?;
    Ok(rows.first().map(row_to_user))
  }

  async fn list_users(&self) -> Result<Vec<StoreUser>, anyhow::Error> {
    let rows = self
      .pool
      .get()
      .await?
      .query(
        "SELECT id, email, display_name, role, email_verified, created_at
         FROM users ORDER BY created_at",
        &[],
      )
      .await?;
    Ok(rows.iter().map(row_to_user).collect())
  }

  async fn set_email_verified(&self, id: Uuid, verified: bool) -> Result<bool, anyhow::Error> {
    let result = self
      .pool
      .get()
      .await?
      .execute(
        "UPDATE users SET email_verified = $2 WHERE id = $1",
        &[&id, &verified],
      )
      .await?;
    Ok(result > 0)
  }

  async fn update_user_password(
    &self,
    id: Uuid,
    password_hash: &str,
  ) -> Result<bool, anyhow::Error> {
    let result = self
      .pool
      .get()
      .await?
      .execute(
        "UPDATE users SET password_hash = $2 WHERE id = $1",
        &[&id, &password_hash],
      )
      .await?;
    Ok(result > 0)
  }

  async fn update_user_role(&self, id: Uuid, role: Role) -> Result<bool, anyhow::Error> {
    let role_str = role.to_string();
    let result = self
      .pool
      .get()
      .await?
      .execute("UPDATE users SET role = $2 WHERE id = $1", &[&id, &role_str])
      .await?;
    Ok(result > 0)
  }

  // ===========================================================================
  // Sessions
  // ===========================================================================

  async fn create_session(
    &self,
    user_id: Uuid,
    token_hash: &str,
    expires_at: DateTime<Utc>,
  ) -> Result<Session, anyhow::Error> {
    let row = self
      .pool
      .get()
      .await?
      .query_one(
        "INSERT INTO sessions (user_id, token_hash, expires_at)
         VALUES ($1, $2, $3)
         RETURNING id, user_id, expires_at",
        &[&user_id, &token_hash, &expires_at],
      )
      .await?;
    Ok(Session {
      id: row.get(0),
      user_id: row.get(1),
      expires_at: row.get(2),
    })
  }

  async fn validate_session(
    &self,
    token_hash: &str,
  ) -> Result<Option<(Session, StoreUser)>, anyhow::Error> {
    let rows = self
      .pool
      .get()
      .await?
      .query(
        "SELECT s.id, s.user_id, s.expires_at,
                u.id, u.email, u.display_name, u.role, u.email_verified, u.created_at
         FROM sessions s JOIN users u ON s.user_id = u.id
         WHERE s.token_hash = $1 AND s.expires_at > NOW()",
        &[&token_hash],
      )
      .await?;
    if rows.is_empty() {
      return Ok(None);
    }
    let row = &rows[0];
    let session = Session {
      id: row.get(0),
      user_id: row.get(1),
      expires_at: row.get(2),
    };
    let user = StoreUser {
      id: row.get(3),
      email: row.get(4),
      display_name: row.get(5),
      role: row.get::<_, String>(6).parse().unwrap_or(Role::Customer),
      email_verified: row.get(7),
      created_at: row.get(8),
    };
    Ok(Some((session, user)))
  }

  async fn delete_session(&self, session_id: Uuid) -> Result<bool, anyhow::Error> {
    let result = self
      .pool
      .get()
      .await?
      .execute("DELETE FROM sessions WHERE id = $1", &[&session_id])
      .await?;
    Ok(result > 0)
  }

  async fn cleanup_expired_sessions(&self) -> Result<u64, anyhow::Error> {
    let result = self
      .pool
      .get()
      .await?
      .execute("DELETE FROM sessions WHERE expires_at <= NOW()", &[])
      .await?;
    Ok(result)
  }

  // ===========================================================================
  // One-time codes
  // ===========================================================================

  async fn upsert_otp(
    &self,
    user_id: Uuid,
    purpose: OtpPurpose,
    code_hash: &str,
    expires_at: DateTime<Utc>,
  ) -> Result<(), anyhow::Error> {
    let purpose_str = purpose.to_string();
    self
      .pool
      .get()
      .await?
      .execute(
        "INSERT INTO otp_codes (user_id, purpose, code_hash, expires_at)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT (user_id, purpose)
         DO UPDATE SET code_hash = EXCLUDED.code_hash, expires_at = EXCLUDED.expires_at",
        &[&user_id, &purpose_str, &code_hash, &expires_at],
      )
      .await?;
    Ok(())
  }

  async fn consume_otp(
    &self,
    user_id: Uuid,
    purpose: OtpPurpose,
    code_hash: &str,
  ) -> Result<bool, anyhow::Error> {
    let purpose_str = purpose.to_string();
    let result = self
      .pool
      .get()
      .await?
      .execute(
        "DELETE FROM otp_codes
         WHERE user_id = $1 AND purpose = $2 AND code_hash = $3 AND expires_at > NOW()",
        &[&user_id, &purpose_str, &code_hash],
      )
      .await?;
    Ok(result > 0)
  }

  // ===========================================================================
  // Catalog
  // ===========================================================================

  async fn list_products(
    &self,
    filter: &ProductFilter,
  ) -> Result<Vec<ProductRecord>, anyhow::Error> {
    let mut sql = String::from(
      "SELECT id, slug, name, description, price_cents, currency, images,
              brand_slug, category_slug, stock, active, created_at
       FROM products",
    );
    let search_pattern = filter
      .search
      .as_ref()
      .map(|s| format!("%{}%", s.to_lowercase()));
    let mut clauses: Vec<String> = Vec::new();
    let mut args: Vec<&(dyn ToSql + Sync)> = Vec::new();
    if !filter.include_inactive {
      clauses.push("active = TRUE".into());
    }
    if let Some(category) = &filter.category_slug {
      args.push(category);
      clauses.push(format!("category_slug = ${}", args.len()));
    }
    if let Some(brand) = &filter.brand_slug {
      args.push(brand);
      clauses.push(format!("brand_slug = ${}", args.len()));
    }
    if let Some(pattern) = &search_pattern {
      args.push(pattern);
      clauses.push(format!("LOWER(name) LIKE ${}", args.len()));
    }
    if !clauses.is_empty() {
      sql.push_str(" WHERE ");
      sql.push_str(&clauses.join(" AND "));
    }
    sql.push_str(" ORDER BY created_at DESC");
    if let Some(limit) = filter.limit {
      sql.push_str(&format!(" LIMIT {}", limit));
      if let Some(offset) = filter.offset {
        sql.push_str(&format!(" OFFSET {}", offset));
      }
    }

    let rows = self.pool.get().await?.query(&sql, &args).await?;
    Ok(rows.iter().map(row_to_product).collect())
  }

  async fn get_product(&self, id: Uuid) -> Result<Option<ProductRecord>, anyhow::Error> {
    let rows = self
      .pool
      .get()
      .await?
      .query(
        "SELECT id, slug, name, description, price_cents, currency, images,
                brand_slug, category_slug, stock, active, created_at
         FROM products WHERE id = $1",
        &[&id],
      )
      .await?;
    Ok(rows.first().map(row_to_product))
  }

  async fn get_product_by_slug(&self, slug: &str) -> Result<Option<ProductRecord>, anyhow::Error> {
    let rows = self
      .pool
      .get()
      .await?
      .query(
        "SELECT id, slug, name, description, price_cents, currency, images,
                brand_slug, category_slug, stock, active, created_at
         FROM products WHERE slug = $1",
        &[&slug],
      )
      .await?;
    Ok(rows.first().map(row_to_product))
  }

  async fn create_product(&self, record: ProductRecord) -> Result<ProductRecord, anyhow::Error> {
    let images = serde_json::to_value(&record.images)?;
    self
      .pool
      .get()
      .await?
      .execute(
        "INSERT INTO products
         (id, slug, name, description, price_cents, currency, images,
          brand_slug, category_slug, stock, active, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)",
        &[
          &record.id,
          &record.slug,
          &record.name,
          &record.description,
          &record.price_cents,
          &record.currency,
          &images,
          &record.brand_slug,
          &record.category_slug,
          &record.stock,
          &record.active,
          &record.created_at,
        ],
      )
      .await?;
    Ok(record)
  }

  async fn update_product(
    &self,
    record: ProductRecord,
  ) -> Result<Option<ProductRecord>, anyhow::Error> {
    let images = serde_json::to_value(&record.images)?;
    let result = self
      .pool
      .get()
      .await?
      .execute(
        "UPDATE products SET slug = $2, name = $3, description = $4, price_cents = $5,
           currency = $6, images = $7, brand_slug = $8, category_slug = $9,
           stock = $10, active = $11
         WHERE id = $1",
        &[
          &record.id,
          &record.slug,
          &record.name,
          &record.description,
          &record.price_cents,
          &record.currency,
          &images,
          &record.brand_slug,
          &record.category_slug,
          &record.stock,
          &record.active,
        ],
      )
      .await?;
    Ok(if result > 0 { Some(record) } else { None })
  }

  async fn delete_product(&self, id: Uuid) -> Result<bool, anyhow::Error> {
    let result = self
      .pool
      .get()
      .await?
      .execute("DELETE FROM products WHERE id = $1", &[&id])
      .await?;
    Ok(result > 0)
  }

  async fn decrement_stock(&self, id: Uuid, quantity: i64) -> Result<bool, anyhow::Error> {
    let result = self
      .pool
      .get()
      .await?
      .execute(
        "UPDATE products SET stock = stock - $2 WHERE id = $1 AND stock >= $2",
        &[&id, &quantity],
      )
      .await?;
    Ok(result > 0)
  }

  async fn list_categories(&self) -> Result<Vec<CategoryRecord>, anyhow::Error> {
    let rows = self
      .pool
      .get()
      .await?
      .query(
        "SELECT id, slug, name, description FROM categories ORDER BY name",
        &[],
      )
      .await?;
    Ok(
      rows
        .iter()
        .map(|row| CategoryRecord {
          id: row.get(0),
          slug: row.get(1),
          name: row.get(2),
          description: row.get(3),
        })
        .collect(),
    )
  }

  async fn upsert_category(
    &self,
    record: CategoryRecord,
  ) -> Result<CategoryRecord, anyhow::Error> {
    self
      .pool
      .get()
      .await?
      .execute(
        "INSERT INTO categories (id, slug, name, description) VALUES ($1, $2, $3, $4)
         ON CONFLICT (id) DO UPDATE SET
           slug = EXCLUDED.slug, name = EXCLUDED.name, description = EXCLUDED.description",
        &[&record.id, &record.slug, &record.name, &record.description],
      )
      .await?;
    Ok(record)
  }

  async fn delete_category(&self, id: Uuid) -> Result<bool, anyhow::Error> {
    let result = self
      .pool
      .get()
      .await?
      .execute("DELETE FROM categories WHERE id = $1", &[&id])
      .await?;
    Ok(result > 0)
  }

  async fn list_brands(&self) -> Result<Vec<BrandRecord>, anyhow::Error> {
    let rows = self
      .pool
      .get()
      .await?
      .query("SELECT id, slug, name FROM brands ORDER BY name", &[])
      .await?;
    Ok(
      rows
        .iter()
        .map(|row| BrandRecord {
          id: row.get(0),
          slug: row.get(1),
          name: row.get(2),
        })
        .collect(),
    )
  }

  async fn upsert_brand(&self, record: BrandRecord) -> Result<BrandRecord, anyhow::Error> {
    self
      .pool
      .get()
      .await?
      .execute(
        "INSERT INTO brands (id, slug, name) VALUES ($1, $2, $3)
         ON CONFLICT (id) DO UPDATE SET slug = EXCLUDED.slug, name = EXCLUDED.name",
        &[&record.id, &record.slug, &record.name],
      )
      .await?;
    Ok(record)
  }

  async fn delete_brand(&self, id: Uuid) -> Result<bool, anyhow::Error> {
    let result = self
      .pool
      .get()
      .await?
      .execute("DELETE FROM brands WHERE id = $1", &[&id])
      .await?;
    Ok(result > 0)
  }

  // ===========================================================================
  // Orders
  // ===========================================================================

  async fn create_order(&self, record: OrderRecord) -> Result<OrderRecord, anyhow::Error> {
    let lines = serde_json::to_value(&record.lines)?;
    let status_str = record.status.to_string();
    let method_str = record.payment_method.to_string();
    self
      .pool
      .get()
      .await?
      .execute(
        "INSERT INTO orders
         (id, user_id, email, lines, total_cents, currency, status,
          payment_method, shipping_address, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        &[
          &record.id,
          &record.user_id,
          &record.email,
          &lines,
          &record.total_cents,
          &record.currency,
          &status_str,
          &method_str,
          &record.shipping_address,
          &record.created_at,
        ],
      )
      .await?;
    Ok(record)
  }

  async fn get_order(&self, id: Uuid) -> Result<Option<OrderRecord>, anyhow::Error> {
    let rows = self
      .pool
      .get()
      .await?
      .query(
        "SELECT id, user_id, email, lines, total_cents, currency, status,
                payment_method, shipping_address, created_at
         FROM orders WHERE id = $1",
        &[&id],
      )
      .await?;
    Ok(rows.first().map(row_to_order))
  }

  async fn list_orders_for_user(&self, user_id: Uuid) -> Result<Vec<OrderRecord>, anyhow::Error> {
    let rows = self
      .pool
      .get()
      .await?
      .query(
        "SELECT id, user_id, email, lines, total_cents, currency, status,
                payment_method, shipping_address, created_at
         FROM orders WHERE user_id = $1 ORDER BY created_at DESC",
        &[&user_id],
      )
      .await?;
    Ok(rows.iter().map(row_to_order).collect())
  }

  async fn list_orders(
    &self,
    limit: Option<usize>,
    offset: Option<usize>,
  ) -> Result<Vec<OrderRecord>, anyhow::Error> {
    let mut sql = String::from(
      "SELECT id, user_id, email, lines, total_cents, currency, status,
              payment_method, shipping_address, created_at
       FROM orders ORDER BY created_at DESC",
    );
    if let Some(limit) = limit {
      sql.push_str(&format!(" LIMIT {}", limit));
      if let Some(offset) = offset {
        sql.push_str(&format!(" OFFSET {}", offset));
      }
    }
    let rows = self.pool.get().await?.query(&sql, &[]).await?;
    Ok(rows.iter().map(row_to_order).collect())
  }

  async fn update_order_status(
    &self,
    id: Uuid,
    status: OrderStatus,
  ) -> Result<bool, anyhow::Error> {
    let status_str = status.to_string();
    let result = self
      .pool
      .get()
      .await?
      .execute(
        "UPDATE orders SET status = $2 WHERE id = $1",
        &[&id, &status_str],
      )
      .await?;
    Ok(result > 0)
  }

  // ===========================================================================
  // Wishlist
  // ===========================================================================

  async fn add_wishlist_item(&self, user_id: Uuid, product_id: Uuid) -> Result<(), anyhow::Error> {
    self
      .pool
      .get()
      .await?
      .execute(
        "INSERT INTO wishlist_items (user_id, product_id) VALUES ($1, $2)
         ON CONFLICT (user_id, product_id) DO NOTHING",
        &[&user_id, &product_id],
      )
      .await?;
    Ok(())
  }

  async fn remove_wishlist_item(
    &self,
    user_id: Uuid,
    product_id: Uuid,
  ) -> Result<bool, anyhow::Error> {
    let result = self
      .pool
      .get()
      .await?
      .execute(
        "DELETE FROM wishlist_items WHERE user_id = $1 AND product_id = $2",
        &[&user_id, &product_id],
      )
      .await?;
    Ok(result > 0)
  }

  async fn list_wishlist(&self, user_id: Uuid) -> Result<Vec<Uuid>, anyhow::Error> {
    let rows = self
      .pool
      .get()
      .await?
      .query(
        "SELECT product_id FROM wishlist_items WHERE user_id = $1 ORDER BY added_at DESC",
        &[&user_id],
      )
      .await?;
    Ok(rows.iter().map(|row| row.get(0)).collect())
  }

  // ===========================================================================
  // Newsletter
  // ===========================================================================

  async fn subscribe_newsletter(&self, email: &str) -> Result<bool, anyhow::Error> {
    let result = self
      .pool
      .get()
      .await?
      .execute(
        "INSERT INTO newsletter_subscribers (email) VALUES ($1)
         ON CONFLICT (email) DO NOTHING",
        &[&email],
      )
      .await?;
    Ok(result > 0)
  }
}

fn row_to_user(row: &tokio_postgres::Row) -> StoreUser {
  StoreUser {
    id: row.get(0),
    email: row.get(1),
    display_name: row.get(2),
    role: row.get::<_, String>(3).parse().unwrap_or(Role::Customer),
    email_verified: row.get(4),
    created_at: row.get(5),
  }
}

fn row_to_product(row: &tokio_postgres::Row) -> ProductRecord {
  let images: serde_json::Value = row.get(6);
  ProductRecord {
    id: row.get(0),
    slug: row.get(1),
    name: row.get(2),
    description: row.get(3),
    price_cents: row.get(4),
    currency: row.get(5),
    images: serde_json::from_value(images).unwrap_or_default(),
    brand_slug: row.get(7),
    category_slug: row.get(8),
    stock: row.get(9),
    active: row.get(10),
    created_at: row.get(11),
  }
}

fn row_to_order(row: &tokio_postgres::Row) -> OrderRecord {
  let lines: serde_json::Value = row.get(3);
  OrderRecord {
    id: row.get(0),
    user_id: row.get(1),
    email: row.get(2),
    lines: serde_json::from_value(lines).unwrap_or_default(),
    total_cents: row.get(4),
    currency: row.get(5),
    status: row
      .get::<_, String>(6)
      .parse()
      .unwrap_or(OrderStatus::Pending),
    payment_method: row.get::<_, String>(7).parse().unwrap_or_default(),
    shipping_address: row.get(8),
    created_at: row.get(9),
  }
}
