use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::params;
use tokio_rusqlite::Connection;
use uuid::Uuid;

use super::backend::{
  BrandRecord, CategoryRecord, OrderRecord, OtpPurpose, ProductFilter, ProductRecord, Session,
  StoreBackend, StoreUser,
};
use crate::catalog::OrderStatus;
use crate::site::Role;

const PRAGMAS: &str = r#"
PRAGMA journal_mode = WAL;
PRAGMA synchronous = NORMAL;
PRAGMA cache_size = -64000;
PRAGMA temp_store = MEMORY;
PRAGMA foreign_keys = ON;
"#;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS site_documents (
    name TEXT PRIMARY KEY,
    data TEXT NOT NULL,
    updated_at TEXT NOT NULL
) WITHOUT ROWID;

CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    email TEXT NOT NULL UNIQUE,
    display_name TEXT NOT NULL,
    password_hash TEXT NOT NULL,
    role TEXT NOT NULL,
    email_verified INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL
) WITHOUT ROWID;
CREATE INDEX IF NOT EXISTS idx_users_email ON users(email);

CREATE TABLE IF NOT EXISTS sessions (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    token_hash TEXT NOT NULL,
    expires_at TEXT NOT NULL
) WITHOUT ROWID;
CREATE INDEX IF NOT EXISTS idx_sessions_token_hash ON sessions(token_hash);

CREATE TABLE IF NOT EXISTS otp_codes (
    user_id TEXT NOT NULL,
    purpose TEXT NOT NULL,
    code_hash TEXT NOT NULL,
    expires_at TEXT NOT NULL,
    PRIMARY KEY (user_id, purpose)
) WITHOUT ROWID;

CREATE TABLE IF NOT EXISTS products (
    id TEXT PRIMARY KEY,
    slug TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    description TEXT NOT NULL,
    price_cents INTEGER NOT NULL,
    currency TEXT NOT NULL,
    images TEXT NOT NULL,
    brand_slug TEXT,
    category_slug TEXT,
    stock INTEGER NOT NULL,
    active INTEGER NOT NULL,
    created_at TEXT NOT NULL
) WITHOUT ROWID;
CREATE INDEX IF NOT EXISTS idx_products_category ON products(category_slug);
CREATE INDEX IF NOT EXISTS idx_products_brand ON products(brand_slug);

CREATE TABLE IF NOT EXISTS categories (
    id TEXT PRIMARY KEY,
    slug TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    description TEXT NOT NULL
) WITHOUT ROWID;

CREATE TABLE IF NOT EXISTS brands (
    id TEXT PRIMARY KEY,
    slug TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL
) WITHOUT ROWID;

CREATE TABLE IF NOT EXISTS orders (
    id TEXT PRIMARY KEY,
    user_id TEXT,
    email TEXT NOT NULL,
    lines TEXT NOT NULL,
    total_cents INTEGER NOT NULL,
    currency TEXT NOT NULL,
    status TEXT NOT NULL,
    payment_method TEXT NOT NULL,
    shipping_address TEXT NOT NULL,
    created_at TEXT NOT NULL
) WITHOUT ROWID;
CREATE INDEX IF NOT EXISTS idx_orders_user ON orders(user_id);

CREATE TABLE IF NOT EXISTS wishlist_items (
    user_id TEXT NOT NULL,
    product_id TEXT NOT NULL,
    added_at TEXT NOT NULL,
    PRIMARY KEY (user_id, product_id)
) WITHOUT ROWID;

CREATE TABLE IF NOT EXISTS newsletter_subscribers (
    email TEXT PRIMARY KEY,
    subscribed_at TEXT NOT NULL
) WITHOUT ROWID;
"#;

pub struct SqliteBackend {
  conn: Connection,
}

impl SqliteBackend {
  pub async fn new(path: &str) -> Result<Self, anyhow::Error> {
    let conn = if path == ":memory:" {
      Connection::open_in_memory().await?
    } else {
      Connection::open(path).await?
    };

    conn
      .call(|conn| conn.execute_batch(PRAGMAS).map_err(|e| e.into()))
      .await?;

    Ok(Self { conn })
  }

  pub async fn in_memory() -> Result<Self, anyhow::Error> {
    Self::new(":memory:").await
  }
}

#[async_trait]
impl StoreBackend for SqliteBackend {
  async fn init_schema(&self) -> Result<(), anyhow::Error> {
    self
      .conn
      .call(|conn| conn.execute_batch(SCHEMA).map_err(|e| e.into()))
      .await?;
    tracing::info!("SQLite schema initialized");
    Ok(())
  }

  // ===========================================================================
  // Site documents
  // ===========================================================================

  async fn get_site_document(
    &self,
    name: &str,
  ) -> Result<Option<serde_json::Value>, anyhow::Error> {
    let name = name.to_string();
    self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare_cached("SELECT data FROM site_documents WHERE name = ?1")?;
        let mut rows = stmt.query(params![name])?;
        if let Some(row) = rows.next()? {
          let data: String = row.get(0)?;
          Ok(Some(serde_json::from_str(&data).unwrap_or(serde_json::Value::Null)))
        } else {
          Ok(None)
        }
      })
      .await
      .map_err(|e| anyhow::anyhow!("{}", e))
  }

  async fn put_site_document(
    &self,
    name: &str,
    data: serde_json::Value,
  ) -> Result<(), anyhow::Error> {
    let name = name.to_string();
    let data_str = serde_json::to_string(&data)?;
    let now_str = Utc::now().to_rfc3339();
    self
      .conn
      .call(move |conn| {
        conn
          .execute(
            "INSERT INTO site_documents (name, data, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(name) DO UPDATE SET data = excluded.data, updated_at = excluded.updated_at",
            params![name, data_str, now_str],
          )
          .map_err(|e| e.into())
      })
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
    let id = Uuid::new_v4();
    let now = Utc::now();
    let user = StoreUser {
      id,
      email: email.to_string(),
      display_name: display_name.to_string(),
      role,
      email_verified,
      created_at: now,
    };
    let email = email.to_string();
    let display_name = display_name.to_string();
    let password_hash = password_hash.to_string();
    let role_str = role.to_string();
    let now_str = now.to_rfc3339();
    self
      .conn
      .call(move |conn| {
        conn
          .execute(
            "INSERT INTO users (id, email, display_name, password_hash, role, email_verified, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
              id.to_string(),
              email,
              display_name,
              password_hash,
              role_str,
              email_verified as i64,
              now_str
            ],
          )
          .map_err(|e| e.into())
      })
      .await?;
    Ok(user)
  }

  async fn get_user_by_email(
    &self,
    email: &str,
  ) -> Result<Option<(StoreUser, String)>, anyhow::Error> {
    let email = email.to_string();
    self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare_cached(
          "SELECT id, email, display_name, role, email_verified, created_at, password_hash
           FROM users WHERE email = ?1",
        )?;
        let mut rows = stmt.query(params![email])?;
        if let Some(row) = rows.next()? {
          let user = row_to_user(row)?;
          let hash: String = row.get(6)?;
          Ok(Some((user, hash)))
        } else {
          Ok(None)
        }
      })
      .await
      .map_err(|e| anyhow::anyhow!("{}", e))
  }

  async fn get_user(&self, id: Uuid) -> Result<Option<StoreUser>, anyhow::Error> {
    let id_str = id.to_string();
    self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare_cached(
          "SELECT id, email, display_name, role, email_verified, created_at FROM users WHERE id = ?1",
        )?;
        let mut rows = stmt.query(params![id_str])?;
        if let Some(row) = rows.next()? {
          Ok(Some(row_to_user(row)?))
        } else {
          Ok(None)
        }
      })
      .await
      .map_err(|e| anyhow::anyhow!("{}", e))
  }

  async fn list_users(&self) -> Result<Vec<StoreUser>, anyhow::Error> {
    self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare_cached(
          "SELECT id, email, display_name, role, email_verified, created_at
           FROM users ORDER BY created_at",
        )?;
        let mut rows = stmt.query([])?;
        let mut users = Vec::new();
        while let Some(row) = rows.next()? {
          users.push(row_to_user(row)?);
        }
        Ok(users)
      })
      .await
      .map_err(|e| anyhow::anyhow!("{}", e))
  }

  async fn set_email_verified(&self, id: Uuid, verified: bool) -> Result<bool, anyhow::Error> {
    let id_str = id.to_string();
    let changed = self
      .conn
      .call(move |conn| {
        conn
          .execute(
            "UPDATE users SET email_verified = ?1 WHERE id = ?2",
            params![verified as i64, id_str],
          )
          .map_err(|e| e.into())
      })
      .await?;
    Ok(changed > 0)
  }

  async fn update_user_password(
    &self,
    id: Uuid,
    password_hash: &str,
  ) -> Result<bool, anyhow::Error> {
    let id_str = id.to_string();
    let hash = password_hash.to_string();
    let changed = self
      .conn
      .call(move |conn| {
        conn
          .execute(
            "UPDATE users SET password_hash = ?1 WHERE id = ?2",
            params![hash, id_str],
          )
          .map_err(|e| e.into())
      })
      .await?;
    Ok(changed > 0)
  }

  async fn update_user_role(&self, id: Uuid, role: Role) -> Result<bool, anyhow::Error> {
    let id_str = id.to_string();
    let role_str = role.to_string();
    let changed = self
      .conn
      .call(move |conn| {
        conn
          .execute(
            "UPDATE users SET role = ?1 WHERE id = ?2",
            params![role_str, id_str],
          )
          .map_err(|e| e.into())
      })
      .await?;
    Ok(changed > 0)
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
    let id = Uuid::new_v4();
    let session = Session {
      id,
      user_id,
      expires_at,
    };
    let token_hash = token_hash.to_string();
    let expires_str = expires_at.to_rfc3339();
    self
      .conn
      .call(move |conn| {
        conn
          .execute(
            "INSERT INTO sessions (id, user_id, token_hash, expires_at) VALUES (?1, ?2, ?3, ?4)",
            params![id.to_string(), user_id.to_string(), token_hash, expires_str],
          )
          .map_err(|e| e.into())
      })
      .await?;
    Ok(session)
  }

  async fn validate_session(
    &self,
    token_hash: &str,
  ) -> Result<Option<(Session, StoreUser)>, anyhow::Error> {
    let token_hash = token_hash.to_string();
    let now_str = Utc::now().to_rfc3339();
    self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare_cached(
          "SELECT s.id, s.user_id, s.expires_at,
                  u.id, u.email, u.display_name, u.role, u.email_verified, u.created_at
           FROM sessions s JOIN users u ON s.user_id = u.id
           WHERE s.token_hash = ?1 AND s.expires_at > ?2",
        )?;
        let mut rows = stmt.query(params![token_hash, now_str])?;
        if let Some(row) = rows.next()? {
          let session = Session {
            id: parse_uuid(row.get::<_, String>(0)?),
            user_id: parse_uuid(row.get::<_, String>(1)?),
            expires_at: parse_ts(&row.get::<_, String>(2)?),
          };
          let user = StoreUser {
            id: parse_uuid(row.get::<_, String>(3)?),
            email: row.get(4)?,
            display_name: row.get(5)?,
            role: row.get::<_, String>(6)?.parse().unwrap_or(Role::Customer),
            email_verified: row.get::<_, i64>(7)? != 0,
            created_at: parse_ts(&row.get::<_, String>(8)?),
          };
          Ok(Some((session, user)))
        } else {
          Ok(None)
        }
      })
      .await
      .map_err(|e| anyhow::anyhow!("{}", e))
  }

  async fn delete_session(&self, session_id: Uuid) -> Result<bool, anyhow::Error> {
    let id_str = session_id.to_string();
    let changed = self
      .conn
      .call(move |conn| {
        conn
          .execute("DELETE FROM sessions WHERE id = ?1", params![id_str])
          .map_err(|e| e.into())
      })
      .await?;
    Ok(changed > 0)
  }

  async fn cleanup_expired_sessions(&self) -> Result<u64, anyhow::Error> {
    let now_str = Utc::now().to_rfc3339();
    let changed = self
      .conn
      .call(move |conn| {
        conn
          .execute("DELETE FROM sessions WHERE expires_at <= ?1", params![now_str])
          .map_err(|e| e.into())
      })
      .await?;
    Ok(changed as u64)
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
    let user_str = user_id.to_string();
    let purpose_str = purpose.to_string();
    let code_hash = code_hash.to_string();
    let expires_str = expires_at.to_rfc3339();
    self
      .conn
      .call(move |conn| {
        conn
          .execute(
            "INSERT INTO otp_codes (user_id, purpose, code_hash, expires_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(user_id, purpose)
             DO UPDATE SET code_hash = excluded.code_hash, expires_at = excluded.expires_at",
            params![user_str, purpose_str, code_hash, expires_str],
          )
          .map_err(|e| e.into())
      })
      .await?;
    Ok(())
  }

  async fn consume_otp(
    &self,
    user_id: Uuid,
    purpose: OtpPurpose,
    code_hash: &str,
  ) -> Result<bool, anyhow::Error> {
    let user_str = user_id.to_string();
    let purpose_str = purpose.to_string();
    let code_hash = code_hash.to_string();
    let now_str = Utc::now().to_rfc3339();
    let changed = self
      .conn
      .call(move |conn| {
        conn
          .execute(
            "DELETE FROM otp_codes
             WHERE user_id = ?1 AND purpose = ?2 AND code_hash = ?3 AND expires_at > ?4",
            params![user_str, purpose_str, code_hash, now_str],
          )
          .map_err(|e| e.into())
      })
      .await?;
    Ok(changed > 0)
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
    let mut clauses: Vec<String> = Vec::new();
    let mut args: Vec<String> = Vec::new();
    if !filter.include_inactive {
      clauses.push("active = 1".into());
    }
    if let Some(category) = &filter.category_slug {
      args.push(category.clone());
      clauses.push(format!("category_slug = ?{}", args.len()));
    }
    if let Some(brand) = &filter.brand_slug {
      args.push(brand.clone());
      clauses.push(format!("brand_slug = ?{}", args.len()));
    }
    if let Some(search) = &filter.search {
      args.push(format!("%{}%", search.to_lowercase()));
      clauses.push(format!("LOWER(name) LIKE ?{}", args.len()));
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

    self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let mut rows = stmt.query(rusqlite::params_from_iter(args.iter()))?;
        let mut products = Vec::new();
        while let Some(row) = rows.next()? {
          products.push(row_to_product(row)?);
        }
        Ok(products)
      })
      .await
      .map_err(|e| anyhow::anyhow!("{}", e))
  }

  async fn get_product(&self, id: Uuid) -> Result<Option<ProductRecord>, anyhow::Error> {
    let id_str = id.to_string();
    self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare_cached(
          "SELECT id, slug, name, description, price_cents, currency, images,
                  brand_slug, category_slug, stock, active, created_at
           FROM products WHERE id = ?1",
        )?;
        let mut rows = stmt.query(params![id_str])?;
        if let Some(row) = rows.next()? {
          Ok(Some(row_to_product(row)?))
        } else {
          Ok(None)
        }
      })
      .await
      .map_err(|e| anyhow::anyhow!("{}", e))
  }

  async fn get_product_by_slug(&self, slug: &str) -> Result<Option<ProductRecord>, anyhow::Error> {
    let slug = slug.to_string();
    self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare_cached(
          "SELECT id, slug, name, description, price_cents, currency, images,
                  brand_slug, category_slug, stock, active, created_at
           FROM products WHERE slug = ?1",
        )?;
        let mut rows = stmt.query(params![slug])?;
        if let Some(row) = rows.next()? {
          Ok(Some(row_to_product(row)?))
        } else {
          Ok(None)
        }
      })
      .await
      .map_err(|e| anyhow::anyhow!("{}", e))
  }

  async fn create_product(&self, record: ProductRecord) -> Result<ProductRecord, anyhow::Error> {
    let images = serde_json::to_string(&record.images)?;
    let r = record.clone();
    self
      .conn
      .call(move |conn| {
        conn
          .execute(
            "INSERT INTO products
             (id, slug, name, description, price_cents, currency, images,
              brand_slug, category_slug, stock, active, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
              r.id.to_string(),
              r.slug,
              r.name,
              r.description,
              r.price_cents,
              r.currency,
              images,
              r.brand_slug,
              r.category_slug,
              r.stock,
              r.active as i64,
              r.created_at.to_rfc3339()
            ],
          )
          .map_err(|e| e.into())
      })
      .await?;
    Ok(record)
  }

  async fn update_product(
    &self,
    record: ProductRecord,
  ) -> Result<Option<ProductRecord>, anyhow::Error> {
    let images = serde_json::to_string(&record.images)?;
    let r = record.clone();
    let changed = self
      .conn
      .call(move |conn| {
        conn
          .execute(
            "UPDATE products SET slug = ?2, name = ?3, description = ?4, price_cents = ?5,
               currency = ?6, images = ?7, brand_slug = ?8, category_slug = ?9,
               stock = ?10, active = ?11
             WHERE id = ?1",
            params![
              r.id.to_string(),
              r.slug,
              r.name,
              r.description,
              r.price_cents,
              r.currency,
              images,
              r.brand_slug,
              r.category_slug,
              r.stock,
              r.active as i64
            ],
          )
          .map_err(|e| e.into())
      })
      .await?;
    Ok(if changed > 0 { Some(record) } else { None })
  }

  async fn delete_product(&self, id: Uuid) -> Result<bool, anyhow::Error> {
    let id_str = id.to_string();
    let changed = self
      .conn
      .call(move |conn| {
        conn
          .execute("DELETE FROM products WHERE id = ?1", params![id_str])
          .map_err(|e| e.into())
      })
      .await?;
    Ok(changed > 0)
  }

  async fn decrement_stock(&self, id: Uuid, quantity: i64) -> Result<bool, anyhow::Error> {
    let id_str = id.to_string();
    let changed = self
      .conn
      .call(move |conn| {
        conn
          .execute(
            "UPDATE products SET stock = stock - ?1 WHERE id = ?2 AND stock >= ?1",
            params![quantity, id_str],
          )
          .map_err(|e| e.into())
      })
      .await?;
    Ok(changed > 0)
  }

  async fn list_categories(&self) -> Result<Vec<CategoryRecord>, anyhow::Error> {
    self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare_cached("SELECT id, slug, name, description FROM categories ORDER BY name")?;
        let mut rows = stmt.query([])?;
        let mut categories = Vec::new();
        while let Some(row) = rows.next()? {
          categories.push(CategoryRecord {
            id: parse_uuid(row.get::<_, String>(0)?),
            slug: row.get(1)?,
            name: row.get(2)?,
            description: row.get(3)?,
          });
        }
        Ok(categories)
      })
      .await
      .map_err(|e| anyhow::anyhow!("{}", e))
  }

  async fn upsert_category(
    &self,
    record: CategoryRecord,
  ) -> Result<CategoryRecord, anyhow::Error> {
    let r = record.clone();
    self
      .conn
      .call(move |conn| {
        conn
          .execute(
            "INSERT INTO categories (id, slug, name, description) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET
               slug = excluded.slug, name = excluded.name, description = excluded.description",
            params![r.id.to_string(), r.slug, r.name, r.description],
          )
          .map_err(|e| e.into())
      })
      .await?;
    Ok(record)
  }

  async fn delete_category(&self, id: Uuid) -> Result<bool, anyhow::Error> {
    let id_str = id.to_string();
    let changed = self
      .conn
      .call(move |conn| {
        conn
          .execute("DELETE FROM categories WHERE id = ?1", params![id_str])
          .map_err(|e| e.into())
      })
      .await?;
    Ok(changed > 0)
  }

  async fn list_brands(&self) -> Result<Vec<BrandRecord>, anyhow::Error> {
    self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare_cached("SELECT id, slug, name FROM brands ORDER BY name")?;
        let mut rows = stmt.query([])?;
        let mut brands = Vec::new();
        while let Some(row) = rows.next()? {
          brands.push(BrandRecord {
            id: parse_uuid(row.get::<_, String>(0)?),
            slug: row.get(1)?,
            name: row.get(2)?,
          });
        }
        Ok(brands)
      })
      .await
      .map_err(|e| anyhow::anyhow!("{}", e))
  }

  async fn upsert_brand(&self, record: BrandRecord) -> Result<BrandRecord, anyhow::Error> {
    let r = record.clone();
    self
      .conn
      .call(move |conn| {
        conn
          .execute(
            "INSERT INTO brands (id, slug, name) VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET slug = excluded.slug, name = excluded.name",
            params![r.id.to_string(), r.slug, r.name],
          )
          .map_err(|e| e.into())
      })
      .await?;
    Ok(record)
  }

  async fn delete_brand(&self, id: Uuid) -> Result<bool, anyhow::Error> {
    let id_str = id.to_string();
    let changed = self
      .conn
      .call(move |conn| {
        conn
          .execute("DELETE FROM brands WHERE id = ?1", params![id_str])
          .map_err(|e| e.into())
      })
      .await?;
    Ok(changed > 0)
  }

  // ===========================================================================
  // Orders
  // ===========================================================================

  async fn create_order(&self, record: OrderRecord) -> Result<OrderRecord, anyhow::Error> {
    let lines = serde_json::to_string(&record.lines)?;
    let r = record.clone();
    self
      .conn
      .call(move |conn| {
        conn
          .execute(
            "INSERT INTO orders
             (id, user_id, email, lines, total_cents, currency, status,
              payment_method, shipping_address, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
              r.id.to_string(),
              r.user_id.map(|u| u.to_string()),
              r.email,
              lines,
              r.total_cents,
              r.currency,
              r.status.to_string(),
              r.payment_method.to_string(),
              r.shipping_address,
              r.created_at.to_rfc3339()
            ],
          )
          .map_err(|e| e.into())
      })
      .await?;
    Ok(record)
  }

  async fn get_order(&self, id: Uuid) -> Result<Option<OrderRecord>, anyhow::Error> {
    let id_str = id.to_string();
    self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare_cached(
          "SELECT id, user_id, email, lines, total_cents, currency, status,
                  payment_method, shipping_address, created_at
           FROM orders WHERE id = ?1",
        )?;
        let mut rows = stmt.query(params![id_str])?;
        if let Some(row) = rows.next()? {
          Ok(Some(row_to_order(row)?))
        } else {
          Ok(None)
        }
      })
      .await
      .map_err(|e| anyhow::anyhow!("{}", e))
  }

  async fn list_orders_for_user(&self, user_id: Uuid) -> Result<Vec<OrderRecord>, anyhow::Error> {
    let user_str = user_id.to_string();
    self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare_cached(
          "SELECT id, user_id, email, lines, total_cents, currency, status,
                  payment_method, shipping_address, created_at
           FROM orders WHERE user_id = ?1 ORDER BY created_at DESC",
        )?;
        let mut rows = stmt.query(params![user_str])?;
        let mut orders = Vec::new();
        while let Some(row) = rows.next()? {
          orders.push(row_to_order(row)?);
        }
        Ok(orders)
      })
      .await
      .map_err(|e| anyhow::anyhow!("{}", e))
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
    self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let mut rows = stmt.query([])?;
        let mut orders = Vec::new();
        while let Some(row) = rows.next()? {
          orders.push(row_to_order(row)?);
        }
        Ok(orders)
      })
      .await
      .map_err(|e| anyhow::anyhow!("{}", e))
  }

  async fn update_order_status(
    &self,
    id: Uuid,
    status: OrderStatus,
  ) -> Result<bool, anyhow::Error> {
    let id_str = id.to_string();
    let status_str = status.to_string();
    let changed = self
      .conn
      .call(move |conn| {
        conn
          .execute(
            "UPDATE orders SET status = ?1 WHERE id = ?2",
            params![status_str, id_str],
          )
          .map_err(|e| e.into())
      })
      .await?;
    Ok(changed > 0)
  }

  // ===========================================================================
  // Wishlist
  // ===========================================================================

  async fn add_wishlist_item(&self, user_id: Uuid, product_id: Uuid) -> Result<(), anyhow::Error> {
    let user_str = user_id.to_string();
    let product_str = product_id.to_string();
    let now_str = Utc::now().to_rfc3339();
    self
      .conn
      .call(move |conn| {
        conn
          .execute(
            "INSERT INTO wishlist_items (user_id, product_id, added_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(user_id, product_id) DO NOTHING",
            params![user_str, product_str, now_str],
          )
          .map_err(|e| e.into())
      })
      .await?;
    Ok(())
  }

  async fn remove_wishlist_item(
    &self,
    user_id: Uuid,
    product_id: Uuid,
  ) -> Result<bool, anyhow::Error> {
    let user_str = user_id.to_string();
    let product_str = product_id.to_string();
    let changed = self
      .conn
      .call(move |conn| {
        conn
          .execute(
            "DELETE FROM wishlist_items WHERE user_id = ?1 AND product_id = ?2",
            params![user_str, product_str],
          )
          .map_err(|e| e.into())
      })
      .await?;
    Ok(changed > 0)
  }

  async fn list_wishlist(&self, user_id: Uuid) -> Result<Vec<Uuid>, anyhow::Error> {
    let user_str = user_id.to_string();
    self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare_cached(
          "SELECT product_id FROM wishlist_items WHERE user_id = ?1 ORDER BY added_at DESC",
        )?;
        let mut rows = stmt.query(params![user_str])?;
        let mut ids = Vec::new();
        while let Some(row) = rows.next()? {
          ids.push(parse_uuid(row.get::<_, String>(0)?));
        }
        Ok(ids)
      })
      .await
      .map_err(|e| anyhow::anyhow!("{}", e))
  }

  // ===========================================================================
  // Newsletter
  // ===========================================================================

  async fn subscribe_newsletter(&self, email: &str) -> Result<bool, anyhow::Error> {
    let email = email.to_string();
    let now_str = Utc::now().to_rfc3339();
    let changed = self
      .conn
      .call(move |conn| {
        conn
          .execute(
            "INSERT INTO newsletter_subscribers (email, subscribed_at) VALUES (?1, ?2)
             ON CONFLICT(email) DO NOTHING",
            params![email, now_str],
          )
          .map_err(|e| e.into())
      })
      .await?;
    Ok(changed > 0)
  }
}

#[inline]
fn parse_uuid(s: String) -> Uuid {
  s.parse().unwrap_or_default()
}

#[inline]
fn parse_ts(s: &str) -> DateTime<Utc> {
  DateTime::parse_from_rfc3339(s)
    .map(|d| d.with_timezone(&Utc))
    .unwrap_or_else(|_| Utc::now())
}

fn row_to_user(row: &rusqlite::Row) -> Result<StoreUser, rusqlite::Error> {
  Ok(StoreUser {
    id: parse_uuid(row.get::<_, String>(0)?),
    email: row.get(1)?,
    display_name: row.get(2)?,
    role: row.get::<_, String>(3)?.parse().unwrap_or(Role::Customer),
    email_verified: row.get::<_, i64>(4)? != 0,
    created_at: parse_ts(&row.get::<_, String>(5)?),
  })
}

fn row_to_product(row: &rusqlite::Row) -> Result<ProductRecord, rusqlite::Error> {
  let images_str: String = row.get(6)?;
  Ok(ProductRecord {
    id: parse_uuid(row.get::<_, String>(0)?),
    slug: row.get(1)?,
    name: row.get(2)?,
    description: row.get(3)?,
    price_cents: row.get(4)?,
    currency: row.get(5)?,
    images: serde_json::from_str(&images_str).unwrap_or_default(),
    brand_slug: row.get(7)?,
    category_slug: row.get(8)?,
    stock: row.get(9)?,
    active: row.get::<_, i64>(10)? != 0,
    created_at: parse_ts(&row.get::<_, String>(11)?),
  })
}

fn row_to_order(row: &rusqlite::Row) -> Result<OrderRecord, rusqlite::Error> {
  let lines_str: String = row.get(3)?;
  let user_id: Option<String> = row.get(1)?;
  Ok(OrderRecord {
    id: parse_uuid(row.get::<_, String>(0)?),
    user_id: user_id.map(parse_uuid),
    email: row.get(2)?,
    lines: serde_json::from_str(&lines_str).unwrap_or_default(),
    total_cents: row.get(4)?,
    currency: row.get(5)?,
    status: row
      .get::<_, String>(6)?
      .parse()
      .unwrap_or(OrderStatus::Pending),
    payment_method: row.get::<_, String>(7)?.parse().unwrap_or_default(),
    shipping_address: row.get(8)?,
    created_at: parse_ts(&row.get::<_, String>(9)?),
  })
}
