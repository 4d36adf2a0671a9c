use serde::{Deserialize, Serialize};
use std::path::Path;

/// Expand environment variables in a string.
/// Supports $VAR_NAME and ${VAR_NAME} syntax.
fn expand_env_vars(input: &str) -> String {
  let mut result = input.to_string();

  // Handle ${VAR_NAME} syntax first (more specific)
  while let Some(start) = result.find("${") {
    if let Some(end) = result[start..].find('}') {
      let var_name = &result[start + 2..start + end];
      let value = std::env::var(var_name).unwrap_or_default();
      result = format!(
        "{}{}{}",
        &result[..start],
        value,
        &result[start + end + 1..]
      );
    } else {
      break;
    }
  }

  // Handle $VAR_NAME syntax (word boundary: alphanumeric + underscore)
  let mut i = 0;
  while i < result.len() {
    if result[i..].starts_with('$') && !result[i..].starts_with("${") {
      let rest = &result[i + 1..];
      let var_len = rest
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
        .count();
      if var_len > 0 {
        let var_name = &rest[..var_len];
        let value = std::env::var(var_name).unwrap_or_default();
        result = format!("{}{}{}", &result[..i], value, &rest[var_len..]);
        i += value.len();
        continue;
      }
    }
    i += 1;
  }

  result
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendType {
  Postgres,
  #[default]
  Sqlite,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
  #[serde(default)]
  pub server: ServerSection,
  #[serde(default)]
  pub backend: BackendType,
  #[serde(default)]
  pub postgres: PostgresSection,
  #[serde(default)]
  pub sqlite: SqliteSection,
  #[serde(default)]
  pub logging: LoggingSection,
  #[serde(default)]
  pub auth: AuthSection,
  #[serde(default)]
  pub oauth: OauthSection,
  #[serde(default)]
  pub mail: MailSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
  #[serde(default = "default_host")]
  pub host: String,
  #[serde(default = "default_port")]
  pub port: u16,
  /// CORS allowed origins for the CSR app when it is served elsewhere.
  /// Use ["*"] for permissive mode, or specify origins like ["http://localhost:8080"]
  #[serde(default)]
  pub cors_origins: Vec<String>,
  /// Public base URL, used when building OAuth redirect URLs.
  #[serde(default = "default_public_url")]
  pub public_url: String,
}

fn default_host() -> String {
  "0.0.0.0".into()
}
fn default_port() -> u16 {
  8080
}
fn default_public_url() -> String {
  "http://localhost:8080".into()
}

impl Default for ServerSection {
  fn default() -> Self {
    Self {
      host: default_host(),
      port: default_port(),
      cors_origins: vec!["*".to_string()], // Permissive by default for development
      public_url: default_public_url(),
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostgresSection {
  #[serde(default = "default_pg_url")]
  pub url: String,
  #[serde(default = "default_max_conn")]
  pub max_connections: usize,
}
fn default_pg_url() -> String {
  "postgres://localhost/wicker".into()
}
fn default_max_conn() -> usize {
  20
}
impl Default for PostgresSection {
  fn default() -> Self {
    Self {
      url: default_pg_url(),
      max_connections: default_max_conn(),
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqliteSection {
  #[serde(default = "default_sqlite_path")]
  pub path: String,
}
fn default_sqlite_path() -> String {
  "wicker.db".into()
}
impl Default for SqliteSection {
  fn default() -> Self {
    Self {
      path: default_sqlite_path(),
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSection {
  #[serde(default = "default_level")]
  pub level: String,
}
fn default_level() -> String {
  "info".into()
}
impl Default for LoggingSection {
  fn default() -> Self {
    Self {
      level: default_level(),
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSection {
  /// Session lifetime in days.
  #[serde(default = "default_session_ttl_days")]
  pub session_ttl_days: i64,
  /// One-time code lifetime in minutes.
  #[serde(default = "default_otp_ttl_minutes")]
  pub otp_ttl_minutes: i64,
}
fn default_session_ttl_days() -> i64 {
  30
}
fn default_otp_ttl_minutes() -> i64 {
  10
}
impl Default for AuthSection {
  fn default() -> Self {
    Self {
      session_ttl_days: default_session_ttl_days(),
      otp_ttl_minutes: default_otp_ttl_minutes(),
    }
  }
}

/// OAuth provider settings. A provider stays disabled until both client
/// credentials are configured.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OauthSection {
  #[serde(default)]
  pub google: GoogleOauthSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleOauthSection {
  #[serde(default)]
  pub client_id: String,
  #[serde(default)]
  pub client_secret: String,
  #[serde(default = "default_google_auth_url")]
  pub auth_url: String,
  #[serde(default = "default_google_token_url")]
  pub token_url: String,
  #[serde(default = "default_google_userinfo_url")]
  pub userinfo_url: String,
}

fn default_google_auth_url() -> String {
  "https://accounts.google.com/o/oauth2/v2/auth".into()
}
fn default_google_token_url() -> String {
  "https://oauth2.googleapis.com/token".into()
}
fn default_google_userinfo_url() -> String {
  "https://openidconnect.googleapis.com/v1/userinfo".into()
}

impl Default for GoogleOauthSection {
  fn default() -> Self {
    Self {
      client_id: String::new(),
      client_secret: String::new(),
      auth_url: default_google_auth_url(),
      token_url: default_google_token_url(),
      userinfo_url: default_google_userinfo_url(),
    }
  }
}

impl GoogleOauthSection {
  pub fn is_configured(&self) -> bool {
    !self.client_id.is_empty() && !self.client_secret.is_empty()
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MailMode {
  /// Write outbound mail to the log instead of delivering it.
  #[default]
  Log,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailSection {
  #[serde(default)]
  pub mode: MailMode,
  #[serde(default = "default_mail_from")]
  pub from: String,
}
fn default_mail_from() -> String {
  "shop@example.com".into()
}
impl Default for MailSection {
  fn default() -> Self {
    Self {
      mode: MailMode::default(),
      from: default_mail_from(),
    }
  }
}

impl ServerConfig {
  pub fn from_file(path: impl AsRef<Path>) -> Result<Self, anyhow::Error> {
    let content = std::fs::read_to_string(&path)?;
    let expanded = expand_env_vars(&content);
    Ok(serde_yaml::from_str(&expanded)?)
  }

  pub fn find_and_load() -> Result<Option<Self>, anyhow::Error> {
    for p in ["wicker.yaml", "wicker.yml"] {
      if Path::new(p).exists() {
        tracing::info!("Loading config from {}", p);
        return Ok(Some(Self::from_file(p)?));
      }
    }
    Ok(None)
  }

  pub fn address(&self) -> String {
    format!("{}:{}", self.server.host, self.server.port)
  }
}
