//! Server configuration tests - yaml parsing, defaults, and sections.

use wicker::server::{BackendType, MailMode, ServerConfig};

// =============================================================================
// Defaults
// =============================================================================

#[test]
fn test_defaults() {
  let config = ServerConfig::default();
  assert_eq!(config.server.host, "0.0.0.0");
  assert_eq!(config.server.port, 8080);
  assert_eq!(config.backend, BackendType::Sqlite);
  assert_eq!(config.sqlite.path, "wicker.db");
  assert_eq!(config.logging.level, "info");
  assert_eq!(config.auth.session_ttl_days, 30);
  assert_eq!(config.auth.otp_ttl_minutes, 10);
  assert_eq!(config.mail.mode, MailMode::Log);
  assert!(!config.oauth.google.is_configured());
  assert_eq!(config.address(), "0.0.0.0:8080");
}

// =============================================================================
// Yaml parsing
// =============================================================================

#[test]
fn test_partial_yaml_keeps_other_defaults() {
  let yaml = r#"
server:
  port: 9090
backend: postgres
"#;
  let config: ServerConfig = serde_yaml::from_str(yaml).unwrap();
  assert_eq!(config.server.port, 9090);
  assert_eq!(config.server.host, "0.0.0.0");
  assert_eq!(config.backend, BackendType::Postgres);
  assert_eq!(config.postgres.url, "postgres://localhost/wicker");
}

#[test]
fn test_auth_section_from_yaml() {
  let yaml = r#"
auth:
  session_ttl_days: 7
  otp_ttl_minutes: 5
"#;
  let config: ServerConfig = serde_yaml::from_str(yaml).unwrap();
  assert_eq!(config.auth.session_ttl_days, 7);
  assert_eq!(config.auth.otp_ttl_minutes, 5);
}

#[test]
fn test_oauth_section_from_yaml() {
  let yaml = r#"
oauth:
  google:
    client_id: abc
    client_secret: xyz
"#;
  let config: ServerConfig = serde_yaml::from_str(yaml).unwrap();
  assert!(config.oauth.google.is_configured());
  // Provider endpoints keep their well-known defaults.
  assert!(config.oauth.google.auth_url.contains("accounts.google.com"));
  assert!(config.oauth.google.token_url.contains("googleapis.com"));
}

#[test]
fn test_cors_origins_from_yaml() {
  let yaml = r#"
server:
  cors_origins:
    - "http://localhost:3000"
    - "https://shop.example.com"
"#;
  let config: ServerConfig = serde_yaml::from_str(yaml).unwrap();
  assert_eq!(config.server.cors_origins.len(), 2);
}

#[test]
fn test_config_file_with_env_expansion() {
  std::env::set_var("WICKER_TEST_PORT", "7070");
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("wicker.yaml");
  std::fs::write(&path, "server:\n  port: ${WICKER_TEST_PORT}\n").unwrap();

  let config = ServerConfig::from_file(&path).unwrap();
  assert_eq!(config.server.port, 7070);
}
