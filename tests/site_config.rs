//! Site configuration record tests - merge-over-defaults, feature flags,
//! maintenance accessors, and normalization.

use wicker::site::config::{PaymentMethod, SiteConfig};
use wicker::site::{DEFAULT_MAINTENANCE_MESSAGE, KNOWN_FEATURES};

// =============================================================================
// Merge over defaults
// =============================================================================

#[test]
fn test_empty_record_is_all_defaults() {
  let config: SiteConfig = serde_json::from_str("{}").unwrap();
  assert_eq!(config, SiteConfig::default());
  assert_eq!(config.site_name, "Wicker");
  assert_eq!(config.colors.brand.primary, "#2563EB");
  assert!(!config.maintenance_mode);
  assert_eq!(config.payment.method, PaymentMethod::Card);
}

#[test]
fn test_partial_record_merges_over_defaults() {
  let config: SiteConfig = serde_json::from_str(
    r##"{
      "site_name": "Corner Shop",
      "colors": {"brand": {"primary": "#112233"}},
      "maintenance_mode": true
    }"##,
  )
  .unwrap();
  assert_eq!(config.site_name, "Corner Shop");
  assert_eq!(config.colors.brand.primary, "#112233");
  // Untouched siblings keep their defaults.
  assert_eq!(config.colors.brand.secondary, "#7C3AED");
  assert_eq!(config.colors.status.error, "#DC2626");
  assert_eq!(config.tagline, SiteConfig::default().tagline);
  assert!(config.maintenance_mode);
}

#[test]
fn test_record_round_trips_wholesale() {
  let mut config = SiteConfig::default().normalized();
  config.colors.nav.link = "#AABBCC".into();
  let json = serde_json::to_string(&config).unwrap();
  let back: SiteConfig = serde_json::from_str(&json).unwrap();
  assert_eq!(back, config);
}

// =============================================================================
// Normalization
// =============================================================================

#[test]
fn test_normalization_repairs_malformed_colors() {
  let config: SiteConfig = serde_json::from_str::<SiteConfig>(
    r##"{"colors": {"brand": {"primary": "blue"}, "text": {"body": "#12"}}}"##,
  )
  .unwrap()
  .normalized();
  assert_eq!(config.colors.brand.primary, "#2563EB");
  assert_eq!(config.colors.text.body, "#374151");
}

#[test]
fn test_normalization_keeps_valid_colors() {
  let config: SiteConfig =
    serde_json::from_str::<SiteConfig>(r##"{"colors": {"brand": {"primary": "#abcdef"}}}"##)
      .unwrap()
      .normalized();
  assert_eq!(config.colors.brand.primary, "#abcdef");
}

#[test]
fn test_normalization_fills_every_known_feature() {
  let config = SiteConfig::default().normalized();
  let flags = config.features.as_ref().expect("flags filled");
  assert_eq!(flags.len(), KNOWN_FEATURES.len());
  for name in KNOWN_FEATURES {
    assert_eq!(flags.get(*name), Some(&true));
  }
}

#[test]
fn test_normalization_replaces_empty_gradient() {
  let config: SiteConfig = serde_json::from_str::<SiteConfig>(r#"{"gradients": {"hero": "  "}}"#)
    .unwrap()
    .normalized();
  assert!(config.gradients.hero.starts_with("linear-gradient"));
}

// =============================================================================
// Feature flags
// =============================================================================

#[test]
fn test_feature_enabled_when_map_absent() {
  let config: SiteConfig = serde_json::from_str("{}").unwrap();
  assert!(config.features.is_none());
  assert!(config.is_feature_enabled("wishlist"));
  assert!(config.is_feature_enabled("reviews"));
}

#[test]
fn test_feature_configured_value_wins() {
  let config: SiteConfig =
    serde_json::from_str(r#"{"features": {"wishlist": false, "newsletter": true}}"#).unwrap();
  assert!(!config.is_feature_enabled("wishlist"));
  assert!(config.is_feature_enabled("newsletter"));
  // Names the record does not mention stay enabled.
  assert!(config.is_feature_enabled("guest_checkout"));
}

#[test]
fn test_unknown_feature_defaults_to_enabled() {
  let config: SiteConfig = serde_json::from_str(r#"{"features": {"wishlist": false}}"#).unwrap();
  assert!(config.is_feature_enabled("gift_wrap"));
}

// =============================================================================
// Maintenance accessors
// =============================================================================

#[test]
fn test_maintenance_absent_means_off() {
  let config: SiteConfig = serde_json::from_str("{}").unwrap();
  assert!(!config.is_maintenance_mode());
}

#[test]
fn test_maintenance_message_fallback() {
  let config: SiteConfig = serde_json::from_str(r#"{"maintenance_mode": true}"#).unwrap();
  assert_eq!(config.maintenance_message(), DEFAULT_MAINTENANCE_MESSAGE);

  let config: SiteConfig = serde_json::from_str(
    r#"{"maintenance_mode": true, "maintenance_message": "Back tomorrow"}"#,
  )
  .unwrap();
  assert_eq!(config.maintenance_message(), "Back tomorrow");
}

// =============================================================================
// Payment
// =============================================================================

#[test]
fn test_payment_method_wire_format() {
  let config: SiteConfig = serde_json::from_str(
    r#"{"payment": {"method": "mobile_wallet", "wallet_provider": "bKash"}}"#,
  )
  .unwrap();
  assert_eq!(config.payment.method, PaymentMethod::MobileWallet);
  assert_eq!(config.payment.wallet_provider.as_deref(), Some("bKash"));
  assert!(config.payment.cod_phone.is_none());
}
