//! Theme projection tests - variable coverage, RGB triples, fallbacks,
//! and the injected stylesheet text.

use wicker::site::SiteConfig;
use wicker::theme::{hex_to_rgb, project, render_stylesheet};

fn var(vars: &[(&'static str, String)], name: &str) -> String {
  vars
    .iter()
    .find(|(n, _)| *n == name)
    .map(|(_, v)| v.clone())
    .unwrap_or_else(|| panic!("{name} missing from projection"))
}

// =============================================================================
// Hex parsing
// =============================================================================

#[test]
fn test_hex_parse_exact_decomposition() {
  assert_eq!(hex_to_rgb("#2563EB"), Some((37, 99, 235)));
  assert_eq!(hex_to_rgb("#7C3AED"), Some((124, 58, 237)));
  assert_eq!(hex_to_rgb("#f59e0b"), Some((245, 158, 11)));
}

#[test]
fn test_hex_parse_rejects_malformed() {
  for bad in ["", "#", "#FFF", "#GGGGGG", "2563EB", "#2563EB7F", "# 2563E"] {
    assert_eq!(hex_to_rgb(bad), None, "{bad:?}");
  }
}

// =============================================================================
// Projection
// =============================================================================

#[test]
fn test_every_variable_present_and_nonempty() {
  let vars = project(&SiteConfig::default());
  assert_eq!(vars.len(), 54);
  for (name, value) in &vars {
    assert!(name.starts_with("--"), "{name} is not a custom property");
    assert!(!value.is_empty(), "{name} projected empty");
  }
}

#[test]
fn test_color_passthrough_and_rgb_triples() {
  let mut config = SiteConfig::default();
  config.colors.brand.primary = "#2563EB".into();
  config.colors.brand.secondary = "#010203".into();
  let vars = project(&config);

  assert_eq!(var(&vars, "--brand-primary"), "#2563EB");
  assert_eq!(var(&vars, "--brand-primary-rgb"), "37, 99, 235");
  assert_eq!(var(&vars, "--brand-secondary-rgb"), "1, 2, 3");
}

#[test]
fn test_malformed_color_degrades_to_fixed_triple() {
  let mut config = SiteConfig::default();
  config.colors.brand.accent = "rebeccapurple".into();
  let vars = project(&config);
  // The raw value passes through; the derived triple falls back to the
  // default accent decomposition instead of being empty.
  assert_eq!(var(&vars, "--brand-accent"), "rebeccapurple");
  assert_eq!(var(&vars, "--brand-accent-rgb"), "245, 158, 11");
}

#[test]
fn test_gradient_passthrough() {
  let mut config = SiteConfig::default();
  config.gradients.hero = "radial-gradient(circle, #000 0%, #fff 100%)".into();
  let vars = project(&config);
  assert_eq!(
    var(&vars, "--gradient-hero"),
    "radial-gradient(circle, #000 0%, #fff 100%)"
  );
}

#[test]
fn test_projection_is_deterministic() {
  let config = SiteConfig::default();
  assert_eq!(project(&config), project(&config));
}

// =============================================================================
// Stylesheet rendering
// =============================================================================

#[test]
fn test_stylesheet_contains_every_variable() {
  let vars = project(&SiteConfig::default());
  let css = render_stylesheet(&vars);
  assert!(css.starts_with(":root {"));
  for (name, value) in &vars {
    assert!(
      css.contains(&format!("{}: {};", name, value)),
      "{name} missing from stylesheet"
    );
  }
}
