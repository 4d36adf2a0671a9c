//! Theme projection: turns a [`SiteConfig`] into named CSS custom
//! properties. The projection is a pure function; applying it to the
//! document lives in the CSR layer.

mod stylesheet;

pub use stylesheet::render_stylesheet;

use crate::site::config::{
  default_brand_accent, default_brand_primary, default_brand_secondary, SiteConfig,
};

/// A projected style variable: `("--brand-primary", "#2563EB")`.
pub type StyleVar = (&'static str, String);

/// Parse a strict `#RRGGBB` color into its decimal channel triple.
/// Anything else (shorthand, alpha, missing `#`, stray characters) is None.
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
  let digits = hex.strip_prefix('#')?;
  if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
    return None;
  }
  let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
  let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
  let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
  Some((r, g, b))
}

/// `"37, 99, 235"` for `#2563EB`; the per-field default triple when the
/// stored value does not parse. Used for translucent overlays
/// (`rgba(var(--brand-primary-rgb), 0.1)`).
fn rgb_triple(value: &str, default: fn() -> String) -> String {
  let (r, g, b) = hex_to_rgb(value)
    .or_else(|| hex_to_rgb(&default()))
    .unwrap_or((0, 0, 0));
  format!("{}, {}, {}", r, g, b)
}

/// Project every themable field onto the flat variable namespace.
/// Deterministic and total: malformed input degrades to defaults upstream
/// (normalization) or to the fallback triple here, never to a panic.
pub fn project(config: &SiteConfig) -> Vec<StyleVar> {
  let c = &config.colors;
  let g = &config.gradients;
  vec![
    ("--brand-primary", c.brand.primary.clone()),
    ("--brand-secondary", c.brand.secondary.clone()),
    ("--brand-accent", c.brand.accent.clone()),
    (
      "--brand-primary-rgb",
      rgb_triple(&c.brand.primary, default_brand_primary),
    ),
    (
      "--brand-secondary-rgb",
      rgb_triple(&c.brand.secondary, default_brand_secondary),
    ),
    (
      "--brand-accent-rgb",
      rgb_triple(&c.brand.accent, default_brand_accent),
    ),
    ("--layout-background", c.layout.background.clone()),
    ("--layout-surface", c.layout.surface.clone()),
    ("--layout-header-bg", c.layout.header_bg.clone()),
    ("--layout-footer-bg", c.layout.footer_bg.clone()),
    ("--layout-footer-text", c.layout.footer_text.clone()),
    ("--nav-background", c.nav.background.clone()),
    ("--nav-link", c.nav.link.clone()),
    ("--nav-link-active", c.nav.link_active.clone()),
    ("--nav-link-hover", c.nav.link_hover.clone()),
    ("--btn-primary-bg", c.buttons.primary_bg.clone()),
    ("--btn-primary-text", c.buttons.primary_text.clone()),
    ("--btn-primary-hover", c.buttons.primary_hover.clone()),
    ("--btn-secondary-bg", c.buttons.secondary_bg.clone()),
    ("--btn-secondary-text", c.buttons.secondary_text.clone()),
    ("--btn-secondary-hover", c.buttons.secondary_hover.clone()),
    ("--btn-disabled-bg", c.buttons.disabled_bg.clone()),
    ("--btn-disabled-text", c.buttons.disabled_text.clone()),
    ("--text-heading", c.text.heading.clone()),
    ("--text-body", c.text.body.clone()),
    ("--text-muted", c.text.muted.clone()),
    ("--text-inverse", c.text.inverse.clone()),
    ("--text-link", c.text.link.clone()),
    ("--border-base", c.borders.base.clone()),
    ("--border-input", c.borders.input.clone()),
    ("--border-divider", c.borders.divider.clone()),
    ("--product-card-bg", c.product.card_bg.clone()),
    ("--product-card-border", c.product.card_border.clone()),
    ("--product-price", c.product.price.clone()),
    ("--product-sale-badge", c.product.sale_badge.clone()),
    ("--product-out-of-stock", c.product.out_of_stock.clone()),
    ("--status-success", c.status.success.clone()),
    ("--status-warning", c.status.warning.clone()),
    ("--status-error", c.status.error.clone()),
    ("--status-info", c.status.info.clone()),
    ("--form-input-bg", c.form.input_bg.clone()),
    ("--form-input-text", c.form.input_text.clone()),
    ("--form-input-focus", c.form.input_focus.clone()),
    ("--form-label", c.form.label.clone()),
    ("--form-placeholder", c.form.placeholder.clone()),
    ("--modal-background", c.modal.background.clone()),
    ("--modal-overlay", c.modal.overlay.clone()),
    ("--modal-border", c.modal.border.clone()),
    ("--gradient-hero", g.hero.clone()),
    ("--gradient-header", g.header.clone()),
    ("--gradient-button", g.button.clone()),
    ("--gradient-card", g.card.clone()),
    ("--gradient-banner", g.banner.clone()),
    ("--gradient-footer", g.footer.clone()),
  ]
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_six_digit_hex() {
    assert_eq!(hex_to_rgb("#2563EB"), Some((37, 99, 235)));
    assert_eq!(hex_to_rgb("#000000"), Some((0, 0, 0)));
    assert_eq!(hex_to_rgb("#ffffff"), Some((255, 255, 255)));
  }

  #[test]
  fn rejects_everything_else() {
    for bad in ["2563EB", "#25E", "#2563EB00", "#25 3EB", "#25G3EB", "", "#"] {
      assert_eq!(hex_to_rgb(bad), None, "{bad:?} should not parse");
    }
  }

  #[test]
  fn projection_emits_every_variable() {
    let config = SiteConfig::default();
    let vars = project(&config);
    assert_eq!(vars.len(), 54);
    let names: Vec<&str> = vars.iter().map(|(n, _)| *n).collect();
    assert!(names.contains(&"--brand-primary"));
    assert!(names.contains(&"--gradient-footer"));
    // No variable may be empty, even for a pristine default record.
    for (name, value) in &vars {
      assert!(!value.is_empty(), "{name} projected empty");
    }
  }

  #[test]
  fn brand_triples_match_decimal_decomposition() {
    let config = SiteConfig::default();
    let vars = project(&config);
    let triple = vars
      .iter()
      .find(|(n, _)| *n == "--brand-primary-rgb")
      .map(|(_, v)| v.clone())
      .unwrap();
    assert_eq!(triple, "37, 99, 235");
  }

  #[test]
  fn malformed_brand_color_falls_back_to_default_triple() {
    let mut config = SiteConfig::default();
    config.colors.brand.primary = "tomato".into();
    let vars = project(&config);
    let triple = vars
      .iter()
      .find(|(n, _)| *n == "--brand-primary-rgb")
      .map(|(_, v)| v.clone())
      .unwrap();
    // The fixed fallback triple for the primary brand color.
    assert_eq!(triple, "37, 99, 235");
  }
}
