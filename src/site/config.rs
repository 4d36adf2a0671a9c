use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::theme::hex_to_rgb;

/// Feature names the storefront knows about. Flags missing from a stored
/// record are treated as enabled.
pub const KNOWN_FEATURES: &[&str] = &[
  "wishlist",
  "reviews",
  "newsletter",
  "guest_checkout",
  "social_login",
  "dark_mode",
];

/// Fallback shown when maintenance mode is on but no message is configured.
pub const DEFAULT_MAINTENANCE_MESSAGE: &str =
  "We are performing scheduled maintenance. Please check back soon.";

/// Site-wide configuration record.
///
/// The record is replaced wholesale on every fetch or admin save, never
/// patched field-by-field. Deserializing merges the stored document over
/// the defaults below; `normalized()` additionally repairs malformed color
/// strings and fills the known feature flags, so consumers read plain
/// fields without fallback expressions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
  #[serde(default = "default_site_name")]
  pub site_name: String,
  #[serde(default = "default_tagline")]
  pub tagline: String,
  #[serde(default)]
  pub contact: ContactInfo,
  #[serde(default)]
  pub colors: ColorScheme,
  #[serde(default)]
  pub gradients: Gradients,
  /// Feature toggles; `None` means the record predates the flag system.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub features: Option<BTreeMap<String, bool>>,
  #[serde(default)]
  pub maintenance_mode: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub maintenance_message: Option<String>,
  #[serde(default)]
  pub payment: PaymentSettings,
}

fn default_site_name() -> String {
  "Wicker".into()
}
fn default_tagline() -> String {
  "Everyday goods, delivered".into()
}

impl Default for SiteConfig {
  fn default() -> Self {
    Self {
      site_name: default_site_name(),
      tagline: default_tagline(),
      contact: ContactInfo::default(),
      colors: ColorScheme::default(),
      gradients: Gradients::default(),
      features: None,
      maintenance_mode: false,
      maintenance_message: None,
      payment: PaymentSettings::default(),
    }
  }
}

impl SiteConfig {
  /// One-shot normalization, run immediately after fetch/deserialize.
  /// Replaces malformed color strings with their defaults and fills the
  /// known feature flags so later reads never need fallbacks.
  pub fn normalized(mut self) -> Self {
    self.colors = self.colors.normalized();
    self.gradients = self.gradients.normalized();
    let mut flags = self.features.take().unwrap_or_default();
    for name in KNOWN_FEATURES {
      flags.entry((*name).to_string()).or_insert(true);
    }
    self.features = Some(flags);
    if let Some(msg) = &self.maintenance_message {
      if msg.trim().is_empty() {
        self.maintenance_message = None;
      }
    }
    self
  }

  /// A configured flag wins; unknown or missing flags are enabled.
  pub fn is_feature_enabled(&self, name: &str) -> bool {
    match &self.features {
      Some(flags) => flags.get(name).copied().unwrap_or(true),
      None => true,
    }
  }

  pub fn is_maintenance_mode(&self) -> bool {
    self.maintenance_mode
  }

  pub fn maintenance_message(&self) -> &str {
    self
      .maintenance_message
      .as_deref()
      .unwrap_or(DEFAULT_MAINTENANCE_MESSAGE)
  }
}

/// Contact and social details shown in the header/footer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
  #[serde(default)]
  pub email: String,
  #[serde(default)]
  pub phone: String,
  #[serde(default)]
  pub address: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub facebook: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub instagram: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub twitter: Option<String>,
}

// =============================================================================
// Colors
// =============================================================================

/// All themable colors, grouped the way the admin theme editor presents
/// them. Every field is a `#RRGGBB` string; `normalized()` repairs any
/// value that does not parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorScheme {
  #[serde(default)]
  pub brand: BrandColors,
  #[serde(default)]
  pub layout: LayoutColors,
  #[serde(default)]
  pub nav: NavColors,
  #[serde(default)]
  pub buttons: ButtonColors,
  #[serde(default)]
  pub text: TextColors,
  #[serde(default)]
  pub borders: BorderColors,
  #[serde(default)]
  pub product: ProductColors,
  #[serde(default)]
  pub status: StatusColors,
  #[serde(default)]
  pub form: FormColors,
  #[serde(default)]
  pub modal: ModalColors,
}

impl ColorScheme {
  fn normalized(self) -> Self {
    Self {
      brand: self.brand.normalized(),
      layout: self.layout.normalized(),
      nav: self.nav.normalized(),
      buttons: self.buttons.normalized(),
      text: self.text.normalized(),
      borders: self.borders.normalized(),
      product: self.product.normalized(),
      status: self.status.normalized(),
      form: self.form.normalized(),
      modal: self.modal.normalized(),
    }
  }
}

fn repair(value: String, default: fn() -> String) -> String {
  if hex_to_rgb(&value).is_some() {
    value
  } else {
    default()
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandColors {
  #[serde(default = "default_brand_primary")]
  pub primary: String,
  #[serde(default = "default_brand_secondary")]
  pub secondary: String,
  #[serde(default = "default_brand_accent")]
  pub accent: String,
}

pub(crate) fn default_brand_primary() -> String {
  "#2563EB".into()
}
pub(crate) fn default_brand_secondary() -> String {
  "#7C3AED".into()
}
pub(crate) fn default_brand_accent() -> String {
  "#F59E0B".into()
}

impl Default for BrandColors {
  fn default() -> Self {
    Self {
      primary: default_brand_primary(),
      secondary: default_brand_secondary(),
      accent: default_brand_accent(),
    }
  }
}

impl BrandColors {
  fn normalized(self) -> Self {
    Self {
      primary: repair(self.primary, default_brand_primary),
      secondary: repair(self.secondary, default_brand_secondary),
      accent: repair(self.accent, default_brand_accent),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutColors {
  #[serde(default = "default_layout_background")]
  pub background: String,
  #[serde(default = "default_layout_surface")]
  pub surface: String,
  #[serde(default = "default_layout_header_bg")]
  pub header_bg: String,
  #[serde(default = "default_layout_footer_bg")]
  pub footer_bg: String,
  #[serde(default = "default_layout_footer_text")]
  pub footer_text: String,
}

fn default_layout_background() -> String {
  "#F9FAFB".into()
}
fn default_layout_surface() -> String {
  "#FFFFFF".into()
}
fn default_layout_header_bg() -> String {
  "#FFFFFF".into()
}
fn default_layout_footer_bg() -> String {
  "#111827".into()
}
fn default_layout_footer_text() -> String {
  "#D1D5DB".into()
}

impl Default for LayoutColors {
  fn default() -> Self {
    Self {
      background: default_layout_background(),
      surface: default_layout_surface(),
      header_bg: default_layout_header_bg(),
      footer_bg: default_layout_footer_bg(),
      footer_text: default_layout_footer_text(),
    }
  }
}

impl LayoutColors {
  fn normalized(self) -> Self {
    Self {
      background: repair(self.background, default_layout_background),
      surface: repair(self.surface, default_layout_surface),
      header_bg: repair(self.header_bg, default_layout_header_bg),
      footer_bg: repair(self.footer_bg, default_layout_footer_bg),
      footer_text: repair(self.footer_text, default_layout_footer_text),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavColors {
  #[serde(default = "default_nav_background")]
  pub background: String,
  #[serde(default = "default_nav_link")]
  pub link: String,
  #[serde(default = "default_nav_link_active")]
  pub link_active: String,
  #[serde(default = "default_nav_link_hover")]
  pub link_hover: String,
}

fn default_nav_background() -> String {
  "#FFFFFF".into()
}
fn default_nav_link() -> String {
  "#374151".into()
}
fn default_nav_link_active() -> String {
  "#2563EB".into()
}
fn default_nav_link_hover() -> String {
  "#1D4ED8".into()
}

impl Default for NavColors {
  fn default() -> Self {
    Self {
      background: default_nav_background(),
      link: default_nav_link(),
      link_active: default_nav_link_active(),
      link_hover: default_nav_link_hover(),
    }
  }
}

impl NavColors {
  fn normalized(self) -> Self {
    Self {
      background: repair(self.background, default_nav_background),
      link: repair(self.link, default_nav_link),
      link_active: repair(self.link_active, default_nav_link_active),
      link_hover: repair(self.link_hover, default_nav_link_hover),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonColors {
  #[serde(default = "default_btn_primary_bg")]
  pub primary_bg: String,
  #[serde(default = "default_btn_primary_text")]
  pub primary_text: String,
  #[serde(default = "default_btn_primary_hover")]
  pub primary_hover: String,
  #[serde(default = "default_btn_secondary_bg")]
  pub secondary_bg: String,
  #[serde(default = "default_btn_secondary_text")]
  pub secondary_text: String,
  #[serde(default = "default_btn_secondary_hover")]
  pub secondary_hover: String,
  #[serde(default = "default_btn_disabled_bg")]
  pub disabled_bg: String,
  #[serde(default = "default_btn_disabled_text")]
  pub disabled_text: String,
}

fn default_btn_primary_bg() -> String {
  "#2563EB".into()
}
fn default_btn_primary_text() -> String {
  "#FFFFFF".into()
}
fn default_btn_primary_hover() -> String {
  "#1D4ED8".into()
}
fn default_btn_secondary_bg() -> String {
  "#E5E7EB".into()
}
fn default_btn_secondary_text() -> String {
  "#111827".into()
}
fn default_btn_secondary_hover() -> String {
  "#D1D5DB".into()
}
fn default_btn_disabled_bg() -> String {
  "#9CA3AF".into()
}
fn default_btn_disabled_text() -> String {
  "#F3F4F6".into()
}

impl Default for ButtonColors {
  fn default() -> Self {
    Self {
      primary_bg: default_btn_primary_bg(),
      primary_text: default_btn_primary_text(),
      primary_hover: default_btn_primary_hover(),
      secondary_bg: default_btn_secondary_bg(),
      secondary_text: default_btn_secondary_text(),
      secondary_hover: default_btn_secondary_hover(),
      disabled_bg: default_btn_disabled_bg(),
      disabled_text: default_btn_disabled_text(),
    }
  }
}

impl ButtonColors {
  fn normalized(self) -> Self {
    Self {
      primary_bg: repair(self.primary_bg, default_btn_primary_bg),
      primary_text: repair(self.primary_text, default_btn_primary_text),
      primary_hover: repair(self.primary_hover, default_btn_primary_hover),
      secondary_bg: repair(self.secondary_bg, default_btn_secondary_bg),
      secondary_text: repair(self.secondary_text, default_btn_secondary_text),
      secondary_hover: repair(self.secondary_hover, default_btn_secondary_hover),
      disabled_bg: repair(self.disabled_bg, default_btn_disabled_bg),
      disabled_text: repair(self.disabled_text, default_btn_disabled_text),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextColors {
  #[serde(default = "default_text_heading")]
  pub heading: String,
  #[serde(default = "default_text_body")]
  pub body: String,
  #[serde(default = "default_text_muted")]
  pub muted: String,
  #[serde(default = "default_text_inverse")]
  pub inverse: String,
  #[serde(default = "default_text_link")]
  pub link: String,
}

fn default_text_heading() -> String {
  "#111827".into()
}
fn default_text_body() -> String {
  "#374151".into()
}
fn default_text_muted() -> String {
  "#6B7280".into()
}
fn default_text_inverse() -> String {
  "#FFFFFF".into()
}
fn default_text_link() -> String {
  "#2563EB".into()
}

impl Default for TextColors {
  fn default() -> Self {
    Self {
      heading: default_text_heading(),
      body: default_text_body(),
      muted: default_text_muted(),
      inverse: default_text_inverse(),
      link: default_text_link(),
    }
  }
}

impl TextColors {
  fn normalized(self) -> Self {
    Self {
      heading: repair(self.heading, default_text_heading),
      body: repair(self.body, default_text_body),
      muted: repair(self.muted, default_text_muted),
      inverse: repair(self.inverse, default_text_inverse),
      link: repair(self.link, default_text_link),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorderColors {
  #[serde(default = "default_border_base")]
  pub base: String,
  #[serde(default = "default_border_input")]
  pub input: String,
  #[serde(default = "default_border_divider")]
  pub divider: String,
}

fn default_border_base() -> String {
  "#E5E7EB".into()
}
fn default_border_input() -> String {
  "#D1D5DB".into()
}
fn default_border_divider() -> String {
  "#F3F4F6".into()
}

impl Default for BorderColors {
  fn default() -> Self {
    Self {
      base: default_border_base(),
      input: default_border_input(),
      divider: default_border_divider(),
    }
  }
}

impl BorderColors {
  fn normalized(self) -> Self {
    Self {
      base: repair(self.base, default_border_base),
      input: repair(self.input, default_border_input),
      divider: repair(self.divider, default_border_divider),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductColors {
  #[serde(default = "default_product_card_bg")]
  pub card_bg: String,
  #[serde(default = "default_product_card_border")]
  pub card_border: String,
  #[serde(default = "default_product_price")]
  pub price: String,
  #[serde(default = "default_product_sale_badge")]
  pub sale_badge: String,
  #[serde(default = "default_product_out_of_stock")]
  pub out_of_stock: String,
}

fn default_product_card_bg() -> String {
  "#FFFFFF".into()
}
fn default_product_card_border() -> String {
  "#E5E7EB".into()
}
fn default_product_price() -> String {
  "#111827".into()
}
fn default_product_sale_badge() -> String {
  "#DC2626".into()
}
fn default_product_out_of_stock() -> String {
  "#9CA3AF".into()
}

impl Default for ProductColors {
  fn default() -> Self {
    Self {
      card_bg: default_product_card_bg(),
      card_border: default_product_card_border(),
      price: default_product_price(),
      sale_badge: default_product_sale_badge(),
      out_of_stock: default_product_out_of_stock(),
    }
  }
}

impl ProductColors {
  fn normalized(self) -> Self {
    Self {
      card_bg: repair(self.card_bg, default_product_card_bg),
      card_border: repair(self.card_border, default_product_card_border),
      price: repair(self.price, default_product_price),
      sale_badge: repair(self.sale_badge, default_product_sale_badge),
      out_of_stock: repair(self.out_of_stock, default_product_out_of_stock),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusColors {
  #[serde(default = "default_status_success")]
  pub success: String,
  #[serde(default = "default_status_warning")]
  pub warning: String,
  #[serde(default = "default_status_error")]
  pub error: String,
  #[serde(default = "default_status_info")]
  pub info: String,
}

fn default_status_success() -> String {
  "#16A34A".into()
}
fn default_status_warning() -> String {
  "#D97706".into()
}
fn default_status_error() -> String {
  "#DC2626".into()
}
fn default_status_info() -> String {
  "#0284C7".into()
}

impl Default for StatusColors {
  fn default() -> Self {
    Self {
      success: default_status_success(),
      warning: default_status_warning(),
      error: default_status_error(),
      info: default_status_info(),
    }
  }
}

impl StatusColors {
  fn normalized(self) -> Self {
    Self {
      success: repair(self.success, default_status_success),
      warning: repair(self.warning, default_status_warning),
      error: repair(self.error, default_status_error),
      info: repair(self.info, default_status_info),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormColors {
  #[serde(default = "default_form_input_bg")]
  pub input_bg: String,
  #[serde(default = "default_form_input_text")]
  pub input_text: String,
  #[serde(default = "default_form_input_focus")]
  pub input_focus: String,
  #[serde(default = "default_form_label")]
  pub label: String,
  #[serde(default = "default_form_placeholder")]
  pub placeholder: String,
}

fn default_form_input_bg() -> String {
  "#FFFFFF".into()
}
fn default_form_input_text() -> String {
  "#111827".into()
}
fn default_form_input_focus() -> String {
  "#2563EB".into()
}
fn default_form_label() -> String {
  "#374151".into()
}
fn default_form_placeholder() -> String {
  "#9CA3AF".into()
}

impl Default for FormColors {
  fn default() -> Self {
    Self {
      input_bg: default_form_input_bg(),
      input_text: default_form_input_text(),
      input_focus: default_form_input_focus(),
      label: default_form_label(),
      placeholder: default_form_placeholder(),
    }
  }
}

impl FormColors {
  fn normalized(self) -> Self {
    Self {
      input_bg: repair(self.input_bg, default_form_input_bg),
      input_text: repair(self.input_text, default_form_input_text),
      input_focus: repair(self.input_focus, default_form_input_focus),
      label: repair(self.label, default_form_label),
      placeholder: repair(self.placeholder, default_form_placeholder),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModalColors {
  #[serde(default = "default_modal_background")]
  pub background: String,
  #[serde(default = "default_modal_overlay")]
  pub overlay: String,
  #[serde(default = "default_modal_border")]
  pub border: String,
}

fn default_modal_background() -> String {
  "#FFFFFF".into()
}
fn default_modal_overlay() -> String {
  "#111827".into()
}
fn default_modal_border() -> String {
  "#E5E7EB".into()
}

impl Default for ModalColors {
  fn default() -> Self {
    Self {
      background: default_modal_background(),
      overlay: default_modal_overlay(),
      border: default_modal_border(),
    }
  }
}

impl ModalColors {
  fn normalized(self) -> Self {
    Self {
      background: repair(self.background, default_modal_background),
      overlay: repair(self.overlay, default_modal_overlay),
      border: repair(self.border, default_modal_border),
    }
  }
}

// =============================================================================
// Gradients
// =============================================================================

/// Named CSS gradient strings, passed through to style variables verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gradients {
  #[serde(default = "default_gradient_hero")]
  pub hero: String,
  #[serde(default = "default_gradient_header")]
  pub header: String,
  #[serde(default = "default_gradient_button")]
  pub button: String,
  #[serde(default = "default_gradient_card")]
  pub card: String,
  #[serde(default = "default_gradient_banner")]
  pub banner: String,
  #[serde(default = "default_gradient_footer")]
  pub footer: String,
}

fn default_gradient_hero() -> String {
  "linear-gradient(135deg, #2563EB 0%, #7C3AED 100%)".into()
}
fn default_gradient_header() -> String {
  "linear-gradient(90deg, #FFFFFF 0%, #F9FAFB 100%)".into()
}
fn default_gradient_button() -> String {
  "linear-gradient(90deg, #2563EB 0%, #1D4ED8 100%)".into()
}
fn default_gradient_card() -> String {
  "linear-gradient(180deg, #FFFFFF 0%, #F9FAFB 100%)".into()
}
fn default_gradient_banner() -> String {
  "linear-gradient(90deg, #F59E0B 0%, #DC2626 100%)".into()
}
fn default_gradient_footer() -> String {
  "linear-gradient(180deg, #111827 0%, #030712 100%)".into()
}

impl Default for Gradients {
  fn default() -> Self {
    Self {
      hero: default_gradient_hero(),
      header: default_gradient_header(),
      button: default_gradient_button(),
      card: default_gradient_card(),
      banner: default_gradient_banner(),
      footer: default_gradient_footer(),
    }
  }
}

impl Gradients {
  fn normalized(self) -> Self {
    // Gradients are free-form CSS; only empty strings are repaired.
    fn keep(value: String, default: fn() -> String) -> String {
      if value.trim().is_empty() {
        default()
      } else {
        value
      }
    }
    Self {
      hero: keep(self.hero, default_gradient_hero),
      header: keep(self.header, default_gradient_header),
      button: keep(self.button, default_gradient_button),
      card: keep(self.card, default_gradient_card),
      banner: keep(self.banner, default_gradient_banner),
      footer: keep(self.footer, default_gradient_footer),
    }
  }
}

// =============================================================================
// Payment
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
  #[default]
  Card,
  CashOnDelivery,
  MobileWallet,
}

impl std::fmt::Display for PaymentMethod {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let s = match self {
      PaymentMethod::Card => "card",
      PaymentMethod::CashOnDelivery => "cash_on_delivery",
      PaymentMethod::MobileWallet => "mobile_wallet",
    };
    write!(f, "{}", s)
  }
}

impl std::str::FromStr for PaymentMethod {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "card" => Ok(PaymentMethod::Card),
      "cash_on_delivery" => Ok(PaymentMethod::CashOnDelivery),
      "mobile_wallet" => Ok(PaymentMethod::MobileWallet),
      other => Err(format!("unknown payment method: {}", other)),
    }
  }
}

/// Checkout payment selector plus the contact handles shown per method.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentSettings {
  #[serde(default)]
  pub method: PaymentMethod,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub card_support_email: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub cod_phone: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub wallet_provider: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub wallet_number: Option<String>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_document_yields_defaults() {
    let config: SiteConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, SiteConfig::default());
    assert_eq!(config.colors.brand.primary, "#2563EB");
    assert!(!config.maintenance_mode);
  }

  #[test]
  fn partial_section_merges_over_defaults() {
    let config: SiteConfig =
      serde_json::from_str(r##"{"colors":{"brand":{"primary":"#FF0000"}}}"##).unwrap();
    assert_eq!(config.colors.brand.primary, "#FF0000");
    assert_eq!(config.colors.brand.secondary, default_brand_secondary());
    assert_eq!(config.colors.layout.background, "#F9FAFB");
  }

  #[test]
  fn normalization_repairs_malformed_colors() {
    let config: SiteConfig =
      serde_json::from_str::<SiteConfig>(r##"{"colors":{"brand":{"primary":"not-a-color"}}}"##)
        .unwrap()
        .normalized();
    assert_eq!(config.colors.brand.primary, default_brand_primary());
  }

  #[test]
  fn feature_flags_default_to_enabled() {
    let config = SiteConfig::default();
    assert!(config.features.is_none());
    assert!(config.is_feature_enabled("wishlist"));

    let config: SiteConfig =
      serde_json::from_str(r#"{"features":{"wishlist":false}}"#).unwrap();
    assert!(!config.is_feature_enabled("wishlist"));
    assert!(config.is_feature_enabled("reviews"));
  }

  #[test]
  fn normalization_fills_known_flags() {
    let config = SiteConfig::default().normalized();
    let flags = config.features.as_ref().unwrap();
    for name in KNOWN_FEATURES {
      assert_eq!(flags.get(*name), Some(&true), "{name} should be filled");
    }
  }

  #[test]
  fn maintenance_accessors() {
    let config: SiteConfig = serde_json::from_str("{}").unwrap();
    assert!(!config.is_maintenance_mode());
    assert_eq!(config.maintenance_message(), DEFAULT_MAINTENANCE_MESSAGE);

    let config: SiteConfig = serde_json::from_str(
      r#"{"maintenance_mode":true,"maintenance_message":"Back at noon"}"#,
    )
    .unwrap();
    assert!(config.is_maintenance_mode());
    assert_eq!(config.maintenance_message(), "Back at noon");
  }

  #[test]
  fn blank_maintenance_message_normalizes_away() {
    let config: SiteConfig =
      serde_json::from_str::<SiteConfig>(r#"{"maintenance_mode":true,"maintenance_message":"  "}"#)
        .unwrap()
        .normalized();
    assert_eq!(config.maintenance_message(), DEFAULT_MAINTENANCE_MESSAGE);
  }

  #[test]
  fn payment_method_serializes_snake_case() {
    let settings = PaymentSettings {
      method: PaymentMethod::CashOnDelivery,
      ..Default::default()
    };
    let json = serde_json::to_string(&settings).unwrap();
    assert!(json.contains("\"cash_on_delivery\""));
  }

  #[test]
  fn record_round_trips() {
    let config = SiteConfig::default().normalized();
    let json = serde_json::to_string(&config).unwrap();
    let back: SiteConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(config, back);
  }
}
