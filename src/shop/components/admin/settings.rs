//! Site settings (super admin): branding, theme colors, gradients,
//! feature flags, payment, and the maintenance switch. Everything edits
//! one draft of the configuration record; Save replaces the record
//! wholesale and adopts whatever the server persisted.

use leptos::*;

use super::super::RequireAdmin;
use crate::shop::apiclient;
use crate::shop::state::{AppState, ToastLevel};
use crate::site::config::PaymentMethod;
use crate::site::{SiteConfig, KNOWN_FEATURES};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tab {
  General,
  Theme,
  Features,
  Payment,
  Maintenance,
}

/// One themable color: section, label, and accessors into the record.
/// Keeping this as data lets the editor enumerate the whole palette
/// without a signal per field.
struct ColorField {
  section: &'static str,
  label: &'static str,
  get: fn(&SiteConfig) -> String,
  set: fn(&mut SiteConfig, String),
}

const COLOR_SECTIONS: &[&str] = &[
  "Brand", "Layout", "Navigation", "Buttons", "Text", "Borders", "Product", "Status", "Forms",
  "Modals",
];

const COLOR_FIELDS: &[ColorField] = &[
  ColorField { section: "Brand", label: "Primary", get: |c| c.colors.brand.primary.clone(), set: |c, v| c.colors.brand.primary = v },
  ColorField { section: "Brand", label: "Secondary", get: |c| c.colors.brand.secondary.clone(), set: |c, v| c.colors.brand.secondary = v },
  ColorField { section: "Brand", label: "Accent", get: |c| c.colors.brand.accent.clone(), set: |c, v| c.colors.brand.accent = v },
  ColorField { section: "Layout", label: "Background", get: |c| c.colors.layout.background.clone(), set: |c, v| c.colors.layout.background = v },
  ColorField { section: "Layout", label: "Surface", get: |c| c.colors.layout.surface.clone(), set: |c, v| c.colors.layout.surface = v },
  ColorField { section: "Layout", label: "Header", get: |c| c.colors.layout.header_bg.clone(), set: |c, v| c.colors.layout.header_bg = v },
  ColorField { section: "Layout", label: "Footer", get: |c| c.colors.layout.footer_bg.clone(), set: |c, v| c.colors.layout.footer_bg = v },
  ColorField { section: "Layout", label: "Footer text", get: |c| c.colors.layout.footer_text.clone(), set: |c, v| c.colors.layout.footer_text = v },
  ColorField { section: "Navigation", label: "Background", get: |c| c.colors.nav.background.clone(), set: |c, v| c.colors.nav.background = v },
  ColorField { section: "Navigation", label: "Link", get: |c| c.colors.nav.link.clone(), set: |c, v| c.colors.nav.link = v },
  ColorField { section: "Navigation", label: "Active link", get: |c| c.colors.nav.link_active.clone(), set: |c, v| c.colors.nav.link_active = v },
  ColorField { section: "Navigation", label: "Hovered link", get: |c| c.colors.nav.link_hover.clone(), set: |c, v| c.colors.nav.link_hover = v },
  ColorField { section: "Buttons", label: "Primary", get: |c| c.colors.buttons.primary_bg.clone(), set: |c, v| c.colors.buttons.primary_bg = v },
  ColorField { section: "Buttons", label: "Primary text", get: |c| c.colors.buttons.primary_text.clone(), set: |c, v| c.colors.buttons.primary_text = v },
  ColorField { section: "Buttons", label: "Primary hover", get: |c| c.colors.buttons.primary_hover.clone(), set: |c, v| c.colors.buttons.primary_hover = v },
  ColorField { section: "Buttons", label: "Secondary", get: |c| c.colors.buttons.secondary_bg.clone(), set: |c, v| c.colors.buttons.secondary_bg = v },
  ColorField { section: "Buttons", label: "Secondary text", get: |c| c.colors.buttons.secondary_text.clone(), set: |c, v| c.colors.buttons.secondary_text = v },
  ColorField { section: "Buttons", label: "Secondary hover", get: |c| c.colors.buttons.secondary_hover.clone(), set: |c, v| c.colors.buttons.secondary_hover = v },
  ColorField { section: "Buttons", label: "Disabled", get: |c| c.colors.buttons.disabled_bg.clone(), set: |c, v| c.colors.buttons.disabled_bg = v },
  ColorField { section: "Buttons", label: "Disabled text", get: |c| c.colors.buttons.disabled_text.clone(), set: |c, v| c.colors.buttons.disabled_text = v },
  ColorField { section: "Text", label: "Headings", get: |c| c.colors.text.heading.clone(), set: |c, v| c.colors.text.heading = v },
  ColorField { section: "Text", label: "Body", get: |c| c.colors.text.body.clone(), set: |c, v| c.colors.text.body = v },
  ColorField { section: "Text", label: "Muted", get: |c| c.colors.text.muted.clone(), set: |c, v| c.colors.text.muted = v },
  ColorField { section: "Text", label: "Inverse", get: |c| c.colors.text.inverse.clone(), set: |c, v| c.colors.text.inverse = v },
  ColorField { section: "Text", label: "Links", get: |c| c.colors.text.link.clone(), set: |c, v| c.colors.text.link = v },
  ColorField { section: "Borders", label: "Base", get: |c| c.colors.borders.base.clone(), set: |c, v| c.colors.borders.base = v },
  ColorField { section: "Borders", label: "Inputs", get: |c| c.colors.borders.input.clone(), set: |c, v| c.colors.borders.input = v },
  ColorField { section: "Borders", label: "Dividers", get: |c| c.colors.borders.divider.clone(), set: |c, v| c.colors.borders.divider = v },
  ColorField { section: "Product", label: "Card", get: |c| c.colors.product.card_bg.clone(), set: |c, v| c.colors.product.card_bg = v },
  ColorField { section: "Product", label: "Card border", get: |c| c.colors.product.card_border.clone(), set: |c, v| c.colors.product.card_border = v },
  ColorField { section: "Product", label: "Price", get: |c| c.colors.product.price.clone(), set: |c, v| c.colors.product.price = v },
  ColorField { section: "Product", label: "Sale badge", get: |c| c.colors.product.sale_badge.clone(), set: |c, v| c.colors.product.sale_badge = v },
  ColorField { section: "Product", label: "Out of stock", get: |c| c.colors.product.out_of_stock.clone(), set: |c, v| c.colors.product.out_of_stock = v },
  ColorField { section: "Status", label: "Success", get: |c| c.colors.status.success.clone(), set: |c, v| c.colors.status.success = v },
  ColorField { section: "Status", label: "Warning", get: |c| c.colors.status.warning.clone(), set: |c, v| c.colors.status.warning = v },
  ColorField { section: "Status", label: "Error", get: |c| c.colors.status.error.clone(), set: |c, v| c.colors.status.error = v },
  ColorField { section: "Status", label: "Info", get: |c| c.colors.status.info.clone(), set: |c, v| c.colors.status.info = v },
  ColorField { section: "Forms", label: "Input", get: |c| c.colors.form.input_bg.clone(), set: |c, v| c.colors.form.input_bg = v },
  ColorField { section: "Forms", label: "Input text", get: |c| c.colors.form.input_text.clone(), set: |c, v| c.colors.form.input_text = v },
  ColorField { section: "Forms", label: "Focus ring", get: |c| c.colors.form.input_focus.clone(), set: |c, v| c.colors.form.input_focus = v },
  ColorField { section: "Forms", label: "Labels", get: |c| c.colors.form.label.clone(), set: |c, v| c.colors.form.label = v },
  ColorField { section: "Forms", label: "Placeholders", get: |c| c.colors.form.placeholder.clone(), set: |c, v| c.colors.form.placeholder = v },
  ColorField { section: "Modals", label: "Background", get: |c| c.colors.modal.background.clone(), set: |c, v| c.colors.modal.background = v },
  ColorField { section: "Modals", label: "Overlay", get: |c| c.colors.modal.overlay.clone(), set: |c, v| c.colors.modal.overlay = v },
  ColorField { section: "Modals", label: "Border", get: |c| c.colors.modal.border.clone(), set: |c, v| c.colors.modal.border = v },
];

struct GradientField {
  label: &'static str,
  get: fn(&SiteConfig) -> String,
  set: fn(&mut SiteConfig, String),
}

const GRADIENT_FIELDS: &[GradientField] = &[
  GradientField { label: "Hero", get: |c| c.gradients.hero.clone(), set: |c, v| c.gradients.hero = v },
  GradientField { label: "Header", get: |c| c.gradients.header.clone(), set: |c, v| c.gradients.header = v },
  GradientField { label: "Buttons", get: |c| c.gradients.button.clone(), set: |c, v| c.gradients.button = v },
  GradientField { label: "Cards", get: |c| c.gradients.card.clone(), set: |c, v| c.gradients.card = v },
  GradientField { label: "Banner", get: |c| c.gradients.banner.clone(), set: |c, v| c.gradients.banner = v },
  GradientField { label: "Footer", get: |c| c.gradients.footer.clone(), set: |c, v| c.gradients.footer = v },
];

#[component]
pub fn AdminSettings() -> impl IntoView {
  view! {
    <RequireAdmin super_only=true>
      <SettingsInner/>
    </RequireAdmin>
  }
}

#[component]
fn SettingsInner() -> impl IntoView {
  let state = use_context::<AppState>().expect("AppState not found");
  let draft = create_rw_signal(state.config.get_untracked());
  let (tab, set_tab) = create_signal(Tab::General);
  let (saving, set_saving) = create_signal(false);

  // Adopt the record once the fetch lands (or after someone else saves).
  let config = state.config;
  create_effect(move |_| {
    draft.set(config.get());
  });

  let save_state = state.clone();
  let on_save = move |_| {
    let state = save_state.clone();
    let current = draft.get_untracked();
    set_saving.set(true);
    spawn_local(async move {
      match apiclient::update_site_config(&current).await {
        Ok(saved) => {
          // The server re-read the stored record; adopt it as-is.
          state.config.set(saved);
          state.show_toast("Settings saved", ToastLevel::Success);
        }
        Err(e) => state.show_toast(&e, ToastLevel::Error),
      }
      set_saving.set(false);
    });
  };

  let tab_button = move |target: Tab, label: &'static str| {
    view! {
      <button
        class="settings-tab"
        class:active=move || tab.get() == target
        on:click=move |_| set_tab.set(target)
      >
        {label}
      </button>
    }
  };

  view! {
    <section class="admin-page">
      <div class="page-header">
        <h2>"Site settings"</h2>
        <button class="btn btn-primary" on:click=on_save disabled=move || saving.get()>
          {move || if saving.get() { "Saving..." } else { "Save" }}
        </button>
      </div>

      <div class="settings-tabs">
        {tab_button(Tab::General, "General")}
        {tab_button(Tab::Theme, "Theme")}
        {tab_button(Tab::Features, "Features")}
        {tab_button(Tab::Payment, "Payment")}
        {tab_button(Tab::Maintenance, "Maintenance")}
      </div>

      {move || match tab.get() {
        Tab::General => view! { <GeneralTab draft=draft/> }.into_view(),
        Tab::Theme => view! { <ThemeTab draft=draft/> }.into_view(),
        Tab::Features => view! { <FeaturesTab draft=draft/> }.into_view(),
        Tab::Payment => view! { <PaymentTab draft=draft/> }.into_view(),
        Tab::Maintenance => view! { <MaintenanceTab draft=draft/> }.into_view(),
      }}
    </section>
  }
}

#[component]
fn GeneralTab(draft: RwSignal<SiteConfig>) -> impl IntoView {
  view! {
    <div class="admin-form">
      <div class="form-row">
        <div class="form-group">
          <label>"Store name"</label>
          <input
            type="text"
            class="input"
            prop:value=move || draft.with(|d| d.site_name.clone())
            on:input=move |ev| draft.update(|d| d.site_name = event_target_value(&ev))
          />
        </div>
        <div class="form-group">
          <label>"Tagline"</label>
          <input
            type="text"
            class="input"
            prop:value=move || draft.with(|d| d.tagline.clone())
            on:input=move |ev| draft.update(|d| d.tagline = event_target_value(&ev))
          />
        </div>
      </div>
      <div class="form-row">
        <div class="form-group">
          <label>"Contact email"</label>
          <input
            type="email"
            class="input"
            prop:value=move || draft.with(|d| d.contact.email.clone())
            on:input=move |ev| draft.update(|d| d.contact.email = event_target_value(&ev))
          />
        </div>
        <div class="form-group">
          <label>"Phone"</label>
          <input
            type="text"
            class="input"
            prop:value=move || draft.with(|d| d.contact.phone.clone())
            on:input=move |ev| draft.update(|d| d.contact.phone = event_target_value(&ev))
          />
        </div>
      </div>
      <div class="form-group">
        <label>"Address"</label>
        <textarea
          class="input"
          rows="2"
          prop:value=move || draft.with(|d| d.contact.address.clone())
          on:input=move |ev| draft.update(|d| d.contact.address = event_target_value(&ev))
        ></textarea>
      </div>
    </div>
  }
}

#[component]
fn ThemeTab(draft: RwSignal<SiteConfig>) -> impl IntoView {
  view! {
    <div class="theme-editor">
      {COLOR_SECTIONS
        .iter()
        .map(|section| {
          view! {
            <div class="theme-section">
              <h3>{*section}</h3>
              <div class="theme-fields">
                {COLOR_FIELDS
                  .iter()
                  .filter(|f| f.section == *section)
                  .map(|field| {
                    let get = field.get;
                    let set = field.set;
                    view! {
                      <label class="theme-field">
                        <span>{field.label}</span>
                        <input
                          type="color"
                          prop:value=move || draft.with(|d| get(d))
                          on:input=move |ev| {
                            draft.update(|d| set(d, event_target_value(&ev)))
                          }
                        />
                        <code>{move || draft.with(|d| get(d))}</code>
                      </label>
                    }
                  })
                  .collect_view()}
              </div>
            </div>
          }
        })
        .collect_view()}

      <div class="theme-section">
        <h3>"Gradients"</h3>
        {GRADIENT_FIELDS
          .iter()
          .map(|field| {
            let get = field.get;
            let set = field.set;
            view! {
              <div class="form-group">
                <label>{field.label}</label>
                <input
                  type="text"
                  class="input mono"
                  prop:value=move || draft.with(|d| get(d))
                  on:input=move |ev| draft.update(|d| set(d, event_target_value(&ev)))
                />
              </div>
            }
          })
          .collect_view()}
      </div>
    </div>
  }
}

#[component]
fn FeaturesTab(draft: RwSignal<SiteConfig>) -> impl IntoView {
  view! {
    <div class="admin-form">
      {KNOWN_FEATURES
        .iter()
        .map(|name| {
          let name = *name;
          view! {
            <div class="setting-row">
              <span class="setting-label">{name.replace('_', " ")}</span>
              <label class="toggle">
                <input
                  type="checkbox"
                  prop:checked=move || draft.with(|d| d.is_feature_enabled(name))
                  on:change=move |ev| {
                    let enabled = event_target_checked(&ev);
                    draft.update(|d| {
                      d.features
                        .get_or_insert_with(Default::default)
                        .insert(name.to_string(), enabled);
                    });
                  }
                />
                <span class="toggle-slider"></span>
              </label>
            </div>
          }
        })
        .collect_view()}
    </div>
  }
}

#[component]
fn PaymentTab(draft: RwSignal<SiteConfig>) -> impl IntoView {
  let method = move || draft.with(|d| d.payment.method);
  view! {
    <div class="admin-form">
      <div class="form-group">
        <label>"Payment method"</label>
        <select
          class="select"
          on:change=move |ev| {
            let value = event_target_value(&ev);
            draft.update(|d| d.payment.method = value.parse().unwrap_or_default());
          }
        >
          <option value="card" selected=move || method() == PaymentMethod::Card>
            "Card"
          </option>
          <option
            value="cash_on_delivery"
            selected=move || method() == PaymentMethod::CashOnDelivery
          >
            "Cash on delivery"
          </option>
          <option value="mobile_wallet" selected=move || method() == PaymentMethod::MobileWallet>
            "Mobile wallet"
          </option>
        </select>
      </div>

      <div class="form-row">
        <div class="form-group">
          <label>"Card support email"</label>
          <input
            type="email"
            class="input"
            prop:value=move || draft.with(|d| d.payment.card_support_email.clone().unwrap_or_default())
            on:input=move |ev| {
              let value = event_target_value(&ev);
              draft.update(|d| {
                d.payment.card_support_email = (!value.trim().is_empty()).then_some(value)
              });
            }
          />
        </div>
        <div class="form-group">
          <label>"Cash-on-delivery phone"</label>
          <input
            type="text"
            class="input"
            prop:value=move || draft.with(|d| d.payment.cod_phone.clone().unwrap_or_default())
            on:input=move |ev| {
              let value = event_target_value(&ev);
              draft.update(|d| d.payment.cod_phone = (!value.trim().is_empty()).then_some(value));
            }
          />
        </div>
      </div>
      <div class="form-row">
        <div class="form-group">
          <label>"Wallet provider"</label>
          <input
            type="text"
            class="input"
            prop:value=move || draft.with(|d| d.payment.wallet_provider.clone().unwrap_or_default())
            on:input=move |ev| {
              let value = event_target_value(&ev);
              draft.update(|d| {
                d.payment.wallet_provider = (!value.trim().is_empty()).then_some(value)
              });
            }
          />
        </div>
        <div class="form-group">
          <label>"Wallet number"</label>
          <input
            type="text"
            class="input"
            prop:value=move || draft.with(|d| d.payment.wallet_number.clone().unwrap_or_default())
            on:input=move |ev| {
              let value = event_target_value(&ev);
              draft.update(|d| {
                d.payment.wallet_number = (!value.trim().is_empty()).then_some(value)
              });
            }
          />
        </div>
      </div>
    </div>
  }
}

#[component]
fn MaintenanceTab(draft: RwSignal<SiteConfig>) -> impl IntoView {
  view! {
    <div class="admin-form">
      <div class="setting-row">
        <div class="setting-info">
          <span class="setting-label">"Maintenance mode"</span>
          <span class="setting-description">
            "Visitors see the notice page; super admins and the sign-in pages stay reachable."
          </span>
        </div>
        <label class="toggle">
          <input
            type="checkbox"
            prop:checked=move || draft.with(|d| d.maintenance_mode)
            on:change=move |ev| {
              let on = event_target_checked(&ev);
              draft.update(|d| d.maintenance_mode = on);
            }
          />
          <span class="toggle-slider"></span>
        </label>
      </div>
      <div class="form-group">
        <label>"Notice message"</label>
        <textarea
          class="input"
          rows="3"
          placeholder="We are performing scheduled maintenance..."
          prop:value=move || draft.with(|d| d.maintenance_message.clone().unwrap_or_default())
          on:input=move |ev| {
            let value = event_target_value(&ev);
            draft.update(|d| d.maintenance_message = (!value.trim().is_empty()).then_some(value));
          }
        ></textarea>
      </div>
    </div>
  }
}
