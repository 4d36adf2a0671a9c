//! Global storefront state held in Leptos signals.

#[cfg(feature = "csr")]
use leptos::*;
use serde::{Deserialize, Serialize};

#[cfg(feature = "csr")]
use crate::catalog::CartItem;
#[cfg(feature = "csr")]
use crate::site::{FooterContent, SiteConfig};

/// Signed-in user as the API reports it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
  pub id: String,
  pub email: String,
  pub display_name: String,
  pub role: String,
  pub email_verified: bool,
}

/// Auth status
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthStatus {
  pub logged_in: bool,
  pub user: Option<UserInfo>,
}

/// Toast notification
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Toast {
  pub id: u32,
  pub message: String,
  pub level: ToastLevel,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToastLevel {
  Info,
  Success,
  Warning,
  Error,
}

#[cfg(feature = "csr")]
/// Global application state with reactive signals
#[derive(Clone)]
pub struct AppState {
  /// Site configuration record, replaced wholesale on every fetch.
  pub config: RwSignal<SiteConfig>,
  /// True while the initial configuration fetch is in flight.
  pub config_loading: RwSignal<bool>,
  /// Human-readable fetch failure; the UI still renders on defaults.
  pub config_error: RwSignal<Option<String>>,
  pub footer: RwSignal<FooterContent>,
  pub auth: RwSignal<AuthStatus>,
  pub auth_loading: RwSignal<bool>,
  pub cart: RwSignal<Vec<CartItem>>,
  pub toasts: RwSignal<Vec<Toast>>,
  pub toast_counter: RwSignal<u32>,
}

#[cfg(feature = "csr")]
impl AppState {
  pub fn new() -> Self {
    Self {
      config: create_rw_signal(SiteConfig::default()),
      config_loading: create_rw_signal(true),
      config_error: create_rw_signal(None),
      footer: create_rw_signal(FooterContent::default()),
      auth: create_rw_signal(AuthStatus::default()),
      auth_loading: create_rw_signal(true),
      cart: create_rw_signal(crate::shop::apiclient::load_cart()),
      toasts: create_rw_signal(Vec::new()),
      toast_counter: create_rw_signal(0),
    }
  }

  pub fn show_toast(&self, message: &str, level: ToastLevel) {
    let id = self.toast_counter.get_untracked() + 1;
    self.toast_counter.set(id);
    self.toasts.update(|toasts| {
      toasts.push(Toast {
        id,
        message: message.to_string(),
        level,
      });
    });
  }

  pub fn remove_toast(&self, id: u32) {
    self.toasts.update(|toasts| {
      toasts.retain(|t| t.id != id);
    });
  }

  /// The viewer's role for gate evaluation: live auth state when loaded,
  /// otherwise the locally persisted marker. A forged marker only changes
  /// what the client renders; the server re-checks every privileged call.
  pub fn viewer_role(&self) -> Option<crate::site::Role> {
    let auth = self.auth.get();
    let marker = if let Some(user) = auth.user {
      Some(user.role)
    } else {
      crate::shop::apiclient::get_stored_role()
    };
    marker.and_then(|r| r.parse().ok())
  }

  pub fn is_feature_enabled(&self, name: &str) -> bool {
    self.config.with(|c| c.is_feature_enabled(name))
  }

  // Cart operations persist to local storage so the basket survives
  // reloads and guest sessions.

  pub fn add_to_cart(&self, product_id: &str, quantity: u32) {
    self.cart.update(|cart| {
      if let Some(item) = cart.iter_mut().find(|i| i.product_id == product_id) {
        item.quantity += quantity;
      } else {
        cart.push(CartItem {
          product_id: product_id.to_string(),
          quantity,
        });
      }
      crate::shop::apiclient::save_cart(cart);
    });
  }

  pub fn set_cart_quantity(&self, product_id: &str, quantity: u32) {
    self.cart.update(|cart| {
      if quantity == 0 {
        cart.retain(|i| i.product_id != product_id);
      } else if let Some(item) = cart.iter_mut().find(|i| i.product_id == product_id) {
        item.quantity = quantity;
      }
      crate::shop::apiclient::save_cart(cart);
    });
  }

  pub fn remove_from_cart(&self, product_id: &str) {
    self.set_cart_quantity(product_id, 0);
  }

  pub fn clear_cart(&self) {
    self.cart.update(|cart| {
      cart.clear();
      crate::shop::apiclient::save_cart(cart);
    });
  }

  pub fn cart_count(&self) -> u32 {
    self.cart.with(|cart| cart.iter().map(|i| i.quantity).sum())
  }
}

#[cfg(feature = "csr")]
impl Default for AppState {
  fn default() -> Self {
    Self::new()
  }
}
