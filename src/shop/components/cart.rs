//! Cart page and checkout flow. The basket lives in local storage; the
//! server recomputes every price at order time.

use leptos::*;
use leptos_router::use_navigate;
use std::collections::HashMap;

use super::Icon;
use crate::catalog::{format_price, CartItem, Product};
use crate::shop::apiclient;
use crate::shop::state::{AppState, ToastLevel};
use crate::site::config::PaymentMethod;

/// Resolve cart lines against the live catalog so prices shown are
/// current, not whatever they were when the item was added.
async fn resolve_products(lines: &[CartItem]) -> HashMap<String, Product> {
  let mut products = HashMap::new();
  if lines.is_empty() {
    return products;
  }
  if let Ok(list) = apiclient::fetch_products(None, None, None).await {
    for product in list {
      products.insert(product.id.clone(), product);
    }
  }
  products
}

fn cart_total(lines: &[CartItem], products: &HashMap<String, Product>) -> i64 {
  lines
    .iter()
    .filter_map(|line| {
      products
        .get(&line.product_id)
        .map(|p| p.price_cents * line.quantity as i64)
    })
    .sum()
}

#[component]
pub fn CartPage() -> impl IntoView {
  let state = use_context::<AppState>().expect("AppState not found");
  let cart = state.cart;
  let (products, set_products) = create_signal(HashMap::<String, Product>::new());

  create_effect(move |_| {
    let lines = cart.get();
    spawn_local(async move {
      set_products.set(resolve_products(&lines).await);
    });
  });

  let total = move || format_price(cart_total(&cart.get(), &products.get()));

  let qty_state = state.clone();
  let remove_state = state.clone();

  view! {
    <section class="cart-page">
      <h2>"Your cart"</h2>
      <Show
        when=move || !cart.get().is_empty()
        fallback=|| {
          view! {
            <div class="empty-state">
              <p class="text-muted">"Your cart is empty."</p>
              <a class="btn btn-primary" href="/products">"Browse the shop"</a>
            </div>
          }
        }
      >
        <table class="data-table cart-table">
          <thead>
            <tr>
              <th>"Product"</th>
              <th>"Price"</th>
              <th>"Quantity"</th>
              <th>"Total"</th>
              <th></th>
            </tr>
          </thead>
          <tbody>
            <For
              each=move || cart.get()
              key=|line| line.product_id.clone()
              children=move |line| {
                let id = line.product_id.clone();
                let qty_state = qty_state.clone();
                let remove_state = remove_state.clone();
                let remove_id = id.clone();
                let qty_id = id.clone();
                let name = move || {
                  products
                    .with(|p| p.get(&id).map(|p| p.name.clone()))
                    .unwrap_or_else(|| "(unavailable)".to_string())
                };
                let unit = {
                  let id = line.product_id.clone();
                  move || {
                    products
                      .with(|p| p.get(&id).map(|p| format_price(p.price_cents)))
                      .unwrap_or_default()
                  }
                };
                let line_total = {
                  let id = line.product_id.clone();
                  let quantity = line.quantity;
                  move || {
                    products
                      .with(|p| {
                        p.get(&id).map(|p| format_price(p.price_cents * quantity as i64))
                      })
                      .unwrap_or_default()
                  }
                };
                view! {
                  <tr>
                    <td>{name}</td>
                    <td>{unit}</td>
                    <td>
                      <input
                        type="number"
                        class="input quantity-input"
                        min="0"
                        prop:value=line.quantity.to_string()
                        on:input=move |ev| {
                          let quantity = event_target_value(&ev).parse().unwrap_or(0);
                          qty_state.set_cart_quantity(&qty_id, quantity);
                        }
                      />
                    </td>
                    <td>{line_total}</td>
                    <td>
                      <button
                        class="btn-ghost"
                        title="Remove"
                        on:click=move |_| remove_state.remove_from_cart(&remove_id)
                      >
                        <Icon name="trash" size=14/>
                      </button>
                    </td>
                  </tr>
                }
              }
            />
          </tbody>
        </table>
        <div class="cart-summary">
          <span class="cart-total">"Total: " {total}</span>
          <a class="btn btn-primary" href="/checkout">"Check out"</a>
        </div>
      </Show>
    </section>
  }
}

#[component]
pub fn CheckoutPage() -> impl IntoView {
  let state = use_context::<AppState>().expect("AppState not found");
  let cart = state.cart;
  let auth = state.auth;
  let config = state.config;
  let navigate = use_navigate();

  let (guest_email, set_guest_email) = create_signal(String::new());
  let (address, set_address) = create_signal(String::new());
  let (submitting, set_submitting) = create_signal(false);
  let (error, set_error) = create_signal(Option::<String>::None);

  let guest_allowed = {
    let state = state.clone();
    move || state.is_feature_enabled("guest_checkout")
  };
  let needs_login = {
    let guest_allowed = guest_allowed.clone();
    move || !auth.get().logged_in && !guest_allowed()
  };

  let payment_note = move || {
    config.with(|c| match c.payment.method {
      PaymentMethod::Card => c
        .payment
        .card_support_email
        .clone()
        .map(|e| format!("Card payment. Questions? {}", e))
        .unwrap_or_else(|| "Payment by card on delivery of the invoice.".to_string()),
      PaymentMethod::CashOnDelivery => c
        .payment
        .cod_phone
        .clone()
        .map(|p| format!("Cash on delivery. We will call {} to confirm.", p))
        .unwrap_or_else(|| "Cash on delivery.".to_string()),
      PaymentMethod::MobileWallet => {
        let provider = c.payment.wallet_provider.clone().unwrap_or_default();
        let number = c.payment.wallet_number.clone().unwrap_or_default();
        format!("Pay via {} to {}.", provider, number)
      }
    })
  };

  let submit_state = state.clone();
  let on_submit = move |ev: web_sys::SubmitEvent| {
    ev.prevent_default();
    set_error.set(None);

    let lines = cart.get();
    if lines.is_empty() {
      set_error.set(Some("Your cart is empty".to_string()));
      return;
    }
    let address_val = address.get().trim().to_string();
    if address_val.is_empty() {
      set_error.set(Some("A shipping address is required".to_string()));
      return;
    }
    let email_val = guest_email.get().trim().to_string();
    let logged_in = auth.get().logged_in;
    if !logged_in && !email_val.contains('@') {
      set_error.set(Some("Enter a valid email address".to_string()));
      return;
    }

    set_submitting.set(true);
    let state = submit_state.clone();
    let navigate = navigate.clone();
    spawn_local(async move {
      let email = if logged_in { None } else { Some(email_val.as_str()) };
      match apiclient::place_order(email, &lines, &address_val).await {
        Ok(order) => {
          state.clear_cart();
          state.show_toast(
            &format!("Order placed. Total {}", format_price(order.total_cents)),
            ToastLevel::Success,
          );
          if logged_in {
            navigate("/orders", Default::default());
          } else {
            navigate("/", Default::default());
          }
        }
        Err(e) => {
          // Server messages ("Not enough stock for …") surface verbatim.
          set_error.set(Some(e));
        }
      }
      set_submitting.set(false);
    });
  };

  view! {
    <section class="checkout-page">
      <h2>"Checkout"</h2>
      <Show
        when=move || !needs_login()
        fallback=|| {
          view! {
            <div class="empty-state">
              <p>"Sign in to check out."</p>
              <a class="btn btn-primary" href="/login">"Sign in"</a>
            </div>
          }
        }
      >
        <form class="checkout-form" on:submit=on_submit.clone()>
          <Show when=move || error.get().is_some()>
            <div class="form-error">{move || error.get().unwrap_or_default()}</div>
          </Show>

          <Show when=move || !auth.get().logged_in>
            <div class="form-group">
              <label for="guest-email">"Email"</label>
              <input
                type="email"
                id="guest-email"
                class="input"
                placeholder="you@example.com"
                prop:value=guest_email
                on:input=move |ev| set_guest_email.set(event_target_value(&ev))
              />
            </div>
          </Show>

          <div class="form-group">
            <label for="address">"Shipping address"</label>
            <textarea
              id="address"
              class="input"
              rows="3"
              prop:value=address
              on:input=move |ev| set_address.set(event_target_value(&ev))
            ></textarea>
          </div>

          <p class="payment-note">{payment_note}</p>

          <button type="submit" class="btn btn-primary btn-block" disabled=move || submitting.get()>
            {move || if submitting.get() { "Placing order..." } else { "Place order" }}
          </button>
        </form>
      </Show>
    </section>
  }
}
