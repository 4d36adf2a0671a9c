//! Header and footer chrome shared by every page.

use leptos::*;
use leptos_router::use_navigate;

use super::Icon;
use crate::shop::apiclient;
use crate::shop::state::{AppState, AuthStatus, ToastLevel};

#[component]
pub fn Navbar() -> impl IntoView {
  let state = use_context::<AppState>().expect("AppState not found");
  let config = state.config;
  let auth = state.auth;
  let cart = state.cart;
  let cart_count = move || cart.with(|c| c.iter().map(|i| i.quantity).sum::<u32>());

  let wishlist_state = state.clone();
  let logout_state = state.clone();
  let navigate = use_navigate();
  let on_logout = move |_| {
    let state = logout_state.clone();
    let navigate = navigate.clone();
    spawn_local(async move {
      match apiclient::logout().await {
        Ok(()) => {
          state.auth.set(AuthStatus::default());
          state.show_toast("Signed out", ToastLevel::Info);
          navigate("/", Default::default());
        }
        Err(e) => state.show_toast(&e, ToastLevel::Error),
      }
    });
  };

  let is_admin = move || {
    auth
      .get()
      .user
      .map(|u| u.role == "admin" || u.role == "super_admin")
      .unwrap_or(false)
  };

  view! {
    <header class="navbar">
      <a class="navbar-brand" href="/">
        <span class="navbar-title">{move || config.with(|c| c.site_name.clone())}</span>
        <span class="navbar-tagline">{move || config.with(|c| c.tagline.clone())}</span>
      </a>
      <nav class="navbar-links">
        <a href="/products">"Shop"</a>
        <Show when=move || wishlist_state.is_feature_enabled("wishlist")>
          <a href="/wishlist" title="Wishlist">
            <Icon name="heart" size=18/>
          </a>
        </Show>
        <a href="/cart" class="cart-link" title="Cart">
          <Icon name="cart" size=18/>
          <Show when=move || cart_count() > 0>
            <span class="cart-badge">{cart_count}</span>
          </Show>
        </a>
        <Show
          when=move || auth.get().logged_in
          fallback=|| view! { <a href="/login">"Sign in"</a> }
        >
          <a href="/orders">"Orders"</a>
          <a href="/account" title="Account">
            <Icon name="user" size=18/>
          </a>
          <Show when=is_admin>
            <a href="/admin" class="navbar-admin-link">"Admin"</a>
          </Show>
          <button class="btn-ghost" on:click=on_logout.clone()>"Sign out"</button>
        </Show>
      </nav>
    </header>
  }
}

#[component]
pub fn SiteFooter() -> impl IntoView {
  let state = use_context::<AppState>().expect("AppState not found");
  let footer = state.footer;
  let config = state.config;

  let (email, set_email) = create_signal(String::new());
  let newsletter_state = state.clone();
  let on_subscribe = move |ev: web_sys::SubmitEvent| {
    ev.prevent_default();
    let state = newsletter_state.clone();
    let address = email.get();
    if address.trim().is_empty() {
      state.show_toast("Enter an email address", ToastLevel::Warning);
      return;
    }
    spawn_local(async move {
      match apiclient::subscribe_newsletter(address.trim()).await {
        Ok(_) => {
          set_email.set(String::new());
          state.show_toast("Subscribed!", ToastLevel::Success);
        }
        Err(e) => state.show_toast(&e, ToastLevel::Error),
      }
    });
  };

  let newsletter_enabled = state.clone();

  view! {
    <footer class="site-footer">
      <div class="footer-columns">
        <div class="footer-column footer-about">
          <h4>{move || footer.with(|f| f.about_heading.clone())}</h4>
          <p>{move || footer.with(|f| f.about_text.clone())}</p>
          <p class="footer-contact">
            {move || config.with(|c| c.contact.email.clone())}
            <br/>
            {move || config.with(|c| c.contact.phone.clone())}
          </p>
        </div>
        <For
          each=move || footer.with(|f| f.columns.clone())
          key=|column| column.heading.clone()
          children=|column| {
            view! {
              <div class="footer-column">
                <h4>{column.heading.clone()}</h4>
                <ul>
                  {column
                    .links
                    .iter()
                    .map(|link| {
                      view! {
                        <li>
                          <a href=link.href.clone()>{link.label.clone()}</a>
                        </li>
                      }
                    })
                    .collect_view()}
                </ul>
              </div>
            }
          }
        />
        <Show when=move || newsletter_enabled.is_feature_enabled("newsletter")>
          <div class="footer-column footer-newsletter">
            <h4>"Newsletter"</h4>
            <p>{move || footer.with(|f| f.newsletter_blurb.clone())}</p>
            <form on:submit=on_subscribe.clone()>
              <input
                type="email"
                class="input"
                placeholder="you@example.com"
                prop:value=email
                on:input=move |ev| set_email.set(event_target_value(&ev))
              />
              <button type="submit" class="btn btn-primary">
                <Icon name="mail" size=14/>
                " Subscribe"
              </button>
            </form>
          </div>
        </Show>
      </div>
      <div class="footer-copyright">{move || footer.with(|f| f.copyright.clone())}</div>
    </footer>
  }
}
