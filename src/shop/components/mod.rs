//! Storefront UI components

use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::{Redirect, Route, Router, Routes};

use crate::shop::apiclient;
use crate::shop::state::AppState;
use crate::site::SiteConfig;

mod account;
mod admin;
mod auth;
mod cart;
mod gate;
mod home;
mod icons;
mod layout;
mod orders;
mod products;
mod toast;
mod wishlist;

pub use auth::{
  ForgotPasswordPage, LoginPage, OauthCallbackPage, RegisterPage, ResetPasswordPage,
  VerifyEmailPage,
};
pub use gate::{LoadingScreen, MaintenanceGate};
pub use icons::Icon;
pub use layout::{Navbar, SiteFooter};
pub use toast::ToastContainer;

use account::AccountPage;
use admin::{
  AdminBrands, AdminCategories, AdminDashboard, AdminFooter, AdminOrders, AdminProducts,
  AdminSettings, AdminUsers,
};
use cart::{CartPage, CheckoutPage};
use home::HomePage;
use orders::OrdersPage;
use products::{ProductPage, ProductsPage};
use wishlist::WishlistPage;

/// Main App component
#[component]
pub fn App() -> impl IntoView {
  provide_meta_context();

  // Create global state
  let state = AppState::new();
  provide_context(state.clone());

  // Fetch the site configuration once on startup. A failed fetch leaves
  // the defaults in place and records the error; the store still renders.
  let state_config = state.clone();
  create_effect(move |_| {
    let state = state_config.clone();
    spawn_local(async move {
      match apiclient::fetch_site_config().await {
        Ok(config) => {
          state.config.set(config);
          state.config_error.set(None);
        }
        Err(e) => {
          state.config.set(SiteConfig::default());
          state.config_error.set(Some(e));
        }
      }
      state.config_loading.set(false);
    });
  });

  // Resolve the session, if there is one.
  let state_auth = state.clone();
  create_effect(move |_| {
    let state = state_auth.clone();
    spawn_local(async move {
      if apiclient::get_stored_token().is_some() {
        match apiclient::fetch_auth_status().await {
          Ok(status) => {
            match &status.user {
              Some(user) => apiclient::set_stored_role(&user.role),
              None => apiclient::clear_stored_session(),
            }
            state.auth.set(status);
          }
          Err(_) => {
            // Network trouble: keep the token and try again next load.
          }
        }
      }
      state.auth_loading.set(false);
    });
  });

  // Footer content, independent of the main record.
  let state_footer = state.clone();
  create_effect(move |_| {
    let state = state_footer.clone();
    spawn_local(async move {
      if let Ok(footer) = apiclient::fetch_footer().await {
        state.footer.set(footer);
      }
    });
  });

  // Re-project the theme whenever the configuration record changes.
  let config = state.config;
  create_effect(move |_| {
    let config = config.get();
    crate::shop::theme::apply_theme(&config);
  });

  let title_config = state.config;
  view! {
    <Title text=move || title_config.with(|c| c.site_name.clone())/>
    <Router>
      <MaintenanceGate>
        <div class="app-shell">
          <Navbar/>
          <main class="page-content">
            <Routes>
              <Route path="/" view=HomePage/>
              <Route path="/products" view=ProductsPage/>
              <Route path="/products/:slug" view=ProductPage/>
              <Route path="/cart" view=CartPage/>
              <Route path="/checkout" view=CheckoutPage/>
              <Route path="/wishlist" view=WishlistPage/>
              <Route path="/orders" view=OrdersPage/>
              <Route path="/account" view=AccountPage/>
              <Route path="/login" view=LoginPage/>
              <Route path="/register" view=RegisterPage/>
              <Route path="/forgot-password" view=ForgotPasswordPage/>
              <Route path="/reset-password" view=ResetPasswordPage/>
              <Route path="/verify-email" view=VerifyEmailPage/>
              <Route path="/oauth/callback" view=OauthCallbackPage/>
              <Route path="/admin" view=AdminDashboard/>
              <Route path="/admin/products" view=AdminProducts/>
              <Route path="/admin/categories" view=AdminCategories/>
              <Route path="/admin/brands" view=AdminBrands/>
              <Route path="/admin/footer" view=AdminFooter/>
              <Route path="/admin/orders" view=AdminOrders/>
              <Route path="/admin/settings" view=AdminSettings/>
              <Route path="/admin/users" view=AdminUsers/>
              <Route path="/*any" view=NotFoundPage/>
            </Routes>
          </main>
          <SiteFooter/>
        </div>
      </MaintenanceGate>
      <ToastContainer/>
    </Router>
  }
}

#[component]
fn NotFoundPage() -> impl IntoView {
  view! {
    <section class="empty-state">
      <h2>"Page not found"</h2>
      <p class="text-muted">"The page you are looking for does not exist."</p>
      <a class="btn btn-primary" href="/">"Back to the shop"</a>
    </section>
  }
}

/// Wraps pages that need a signed-in viewer.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
  let state = use_context::<AppState>().expect("AppState not found");
  let auth_loading = state.auth_loading;
  let auth = state.auth;

  view! {
    <Show when=move || !auth_loading.get() fallback=|| view! { <LoadingScreen/> }>
      {
        let children = children.clone();
        move || {
          if auth.get().logged_in {
            children().into_view()
          } else {
            view! { <Redirect path="/login"/> }.into_view()
          }
        }
      }
    </Show>
  }
}

/// Wraps the back office: any admin role, or super admin when
/// `super_only` is set. Non-admins land back on the storefront.
#[component]
pub fn RequireAdmin(#[prop(optional)] super_only: bool, children: ChildrenFn) -> impl IntoView {
  let state = use_context::<AppState>().expect("AppState not found");
  let auth_loading = state.auth_loading;
  let auth = state.auth;

  let allowed = move || {
    auth
      .get()
      .user
      .map(|u| {
        if super_only {
          u.role == "super_admin"
        } else {
          u.role == "admin" || u.role == "super_admin"
        }
      })
      .unwrap_or(false)
  };

  view! {
    <Show when=move || !auth_loading.get() fallback=|| view! { <LoadingScreen/> }>
      {
        let children = children.clone();
        move || {
          if allowed() {
            children().into_view()
          } else {
            view! { <Redirect path="/"/> }.into_view()
          }
        }
      }
    </Show>
  }
}
