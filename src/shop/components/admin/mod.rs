//! Admin back office pages. Every page sits behind [`RequireAdmin`];
//! pages that write the site configuration or manage users additionally
//! require the super-admin role. The server enforces the same rules on
//! its side regardless of what this UI shows.

use leptos::*;

use super::{RequireAdmin, Icon};
use crate::shop::state::AppState;

mod footer;
mod orders;
mod products;
mod settings;
mod taxonomy;
mod users;

pub use footer::AdminFooter;
pub use orders::AdminOrders;
pub use products::AdminProducts;
pub use settings::AdminSettings;
pub use taxonomy::{AdminBrands, AdminCategories};
pub use users::AdminUsers;

#[component]
pub fn AdminDashboard() -> impl IntoView {
  view! {
    <RequireAdmin>
      <DashboardInner/>
    </RequireAdmin>
  }
}

#[component]
fn DashboardInner() -> impl IntoView {
  let state = use_context::<AppState>().expect("AppState not found");
  let config = state.config;
  let auth = state.auth;

  let is_super = move || {
    auth
      .get()
      .user
      .map(|u| u.role == "super_admin")
      .unwrap_or(false)
  };

  view! {
    <section class="admin-page">
      <div class="page-header">
        <h2>"Back office"</h2>
      </div>

      <Show when=move || config.with(|c| c.is_maintenance_mode())>
        <div class="admin-banner warning">
          <Icon name="alert-triangle" size=16/>
          <span>"Maintenance mode is ON. Visitors see the notice page."</span>
        </div>
      </Show>

      <div class="admin-grid">
        <AdminCard href="/admin/products" icon="package" title="Products"
          blurb="Create, edit, and retire catalog items"/>
        <AdminCard href="/admin/categories" icon="tag" title="Categories"
          blurb="Organize the catalog"/>
        <AdminCard href="/admin/brands" icon="tag" title="Brands"
          blurb="Manage brand labels"/>
        <AdminCard href="/admin/orders" icon="cart" title="Orders"
          blurb="Review and progress orders"/>
        <AdminCard href="/admin/footer" icon="info" title="Footer"
          blurb="Edit footer columns and copy"/>
        <Show when=is_super>
          <AdminCard href="/admin/settings" icon="settings" title="Site settings"
            blurb="Branding, theme, features, payment, maintenance"/>
          <AdminCard href="/admin/users" icon="user" title="Users"
            blurb="Assign roles"/>
        </Show>
      </div>
    </section>
  }
}

#[component]
fn AdminCard(
  href: &'static str,
  icon: &'static str,
  title: &'static str,
  blurb: &'static str,
) -> impl IntoView {
  view! {
    <a class="admin-card" href=href>
      <Icon name=icon size=24/>
      <h3>{title}</h3>
      <p class="text-muted">{blurb}</p>
    </a>
  }
}
