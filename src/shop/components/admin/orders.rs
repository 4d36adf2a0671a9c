//! Order management. Any admin can review orders; only a super admin can
//! move them through the status pipeline (the server enforces this too).

use leptos::*;

use super::super::RequireAdmin;
use crate::catalog::{format_price, Order};
use crate::shop::apiclient;
use crate::shop::state::{AppState, ToastLevel};

const STATUSES: &[&str] = &["pending", "paid", "shipped", "delivered", "cancelled"];

#[component]
pub fn AdminOrders() -> impl IntoView {
  view! {
    <RequireAdmin>
      <OrdersInner/>
    </RequireAdmin>
  }
}

#[component]
fn OrdersInner() -> impl IntoView {
  let state = use_context::<AppState>().expect("AppState not found");
  let auth = state.auth;
  let (orders, set_orders) = create_signal(Vec::<Order>::new());

  let reload = move || {
    spawn_local(async move {
      if let Ok(list) = apiclient::fetch_admin_orders().await {
        set_orders.set(list);
      }
    });
  };
  create_effect(move |_| reload());

  let is_super = move || {
    auth
      .get()
      .user
      .map(|u| u.role == "super_admin")
      .unwrap_or(false)
  };

  let status_state = state.clone();
  let on_status = move |id: String, status: String| {
    let state = status_state.clone();
    spawn_local(async move {
      match apiclient::update_order_status(&id, &status).await {
        Ok(_) => {
          state.show_toast("Status updated", ToastLevel::Success);
          reload();
        }
        Err(e) => state.show_toast(&e, ToastLevel::Error),
      }
    });
  };

  view! {
    <section class="admin-page">
      <div class="page-header">
        <h2>"Orders"</h2>
      </div>

      <table class="data-table">
        <thead>
          <tr>
            <th>"Order"</th>
            <th>"Email"</th>
            <th>"Items"</th>
            <th>"Total"</th>
            <th>"Placed"</th>
            <th>"Status"</th>
          </tr>
        </thead>
        <tbody>
          <For
            each=move || orders.get()
            key=|o| o.id.clone()
            children=move |o| {
              let id = o.id.clone();
              let items: u32 = o.lines.iter().map(|l| l.quantity).sum();
              let current = o.status.to_string();
              let on_status = on_status.clone();
              view! {
                <tr>
                  <td class="mono">{o.id[..8.min(o.id.len())].to_string()}</td>
                  <td>{o.email.clone()}</td>
                  <td>{items}</td>
                  <td>{format_price(o.total_cents)}</td>
                  <td>{o.created_at.clone()}</td>
                  <td>
                    <Show
                      when=is_super
                      fallback={
                        let current = current.clone();
                        move || {
                          view! {
                            <span class=format!("order-status order-status-{}", current)>
                              {current.clone()}
                            </span>
                          }
                        }
                      }
                    >
                      <select
                        class="select-small"
                        on:change={
                          let id = id.clone();
                          let on_status = on_status.clone();
                          move |ev| on_status(id.clone(), event_target_value(&ev))
                        }
                      >
                        {STATUSES
                          .iter()
                          .map(|s| {
                            let selected = *s == current;
                            view! { <option value=*s selected=selected>{*s}</option> }
                          })
                          .collect_view()}
                      </select>
                    </Show>
                  </td>
                </tr>
              }
            }
          />
        </tbody>
      </table>
    </section>
  }
}
