//! Order history for the signed-in user.

use leptos::*;

use super::RequireAuth;
use crate::catalog::{format_price, Order};
use crate::shop::apiclient;

#[component]
pub fn OrdersPage() -> impl IntoView {
  view! {
    <RequireAuth>
      <OrdersInner/>
    </RequireAuth>
  }
}

#[component]
fn OrdersInner() -> impl IntoView {
  let (orders, set_orders) = create_signal(Vec::<Order>::new());
  let (loading, set_loading) = create_signal(true);

  create_effect(move |_| {
    spawn_local(async move {
      if let Ok(list) = apiclient::fetch_my_orders().await {
        set_orders.set(list);
      }
      set_loading.set(false);
    });
  });

  view! {
    <section class="orders-page">
      <h2>"Your orders"</h2>
      <Show
        when=move || !loading.get()
        fallback=|| view! { <div class="loading-spinner"></div> }
      >
        <Show
          when=move || !orders.get().is_empty()
          fallback=|| {
            view! {
              <div class="empty-state">
                <p class="text-muted">"No orders yet."</p>
              </div>
            }
          }
        >
          <For
            each=move || orders.get()
            key=|order| order.id.clone()
            children=|order| view! { <OrderCard order=order/> }
          />
        </Show>
      </Show>
    </section>
  }
}

#[component]
pub fn OrderCard(order: Order) -> impl IntoView {
  let status = order.status.to_string();
  let total = format_price(order.total_cents);
  view! {
    <div class="order-card">
      <div class="order-card-header">
        <span class="order-id">{format!("Order {}", &order.id[..8.min(order.id.len())])}</span>
        <span class=format!("order-status order-status-{}", status)>{status.clone()}</span>
        <span class="order-date">{order.created_at.clone()}</span>
      </div>
      <ul class="order-lines">
        {order
          .lines
          .iter()
          .map(|line| {
            view! {
              <li>
                <span>{format!("{} × {}", line.quantity, line.product_name)}</span>
                <span>{format_price(line.line_total_cents())}</span>
              </li>
            }
          })
          .collect_view()}
      </ul>
      <div class="order-card-footer">
        <span>"Total"</span>
        <span class="order-total">{total}</span>
      </div>
    </div>
  }
}
