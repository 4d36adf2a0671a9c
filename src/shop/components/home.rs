//! Landing page: hero banner and a strip of recent products.

use leptos::*;

use super::products::ProductCard;
use crate::catalog::Product;
use crate::shop::apiclient;
use crate::shop::state::AppState;

#[component]
pub fn HomePage() -> impl IntoView {
  let state = use_context::<AppState>().expect("AppState not found");
  let config = state.config;

  let (featured, set_featured) = create_signal(Vec::<Product>::new());
  create_effect(move |_| {
    spawn_local(async move {
      if let Ok(products) = apiclient::fetch_products(None, None, None).await {
        set_featured.set(products.into_iter().take(8).collect());
      }
    });
  });

  view! {
    <section class="hero">
      <h1>{move || config.with(|c| c.site_name.clone())}</h1>
      <p class="hero-tagline">{move || config.with(|c| c.tagline.clone())}</p>
      <a class="btn btn-primary" href="/products">"Browse the shop"</a>
    </section>

    <section class="featured">
      <div class="section-header">
        <h2>"New arrivals"</h2>
        <a href="/products" class="text-link">"View all"</a>
      </div>
      <Show
        when=move || !featured.get().is_empty()
        fallback=|| {
          view! {
            <div class="empty-state">
              <p class="text-muted">"Nothing on the shelves yet. Check back soon."</p>
            </div>
          }
        }
      >
        <div class="product-grid">
          <For
            each=move || featured.get()
            key=|product| product.id.clone()
            children=|product| view! { <ProductCard product=product/> }
          />
        </div>
      </Show>
    </section>
  }
}
