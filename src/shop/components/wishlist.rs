//! Wishlist page, available when the feature flag is on.

use leptos::*;

use super::products::ProductCard;
use super::RequireAuth;
use crate::catalog::Product;
use crate::shop::apiclient;
use crate::shop::state::{AppState, ToastLevel};

#[component]
pub fn WishlistPage() -> impl IntoView {
  view! {
    <RequireAuth>
      <WishlistInner/>
    </RequireAuth>
  }
}

#[component]
fn WishlistInner() -> impl IntoView {
  let state = use_context::<AppState>().expect("AppState not found");
  let (products, set_products) = create_signal(Vec::<Product>::new());
  let (loading, set_loading) = create_signal(true);

  let enabled = {
    let state = state.clone();
    move || state.is_feature_enabled("wishlist")
  };

  create_effect(move |_| {
    spawn_local(async move {
      if let Ok(list) = apiclient::fetch_wishlist().await {
        set_products.set(list);
      }
      set_loading.set(false);
    });
  });

  let remove_state = state.clone();

  view! {
    <section class="wishlist-page">
      <h2>"Wishlist"</h2>
      <Show
        when=enabled.clone()
        fallback=|| {
          view! { <p class="text-muted">"The wishlist is currently disabled."</p> }
        }
      >
        <Show
          when=move || !loading.get()
          fallback=|| view! { <div class="loading-spinner"></div> }
        >
          <Show
            when=move || !products.get().is_empty()
            fallback=|| {
              view! {
                <div class="empty-state">
                  <p class="text-muted">"Nothing saved yet."</p>
                  <a class="btn btn-primary" href="/products">"Browse the shop"</a>
                </div>
              }
            }
          >
            <div class="product-grid">
              <For
                each=move || products.get()
                key=|product| product.id.clone()
                children=move |product| {
                  let state = remove_state.clone();
                  let id = product.id.clone();
                  view! {
                    <div class="wishlist-entry">
                      <ProductCard product=product/>
                      <button
                        class="btn-ghost"
                        on:click=move |_| {
                          let state = state.clone();
                          let id = id.clone();
                          spawn_local(async move {
                            match apiclient::remove_from_wishlist(&id).await {
                              Ok(_) => {
                                set_products.update(|list| list.retain(|p| p.id != id));
                              }
                              Err(e) => state.show_toast(&e, ToastLevel::Error),
                            }
                          });
                        }
                      >
                        "Remove"
                      </button>
                    </div>
                  }
                }
              />
            </div>
          </Show>
        </Show>
      </Show>
    </section>
  }
}
