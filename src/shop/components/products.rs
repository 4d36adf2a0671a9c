//! Product listing and detail pages.

use leptos::*;
use leptos_router::use_params_map;

use super::Icon;
use crate::catalog::{format_price, Brand, Category, Product};
use crate::shop::apiclient;
use crate::shop::state::{AppState, ToastLevel};

#[component]
pub fn ProductCard(product: Product) -> impl IntoView {
  let href = format!("/products/{}", product.slug);
  let image = product.images.first().cloned();
  let price = format_price(product.price_cents);
  let out_of_stock = !product.in_stock();

  view! {
    <a class="product-card" href=href>
      {match image {
        Some(src) => view! { <img class="product-card-image" src=src alt=product.name.clone()/> }
          .into_view(),
        None => view! { <div class="product-card-image placeholder"></div> }.into_view(),
      }}
      <div class="product-card-body">
        <span class="product-card-name">{product.name.clone()}</span>
        <span class="product-card-price">{price}</span>
        <Show when=move || out_of_stock>
          <span class="product-card-stock">"Out of stock"</span>
        </Show>
      </div>
    </a>
  }
}

#[component]
pub fn ProductsPage() -> impl IntoView {
  let (products, set_products) = create_signal(Vec::<Product>::new());
  let (categories, set_categories) = create_signal(Vec::<Category>::new());
  let (brands, set_brands) = create_signal(Vec::<Brand>::new());
  let (category, set_category) = create_signal(String::new());
  let (brand, set_brand) = create_signal(String::new());
  let (search, set_search) = create_signal(String::new());
  let (loading, set_loading) = create_signal(true);

  create_effect(move |_| {
    spawn_local(async move {
      if let Ok(list) = apiclient::fetch_categories().await {
        set_categories.set(list);
      }
      if let Ok(list) = apiclient::fetch_brands().await {
        set_brands.set(list);
      }
    });
  });

  // Refetch whenever a filter changes.
  create_effect(move |_| {
    let category = category.get();
    let brand = brand.get();
    let search = search.get();
    set_loading.set(true);
    spawn_local(async move {
      let category = (!category.is_empty()).then_some(category);
      let brand = (!brand.is_empty()).then_some(brand);
      match apiclient::fetch_products(category.as_deref(), brand.as_deref(), Some(&search)).await {
        Ok(list) => set_products.set(list),
        Err(_) => set_products.set(Vec::new()),
      }
      set_loading.set(false);
    });
  });

  view! {
    <section class="products-page">
      <div class="page-header">
        <h2>"Shop"</h2>
        <div class="product-filters">
          <div class="search-box">
            <Icon name="search" size=14/>
            <input
              type="text"
              class="input"
              placeholder="Search products..."
              prop:value=search
              on:input=move |ev| set_search.set(event_target_value(&ev))
            />
          </div>
          <select
            class="select"
            on:change=move |ev| set_category.set(event_target_value(&ev))
          >
            <option value="">"All categories"</option>
            <For
              each=move || categories.get()
              key=|c| c.id.clone()
              children=|c| view! { <option value=c.slug.clone()>{c.name.clone()}</option> }
            />
          </select>
          <select class="select" on:change=move |ev| set_brand.set(event_target_value(&ev))>
            <option value="">"All brands"</option>
            <For
              each=move || brands.get()
              key=|b| b.id.clone()
              children=|b| view! { <option value=b.slug.clone()>{b.name.clone()}</option> }
            />
          </select>
        </div>
      </div>

      <Show
        when=move || !loading.get()
        fallback=|| view! { <div class="loading-spinner"></div> }
      >
        <Show
          when=move || !products.get().is_empty()
          fallback=|| {
            view! {
              <div class="empty-state">
                <p class="text-muted">"No products match your filters."</p>
              </div>
            }
          }
        >
          <div class="product-grid">
            <For
              each=move || products.get()
              key=|product| product.id.clone()
              children=|product| view! { <ProductCard product=product/> }
            />
          </div>
        </Show>
      </Show>
    </section>
  }
}

#[component]
pub fn ProductPage() -> impl IntoView {
  let state = use_context::<AppState>().expect("AppState not found");
  let params = use_params_map();
  let (product, set_product) = create_signal(Option::<Product>::None);
  let (missing, set_missing) = create_signal(false);
  let (quantity, set_quantity) = create_signal(1u32);

  create_effect(move |_| {
    let slug = params.with(|p| p.get("slug").cloned().unwrap_or_default());
    if slug.is_empty() {
      return;
    }
    spawn_local(async move {
      match apiclient::fetch_product(&slug).await {
        Ok(p) => set_product.set(Some(p)),
        Err(_) => set_missing.set(true),
      }
    });
  });

  let add_state = state.clone();
  let on_add_to_cart = move |_| {
    if let Some(p) = product.get() {
      add_state.add_to_cart(&p.id, quantity.get().max(1));
      add_state.show_toast(&format!("{} added to cart", p.name), ToastLevel::Success);
    }
  };

  let wish_state = state.clone();
  let on_save = move |_| {
    let state = wish_state.clone();
    if !state.auth.get().logged_in {
      state.show_toast("Sign in to save products", ToastLevel::Info);
      return;
    }
    if let Some(p) = product.get() {
      spawn_local(async move {
        match apiclient::add_to_wishlist(&p.id).await {
          Ok(_) => state.show_toast("Saved to wishlist", ToastLevel::Success),
          Err(e) => state.show_toast(&e, ToastLevel::Error),
        }
      });
    }
  };

  let wishlist_visible = state.clone();

  view! {
    <Show
      when=move || product.get().is_some()
      fallback=move || {
        if missing.get() {
          view! {
            <div class="empty-state">
              <h2>"Product not found"</h2>
              <a class="btn btn-secondary" href="/products">"Back to the shop"</a>
            </div>
          }
          .into_view()
        } else {
          view! { <div class="loading-spinner"></div> }.into_view()
        }
      }
    >
      {move || {
        let p = product.get().unwrap();
        let wishlist_visible = wishlist_visible.clone();
        let price = format_price(p.price_cents);
        let in_stock = p.in_stock();
        let image = p.images.first().cloned();
        view! {
          <section class="product-detail">
            {match image {
              Some(src) => view! { <img class="product-detail-image" src=src alt=p.name.clone()/> }
                .into_view(),
              None => view! { <div class="product-detail-image placeholder"></div> }.into_view(),
            }}
            <div class="product-detail-body">
              <h2>{p.name.clone()}</h2>
              <div class="product-detail-meta">
                {p.brand.clone().map(|b| view! { <span class="badge">{b}</span> })}
                {p.category.clone().map(|c| view! { <span class="badge">{c}</span> })}
              </div>
              <p class="product-detail-price">{price}</p>
              <p class="product-detail-description">{p.description.clone()}</p>
              <Show
                when=move || in_stock
                fallback=|| view! { <p class="product-out-of-stock">"Out of stock"</p> }
              >
                <div class="product-detail-actions">
                  <input
                    type="number"
                    class="input quantity-input"
                    min="1"
                    prop:value=move || quantity.get().to_string()
                    on:input=move |ev| {
                      set_quantity.set(event_target_value(&ev).parse().unwrap_or(1));
                    }
                  />
                  <button class="btn btn-primary" on:click=on_add_to_cart.clone()>
                    <Icon name="cart" size=14/>
                    " Add to cart"
                  </button>
                  <Show when=move || wishlist_visible.is_feature_enabled("wishlist")>
                    <button class="btn btn-secondary" on:click=on_save.clone()>
                      <Icon name="heart" size=14/>
                      " Save"
                    </button>
                  </Show>
                </div>
              </Show>
            </div>
          </section>
        }
      }}
    </Show>
  }
}
