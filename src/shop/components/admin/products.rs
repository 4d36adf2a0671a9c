//! Product management: list, create, edit, delete.

use leptos::*;

use super::super::RequireAdmin;
use crate::catalog::{format_price, Brand, Category, Product};
use crate::shop::apiclient;
use crate::shop::state::{AppState, ToastLevel};

#[component]
pub fn AdminProducts() -> impl IntoView {
  view! {
    <RequireAdmin>
      <ProductsInner/>
    </RequireAdmin>
  }
}

#[derive(Clone, Default)]
struct ProductForm {
  id: Option<String>,
  slug: String,
  name: String,
  description: String,
  price: String,
  image: String,
  brand: String,
  category: String,
  stock: String,
  active: bool,
}

impl ProductForm {
  fn from_product(p: &Product) -> Self {
    Self {
      id: Some(p.id.clone()),
      slug: p.slug.clone(),
      name: p.name.clone(),
      description: p.description.clone(),
      price: format_price(p.price_cents),
      image: p.images.first().cloned().unwrap_or_default(),
      brand: p.brand.clone().unwrap_or_default(),
      category: p.category.clone().unwrap_or_default(),
      stock: p.stock.to_string(),
      active: p.active,
    }
  }

  fn to_body(&self) -> Result<serde_json::Value, String> {
    let price: f64 = self
      .price
      .trim()
      .parse()
      .map_err(|_| "Enter a price like 12.50".to_string())?;
    if price < 0.0 {
      return Err("Price cannot be negative".to_string());
    }
    let stock: i64 = self
      .stock
      .trim()
      .parse()
      .map_err(|_| "Stock must be a whole number".to_string())?;
    let images: Vec<String> = if self.image.trim().is_empty() {
      Vec::new()
    } else {
      vec![self.image.trim().to_string()]
    };
    Ok(serde_json::json!({
      "slug": self.slug.trim(),
      "name": self.name.trim(),
      "description": self.description,
      "price_cents": (price * 100.0).round() as i64,
      "images": images,
      "brand": (!self.brand.is_empty()).then_some(self.brand.clone()),
      "category": (!self.category.is_empty()).then_some(self.category.clone()),
      "stock": stock,
      "active": self.active,
    }))
  }
}

#[component]
fn ProductsInner() -> impl IntoView {
  let state = use_context::<AppState>().expect("AppState not found");
  let (products, set_products) = create_signal(Vec::<Product>::new());
  let (categories, set_categories) = create_signal(Vec::<Category>::new());
  let (brands, set_brands) = create_signal(Vec::<Brand>::new());
  let form = create_rw_signal(Option::<ProductForm>::None);
  let (saving, set_saving) = create_signal(false);

  let reload = move || {
    spawn_local(async move {
      if let Ok(list) = apiclient::fetch_admin_products().await {
        set_products.set(list);
      }
    });
  };

  create_effect(move |_| {
    reload();
    spawn_local(async move {
      if let Ok(list) = apiclient::fetch_categories().await {
        set_categories.set(list);
      }
      if let Ok(list) = apiclient::fetch_brands().await {
        set_brands.set(list);
      }
    });
  });

  let save_state = state.clone();
  let on_save = move |ev: web_sys::SubmitEvent| {
    ev.prevent_default();
    let Some(current) = form.get_untracked() else {
      return;
    };
    let state = save_state.clone();
    let body = match current.to_body() {
      Ok(body) => body,
      Err(msg) => {
        state.show_toast(&msg, ToastLevel::Warning);
        return;
      }
    };
    set_saving.set(true);
    spawn_local(async move {
      let result = match &current.id {
        Some(id) => apiclient::update_product(id, &body).await,
        None => apiclient::create_product(&body).await,
      };
      match result {
        Ok(_) => {
          state.show_toast("Product saved", ToastLevel::Success);
          form.set(None);
          reload();
        }
        Err(e) => state.show_toast(&e, ToastLevel::Error),
      }
      set_saving.set(false);
    });
  };

  let delete_state = state.clone();
  let on_delete = move |id: String| {
    let state = delete_state.clone();
    spawn_local(async move {
      match apiclient::delete_product(&id).await {
        Ok(_) => {
          state.show_toast("Product deleted", ToastLevel::Info);
          reload();
        }
        Err(e) => state.show_toast(&e, ToastLevel::Error),
      }
    });
  };

  view! {
    <section class="admin-page">
      <div class="page-header">
        <h2>"Products"</h2>
        <button
          class="btn btn-primary"
          on:click=move |_| form.set(Some(ProductForm {
            active: true,
            ..Default::default()
          }))
        >
          "New product"
        </button>
      </div>

      <Show when=move || form.get().is_some()>
        {move || {
          let current = form.get().unwrap();
          let heading = if current.id.is_some() { "Edit product" } else { "New product" };
          view! {
            <form class="admin-form" on:submit=on_save.clone()>
              <h3>{heading}</h3>
              <div class="form-row">
                <div class="form-group">
                  <label>"Name"</label>
                  <input
                    type="text"
                    class="input"
                    prop:value=current.name.clone()
                    on:input=move |ev| {
                      form.update(|f| {
                        if let Some(f) = f {
                          f.name = event_target_value(&ev);
                        }
                      })
                    }
                  />
                </div>
                <div class="form-group">
                  <label>"Slug"</label>
                  <input
                    type="text"
                    class="input"
                    placeholder="willow-basket"
                    prop:value=current.slug.clone()
                    on:input=move |ev| {
                      form.update(|f| {
                        if let Some(f) = f {
                          f.slug = event_target_value(&ev);
                        }
                      })
                    }
                  />
                </div>
              </div>
              <div class="form-group">
                <label>"Description"</label>
                <textarea
                  class="input"
                  rows="3"
                  prop:value=current.description.clone()
                  on:input=move |ev| {
                    form.update(|f| {
                      if let Some(f) = f {
                        f.description = event_target_value(&ev);
                      }
                    })
                  }
                ></textarea>
              </div>
              <div class="form-row">
                <div class="form-group">
                  <label>"Price"</label>
                  <input
                    type="text"
                    class="input"
                    placeholder="12.50"
                    prop:value=current.price.clone()
                    on:input=move |ev| {
                      form.update(|f| {
                        if let Some(f) = f {
                          f.price = event_target_value(&ev);
                        }
                      })
                    }
                  />
                </div>
                <div class="form-group">
                  <label>"Stock"</label>
                  <input
                    type="number"
                    class="input"
                    min="0"
                    prop:value=current.stock.clone()
                    on:input=move |ev| {
                      form.update(|f| {
                        if let Some(f) = f {
                          f.stock = event_target_value(&ev);
                        }
                      })
                    }
                  />
                </div>
              </div>
              <div class="form-group">
                <label>"Image URL"</label>
                <input
                  type="text"
                  class="input"
                  prop:value=current.image.clone()
                  on:input=move |ev| {
                    form.update(|f| {
                      if let Some(f) = f {
                        f.image = event_target_value(&ev);
                      }
                    })
                  }
                />
              </div>
              <div class="form-row">
                <div class="form-group">
                  <label>"Category"</label>
                  <select
                    class="select"
                    on:change=move |ev| {
                      form.update(|f| {
                        if let Some(f) = f {
                          f.category = event_target_value(&ev);
                        }
                      })
                    }
                  >
                    <option value="" selected=current.category.is_empty()>"None"</option>
                    <For
                      each=move || categories.get()
                      key=|c| c.id.clone()
                      children={
                        let selected = current.category.clone();
                        move |c| {
                          let is_selected = c.slug == selected;
                          view! {
                            <option value=c.slug.clone() selected=is_selected>
                              {c.name.clone()}
                            </option>
                          }
                        }
                      }
                    />
                  </select>
                </div>
                <div class="form-group">
                  <label>"Brand"</label>
                  <select
                    class="select"
                    on:change=move |ev| {
                      form.update(|f| {
                        if let Some(f) = f {
                          f.brand = event_target_value(&ev);
                        }
                      })
                    }
                  >
                    <option value="" selected=current.brand.is_empty()>"None"</option>
                    <For
                      each=move || brands.get()
                      key=|b| b.id.clone()
                      children={
                        let selected = current.brand.clone();
                        move |b| {
                          let is_selected = b.slug == selected;
                          view! {
                            <option value=b.slug.clone() selected=is_selected>
                              {b.name.clone()}
                            </option>
                          }
                        }
                      }
                    />
                  </select>
                </div>
                <div class="form-group">
                  <label class="checkbox-label">
                    <input
                      type="checkbox"
                      prop:checked=current.active
                      on:change=move |ev| {
                        form.update(|f| {
                          if let Some(f) = f {
                            f.active = event_target_checked(&ev);
                          }
                        })
                      }
                    />
                    " Active"
                  </label>
                </div>
              </div>
              <div class="form-actions">
                <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                  {move || if saving.get() { "Saving..." } else { "Save" }}
                </button>
                <button type="button" class="btn btn-secondary" on:click=move |_| form.set(None)>
                  "Cancel"
                </button>
              </div>
            </form>
          }
        }}
      </Show>

      <table class="data-table">
        <thead>
          <tr>
            <th>"Name"</th>
            <th>"Price"</th>
            <th>"Stock"</th>
            <th>"Active"</th>
            <th style="text-align: right">"Actions"</th>
          </tr>
        </thead>
        <tbody>
          <For
            each=move || products.get()
            key=|p| p.id.clone()
            children=move |p| {
              let edit = p.clone();
              let delete_id = p.id.clone();
              let on_delete = on_delete.clone();
              view! {
                <tr>
                  <td>{p.name.clone()}</td>
                  <td>{format_price(p.price_cents)}</td>
                  <td>{p.stock}</td>
                  <td>{if p.active { "yes" } else { "no" }}</td>
                  <td style="text-align: right">
                    <button
                      class="btn btn-secondary btn-sm"
                      on:click=move |_| form.set(Some(ProductForm::from_product(&edit)))
                    >
                      "Edit"
                    </button>
                    <button
                      class="btn btn-secondary btn-sm danger"
                      on:click=move |_| on_delete(delete_id.clone())
                    >
                      "Delete"
                    </button>
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
