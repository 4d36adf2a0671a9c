//! Category and brand management.

use leptos::*;

use super::super::RequireAdmin;
use crate::catalog::{Brand, Category};
use crate::shop::apiclient;
use crate::shop::state::{AppState, ToastLevel};

#[component]
pub fn AdminCategories() -> impl IntoView {
  view! {
    <RequireAdmin>
      <CategoriesInner/>
    </RequireAdmin>
  }
}

#[component]
fn CategoriesInner() -> impl IntoView {
  let state = use_context::<AppState>().expect("AppState not found");
  let (categories, set_categories) = create_signal(Vec::<Category>::new());
  let (name, set_name) = create_signal(String::new());
  let (slug, set_slug) = create_signal(String::new());

  let reload = move || {
    spawn_local(async move {
      if let Ok(list) = apiclient::fetch_categories().await {
        set_categories.set(list);
      }
    });
  };
  create_effect(move |_| reload());

  let add_state = state.clone();
  let on_add = move |ev: web_sys::SubmitEvent| {
    ev.prevent_default();
    let state = add_state.clone();
    let body = serde_json::json!({
      "slug": slug.get().trim(),
      "name": name.get().trim(),
    });
    spawn_local(async move {
      match apiclient::upsert_category(&body).await {
        Ok(_) => {
          set_name.set(String::new());
          set_slug.set(String::new());
          state.show_toast("Category saved", ToastLevel::Success);
          reload();
        }
        Err(e) => state.show_toast(&e, ToastLevel::Error),
      }
    });
  };

  let delete_state = state.clone();
  let on_delete = move |id: String| {
    let state = delete_state.clone();
    spawn_local(async move {
      match apiclient::delete_category(&id).await {
        Ok(_) => {
          state.show_toast("Category deleted", ToastLevel::Info);
          reload();
        }
        Err(e) => state.show_toast(&e, ToastLevel::Error),
      }
    });
  };

  view! {
    <section class="admin-page">
      <div class="page-header">
        <h2>"Categories"</h2>
      </div>

      <form class="admin-inline-form" on:submit=on_add>
        <input
          type="text"
          class="input"
          placeholder="Name"
          prop:value=name
          on:input=move |ev| set_name.set(event_target_value(&ev))
        />
        <input
          type="text"
          class="input"
          placeholder="slug"
          prop:value=slug
          on:input=move |ev| set_slug.set(event_target_value(&ev))
        />
        <button type="submit" class="btn btn-primary">"Add"</button>
      </form>

      <table class="data-table">
        <thead>
          <tr>
            <th>"Name"</th>
            <th>"Slug"</th>
            <th style="text-align: right">"Actions"</th>
          </tr>
        </thead>
        <tbody>
          <For
            each=move || categories.get()
            key=|c| c.id.clone()
            children=move |c| {
              let id = c.id.clone();
              let on_delete = on_delete.clone();
              view! {
                <tr>
                  <td>{c.name.clone()}</td>
                  <td>{c.slug.clone()}</td>
                  <td style="text-align: right">
                    <button
                      class="btn btn-secondary btn-sm danger"
                      on:click=move |_| on_delete(id.clone())
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

#[component]
pub fn AdminBrands() -> impl IntoView {
  view! {
    <RequireAdmin>
      <BrandsInner/>
    </RequireAdmin>
  }
}

#[component]
fn BrandsInner() -> impl IntoView {
  let state = use_context::<AppState>().expect("AppState not found");
  let (brands, set_brands) = create_signal(Vec::<Brand>::new());
  let (name, set_name) = create_signal(String::new());
  let (slug, set_slug) = create_signal(String::new());

  let reload = move || {
    spawn_local(async move {
      if let Ok(list) = apiclient::fetch_brands().await {
        set_brands.set(list);
      }
    });
  };
  create_effect(move |_| reload());

  let add_state = state.clone();
  let on_add = move |ev: web_sys::SubmitEvent| {
    ev.prevent_default();
    let state = add_state.clone();
    let body = serde_json::json!({
      "slug": slug.get().trim(),
      "name": name.get().trim(),
    });
    spawn_local(async move {
      match apiclient::upsert_brand(&body).await {
        Ok(_) => {
          set_name.set(String::new());
          set_slug.set(String::new());
          state.show_toast("Brand saved", ToastLevel::Success);
          reload();
        }
        Err(e) => state.show_toast(&e, ToastLevel::Error),
      }
    });
  };

  let delete_state = state.clone();
  let on_delete = move |id: String| {
    let state = delete_state.clone();
    spawn_local(async move {
      match apiclient::delete_brand(&id).await {
        Ok(_) => {
          state.show_toast("Brand deleted", ToastLevel::Info);
          reload();
        }
        Err(e) => state.show_toast(&e, ToastLevel::Error),
      }
    });
  };

  view! {
    <section class="admin-page">
      <div class="page-header">
        <h2>"Brands"</h2>
      </div>

      <form class="admin-inline-form" on:submit=on_add>
        <input
          type="text"
          class="input"
          placeholder="Name"
          prop:value=name
          on:input=move |ev| set_name.set(event_target_value(&ev))
        />
        <input
          type="text"
          class="input"
          placeholder="slug"
          prop:value=slug
          on:input=move |ev| set_slug.set(event_target_value(&ev))
        />
        <button type="submit" class="btn btn-primary">"Add"</button>
      </form>

      <table class="data-table">
        <thead>
          <tr>
            <th>"Name"</th>
            <th>"Slug"</th>
            <th style="text-align: right">"Actions"</th>
          </tr>
        </thead>
        <tbody>
          <For
            each=move || brands.get()
            key=|b| b.id.clone()
            children=move |b| {
              let id = b.id.clone();
              let on_delete = on_delete.clone();
              view! {
                <tr>
                  <td>{b.name.clone()}</td>
                  <td>{b.slug.clone()}</td>
                  <td style="text-align: right">
                    <button
                      class="btn btn-secondary btn-sm danger"
                      on:click=move |_| on_delete(id.clone())
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
