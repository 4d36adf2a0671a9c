//! Footer content editor.

use leptos::*;

use super::super::RequireAdmin;
use crate::shop::apiclient;
use crate::shop::state::{AppState, ToastLevel};
use crate::site::footer::{FooterColumn, FooterLink};

#[component]
pub fn AdminFooter() -> impl IntoView {
  view! {
    <RequireAdmin>
      <FooterInner/>
    </RequireAdmin>
  }
}

#[component]
fn FooterInner() -> impl IntoView {
  let state = use_context::<AppState>().expect("AppState not found");
  let draft = create_rw_signal(state.footer.get_untracked());
  let (saving, set_saving) = create_signal(false);

  // Adopt the fetched record once it lands.
  let footer = state.footer;
  create_effect(move |_| {
    draft.set(footer.get());
  });

  let save_state = state.clone();
  let on_save = move |_| {
    let state = save_state.clone();
    let current = draft.get_untracked();
    set_saving.set(true);
    spawn_local(async move {
      match apiclient::update_footer(&current).await {
        Ok(saved) => {
          state.footer.set(saved);
          state.show_toast("Footer saved", ToastLevel::Success);
        }
        Err(e) => state.show_toast(&e, ToastLevel::Error),
      }
      set_saving.set(false);
    });
  };

  view! {
    <section class="admin-page">
      <div class="page-header">
        <h2>"Footer"</h2>
        <button class="btn btn-primary" on:click=on_save disabled=move || saving.get()>
          {move || if saving.get() { "Saving..." } else { "Save" }}
        </button>
      </div>

      <div class="admin-form">
        <div class="form-row">
          <div class="form-group">
            <label>"About heading"</label>
            <input
              type="text"
              class="input"
              prop:value=move || draft.with(|d| d.about_heading.clone())
              on:input=move |ev| draft.update(|d| d.about_heading = event_target_value(&ev))
            />
          </div>
          <div class="form-group">
            <label>"Copyright line"</label>
            <input
              type="text"
              class="input"
              prop:value=move || draft.with(|d| d.copyright.clone())
              on:input=move |ev| draft.update(|d| d.copyright = event_target_value(&ev))
            />
          </div>
        </div>
        <div class="form-group">
          <label>"About text"</label>
          <textarea
            class="input"
            rows="2"
            prop:value=move || draft.with(|d| d.about_text.clone())
            on:input=move |ev| draft.update(|d| d.about_text = event_target_value(&ev))
          ></textarea>
        </div>
        <div class="form-group">
          <label>"Newsletter blurb"</label>
          <textarea
            class="input"
            rows="2"
            prop:value=move || draft.with(|d| d.newsletter_blurb.clone())
            on:input=move |ev| draft.update(|d| d.newsletter_blurb = event_target_value(&ev))
          ></textarea>
        </div>

        <div class="section-header">
          <h3>"Link columns"</h3>
          <button
            class="btn btn-secondary btn-sm"
            on:click=move |_| draft.update(|d| d.columns.push(FooterColumn::default()))
          >
            "Add column"
          </button>
        </div>

        {move || {
          let column_count = draft.with(|d| d.columns.len());
          (0..column_count)
            .map(|col| {
              view! {
                <div class="footer-column-editor">
                  <div class="form-row">
                    <div class="form-group">
                      <label>"Heading"</label>
                      <input
                        type="text"
                        class="input"
                        prop:value=move || {
                          draft.with(|d| d.columns.get(col).map(|c| c.heading.clone()).unwrap_or_default())
                        }
                        on:input=move |ev| {
                          draft.update(|d| {
                            if let Some(c) = d.columns.get_mut(col) {
                              c.heading = event_target_value(&ev);
                            }
                          })
                        }
                      />
                    </div>
                    <button
                      class="btn btn-secondary btn-sm danger"
                      on:click=move |_| {
                        draft.update(|d| {
                          if col < d.columns.len() {
                            d.columns.remove(col);
                          }
                        })
                      }
                    >
                      "Remove column"
                    </button>
                  </div>

                  {move || {
                    let link_count =
                      draft.with(|d| d.columns.get(col).map(|c| c.links.len()).unwrap_or(0));
                    (0..link_count)
                      .map(|idx| {
                        view! {
                          <div class="form-row footer-link-row">
                            <input
                              type="text"
                              class="input"
                              placeholder="Label"
                              prop:value=move || {
                                draft.with(|d| {
                                  d.columns
                                    .get(col)
                                    .and_then(|c| c.links.get(idx))
                                    .map(|l| l.label.clone())
                                    .unwrap_or_default()
                                })
                              }
                              on:input=move |ev| {
                                draft.update(|d| {
                                  if let Some(l) =
                                    d.columns.get_mut(col).and_then(|c| c.links.get_mut(idx))
                                  {
                                    l.label = event_target_value(&ev);
                                  }
                                })
                              }
                            />
                            <input
                              type="text"
                              class="input"
                              placeholder="/products"
                              prop:value=move || {
                                draft.with(|d| {
                                  d.columns
                                    .get(col)
                                    .and_then(|c| c.links.get(idx))
                                    .map(|l| l.href.clone())
                                    .unwrap_or_default()
                                })
                              }
                              on:input=move |ev| {
                                draft.update(|d| {
                                  if let Some(l) =
                                    d.columns.get_mut(col).and_then(|c| c.links.get_mut(idx))
                                  {
                                    l.href = event_target_value(&ev);
                                  }
                                })
                              }
                            />
                            <button
                              class="btn-ghost"
                              on:click=move |_| {
                                draft.update(|d| {
                                  if let Some(c) = d.columns.get_mut(col) {
                                    if idx < c.links.len() {
                                      c.links.remove(idx);
                                    }
                                  }
                                })
                              }
                            >
                              "×"
                            </button>
                          </div>
                        }
                      })
                      .collect_view()
                  }}

                  <button
                    class="btn-ghost"
                    on:click=move |_| {
                      draft.update(|d| {
                        if let Some(c) = d.columns.get_mut(col) {
                          c.links.push(FooterLink::default());
                        }
                      })
                    }
                  >
                    "Add link"
                  </button>
                </div>
              }
            })
            .collect_view()
        }}
      </div>
    </section>
  }
}
