//! User role administration (super admin only).

use leptos::*;

use super::super::RequireAdmin;
use crate::shop::apiclient;
use crate::shop::state::{AppState, ToastLevel, UserInfo};

const ROLES: &[&str] = &["customer", "admin", "super_admin"];

#[component]
pub fn AdminUsers() -> impl IntoView {
  view! {
    <RequireAdmin super_only=true>
      <UsersInner/>
    </RequireAdmin>
  }
}

#[component]
fn UsersInner() -> impl IntoView {
  let state = use_context::<AppState>().expect("AppState not found");
  let auth = state.auth;
  let (users, set_users) = create_signal(Vec::<UserInfo>::new());

  let reload = move || {
    spawn_local(async move {
      if let Ok(list) = apiclient::fetch_users().await {
        set_users.set(list);
      }
    });
  };
  create_effect(move |_| reload());

  let role_state = state.clone();
  let on_role = move |id: String, role: String| {
    let state = role_state.clone();
    spawn_local(async move {
      match apiclient::update_user_role(&id, &role).await {
        Ok(_) => {
          state.show_toast("Role updated", ToastLevel::Success);
          reload();
        }
        Err(e) => state.show_toast(&e, ToastLevel::Error),
      }
    });
  };

  view! {
    <section class="admin-page">
      <div class="page-header">
        <h2>"Users"</h2>
      </div>

      <table class="data-table">
        <thead>
          <tr>
            <th>"Name"</th>
            <th>"Email"</th>
            <th>"Verified"</th>
            <th>"Role"</th>
          </tr>
        </thead>
        <tbody>
          <For
            each=move || users.get()
            key=|u| u.id.clone()
            children=move |u| {
              let id = u.id.clone();
              let current = u.role.clone();
              let on_role = on_role.clone();
              let is_self = move || {
                auth.get().user.map(|me| me.id == id).unwrap_or(false)
              };
              let select_id = u.id.clone();
              view! {
                <tr>
                  <td>{u.display_name.clone()}</td>
                  <td>{u.email.clone()}</td>
                  <td>{if u.email_verified { "yes" } else { "no" }}</td>
                  <td>
                    <Show
                      when=move || !is_self()
                      fallback={
                        let current = current.clone();
                        move || view! { <span>{current.clone()} " (you)"</span> }
                      }
                    >
                      <select
                        class="select-small"
                        on:change={
                          let id = select_id.clone();
                          let on_role = on_role.clone();
                          move |ev| on_role(id.clone(), event_target_value(&ev))
                        }
                      >
                        {ROLES
                          .iter()
                          .map(|r| {
                            let selected = *r == current;
                            view! { <option value=*r selected=selected>{*r}</option> }
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
