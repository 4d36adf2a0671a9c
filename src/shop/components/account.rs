//! Account page: profile details and verification state.

use leptos::*;

use super::RequireAuth;
use crate::shop::apiclient;
use crate::shop::state::{AppState, ToastLevel};

#[component]
pub fn AccountPage() -> impl IntoView {
  view! {
    <RequireAuth>
      <AccountInner/>
    </RequireAuth>
  }
}

#[component]
fn AccountInner() -> impl IntoView {
  let state = use_context::<AppState>().expect("AppState not found");
  let auth = state.auth;

  let resend_state = state.clone();
  let on_resend = move |_| {
    let state = resend_state.clone();
    let Some(user) = auth.get().user else {
      return;
    };
    spawn_local(async move {
      match apiclient::resend_verification(&user.email).await {
        Ok(_) => state.show_toast("Verification code sent", ToastLevel::Success),
        Err(e) => state.show_toast(&e, ToastLevel::Error),
      }
    });
  };

  view! {
    <section class="account-page">
      <h2>"Your account"</h2>
      {move || {
        let on_resend = on_resend.clone();
        auth
          .get()
          .user
          .map(|user| {
            let verified = user.email_verified;
            view! {
              <div class="account-card">
                <div class="account-row">
                  <span class="account-label">"Name"</span>
                  <span>{user.display_name.clone()}</span>
                </div>
                <div class="account-row">
                  <span class="account-label">"Email"</span>
                  <span>{user.email.clone()}</span>
                </div>
                <div class="account-row">
                  <span class="account-label">"Role"</span>
                  <span>{user.role.clone()}</span>
                </div>
                <div class="account-row">
                  <span class="account-label">"Email verified"</span>
                  <Show
                    when=move || verified
                    fallback=move || {
                      view! {
                        <span>
                          "Not yet. "
                          <a href="/verify-email">"Enter your code"</a>
                          " or "
                          <button class="btn-ghost" on:click=on_resend.clone()>
                            "resend it"
                          </button>
                        </span>
                      }
                    }
                  >
                    <span>"Yes"</span>
                  </Show>
                </div>
              </div>
            }
          })
      }}
    </section>
  }
}
