//! Registration page.

use leptos::*;
use leptos_router::use_navigate;

use super::{validate_email, validate_password};
use crate::shop::apiclient;
use crate::shop::state::{AppState, ToastLevel};

#[component]
pub fn RegisterPage() -> impl IntoView {
  let state = use_context::<AppState>().expect("AppState not found");
  let navigate = use_navigate();

  let (email, set_email) = create_signal(String::new());
  let (name, set_name) = create_signal(String::new());
  let (password, set_password) = create_signal(String::new());
  let (confirm_password, set_confirm_password) = create_signal(String::new());
  let (submitting, set_submitting) = create_signal(false);
  let (error, set_error) = create_signal(Option::<String>::None);

  let on_submit = move |ev: web_sys::SubmitEvent| {
    ev.prevent_default();
    set_error.set(None);

    let email_val = email.get().trim().to_lowercase();
    let name_val = name.get().trim().to_string();
    let password_val = password.get();
    let confirm_val = confirm_password.get();

    if let Some(msg) = validate_email(&email_val) {
      set_error.set(Some(msg));
      return;
    }
    if name_val.len() < 2 {
      set_error.set(Some("Name must be at least 2 characters".to_string()));
      return;
    }
    if let Some(msg) = validate_password(&password_val, &confirm_val) {
      set_error.set(Some(msg));
      return;
    }

    set_submitting.set(true);
    let state = state.clone();
    let navigate = navigate.clone();
    spawn_local(async move {
      match apiclient::register(&email_val, &name_val, &password_val, &confirm_val).await {
        Ok(_) => {
          state.show_toast(
            "Account created. Check your email for a verification code.",
            ToastLevel::Success,
          );
          navigate("/verify-email", Default::default());
        }
        Err(e) => set_error.set(Some(e)),
      }
      set_submitting.set(false);
    });
  };

  view! {
    <div class="auth-page">
      <div class="auth-card">
        <div class="auth-header">
          <h1>"Create an account"</h1>
          <p class="auth-subtitle">"Track orders and save your wishlist"</p>
        </div>

        <form class="auth-form" on:submit=on_submit>
          <Show when=move || error.get().is_some()>
            <div class="auth-error">{move || error.get().unwrap_or_default()}</div>
          </Show>

          <div class="form-group">
            <label for="email">"Email"</label>
            <input
              type="email"
              id="email"
              class="input"
              placeholder="you@example.com"
              autocomplete="email"
              prop:value=email
              on:input=move |ev| set_email.set(event_target_value(&ev))
              disabled=move || submitting.get()
            />
          </div>

          <div class="form-group">
            <label for="name">"Name"</label>
            <input
              type="text"
              id="name"
              class="input"
              autocomplete="name"
              prop:value=name
              on:input=move |ev| set_name.set(event_target_value(&ev))
              disabled=move || submitting.get()
            />
          </div>

          <div class="form-group">
            <label for="password">"Password"</label>
            <input
              type="password"
              id="password"
              class="input"
              placeholder="At least 8 characters"
              autocomplete="new-password"
              prop:value=password
              on:input=move |ev| set_password.set(event_target_value(&ev))
              disabled=move || submitting.get()
            />
          </div>

          <div class="form-group">
            <label for="confirm-password">"Confirm password"</label>
            <input
              type="password"
              id="confirm-password"
              class="input"
              autocomplete="new-password"
              prop:value=confirm_password
              on:input=move |ev| set_confirm_password.set(event_target_value(&ev))
              disabled=move || submitting.get()
            />
          </div>

          <button type="submit" class="btn btn-primary btn-block" disabled=move || submitting.get()>
            {move || if submitting.get() { "Creating account..." } else { "Create account" }}
          </button>
        </form>

        <div class="auth-footer">
          <p class="text-muted">
            "Already have an account? " <a href="/login">"Sign in"</a>
          </p>
        </div>
      </div>
    </div>
  }
}
