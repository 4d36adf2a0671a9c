//! Email verification: the 6-digit code variant, with resend. The
//! link-in-mail variant never reaches this page - the server handles it
//! and redirects to the login page.

use leptos::*;
use leptos_router::use_navigate;

use super::validate_email;
use crate::shop::apiclient;
use crate::shop::state::{AppState, ToastLevel};

#[component]
pub fn VerifyEmailPage() -> impl IntoView {
  let state = use_context::<AppState>().expect("AppState not found");
  let navigate = use_navigate();

  let (email, set_email) = create_signal(String::new());
  let (code, set_code) = create_signal(String::new());
  let (submitting, set_submitting) = create_signal(false);
  let (error, set_error) = create_signal(Option::<String>::None);

  // Prefill for signed-in users who landed here from the account page.
  let auth = state.auth;
  create_effect(move |_| {
    if let Some(user) = auth.get().user {
      if email.get_untracked().is_empty() {
        set_email.set(user.email);
      }
    }
  });

  let submit_state = state.clone();
  let on_submit = move |ev: web_sys::SubmitEvent| {
    ev.prevent_default();
    set_error.set(None);

    let email_val = email.get().trim().to_lowercase();
    let code_val = code.get().trim().to_string();
    if let Some(msg) = validate_email(&email_val) {
      set_error.set(Some(msg));
      return;
    }
    if code_val.len() != 6 || !code_val.bytes().all(|b| b.is_ascii_digit()) {
      set_error.set(Some("Enter the 6-digit code from your email".to_string()));
      return;
    }

    set_submitting.set(true);
    let state = submit_state.clone();
    let navigate = navigate.clone();
    spawn_local(async move {
      match apiclient::verify_email(&email_val, &code_val).await {
        Ok(_) => {
          state.show_toast("Email verified.", ToastLevel::Success);
          if state.auth.get_untracked().logged_in {
            if let Ok(status) = apiclient::fetch_auth_status().await {
              state.auth.set(status);
            }
            navigate("/account", Default::default());
          } else {
            navigate("/login", Default::default());
          }
        }
        Err(e) => set_error.set(Some(e)),
      }
      set_submitting.set(false);
    });
  };

  let resend_state = state.clone();
  let on_resend = move |_| {
    let email_val = email.get().trim().to_lowercase();
    if let Some(msg) = validate_email(&email_val) {
      set_error.set(Some(msg));
      return;
    }
    let state = resend_state.clone();
    spawn_local(async move {
      match apiclient::resend_verification(&email_val).await {
        Ok(_) => state.show_toast("A new code is on its way.", ToastLevel::Info),
        Err(e) => state.show_toast(&e, ToastLevel::Error),
      }
    });
  };

  view! {
    <div class="auth-page">
      <div class="auth-card">
        <div class="auth-header">
          <h1>"Verify your email"</h1>
          <p class="auth-subtitle">"Enter the 6-digit code we sent you"</p>
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
              autocomplete="email"
              prop:value=email
              on:input=move |ev| set_email.set(event_target_value(&ev))
              disabled=move || submitting.get()
            />
          </div>

          <div class="form-group">
            <label for="code">"Verification code"</label>
            <input
              type="text"
              id="code"
              class="input otp-input"
              placeholder="123456"
              inputmode="numeric"
              maxlength="6"
              prop:value=code
              on:input=move |ev| set_code.set(event_target_value(&ev))
              disabled=move || submitting.get()
            />
          </div>

          <button type="submit" class="btn btn-primary btn-block" disabled=move || submitting.get()>
            {move || if submitting.get() { "Verifying..." } else { "Verify" }}
          </button>
        </form>

        <div class="auth-footer">
          <button class="btn-ghost" on:click=on_resend>
            "Resend the code"
          </button>
        </div>
      </div>
    </div>
  }
}
