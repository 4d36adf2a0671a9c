//! Password reset: request a code, then exchange it for a new password.

use leptos::*;
use leptos_router::use_navigate;

use super::{validate_email, validate_password};
use crate::shop::apiclient;
use crate::shop::state::{AppState, ToastLevel};

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
  let (email, set_email) = create_signal(String::new());
  let (submitting, set_submitting) = create_signal(false);
  let (sent, set_sent) = create_signal(false);
  let (error, set_error) = create_signal(Option::<String>::None);

  let on_submit = move |ev: web_sys::SubmitEvent| {
    ev.prevent_default();
    set_error.set(None);

    let email_val = email.get().trim().to_lowercase();
    if let Some(msg) = validate_email(&email_val) {
      set_error.set(Some(msg));
      return;
    }

    set_submitting.set(true);
    spawn_local(async move {
      match apiclient::forgot_password(&email_val).await {
        Ok(_) => set_sent.set(true),
        Err(e) => set_error.set(Some(e)),
      }
      set_submitting.set(false);
    });
  };

  view! {
    <div class="auth-page">
      <div class="auth-card">
        <div class="auth-header">
          <h1>"Forgot your password?"</h1>
          <p class="auth-subtitle">"We will email you a reset code"</p>
        </div>

        <Show
          when=move || !sent.get()
          fallback=|| {
            view! {
              <div class="auth-success">
                <p>"If that address has an account, a reset code is on its way."</p>
                <a class="btn btn-primary btn-block" href="/reset-password">
                  "I have my code"
                </a>
              </div>
            }
          }
        >
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

            <button
              type="submit"
              class="btn btn-primary btn-block"
              disabled=move || submitting.get()
            >
              {move || if submitting.get() { "Sending..." } else { "Send reset code" }}
            </button>
          </form>
        </Show>

        <div class="auth-footer">
          <a href="/login">"Back to sign in"</a>
        </div>
      </div>
    </div>
  }
}

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
  let state = use_context::<AppState>().expect("AppState not found");
  let navigate = use_navigate();

  let (email, set_email) = create_signal(String::new());
  let (code, set_code) = create_signal(String::new());
  let (password, set_password) = create_signal(String::new());
  let (confirm_password, set_confirm_password) = create_signal(String::new());
  let (submitting, set_submitting) = create_signal(false);
  let (error, set_error) = create_signal(Option::<String>::None);

  let on_submit = move |ev: web_sys::SubmitEvent| {
    ev.prevent_default();
    set_error.set(None);

    let email_val = email.get().trim().to_lowercase();
    let code_val = code.get().trim().to_string();
    let password_val = password.get();
    let confirm_val = confirm_password.get();

    if let Some(msg) = validate_email(&email_val) {
      set_error.set(Some(msg));
      return;
    }
    if code_val.len() != 6 || !code_val.bytes().all(|b| b.is_ascii_digit()) {
      set_error.set(Some("Enter the 6-digit code from your email".to_string()));
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
      match apiclient::reset_password(&email_val, &code_val, &password_val, &confirm_val).await {
        Ok(_) => {
          state.show_toast("Password updated. Sign in with it now.", ToastLevel::Success);
          navigate("/login", Default::default());
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
          <h1>"Reset your password"</h1>
          <p class="auth-subtitle">"Enter the code from your email"</p>
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
            <label for="code">"Reset code"</label>
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

          <div class="form-group">
            <label for="password">"New password"</label>
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
            <label for="confirm-password">"Confirm new password"</label>
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
            {move || if submitting.get() { "Updating..." } else { "Update password" }}
          </button>
        </form>

        <div class="auth-footer">
          <a href="/forgot-password">"Need a new code?"</a>
        </div>
      </div>
    </div>
  }
}
