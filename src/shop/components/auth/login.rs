//! Sign-in page, including the Google popup flow.

use leptos::*;
use leptos_router::{use_navigate, use_query_map};
use std::time::Duration;

use super::validate_email;
use crate::shop::apiclient;
use crate::shop::oauth::{self, HandoffMessage, POLL_INTERVAL_MS};
use crate::shop::state::{AppState, ToastLevel};

/// Give up polling for the popup outcome after two minutes.
const MAX_POLLS: u32 = 1200;

#[component]
pub fn LoginPage() -> impl IntoView {
  let state = use_context::<AppState>().expect("AppState not found");
  let navigate = use_navigate();
  let query = use_query_map();

  let (email, set_email) = create_signal(String::new());
  let (password, set_password) = create_signal(String::new());
  let (submitting, set_submitting) = create_signal(false);
  let (error, set_error) = create_signal(Option::<String>::None);

  // Landed here from the verification link in the mail.
  let verified_state = state.clone();
  create_effect(move |_| {
    match query.with(|q| q.get("verified").cloned()).as_deref() {
      Some("1") => verified_state.show_toast("Email verified. Sign in below.", ToastLevel::Success),
      Some("0") => {
        verified_state.show_toast("That verification link has expired.", ToastLevel::Warning)
      }
      _ => {}
    }
  });

  let submit_state = state.clone();
  let submit_navigate = navigate.clone();
  let on_submit = move |ev: web_sys::SubmitEvent| {
    ev.prevent_default();
    set_error.set(None);

    let email_val = email.get().trim().to_lowercase();
    if let Some(msg) = validate_email(&email_val) {
      set_error.set(Some(msg));
      return;
    }
    if password.get().is_empty() {
      set_error.set(Some("Password is required".to_string()));
      return;
    }

    set_submitting.set(true);
    let state = submit_state.clone();
    let navigate = submit_navigate.clone();
    let password_val = password.get();
    spawn_local(async move {
      match apiclient::login(&email_val, &password_val).await {
        Ok(resp) => {
          if let Ok(status) = apiclient::fetch_auth_status().await {
            state.auth.set(status);
          }
          state.show_toast(&format!("Welcome back, {}", resp.user.display_name), ToastLevel::Success);
          navigate("/", Default::default());
        }
        Err(e) => set_error.set(Some(e)),
      }
      set_submitting.set(false);
    });
  };

  // Google popup: open the window, then poll the handoff channel until a
  // message arrives or polling times out.
  let poll_handle: StoredValue<Option<IntervalHandle>> = store_value(None);
  let poll_count = store_value(0u32);
  let social_state = state.clone();
  let social_navigate = navigate.clone();
  let on_google = move |_| {
    let state = social_state.clone();
    let navigate = social_navigate.clone();

    oauth::clear();
    let Some(window) = web_sys::window() else {
      return;
    };
    let opened = window
      .open_with_url_and_target_and_features(
        "/api/auth/oauth/google",
        "wicker_oauth",
        "width=480,height=640",
      )
      .ok()
      .flatten();
    if opened.is_none() {
      state.show_toast("Allow popups to sign in with Google", ToastLevel::Warning);
      return;
    }

    if poll_handle.get_value().is_some() {
      return;
    }
    poll_count.set_value(0);
    let handle = set_interval_with_handle(
      move || {
        let stop = |poll_handle: StoredValue<Option<IntervalHandle>>| {
          if let Some(h) = poll_handle.get_value() {
            h.clear();
          }
          poll_handle.set_value(None);
        };

        poll_count.update_value(|c| *c += 1);
        if poll_count.get_value() > MAX_POLLS {
          stop(poll_handle);
          return;
        }

        match oauth::take() {
          Some(HandoffMessage::Success { token }) => {
            stop(poll_handle);
            apiclient::set_stored_token(&token);
            let state = state.clone();
            let navigate = navigate.clone();
            spawn_local(async move {
              match apiclient::fetch_auth_status().await {
                Ok(status) => {
                  if let Some(user) = &status.user {
                    apiclient::set_stored_role(&user.role);
                  }
                  state.auth.set(status);
                  state.show_toast("Signed in with Google", ToastLevel::Success);
                  navigate("/", Default::default());
                }
                Err(e) => state.show_toast(&e, ToastLevel::Error),
              }
            });
          }
          Some(HandoffMessage::Error { reason }) => {
            stop(poll_handle);
            state.show_toast(&format!("Google sign-in failed: {}", reason), ToastLevel::Error);
          }
          None => {}
        }
      },
      Duration::from_millis(POLL_INTERVAL_MS as u64),
    )
    .ok();
    poll_handle.set_value(handle);
  };

  let social_visible = state.clone();

  view! {
    <div class="auth-page">
      <div class="auth-card">
        <div class="auth-header">
          <h1>"Sign in"</h1>
          <p class="auth-subtitle">"Welcome back"</p>
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
            <label for="password">"Password"</label>
            <input
              type="password"
              id="password"
              class="input"
              autocomplete="current-password"
              prop:value=password
              on:input=move |ev| set_password.set(event_target_value(&ev))
              disabled=move || submitting.get()
            />
          </div>

          <button type="submit" class="btn btn-primary btn-block" disabled=move || submitting.get()>
            {move || if submitting.get() { "Signing in..." } else { "Sign in" }}
          </button>
        </form>

        <Show when=move || social_visible.is_feature_enabled("social_login")>
          <div class="auth-divider">"or"</div>
          <button class="btn btn-secondary btn-block" on:click=on_google.clone()>
            "Continue with Google"
          </button>
        </Show>

        <div class="auth-footer">
          <a href="/forgot-password">"Forgot your password?"</a>
          <p class="text-muted">
            "New here? " <a href="/register">"Create an account"</a>
          </p>
        </div>
      </div>
    </div>
  }
}
