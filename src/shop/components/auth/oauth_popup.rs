//! The popup's side of the OAuth handoff. This page is only ever rendered
//! inside the window that `LoginPage` opened: it publishes the callback
//! outcome on the shared channel, waits for the opener's acknowledgment,
//! and closes. A bounded timeout closes the window even if the opener
//! never answers.

use leptos::*;
use leptos_router::use_query_map;
use std::time::Duration;

use crate::shop::oauth::{self, HandoffMessage, POLL_INTERVAL_MS, POPUP_LINGER_MS};

fn close_window() {
  if let Some(window) = web_sys::window() {
    let _ = window.close();
  }
}

#[component]
pub fn OauthCallbackPage() -> impl IntoView {
  let query = use_query_map();

  let message = query.with_untracked(|q| {
    HandoffMessage::from_callback_params(
      q.get("token").map(String::as_str),
      q.get("error").map(String::as_str),
    )
  });
  let failed = matches!(message, HandoffMessage::Error { .. });
  oauth::publish(&message);

  // Close as soon as the opener acknowledges, or after the linger
  // deadline either way.
  let poll_handle: StoredValue<Option<IntervalHandle>> = store_value(None);
  let handle = set_interval_with_handle(
    move || {
      if oauth::acked() {
        oauth::clear();
        if let Some(h) = poll_handle.get_value() {
          h.clear();
        }
        poll_handle.set_value(None);
        close_window();
      }
    },
    Duration::from_millis(POLL_INTERVAL_MS as u64),
  )
  .ok();
  poll_handle.set_value(handle);

  set_timeout(close_window, Duration::from_millis(POPUP_LINGER_MS as u64));

  view! {
    <div class="auth-page">
      <div class="auth-card oauth-popup">
        <Show
          when=move || !failed
          fallback=|| {
            view! {
              <h2>"Sign-in failed"</h2>
              <p class="text-muted">"You can close this window and try again."</p>
            }
          }
        >
          <div class="loading-spinner"></div>
          <p>"Finishing sign-in..."</p>
          <p class="text-muted">"This window will close by itself."</p>
        </Show>
      </div>
    </div>
  }
}
