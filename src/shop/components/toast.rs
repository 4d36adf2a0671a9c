//! Toast notifications.

use gloo_timers::callback::Timeout;
use leptos::*;

use super::Icon;
use crate::shop::state::{AppState, ToastLevel};

const AUTO_DISMISS_MS: u32 = 4_000;

#[component]
pub fn ToastContainer() -> impl IntoView {
  let state = use_context::<AppState>().expect("AppState not found");
  let toasts = state.toasts;

  view! {
    <div class="toast-container">
      <For
        each=move || toasts.get()
        key=|t| t.id
        children=move |toast| {
          let state = use_context::<AppState>().expect("AppState not found");
          let id = toast.id;
          let level = toast.level.clone();

          // Errors stay until dismissed; everything else fades out.
          if level != ToastLevel::Error {
            let state_timeout = state.clone();
            Timeout::new(AUTO_DISMISS_MS, move || {
              state_timeout.remove_toast(id);
            })
            .forget();
          }

          view! {
            <div class=format!("toast show {}", level_class(&level))>
              <Icon name=level_icon(&level) size=18/>
              <span class="toast-message">{toast.message.clone()}</span>
              <button class="toast-close btn-ghost" on:click=move |_| state.remove_toast(id)>
                <Icon name="x" size=16/>
              </button>
            </div>
          }
        }
      />
    </div>
  }
}

fn level_class(level: &ToastLevel) -> &'static str {
  match level {
    ToastLevel::Info => "info",
    ToastLevel::Success => "success",
    ToastLevel::Warning => "warning",
    ToastLevel::Error => "error",
  }
}

fn level_icon(level: &ToastLevel) -> &'static str {
  match level {
    ToastLevel::Info => "info",
    ToastLevel::Success => "check-circle",
    ToastLevel::Warning => "alert-triangle",
    ToastLevel::Error => "alert-circle",
  }
}
