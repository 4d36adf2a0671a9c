//! Maintenance gate: swaps the whole application tree for a notice while
//! the store is closed, with the decision logic in `site::gate`.

use leptos::*;
use leptos_router::use_location;

use crate::shop::state::AppState;
use crate::site::gate::{evaluate_gate, GateDecision};

#[component]
pub fn MaintenanceGate(children: ChildrenFn) -> impl IntoView {
  let state = use_context::<AppState>().expect("AppState not found");
  let location = use_location();

  let state_decision = state.clone();
  let decision = move || {
    let path = location.pathname.get();
    state_decision.config.with(|config| {
      evaluate_gate(
        state_decision.config_loading.get(),
        config,
        state_decision.viewer_role(),
        &path,
      )
    })
  };

  view! {
    {move || match decision() {
      GateDecision::Loading => view! { <LoadingScreen/> }.into_view(),
      GateDecision::Blocked => view! { <MaintenanceNotice/> }.into_view(),
      GateDecision::Open => children().into_view(),
    }}
  }
}

#[component]
pub fn LoadingScreen() -> impl IntoView {
  view! {
    <div class="loading-screen">
      <div class="loading-spinner"></div>
    </div>
  }
}

#[component]
fn MaintenanceNotice() -> impl IntoView {
  let state = use_context::<AppState>().expect("AppState not found");
  let config = state.config;

  view! {
    <div class="maintenance-notice">
      <div class="maintenance-card">
        <h1>{move || config.with(|c| c.site_name.clone())}</h1>
        <p>{move || config.with(|c| c.maintenance_message().to_string())}</p>
        <p class="text-muted">
          "Store administrators can "
          <a href="/login">"sign in"</a>
          " while the store is closed."
        </p>
      </div>
    </div>
  }
}
