//! Maintenance gate decision tests.

use wicker::site::gate::{evaluate_gate, GateDecision, EXEMPT_PATHS};
use wicker::site::{Role, SiteConfig};

fn closed() -> SiteConfig {
  let mut config = SiteConfig::default();
  config.maintenance_mode = true;
  config
}

#[test]
fn test_blocked_for_ordinary_viewers() {
  let config = closed();
  for role in [None, Some(Role::Customer), Some(Role::Admin)] {
    assert_eq!(
      evaluate_gate(false, &config, role, "/products"),
      GateDecision::Blocked,
      "{role:?} should be blocked"
    );
  }
}

#[test]
fn test_super_admin_is_exempt() {
  let config = closed();
  assert_eq!(
    evaluate_gate(false, &config, Some(Role::SuperAdmin), "/"),
    GateDecision::Open
  );
  assert_eq!(
    evaluate_gate(false, &config, Some(Role::SuperAdmin), "/checkout"),
    GateDecision::Open
  );
}

#[test]
fn test_login_and_register_bypass_the_gate() {
  let config = closed();
  for path in EXEMPT_PATHS {
    assert_eq!(
      evaluate_gate(false, &config, None, path),
      GateDecision::Open,
      "{path} should bypass"
    );
  }
  // Trailing slash is the same route.
  assert_eq!(
    evaluate_gate(false, &config, None, "/login/"),
    GateDecision::Open
  );
}

#[test]
fn test_loading_placeholder_until_config_arrives() {
  let config = SiteConfig::default();
  assert_eq!(
    evaluate_gate(true, &config, None, "/"),
    GateDecision::Loading
  );
  assert_eq!(
    evaluate_gate(true, &config, Some(Role::Customer), "/products"),
    GateDecision::Loading
  );
}

#[test]
fn test_admin_routes_skip_the_loading_placeholder() {
  let config = SiteConfig::default();
  assert_eq!(
    evaluate_gate(true, &config, Some(Role::SuperAdmin), "/admin"),
    GateDecision::Open
  );
  assert_eq!(
    evaluate_gate(true, &config, Some(Role::Admin), "/admin/orders"),
    GateDecision::Open
  );
}

#[test]
fn test_open_when_store_is_open() {
  let config = SiteConfig::default();
  assert_eq!(evaluate_gate(false, &config, None, "/"), GateDecision::Open);
  assert_eq!(
    evaluate_gate(false, &config, Some(Role::Customer), "/cart"),
    GateDecision::Open
  );
}

#[test]
fn test_blocked_viewer_with_exempt_path_still_loads_while_fetching() {
  // Exemption wins over the loading placeholder so the sign-in form is
  // reachable before the first config fetch resolves.
  let config = closed();
  assert_eq!(
    evaluate_gate(true, &config, None, "/login"),
    GateDecision::Open
  );
}
