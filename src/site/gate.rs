use super::{Role, SiteConfig};

/// Routes a blocked visitor may still reach. Without these a locked-out
/// super admin could never sign in to lift the block.
pub const EXEMPT_PATHS: &[&str] = &["/login", "/register"];

/// Admin shell route; rendered without waiting for the config fetch so the
/// back office stays reachable while the store is degraded.
pub const ADMIN_PATH_PREFIX: &str = "/admin";

/// Terminal rendering decision for the maintenance gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
  /// Configuration fetch still in flight: render the loading placeholder.
  Loading,
  /// Maintenance notice instead of the application tree.
  Blocked,
  /// The full application tree.
  Open,
}

/// Evaluate the gate for the current viewer and route.
///
/// Blocked iff maintenance mode is on, the viewer is not a super admin,
/// and the route is not exempt. Exempt routes skip the gate entirely, even
/// while loading, so the login form is never held behind the spinner.
pub fn evaluate_gate(
  loading: bool,
  config: &SiteConfig,
  role: Option<Role>,
  path: &str,
) -> GateDecision {
  let path = normalize_path(path);

  if EXEMPT_PATHS.contains(&path) {
    return GateDecision::Open;
  }

  if loading && !path.starts_with(ADMIN_PATH_PREFIX) {
    return GateDecision::Loading;
  }

  let elevated = role.map(|r| r.is_super_admin()).unwrap_or(false);
  if config.is_maintenance_mode() && !elevated {
    GateDecision::Blocked
  } else {
    GateDecision::Open
  }
}

fn normalize_path(path: &str) -> &str {
  let trimmed = path.trim_end_matches('/');
  if trimmed.is_empty() {
    "/"
  } else {
    trimmed
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn maintenance_config() -> SiteConfig {
    let mut config = SiteConfig::default();
    config.maintenance_mode = true;
    config
  }

  #[test]
  fn blocks_customers_during_maintenance() {
    let config = maintenance_config();
    assert_eq!(
      evaluate_gate(false, &config, Some(Role::Customer), "/"),
      GateDecision::Blocked
    );
    assert_eq!(
      evaluate_gate(false, &config, None, "/products"),
      GateDecision::Blocked
    );
    assert_eq!(
      evaluate_gate(false, &config, Some(Role::Admin), "/cart"),
      GateDecision::Blocked
    );
  }

  #[test]
  fn super_admin_bypasses_the_gate() {
    let config = maintenance_config();
    assert_eq!(
      evaluate_gate(false, &config, Some(Role::SuperAdmin), "/"),
      GateDecision::Open
    );
  }

  #[test]
  fn login_and_register_are_exempt() {
    let config = maintenance_config();
    assert_eq!(
      evaluate_gate(false, &config, None, "/login"),
      GateDecision::Open
    );
    assert_eq!(
      evaluate_gate(false, &config, None, "/register/"),
      GateDecision::Open
    );
    // Exempt even before the config arrives.
    assert_eq!(
      evaluate_gate(true, &config, None, "/login"),
      GateDecision::Open
    );
  }

  #[test]
  fn loading_shows_placeholder_except_on_admin_routes() {
    let config = SiteConfig::default();
    assert_eq!(
      evaluate_gate(true, &config, None, "/"),
      GateDecision::Loading
    );
    assert_eq!(
      evaluate_gate(true, &config, Some(Role::SuperAdmin), "/admin"),
      GateDecision::Open
    );
    assert_eq!(
      evaluate_gate(true, &config, Some(Role::Admin), "/admin/products"),
      GateDecision::Open
    );
  }

  #[test]
  fn open_when_maintenance_is_off() {
    let config = SiteConfig::default();
    assert_eq!(
      evaluate_gate(false, &config, None, "/"),
      GateDecision::Open
    );
  }
}
