//! Site-wide notions shared by the server and the CSR storefront: the
//! configuration record, footer content, viewer roles, and the
//! maintenance gate.

pub mod config;
pub mod footer;
pub mod gate;

pub use config::{SiteConfig, DEFAULT_MAINTENANCE_MESSAGE, KNOWN_FEATURES};
pub use footer::FooterContent;
pub use gate::{evaluate_gate, GateDecision};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Viewer role. Stored with the user record server-side and mirrored into
/// local storage client-side as a UX hint; the server re-checks it on
/// every privileged route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
  #[default]
  Customer,
  Admin,
  SuperAdmin,
}

impl Role {
  pub fn is_admin(&self) -> bool {
    matches!(self, Role::Admin | Role::SuperAdmin)
  }

  pub fn is_super_admin(&self) -> bool {
    matches!(self, Role::SuperAdmin)
  }
}

impl fmt::Display for Role {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      Role::Customer => "customer",
      Role::Admin => "admin",
      Role::SuperAdmin => "super_admin",
    };
    write!(f, "{}", s)
  }
}

impl FromStr for Role {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "customer" => Ok(Role::Customer),
      "admin" => Ok(Role::Admin),
      "super_admin" => Ok(Role::SuperAdmin),
      other => Err(format!("unknown role: {}", other)),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn role_round_trips_through_strings() {
    for role in [Role::Customer, Role::Admin, Role::SuperAdmin] {
      assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
    }
    assert!("owner".parse::<Role>().is_err());
  }

  #[test]
  fn role_privileges() {
    assert!(!Role::Customer.is_admin());
    assert!(Role::Admin.is_admin());
    assert!(!Role::Admin.is_super_admin());
    assert!(Role::SuperAdmin.is_super_admin());
  }
}
