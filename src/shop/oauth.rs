//! One-shot handoff channel between the OAuth popup and its opener.
//!
//! The popup lands on `/oauth/callback?token=…` (or `?error=…`), writes a
//! typed message under [`HANDOFF_KEY`], and waits for the opener to write
//! [`ACK_KEY`] before closing; a bounded timeout closes it regardless so a
//! dead opener cannot strand the window. The opener polls for the message,
//! stores the session, acknowledges, and clears the channel.

use serde::{Deserialize, Serialize};

pub const HANDOFF_KEY: &str = "wicker_oauth_handoff";
pub const ACK_KEY: &str = "wicker_oauth_ack";

/// How often each side polls the shared storage area.
pub const POLL_INTERVAL_MS: u32 = 100;
/// Popup closes after this long even without an ack.
pub const POPUP_LINGER_MS: u32 = 5_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum HandoffMessage {
  Success { token: String },
  Error { reason: String },
}

impl HandoffMessage {
  /// Build the message from the callback's query parameters. A missing
  /// token is an error outcome, not a panic.
  pub fn from_callback_params(token: Option<&str>, error: Option<&str>) -> Self {
    match (token, error) {
      (Some(token), _) if !token.is_empty() => HandoffMessage::Success {
        token: token.to_string(),
      },
      (_, Some(reason)) if !reason.is_empty() => HandoffMessage::Error {
        reason: reason.to_string(),
      },
      _ => HandoffMessage::Error {
        reason: "missing_token".to_string(),
      },
    }
  }
}

#[cfg(feature = "csr")]
mod channel {
  use gloo_storage::{LocalStorage, Storage};

  use super::{HandoffMessage, ACK_KEY, HANDOFF_KEY};

  /// Popup side: publish the outcome for the opener to find.
  pub fn publish(message: &HandoffMessage) {
    LocalStorage::delete(ACK_KEY);
    let _ = LocalStorage::set(HANDOFF_KEY, message);
  }

  /// Opener side: take the message if one has arrived, acknowledging it.
  pub fn take() -> Option<HandoffMessage> {
    let message: HandoffMessage = LocalStorage::get(HANDOFF_KEY).ok()?;
    LocalStorage::delete(HANDOFF_KEY);
    let _ = LocalStorage::set(ACK_KEY, &true);
    Some(message)
  }

  /// Popup side: has the opener acknowledged?
  pub fn acked() -> bool {
    LocalStorage::get::<bool>(ACK_KEY).unwrap_or(false)
  }

  /// Either side: clear both keys (stale state from an aborted attempt).
  pub fn clear() {
    LocalStorage::delete(HANDOFF_KEY);
    LocalStorage::delete(ACK_KEY);
  }
}

#[cfg(feature = "csr")]
pub use channel::{acked, clear, publish, take};

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn message_round_trips_as_json() {
    let msg = HandoffMessage::Success {
      token: "session_abc".into(),
    };
    let json = serde_json::to_string(&msg).unwrap();
    assert_eq!(json, r#"{"kind":"success","token":"session_abc"}"#);
    let back: HandoffMessage = serde_json::from_str(&json).unwrap();
    assert_eq!(back, msg);

    let msg = HandoffMessage::Error {
      reason: "denied".into(),
    };
    let json = serde_json::to_string(&msg).unwrap();
    assert_eq!(json, r#"{"kind":"error","reason":"denied"}"#);
  }

  #[test]
  fn callback_params_map_to_outcomes() {
    assert_eq!(
      HandoffMessage::from_callback_params(Some("session_x"), None),
      HandoffMessage::Success {
        token: "session_x".into()
      }
    );
    assert_eq!(
      HandoffMessage::from_callback_params(None, Some("access_denied")),
      HandoffMessage::Error {
        reason: "access_denied".into()
      }
    );
    // Token wins when both are present; empty strings count as absent.
    assert_eq!(
      HandoffMessage::from_callback_params(Some("t"), Some("e")),
      HandoffMessage::Success { token: "t".into() }
    );
    assert_eq!(
      HandoffMessage::from_callback_params(Some(""), None),
      HandoffMessage::Error {
        reason: "missing_token".into()
      }
    );
  }
}
