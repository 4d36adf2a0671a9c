//! Google authorization-code exchange. The storefront popup never sees
//! provider credentials; it only receives the session token (or an error
//! reason) as a query parameter on the callback redirect.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::config::GoogleOauthSection;

/// Errors from the provider exchange, kept typed so the callback handler
/// can log the cause while redirecting the popup with a terse reason.
#[derive(Debug, Error)]
pub enum OauthError {
  #[error("HTTP error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("provider answered {0}")]
  Status(reqwest::StatusCode),

  #[error("provider returned no email address")]
  MissingEmail,
}

#[derive(Debug, Serialize)]
struct TokenExchangeRequest<'a> {
  grant_type: &'a str,
  code: &'a str,
  client_id: &'a str,
  client_secret: &'a str,
  redirect_uri: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenExchangeResponse {
  access_token: String,
  #[allow(unused)]
  token_type: Option<String>,
  #[allow(unused)]
  expires_in: Option<u64>,
}

/// Identity claims the storefront cares about.
#[derive(Debug, Clone, Deserialize)]
pub struct OauthIdentity {
  pub email: String,
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default)]
  pub email_verified: Option<bool>,
}

/// Build the provider authorize URL the login button redirects to.
pub fn authorize_url(google: &GoogleOauthSection, redirect_uri: &str) -> String {
  format!(
    "{}?client_id={}&redirect_uri={}&response_type=code&scope=openid%20email%20profile",
    google.auth_url,
    urlencode(&google.client_id),
    urlencode(redirect_uri)
  )
}

/// Exchange the authorization code, then fetch the user's identity.
pub async fn exchange_code(
  google: &GoogleOauthSection,
  code: &str,
  redirect_uri: &str,
) -> Result<OauthIdentity, OauthError> {
  let client = reqwest::Client::new();

  let request = TokenExchangeRequest {
    grant_type: "authorization_code",
    code,
    client_id: &google.client_id,
    client_secret: &google.client_secret,
    redirect_uri,
  };

  tracing::debug!("Exchanging OAuth authorization code");

  let response = client.post(&google.token_url).form(&request).send().await?;
  if !response.status().is_success() {
    return Err(OauthError::Status(response.status()));
  }
  let token: TokenExchangeResponse = response.json().await?;

  let response = client
    .get(&google.userinfo_url)
    .bearer_auth(&token.access_token)
    .send()
    .await?;
  if !response.status().is_success() {
    return Err(OauthError::Status(response.status()));
  }
  let identity: OauthIdentity = response.json().await?;

  if identity.email.is_empty() {
    return Err(OauthError::MissingEmail);
  }

  Ok(identity)
}

/// Minimal percent-encoding for query components.
pub(crate) fn urlencode(value: &str) -> String {
  let mut out = String::with_capacity(value.len());
  for b in value.bytes() {
    match b {
      b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => out.push(b as char),
      _ => out.push_str(&format!("%{:02X}", b)),
    }
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn authorize_url_encodes_redirect() {
    let google = GoogleOauthSection {
      client_id: "abc123".into(),
      client_secret: "secret".into(),
      ..Default::default()
    };
    let url = authorize_url(&google, "http://localhost:8080/api/auth/oauth/google/callback");
    assert!(url.starts_with("https://accounts.google.com/o/oauth2/v2/auth?client_id=abc123"));
    assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A8080%2Fapi%2Fauth%2Foauth%2Fgoogle%2Fcallback"));
    assert!(url.ends_with("scope=openid%20email%20profile"));
  }

  #[test]
  fn urlencode_passes_unreserved() {
    assert_eq!(urlencode("AZaz09-_.~"), "AZaz09-_.~");
    assert_eq!(urlencode("a b&c"), "a%20b%26c");
  }
}
