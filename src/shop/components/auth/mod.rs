//! Authentication pages

mod forgot;
mod login;
mod oauth_popup;
mod register;
mod verify;

pub use forgot::{ForgotPasswordPage, ResetPasswordPage};
pub use login::LoginPage;
pub use oauth_popup::OauthCallbackPage;
pub use register::RegisterPage;
pub use verify::VerifyEmailPage;

/// Client-side field checks, run before any network call. The server
/// repeats them; these only exist for inline feedback.
pub(crate) fn validate_email(email: &str) -> Option<String> {
  let email = email.trim();
  if email.is_empty() {
    return Some("Email is required".to_string());
  }
  let mut parts = email.split('@');
  match (parts.next(), parts.next(), parts.next()) {
    (Some(local), Some(domain), None) if !local.is_empty() && domain.contains('.') => None,
    _ => Some("Enter a valid email address".to_string()),
  }
}

pub(crate) fn validate_password(password: &str, confirm: &str) -> Option<String> {
  if password.len() < 8 {
    return Some("Password must be at least 8 characters".to_string());
  }
  if password != confirm {
    return Some("Passwords do not match".to_string());
  }
  None
}
