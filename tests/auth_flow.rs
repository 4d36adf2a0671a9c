//! End-to-end auth flows at the service level: real hashing, real
//! backend, log-free mail capture.

use chrono::{Duration, Utc};

use wicker::db::{OtpPurpose, SqliteBackend, StoreBackend};
use wicker::mail::{verification_mail, Mailer, MemoryMailer};
use wicker::server::auth;
use wicker::site::Role;

#[tokio::test]
async fn test_register_verify_login_flow() {
  let backend = SqliteBackend::in_memory().await.unwrap();
  backend.init_schema().await.unwrap();
  let mailer = MemoryMailer::new();

  // Register: store the hash, issue a verification code, send the mail.
  let password_hash = auth::hash_password("correct horse battery").unwrap();
  let user = backend
    .create_user("shopper@example.com", "Shopper", &password_hash, Role::Customer, false)
    .await
    .unwrap();
  let code = auth::generate_otp();
  backend
    .upsert_otp(
      user.id,
      OtpPurpose::VerifyEmail,
      &auth::hash_otp(&code),
      Utc::now() + Duration::minutes(10),
    )
    .await
    .unwrap();
  mailer.send(verification_mail(&user.email, &code)).await.unwrap();

  // The mail carries the code the user will type back.
  let sent = mailer.sent();
  assert_eq!(sent.len(), 1);
  assert!(sent[0].body.contains(&code));

  // Verify: consume the code exactly once, flip the flag.
  assert!(backend
    .consume_otp(user.id, OtpPurpose::VerifyEmail, &auth::hash_otp(&code))
    .await
    .unwrap());
  backend.set_email_verified(user.id, true).await.unwrap();
  assert!(!backend
    .consume_otp(user.id, OtpPurpose::VerifyEmail, &auth::hash_otp(&code))
    .await
    .unwrap());

  // Login: verify the password, mint a session, resolve it back.
  let (found, stored_hash) = backend
    .get_user_by_email("shopper@example.com")
    .await
    .unwrap()
    .unwrap();
  assert!(auth::verify_password("correct horse battery", &stored_hash));
  assert!(!auth::verify_password("wrong", &stored_hash));

  let token = auth::generate_session_token();
  backend
    .create_session(found.id, &auth::hash_session_token(&token), Utc::now() + Duration::days(30))
    .await
    .unwrap();
  let (_, resolved) = backend
    .validate_session(&auth::hash_session_token(&token))
    .await
    .unwrap()
    .unwrap();
  assert_eq!(resolved.id, user.id);
  assert!(resolved.email_verified);
}

#[tokio::test]
async fn test_password_reset_flow() {
  let backend = SqliteBackend::in_memory().await.unwrap();
  backend.init_schema().await.unwrap();

  let old_hash = auth::hash_password("old password 1").unwrap();
  let user = backend
    .create_user("forgetful@example.com", "F", &old_hash, Role::Customer, true)
    .await
    .unwrap();

  let code = auth::generate_otp();
  backend
    .upsert_otp(
      user.id,
      OtpPurpose::ResetPassword,
      &auth::hash_otp(&code),
      Utc::now() + Duration::minutes(10),
    )
    .await
    .unwrap();

  assert!(backend
    .consume_otp(user.id, OtpPurpose::ResetPassword, &auth::hash_otp(&code))
    .await
    .unwrap());
  let new_hash = auth::hash_password("new password 1").unwrap();
  backend.update_user_password(user.id, &new_hash).await.unwrap();

  let (_, stored) = backend
    .get_user_by_email("forgetful@example.com")
    .await
    .unwrap()
    .unwrap();
  assert!(auth::verify_password("new password 1", &stored));
  assert!(!auth::verify_password("old password 1", &stored));
}
