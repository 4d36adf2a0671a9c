//! Outbound mail behind a trait. The default implementation writes
//! messages to the log; tests capture them in memory.

use async_trait::async_trait;
use std::sync::Arc;

use parking_lot::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub struct OutboundMail {
  pub to: String,
  pub subject: String,
  pub body: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
  async fn send(&self, mail: OutboundMail) -> Result<(), anyhow::Error>;
}

/// Logs every message instead of delivering it.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
  async fn send(&self, mail: OutboundMail) -> Result<(), anyhow::Error> {
    tracing::info!(to = %mail.to, subject = %mail.subject, "outbound mail\n{}", mail.body);
    Ok(())
  }
}

/// Captures messages for assertions.
#[derive(Default)]
pub struct MemoryMailer {
  sent: Mutex<Vec<OutboundMail>>,
}

impl MemoryMailer {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn sent(&self) -> Vec<OutboundMail> {
    self.sent.lock().clone()
  }
}

#[async_trait]
impl Mailer for MemoryMailer {
  async fn send(&self, mail: OutboundMail) -> Result<(), anyhow::Error> {
    self.sent.lock().push(mail);
    Ok(())
  }
}

pub fn verification_mail(to: &str, code: &str) -> OutboundMail {
  OutboundMail {
    to: to.to_string(),
    subject: "Verify your email".into(),
    body: format!(
      "Your verification code is {code}. It expires in 10 minutes.\n\
       If you did not create an account, you can ignore this message."
    ),
  }
}

pub fn password_reset_mail(to: &str, code: &str) -> OutboundMail {
  OutboundMail {
    to: to.to_string(),
    subject: "Reset your password".into(),
    body: format!(
      "Your password reset code is {code}. It expires in 10 minutes.\n\
       If you did not request a reset, you can ignore this message."
    ),
  }
}

pub type SharedMailer = Arc<dyn Mailer>;

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn memory_mailer_captures_messages() {
    let mailer = MemoryMailer::new();
    mailer
      .send(verification_mail("shopper@example.com", "123456"))
      .await
      .unwrap();
    let sent = mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "shopper@example.com");
    assert!(sent[0].body.contains("123456"));
  }
}
