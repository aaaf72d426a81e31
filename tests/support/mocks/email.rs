// tests/support/mocks/email.rs
use async_trait::async_trait;
use poker_auth::application::{ApplicationResult, error::ApplicationError, ports::email::EmailSender};
use std::sync::Mutex;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentEmail {
    Welcome { email: String, verify_id: Uuid },
    ForgotPassword { email: String, reset_id: Uuid },
    PasswordReset { email: String },
    PasswordUpdate { email: String },
}

/// 送信内容を記録するメール送信モック
#[derive(Default)]
pub struct CapturingEmailSender {
    sent: Mutex<Vec<SentEmail>>,
}

impl CapturingEmailSender {
    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }

    fn record(&self, email: SentEmail) -> ApplicationResult<()> {
        self.sent.lock().unwrap().push(email);
        Ok(())
    }
}

#[async_trait]
impl EmailSender for CapturingEmailSender {
    async fn send_welcome(&self, _name: &str, email: &str, verify_id: Uuid) -> ApplicationResult<()> {
        self.record(SentEmail::Welcome {
            email: email.to_string(),
            verify_id,
        })
    }

    async fn send_forgot_password(
        &self,
        _name: &str,
        email: &str,
        reset_id: Uuid,
    ) -> ApplicationResult<()> {
        self.record(SentEmail::ForgotPassword {
            email: email.to_string(),
            reset_id,
        })
    }

    async fn send_password_reset(&self, _name: &str, email: &str) -> ApplicationResult<()> {
        self.record(SentEmail::PasswordReset {
            email: email.to_string(),
        })
    }

    async fn send_password_update(&self, _name: &str, email: &str) -> ApplicationResult<()> {
        self.record(SentEmail::PasswordUpdate {
            email: email.to_string(),
        })
    }
}

/// 常に失敗するメール送信モック
pub struct FailingEmailSender;

#[async_trait]
impl EmailSender for FailingEmailSender {
    async fn send_welcome(&self, _: &str, _: &str, _: Uuid) -> ApplicationResult<()> {
        Err(ApplicationError::infrastructure("smtp unavailable"))
    }

    async fn send_forgot_password(&self, _: &str, _: &str, _: Uuid) -> ApplicationResult<()> {
        Err(ApplicationError::infrastructure("smtp unavailable"))
    }

    async fn send_password_reset(&self, _: &str, _: &str) -> ApplicationResult<()> {
        Err(ApplicationError::infrastructure("smtp unavailable"))
    }

    async fn send_password_update(&self, _: &str, _: &str) -> ApplicationResult<()> {
        Err(ApplicationError::infrastructure("smtp unavailable"))
    }
}
