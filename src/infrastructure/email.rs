//! Outgoing account emails.
//!
//! Messages are composed here and handed to a delivery backend. The only
//! backend shipped is `LogEmailSender`, which writes the message to the log
//! instead of talking to a mail server.
use crate::application::{ApplicationError, ApplicationResult, ports::email::EmailSender};
use async_trait::async_trait;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

pub const TEMPLATE_WELCOME: &str = "welcome";
pub const TEMPLATE_FORGOT_PASSWORD: &str = "forgot_password";
pub const TEMPLATE_PASSWORD_RESET: &str = "password_reset";
pub const TEMPLATE_PASSWORD_UPDATE: &str = "password_update";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmailMessage {
    pub to_email: String,
    pub template: &'static str,
    pub payload_json: String,
}

/// Builds message payloads with links back into the frontend.
#[derive(Clone, Debug)]
pub struct EmailComposer {
    app_url: String,
}

impl EmailComposer {
    pub fn new(app_url: impl Into<String>) -> Self {
        let mut app_url = app_url.into();
        if !app_url.ends_with('/') {
            app_url.push('/');
        }
        Self { app_url }
    }

    pub fn welcome(&self, name: &str, email: &str, verify_id: Uuid) -> ApplicationResult<EmailMessage> {
        let link = format!("{}verify-account/{verify_id}", self.app_url);
        message(
            email,
            TEMPLATE_WELCOME,
            json!({ "name": name, "verifyLink": link }),
        )
    }

    pub fn forgot_password(
        &self,
        name: &str,
        email: &str,
        reset_id: Uuid,
    ) -> ApplicationResult<EmailMessage> {
        let link = format!("{}reset-password/{reset_id}", self.app_url);
        message(
            email,
            TEMPLATE_FORGOT_PASSWORD,
            json!({ "name": name, "resetLink": link, "expiresInMinutes": 60 }),
        )
    }

    pub fn password_reset(&self, name: &str, email: &str) -> ApplicationResult<EmailMessage> {
        let link = format!("{}login", self.app_url);
        message(
            email,
            TEMPLATE_PASSWORD_RESET,
            json!({ "name": name, "loginLink": link }),
        )
    }

    pub fn password_update(&self, name: &str, email: &str) -> ApplicationResult<EmailMessage> {
        let link = format!("{}forgot-password", self.app_url);
        message(
            email,
            TEMPLATE_PASSWORD_UPDATE,
            json!({ "name": name, "forgotPasswordLink": link }),
        )
    }
}

fn message(
    to_email: &str,
    template: &'static str,
    payload: serde_json::Value,
) -> ApplicationResult<EmailMessage> {
    let payload_json = serde_json::to_string(&payload).map_err(|err| {
        ApplicationError::infrastructure(format!("failed to encode email payload: {err}"))
    })?;
    Ok(EmailMessage {
        to_email: to_email.to_string(),
        template,
        payload_json,
    })
}

/// Local dev sender that logs the payload instead of sending real email.
#[derive(Clone, Debug)]
pub struct LogEmailSender {
    composer: EmailComposer,
}

impl LogEmailSender {
    pub fn new(app_url: impl Into<String>) -> Self {
        Self {
            composer: EmailComposer::new(app_url),
        }
    }

    fn deliver(&self, message: EmailMessage) -> ApplicationResult<()> {
        info!(
            to_email = %message.to_email,
            template = message.template,
            payload = %message.payload_json,
            "email send stub"
        );
        Ok(())
    }
}

#[async_trait]
impl EmailSender for LogEmailSender {
    async fn send_welcome(&self, name: &str, email: &str, verify_id: Uuid) -> ApplicationResult<()> {
        self.deliver(self.composer.welcome(name, email, verify_id)?)
    }

    async fn send_forgot_password(
        &self,
        name: &str,
        email: &str,
        reset_id: Uuid,
    ) -> ApplicationResult<()> {
        self.deliver(self.composer.forgot_password(name, email, reset_id)?)
    }

    async fn send_password_reset(&self, name: &str, email: &str) -> ApplicationResult<()> {
        self.deliver(self.composer.password_reset(name, email)?)
    }

    async fn send_password_update(&self, name: &str, email: &str) -> ApplicationResult<()> {
        self.deliver(self.composer.password_update(name, email)?)
    }
}
