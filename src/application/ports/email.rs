// src/application/ports/email.rs
use crate::application::ApplicationResult;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send_welcome(&self, name: &str, email: &str, verify_id: Uuid) -> ApplicationResult<()>;

    async fn send_forgot_password(
        &self,
        name: &str,
        email: &str,
        reset_id: Uuid,
    ) -> ApplicationResult<()>;

    async fn send_password_reset(&self, name: &str, email: &str) -> ApplicationResult<()>;

    async fn send_password_update(&self, name: &str, email: &str) -> ApplicationResult<()>;
}
