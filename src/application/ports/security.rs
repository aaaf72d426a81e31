// src/application/ports/security.rs
use crate::{application::ApplicationResult, domain::user::UserId};
use async_trait::async_trait;

#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &str) -> ApplicationResult<String>;
    async fn verify(&self, password: &str, expected_hash: &str) -> ApplicationResult<()>;
}

/// Encodes a user id into a tamper-evident cookie value and back.
pub trait SessionCodec: Send + Sync {
    fn encode(&self, user_id: UserId) -> ApplicationResult<String>;
    fn decode(&self, token: &str) -> ApplicationResult<UserId>;
}
