// tests/support/mocks/security.rs
use async_trait::async_trait;
use chrono::Duration;
use poker_auth::application::{
    ApplicationResult, error::ApplicationError, ports::security::PasswordHasher,
    ports::time::Clock,
};
use poker_auth::infrastructure::security::session_codec::HmacSessionCodec;
use std::sync::Arc;

/// テスト用のセッション署名鍵（32 バイト）
pub const COOKIE_KEY: &[u8] = b"0123456789abcdef0123456789abcdef";

/// テスト用の平文ハッシュ形式
pub fn plain_hash(password: &str) -> String {
    format!("plain${password}")
}

/// Argon2 を使わない高速なパスワードハッシャー
pub struct PlainPasswordHasher;

#[async_trait]
impl PasswordHasher for PlainPasswordHasher {
    async fn hash(&self, password: &str) -> ApplicationResult<String> {
        if password.is_empty() {
            return Err(ApplicationError::validation("password is required"));
        }
        Ok(plain_hash(password))
    }

    async fn verify(&self, password: &str, expected_hash: &str) -> ApplicationResult<()> {
        if plain_hash(password) == expected_hash {
            Ok(())
        } else {
            Err(ApplicationError::unauthorized("invalid credentials"))
        }
    }
}

/// 本物の HMAC コーデックを固定時計で構築する
pub fn test_session_codec(cookie_name: &str, clock: Arc<dyn Clock>) -> HmacSessionCodec {
    HmacSessionCodec::new(cookie_name, COOKIE_KEY, Duration::days(365), clock)
        .expect("test session codec")
}
