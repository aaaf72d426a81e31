// tests/support/mocks/token_repo.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use poker_auth::domain::errors::{DomainError, DomainResult};
use poker_auth::domain::user::{AccountToken, AccountTokenKind, AccountTokenRepository, UserId};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

/// メモリ上のワンタイムトークンストア（書き込み失敗を切り替え可能）
#[derive(Default)]
pub struct InMemoryTokenRepo {
    inner: Mutex<HashMap<Uuid, AccountToken>>,
    fail_writes: AtomicBool,
}

impl InMemoryTokenRepo {
    pub fn tokens_for(&self, user_id: UserId, kind: AccountTokenKind) -> Vec<AccountToken> {
        self.inner
            .lock()
            .unwrap()
            .values()
            .filter(|t| t.user_id == user_id && t.kind == kind)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    /// 以降の書き込みを永続化エラーにする
    pub fn set_failing(&self, failing: bool) {
        self.fail_writes.store(failing, Ordering::SeqCst);
    }

    pub fn store(&self, token: AccountToken) -> DomainResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::Persistence("token store unavailable".into()));
        }
        self.inner.lock().unwrap().insert(token.id, token);
        Ok(())
    }

    /// トークンを削除して所有者を返す（期限切れなら None）
    pub fn take(&self, kind: AccountTokenKind, id: Uuid, now: DateTime<Utc>) -> Option<UserId> {
        let mut map = self.inner.lock().unwrap();
        if map.get(&id).map(|t| t.kind) != Some(kind) {
            return None;
        }
        map.remove(&id)
            .filter(|token| !token.is_expired(now))
            .map(|token| token.user_id)
    }
}

#[async_trait]
impl AccountTokenRepository for InMemoryTokenRepo {
    async fn insert(&self, token: AccountToken) -> DomainResult<()> {
        self.store(token)
    }
}
