// tests/support/mocks/user_repo.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use poker_auth::domain::errors::{DomainError, DomainResult};
use poker_auth::domain::user::{
    AccountToken, AccountTokenKind, Email, NewGuestUser, NewRegisteredUser, PasswordHash, User,
    UserId, UserRepository, UserType,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use super::token_repo::InMemoryTokenRepo;

/// メモリ上のユーザーリポジトリ（メールの一意制約あり）
///
/// 登録やトークン消費はトークンストアと共有し、書き込みが失敗した場合は
/// ユーザー側にも何も残さない。
#[derive(Default)]
pub struct InMemoryUserRepo {
    inner: Mutex<HashMap<UserId, User>>,
    tokens: Arc<InMemoryTokenRepo>,
}

impl InMemoryUserRepo {
    pub fn new(tokens: Arc<InMemoryTokenRepo>) -> Self {
        Self {
            inner: Mutex::default(),
            tokens,
        }
    }

    pub fn get(&self, id: UserId) -> Option<User> {
        self.inner.lock().unwrap().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    pub fn put(&self, user: User) {
        self.inner.lock().unwrap().insert(user.id, user);
    }

    fn email_taken(map: &HashMap<UserId, User>, email: &Email, except: Option<UserId>) -> bool {
        map.values()
            .any(|u| u.email.as_ref() == Some(email) && Some(u.id) != except)
    }

    fn modify(
        &self,
        id: UserId,
        apply: impl FnOnce(&mut User),
    ) -> DomainResult<User> {
        let mut map = self.inner.lock().unwrap();
        let user = map
            .get_mut(&id)
            .ok_or_else(|| DomainError::NotFound("user not found".into()))?;
        apply(user);
        Ok(user.clone())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepo {
    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        Ok(self.get(id))
    }

    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<User>> {
        let map = self.inner.lock().unwrap();
        Ok(map
            .values()
            .find(|u| u.email.as_ref() == Some(email))
            .cloned())
    }

    async fn insert_guest(&self, new_user: NewGuestUser) -> DomainResult<User> {
        let user = User {
            id: new_user.id,
            name: new_user.name,
            email: None,
            password_hash: None,
            user_type: UserType::Guest,
            verified: false,
            created_at: new_user.created_at,
            updated_at: new_user.created_at,
        };
        self.put(user.clone());
        Ok(user)
    }

    async fn insert_registered(&self, new_user: NewRegisteredUser) -> DomainResult<User> {
        let mut map = self.inner.lock().unwrap();
        if Self::email_taken(&map, &new_user.email, None) {
            return Err(DomainError::Conflict("email already registered".into()));
        }
        let user = new_user.into_user();
        map.insert(user.id, user.clone());
        Ok(user)
    }

    async fn register(
        &self,
        new_user: NewRegisteredUser,
        guest_id: Option<UserId>,
        verification: AccountToken,
    ) -> DomainResult<User> {
        let mut map = self.inner.lock().unwrap();
        if Self::email_taken(&map, &new_user.email, guest_id) {
            return Err(DomainError::Conflict("email already registered".into()));
        }
        if let Some(guest_id) = guest_id {
            map.get(&guest_id)
                .filter(|u| u.user_type == UserType::Guest)
                .ok_or_else(|| DomainError::NotFound("guest user not found".into()))?;
        }

        // トークンを先に書き込み、失敗時はユーザーを残さない
        self.tokens.store(verification)?;

        let user = match guest_id.and_then(|id| map.get(&id).cloned()) {
            Some(mut guest) => {
                guest.name = new_user.name;
                guest.email = Some(new_user.email);
                guest.password_hash = new_user.password_hash;
                guest.user_type = UserType::Registered;
                guest.verified = new_user.verified;
                guest.updated_at = new_user.created_at;
                guest
            }
            None => new_user.into_user(),
        };
        map.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_password(
        &self,
        id: UserId,
        password_hash: PasswordHash,
        now: DateTime<Utc>,
    ) -> DomainResult<User> {
        self.modify(id, |user| user.set_password(password_hash, now))
    }

    async fn redeem_password_reset(
        &self,
        reset_id: Uuid,
        password_hash: PasswordHash,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<User>> {
        let Some(user_id) = self.tokens.take(AccountTokenKind::PasswordReset, reset_id, now) else {
            return Ok(None);
        };
        self.modify(user_id, |user| user.set_password(password_hash, now))
            .map(Some)
    }

    async fn redeem_verification(
        &self,
        verify_id: Uuid,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<User>> {
        let Some(user_id) = self.tokens.take(AccountTokenKind::Verification, verify_id, now) else {
            return Ok(None);
        };
        self.modify(user_id, |user| user.verify(now)).map(Some)
    }
}

/// すべての操作が永続化エラーになるリポジトリ
pub struct FailingUserRepo;

fn unavailable<T>() -> DomainResult<T> {
    Err(DomainError::Persistence("connection refused".into()))
}

#[async_trait]
impl UserRepository for FailingUserRepo {
    async fn find_by_id(&self, _id: UserId) -> DomainResult<Option<User>> {
        unavailable()
    }

    async fn find_by_email(&self, _email: &Email) -> DomainResult<Option<User>> {
        unavailable()
    }

    async fn insert_guest(&self, _new_user: NewGuestUser) -> DomainResult<User> {
        unavailable()
    }

    async fn insert_registered(&self, _new_user: NewRegisteredUser) -> DomainResult<User> {
        unavailable()
    }

    async fn register(
        &self,
        _new_user: NewRegisteredUser,
        _guest_id: Option<UserId>,
        _verification: AccountToken,
    ) -> DomainResult<User> {
        unavailable()
    }

    async fn update_password(
        &self,
        _id: UserId,
        _password_hash: PasswordHash,
        _now: DateTime<Utc>,
    ) -> DomainResult<User> {
        unavailable()
    }

    async fn redeem_password_reset(
        &self,
        _reset_id: Uuid,
        _password_hash: PasswordHash,
        _now: DateTime<Utc>,
    ) -> DomainResult<Option<User>> {
        unavailable()
    }

    async fn redeem_verification(
        &self,
        _verify_id: Uuid,
        _now: DateTime<Utc>,
    ) -> DomainResult<Option<User>> {
        unavailable()
    }
}
