// src/domain/user/repository.rs
use crate::domain::errors::DomainResult;
use crate::domain::user::{
    entity::{NewGuestUser, NewRegisteredUser, User},
    token::AccountToken,
    value_objects::{Email, PasswordHash, UserId},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>>;

    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<User>>;

    async fn insert_guest(&self, new_user: NewGuestUser) -> DomainResult<User>;

    async fn insert_registered(&self, new_user: NewRegisteredUser) -> DomainResult<User>;

    /// Store a registered account together with its verification token in a
    /// single transaction. With `guest_id` set, that guest is upgraded in
    /// place and keeps its id.
    async fn register(
        &self,
        new_user: NewRegisteredUser,
        guest_id: Option<UserId>,
        verification: AccountToken,
    ) -> DomainResult<User>;

    async fn update_password(
        &self,
        id: UserId,
        password_hash: PasswordHash,
        now: DateTime<Utc>,
    ) -> DomainResult<User>;

    /// Consume a password reset token and store the new hash atomically.
    /// `None` when the token is unknown or expired.
    async fn redeem_password_reset(
        &self,
        reset_id: Uuid,
        password_hash: PasswordHash,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<User>>;

    /// Consume a verification token and mark its owner verified atomically.
    async fn redeem_verification(
        &self,
        verify_id: Uuid,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<User>>;
}

#[async_trait]
pub trait AccountTokenRepository: Send + Sync {
    async fn insert(&self, token: AccountToken) -> DomainResult<()>;
}
