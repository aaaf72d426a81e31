// src/infrastructure/repositories/postgres_user.rs
use super::map_sqlx;
use super::postgres_account_token::{insert_token, take_token};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::{
    AccountToken, AccountTokenKind, Email, NewGuestUser, NewRegisteredUser, PasswordHash, User,
    UserId, UserName, UserRepository, UserType,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, postgres::PgExecutor};
use uuid::Uuid;

const USER_COLUMNS: &str =
    "id, name, email, password_hash, user_type, verified, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_one_where(&self, clause: &str, id: Uuid) -> DomainResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE {clause}");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        row.map(User::try_from).transpose()
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: Option<String>,
    password_hash: Option<String>,
    user_type: String,
    verified: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId::new(row.id)?,
            name: UserName::new(row.name)?,
            email: row.email.map(Email::new).transpose()?,
            password_hash: row.password_hash.map(PasswordHash::new).transpose()?,
            user_type: row.user_type.parse::<UserType>()?,
            verified: row.verified,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        self.fetch_one_where("id = $1", id.into()).await
    }

    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        row.map(User::try_from).transpose()
    }

    async fn insert_guest(&self, new_user: NewGuestUser) -> DomainResult<User> {
        let NewGuestUser {
            id,
            name,
            created_at,
        } = new_user;

        let sql = format!(
            "INSERT INTO users (id, name, user_type, verified, created_at, updated_at)
             VALUES ($1, $2, $3, FALSE, $4, $4)
             RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(Uuid::from(id))
            .bind(name.as_str())
            .bind(UserType::Guest.as_str())
            .bind(created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        User::try_from(row)
    }

    async fn insert_registered(&self, new_user: NewRegisteredUser) -> DomainResult<User> {
        write_registered(&self.pool, &new_user).await
    }

    async fn register(
        &self,
        new_user: NewRegisteredUser,
        guest_id: Option<UserId>,
        verification: AccountToken,
    ) -> DomainResult<User> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let user = match guest_id {
            Some(guest_id) => write_upgraded_guest(&mut *tx, guest_id, &new_user).await?,
            None => write_registered(&mut *tx, &new_user).await?,
        };
        insert_token(&mut *tx, &verification).await?;

        tx.commit().await.map_err(map_sqlx)?;
        Ok(user)
    }

    async fn update_password(
        &self,
        id: UserId,
        password_hash: PasswordHash,
        now: DateTime<Utc>,
    ) -> DomainResult<User> {
        write_password(&self.pool, id, &password_hash, now).await
    }

    async fn redeem_password_reset(
        &self,
        reset_id: Uuid,
        password_hash: PasswordHash,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<User>> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let Some(user_id) =
            take_token(&mut *tx, AccountTokenKind::PasswordReset, reset_id, now).await?
        else {
            // Commit so an expired token is still removed.
            tx.commit().await.map_err(map_sqlx)?;
            return Ok(None);
        };
        let user = write_password(&mut *tx, user_id, &password_hash, now).await?;

        tx.commit().await.map_err(map_sqlx)?;
        Ok(Some(user))
    }

    async fn redeem_verification(
        &self,
        verify_id: Uuid,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<User>> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let Some(user_id) =
            take_token(&mut *tx, AccountTokenKind::Verification, verify_id, now).await?
        else {
            tx.commit().await.map_err(map_sqlx)?;
            return Ok(None);
        };
        let user = write_verified(&mut *tx, user_id, now).await?;

        tx.commit().await.map_err(map_sqlx)?;
        Ok(Some(user))
    }
}

async fn write_registered<'c, E>(executor: E, new_user: &NewRegisteredUser) -> DomainResult<User>
where
    E: PgExecutor<'c>,
{
    let sql = format!(
        "INSERT INTO users (id, name, email, password_hash, user_type, verified, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
         RETURNING {USER_COLUMNS}"
    );
    let row = sqlx::query_as::<_, UserRow>(&sql)
        .bind(Uuid::from(new_user.id))
        .bind(new_user.name.as_str())
        .bind(new_user.email.as_str())
        .bind(new_user.password_hash.as_ref().map(PasswordHash::as_str))
        .bind(UserType::Registered.as_str())
        .bind(new_user.verified)
        .bind(new_user.created_at)
        .fetch_one(executor)
        .await
        .map_err(map_sqlx)?;

    User::try_from(row)
}

async fn write_upgraded_guest<'c, E>(
    executor: E,
    guest_id: UserId,
    new_user: &NewRegisteredUser,
) -> DomainResult<User>
where
    E: PgExecutor<'c>,
{
    let sql = format!(
        "UPDATE users
            SET name = $2, email = $3, password_hash = $4, user_type = $5,
                verified = $6, updated_at = $7
          WHERE id = $1 AND user_type = $8
         RETURNING {USER_COLUMNS}"
    );
    let row = sqlx::query_as::<_, UserRow>(&sql)
        .bind(Uuid::from(guest_id))
        .bind(new_user.name.as_str())
        .bind(new_user.email.as_str())
        .bind(new_user.password_hash.as_ref().map(PasswordHash::as_str))
        .bind(UserType::Registered.as_str())
        .bind(new_user.verified)
        .bind(new_user.created_at)
        .bind(UserType::Guest.as_str())
        .fetch_optional(executor)
        .await
        .map_err(map_sqlx)?;

    row.map(User::try_from)
        .transpose()?
        .ok_or_else(|| DomainError::NotFound("guest user not found".into()))
}

async fn write_password<'c, E>(
    executor: E,
    id: UserId,
    password_hash: &PasswordHash,
    now: DateTime<Utc>,
) -> DomainResult<User>
where
    E: PgExecutor<'c>,
{
    let sql = format!(
        "UPDATE users SET password_hash = $2, updated_at = $3 WHERE id = $1
         RETURNING {USER_COLUMNS}"
    );
    let row = sqlx::query_as::<_, UserRow>(&sql)
        .bind(Uuid::from(id))
        .bind(password_hash.as_str())
        .bind(now)
        .fetch_optional(executor)
        .await
        .map_err(map_sqlx)?;

    row.map(User::try_from)
        .transpose()?
        .ok_or_else(|| DomainError::NotFound("user not found".into()))
}

async fn write_verified<'c, E>(executor: E, id: UserId, now: DateTime<Utc>) -> DomainResult<User>
where
    E: PgExecutor<'c>,
{
    let sql = format!(
        "UPDATE users SET verified = TRUE, updated_at = $2 WHERE id = $1
         RETURNING {USER_COLUMNS}"
    );
    let row = sqlx::query_as::<_, UserRow>(&sql)
        .bind(Uuid::from(id))
        .bind(now)
        .fetch_optional(executor)
        .await
        .map_err(map_sqlx)?;

    row.map(User::try_from)
        .transpose()?
        .ok_or_else(|| DomainError::NotFound("user not found".into()))
}
