use super::map_sqlx;
use crate::domain::errors::DomainResult;
use crate::domain::user::{AccountToken, AccountTokenKind, AccountTokenRepository, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, postgres::PgExecutor};
use uuid::Uuid;

#[derive(Clone)]
pub struct PostgresAccountTokenRepository {
    pool: PgPool,
}

impl PostgresAccountTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountTokenRepository for PostgresAccountTokenRepository {
    async fn insert(&self, token: AccountToken) -> DomainResult<()> {
        insert_token(&self.pool, &token).await
    }
}

pub(super) async fn insert_token<'c, E>(executor: E, token: &AccountToken) -> DomainResult<()>
where
    E: PgExecutor<'c>,
{
    sqlx::query(
        "INSERT INTO account_tokens (id, user_id, kind, created_at, expires_at)
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(token.id)
    .bind(Uuid::from(token.user_id))
    .bind(token.kind.as_str())
    .bind(token.created_at)
    .bind(token.expires_at)
    .execute(executor)
    .await
    .map_err(map_sqlx)?;

    Ok(())
}

/// Delete the token and return its owner, or `None` when it does not exist
/// or has expired.
pub(super) async fn take_token<'c, E>(
    executor: E,
    kind: AccountTokenKind,
    id: Uuid,
    now: DateTime<Utc>,
) -> DomainResult<Option<UserId>>
where
    E: PgExecutor<'c>,
{
    // Expired rows are deleted as well; they can never be redeemed.
    let row = sqlx::query_as::<_, (Uuid, Option<DateTime<Utc>>)>(
        "DELETE FROM account_tokens WHERE id = $1 AND kind = $2
         RETURNING user_id, expires_at",
    )
    .bind(id)
    .bind(kind.as_str())
    .fetch_optional(executor)
    .await
    .map_err(map_sqlx)?;

    match row {
        Some((_, Some(expires_at))) if expires_at <= now => Ok(None),
        Some((user_id, _)) => Ok(Some(UserId::new(user_id)?)),
        None => Ok(None),
    }
}
