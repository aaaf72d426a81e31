// src/domain/user/token.rs
use crate::domain::user::value_objects::UserId;
use chrono::{DateTime, Duration, Utc};
use std::fmt;
use uuid::Uuid;

pub const PASSWORD_RESET_TTL_MINUTES: i64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountTokenKind {
    PasswordReset,
    Verification,
}

impl AccountTokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountTokenKind::PasswordReset => "password_reset",
            AccountTokenKind::Verification => "verification",
        }
    }
}

impl fmt::Display for AccountTokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single-use token mailed to a user: password reset links and account
/// verification links.
#[derive(Debug, Clone)]
pub struct AccountToken {
    pub id: Uuid,
    pub user_id: UserId,
    pub kind: AccountTokenKind,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl AccountToken {
    pub fn password_reset(user_id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            kind: AccountTokenKind::PasswordReset,
            created_at: now,
            expires_at: Some(now + Duration::minutes(PASSWORD_RESET_TTL_MINUTES)),
        }
    }

    pub fn verification(user_id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            kind: AccountTokenKind::Verification,
            created_at: now,
            expires_at: None,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }
}
