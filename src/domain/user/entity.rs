// src/domain/user/entity.rs
use crate::domain::user::value_objects::{Email, PasswordHash, UserId, UserName, UserType};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: UserName,
    pub email: Option<Email>,
    pub password_hash: Option<PasswordHash>,
    pub user_type: UserType,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_guest(&self) -> bool {
        self.user_type == UserType::Guest
    }

    pub fn set_password(&mut self, password_hash: PasswordHash, now: DateTime<Utc>) {
        self.password_hash = Some(password_hash);
        self.updated_at = now;
    }

    pub fn verify(&mut self, now: DateTime<Utc>) {
        self.verified = true;
        self.updated_at = now;
    }
}

#[derive(Debug, Clone)]
pub struct NewGuestUser {
    pub id: UserId,
    pub name: UserName,
    pub created_at: DateTime<Utc>,
}

impl NewGuestUser {
    pub fn new(name: UserName, created_at: DateTime<Utc>) -> Self {
        Self {
            id: UserId::generate(),
            name,
            created_at,
        }
    }
}

/// A registered account. Directory-provisioned users carry no local password
/// and start out verified.
#[derive(Debug, Clone)]
pub struct NewRegisteredUser {
    pub id: UserId,
    pub name: UserName,
    pub email: Email,
    pub password_hash: Option<PasswordHash>,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

impl NewRegisteredUser {
    pub fn with_password(
        name: UserName,
        email: Email,
        password_hash: PasswordHash,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: UserId::generate(),
            name,
            email,
            password_hash: Some(password_hash),
            verified: false,
            created_at,
        }
    }

    pub fn from_directory(name: UserName, email: Email, created_at: DateTime<Utc>) -> Self {
        Self {
            id: UserId::generate(),
            name,
            email,
            password_hash: None,
            verified: true,
            created_at,
        }
    }

    pub fn into_user(self) -> User {
        User {
            id: self.id,
            name: self.name,
            email: Some(self.email),
            password_hash: self.password_hash,
            user_type: UserType::Registered,
            verified: self.verified,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}
