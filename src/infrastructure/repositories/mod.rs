// src/infrastructure/repositories/mod.rs
mod error;
mod postgres_account_token;
mod postgres_user;

pub use error::map_sqlx;
pub use postgres_account_token::PostgresAccountTokenRepository;
pub use postgres_user::PostgresUserRepository;
