// tests/support/mocks/mod.rs
//! テストサポートモック再エクスポートモジュール
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod directory;
pub mod email;
pub mod security;
pub mod time;
pub mod token_repo;
pub mod user_repo;

// 時刻関連
pub use time::{FixedClock, fixed_now};

// セキュリティ関連
pub use security::{COOKIE_KEY, PlainPasswordHasher, plain_hash, test_session_codec};

// ディレクトリ (LDAP) 関連
pub use directory::{StubDirectory, UnreachableDirectory};

// メール関連
pub use email::{CapturingEmailSender, FailingEmailSender, SentEmail};

// リポジトリ
pub use token_repo::InMemoryTokenRepo;
pub use user_repo::{FailingUserRepo, InMemoryUserRepo};
