// src/domain/user/mod.rs
pub mod entity;
pub mod repository;
pub mod token;
pub mod value_objects;

pub use entity::{NewGuestUser, NewRegisteredUser, User};
pub use repository::{AccountTokenRepository, UserRepository};
pub use token::{AccountToken, AccountTokenKind};
pub use value_objects::{Email, PasswordHash, UserId, UserName, UserType};
