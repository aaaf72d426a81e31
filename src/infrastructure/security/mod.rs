// src/infrastructure/security/mod.rs
pub mod password;
pub mod session_codec;
