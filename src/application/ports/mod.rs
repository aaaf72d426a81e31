// src/application/ports/mod.rs
pub mod directory;
pub mod email;
pub mod security;
pub mod time;

// Type aliases to make port injection sites more descriptive and reduce `dyn` noise
pub type PasswordHasherPort = dyn security::PasswordHasher;
pub type SessionCodecPort = dyn security::SessionCodec;
pub type DirectoryPort = dyn directory::DirectoryAuthenticator;
pub type EmailSenderPort = dyn email::EmailSender;
pub type ClockPort = dyn time::Clock;
