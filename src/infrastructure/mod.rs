pub mod database;
pub mod directory;
pub mod email;
pub mod repositories;
pub mod security;
pub mod time;
