pub mod commands;
pub mod dto;
pub mod error;
pub mod policy;
pub mod ports;
pub mod queries;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
