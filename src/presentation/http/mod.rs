// src/presentation/http/mod.rs
pub mod controllers;
pub mod cookies;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod response;
pub mod routes;
pub mod state;
