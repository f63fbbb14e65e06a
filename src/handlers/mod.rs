//! handlers/mod.rs
pub mod auth;
pub mod maintenance_handler;
pub mod notification_handler;
pub mod session_handler;
