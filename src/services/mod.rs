//! services/mod.rs
//! Capa de negocio: mantenimientos, bitácora, canales y recordatorios.

pub mod channels;
pub mod maintenance_service;
pub mod notification_log_service;
pub mod notification_service;
pub mod notification_type_service;
pub mod reminder_service;
pub mod session_service;
