//! models/mod.rs
//! Estructuras compartidas: filas de BD, requests y respuestas.

pub mod maintenance_model;
pub mod notification_model;
pub mod session_model;
