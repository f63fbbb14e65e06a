//! tests/mod.rs
//! Pruebas sobre SQLite en memoria con las migraciones aplicadas.

mod maintenance_tests;
mod notification_service_tests;
mod support;
