//! logger.rs
//! Logger basado en env_logger. RUST_LOG manda; por defecto "info" y las
//! consultas de sqlx solo en "warn" para no inundar la salida.

use log::LevelFilter;

fn builder() -> env_logger::Builder {
    let log_env = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_env));
    builder.filter_module("sqlx::query", LevelFilter::Warn);
    builder
}

pub fn init_logger() {
    builder().format_timestamp_secs().init();
}

/// Para tests: captura la salida y no falla si ya se inicializó.
#[cfg(test)]
pub fn init_test_logger() {
    let _ = builder().is_test(true).try_init();
}
