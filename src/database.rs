//! database.rs
//! Conexión a SQLite y migraciones.

use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};

pub async fn setup_database(database_url: &str) -> Result<Pool<Sqlite>> {
    // Crear la carpeta del archivo (p.ej. ./data) si hace falta
    if let Some(parent) = database_file_parent(database_url) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("No se pudo crear el directorio {}", parent.display()))?;
    }

    log::info!("Conectando a SQLite en {}", database_url);

    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("DATABASE_URL inválida: {}", database_url))?
        .create_if_missing(true);

    let db_pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .context("No se pudo conectar a la base de datos SQLite")?;

    Ok(db_pool)
}

/// Pool en memoria con una sola conexión (cada conexión de `:memory:` es otra BD).
#[cfg(test)]
pub async fn setup_memory_database() -> Result<Pool<Sqlite>> {
    let db_pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .context("No se pudo abrir SQLite en memoria")?;
    run_migrations(&db_pool).await?;
    Ok(db_pool)
}

/// Corre migraciones con sqlx
pub async fn run_migrations(db_pool: &Pool<Sqlite>) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(db_pool)
        .await
        .context("Fallo en migraciones")?;
    Ok(())
}

fn database_file_parent(database_url: &str) -> Option<&Path> {
    let path = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = path.split('?').next()?;
    if path.is_empty() || path.starts_with(":memory:") {
        return None;
    }
    Path::new(path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
}
