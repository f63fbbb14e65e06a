use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::{Pool, Sqlite};
use uuid::Uuid;

use crate::models::notification_model::NotificationTypeRecord;

/// Configuración de canales (`notification_types`): cuáles existen y cuáles están activos.
#[derive(Clone, Debug)]
pub struct NotificationTypeService {
    db_pool: Pool<Sqlite>,
}

impl NotificationTypeService {
    pub fn new(db_pool: Pool<Sqlite>) -> Self {
        NotificationTypeService { db_pool }
    }

    pub async fn list_types(&self) -> Result<Vec<NotificationTypeRecord>> {
        sqlx::query_as::<_, NotificationTypeRecord>(
            r#"
            SELECT id, name, is_active, created_at
            FROM notification_types
            ORDER BY name
            "#,
        )
        .fetch_all(&self.db_pool)
        .await
        .context("Error listando notification_types")
    }

    /// Nombres de los canales activos.
    /// `None` si no hay ningún canal configurado (tabla vacía).
    pub async fn active_channel_names(&self) -> Result<Option<Vec<String>>> {
        let types = self.list_types().await?;
        if types.is_empty() {
            return Ok(None);
        }
        Ok(Some(
            types
                .into_iter()
                .filter(|t| t.is_active)
                .map(|t| t.name)
                .collect(),
        ))
    }

    pub async fn find_id_by_name(&self, name: &str) -> Result<Option<String>> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT id FROM notification_types WHERE name = ?1")
                .bind(name)
                .fetch_optional(&self.db_pool)
                .await
                .with_context(|| format!("Error buscando notification_type '{}'", name))?;
        Ok(row.map(|(id,)| id))
    }

    /// Id del canal `name`; si la fila no existe se crea activa.
    pub async fn ensure_type_id(&self, name: &str) -> Result<String> {
        let now = Utc::now().to_rfc3339();
        let result = sqlx::query(
            r#"
            INSERT OR IGNORE INTO notification_types (id, name, is_active, created_at)
            VALUES (?1, ?2, 1, ?3)
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(name)
        .bind(&now)
        .execute(&self.db_pool)
        .await
        .with_context(|| format!("Error registrando notification_type '{}'", name))?;

        if result.rows_affected() > 0 {
            log::warn!("(ensure_type_id) Canal '{}' no existía, se creó activo", name);
        }

        self.find_id_by_name(name)
            .await?
            .with_context(|| format!("No existe notification_type '{}'", name))
    }

    pub async fn get(&self, id: &str) -> Result<Option<NotificationTypeRecord>> {
        sqlx::query_as::<_, NotificationTypeRecord>(
            "SELECT id, name, is_active, created_at FROM notification_types WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.db_pool)
        .await
        .context("Error leyendo notification_type")
    }

    /// Invierte `is_active`. Devuelve `None` si el id no existe.
    pub async fn toggle(&self, id: &str) -> Result<Option<NotificationTypeRecord>> {
        let result = sqlx::query(
            r#"
            UPDATE notification_types
            SET is_active = CASE WHEN is_active = 0 THEN 1 ELSE 0 END
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .execute(&self.db_pool)
        .await
        .context("Error actualizando notification_type")?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        let updated = self.get(id).await?;
        if let Some(t) = &updated {
            log::info!(
                "(toggle) Canal '{}' ahora está {}",
                t.name,
                if t.is_active { "activo" } else { "inactivo" }
            );
        }
        Ok(updated)
    }

    /// Activa o desactiva un canal por nombre.
    #[cfg(test)]
    pub async fn set_active(&self, name: &str, is_active: bool) -> Result<bool> {
        let result = sqlx::query("UPDATE notification_types SET is_active = ?2 WHERE name = ?1")
            .bind(name)
            .bind(is_active)
            .execute(&self.db_pool)
            .await
            .with_context(|| format!("Error actualizando canal '{}'", name))?;
        Ok(result.rows_affected() > 0)
    }
}
