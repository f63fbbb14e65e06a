//! services/notification_log_service.rs
//! Bitácora `notification_logs`: evita recordatorios duplicados y alimenta el listado.

use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::{Pool, Sqlite};
use uuid::Uuid;

use crate::models::notification_model::{NewNotificationLog, NotificationLogRecord};

#[derive(Clone, Debug)]
pub struct NotificationLogService {
    db_pool: Pool<Sqlite>,
}

impl NotificationLogService {
    pub fn new(db_pool: Pool<Sqlite>) -> Self {
        NotificationLogService { db_pool }
    }

    /// ¿Ya hay una entrada para este par (mantenimiento, días antes)?
    ///
    /// Es una lectura previa al insert, no una restricción única: solo protege
    /// si las ejecuciones del recordatorio están serializadas.
    pub async fn exists_for(&self, maintenance_id: &str, days_before: i64) -> Result<bool> {
        let row: Option<(String,)> = sqlx::query_as(
            r#"
            SELECT id FROM notification_logs
            WHERE maintenance_id = ?1 AND days_before = ?2
            LIMIT 1
            "#,
        )
        .bind(maintenance_id)
        .bind(days_before)
        .fetch_optional(&self.db_pool)
        .await
        .context("Error consultando notification_logs")?;

        Ok(row.is_some())
    }

    pub async fn insert(&self, entry: NewNotificationLog) -> Result<String> {
        let log_id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO notification_logs (
                id, maintenance_id, notification_type_id, sent_at,
                status, days_before, message, created_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?4)
            "#,
        )
        .bind(&log_id)
        .bind(&entry.maintenance_id)
        .bind(&entry.notification_type_id)
        .bind(&now)
        .bind(&entry.status)
        .bind(entry.days_before)
        .bind(&entry.message)
        .execute(&self.db_pool)
        .await
        .context("Error insertando notification_log")?;

        Ok(log_id)
    }

    /// Últimas `limit` entradas, más recientes primero.
    pub async fn list_recent(&self, limit: i64) -> Result<Vec<NotificationLogRecord>> {
        sqlx::query_as::<_, NotificationLogRecord>(
            r#"
            SELECT
                l.id, l.maintenance_id, nt.name AS channel_name, l.sent_at,
                l.status, l.days_before, l.message, l.created_at,
                m.date_of_next_maintenance,
                v.licence_plate_no,
                c.full_name AS owner_full_name,
                c.email AS owner_email
            FROM notification_logs l
            LEFT JOIN notification_types nt ON nt.id = l.notification_type_id
            LEFT JOIN next_maintenance m ON m.id = l.maintenance_id
            LEFT JOIN vehicles v ON v.id = m.vehicle_id
            LEFT JOIN clients c ON c.id = v.owner_id
            ORDER BY l.created_at DESC
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.db_pool)
        .await
        .context("Error listando notification_logs")
    }

    /// Cantidad de entradas para un mantenimiento (todas las horizontes).
    #[cfg(test)]
    pub async fn count_for_maintenance(&self, maintenance_id: &str) -> Result<i64> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM notification_logs WHERE maintenance_id = ?1")
                .bind(maintenance_id)
                .fetch_one(&self.db_pool)
                .await
                .context("Error contando notification_logs")?;
        Ok(count)
    }
}
