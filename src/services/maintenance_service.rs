//! services/maintenance_service.rs
//! Agenda de mantenimientos y búsqueda de los que vencen en una fecha.

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use sqlx::{Pool, Sqlite};
use uuid::Uuid;

use crate::models::maintenance_model::{
    CreateMaintenanceRequest, DueMaintenance, DueMaintenanceRow, MaintenanceRecord, DATE_FORMAT,
};

const SELECT_MAINTENANCE: &str = r#"
    SELECT
        m.id, m.vehicle_id, m.current_mileage, m.date_of_next_maintenance,
        m.date_actually_maintained, m.created_at, m.updated_at,
        v.licence_plate_no, c.full_name AS owner_full_name
    FROM next_maintenance m
    JOIN vehicles v ON v.id = m.vehicle_id
    JOIN clients c ON c.id = v.owner_id
"#;

#[derive(Clone, Debug)]
pub struct MaintenanceService {
    db_pool: Pool<Sqlite>,
}

impl MaintenanceService {
    pub fn new(db_pool: Pool<Sqlite>) -> Self {
        MaintenanceService { db_pool }
    }

    /// Mantenimientos con fecha `due_date` que aún no se realizaron,
    /// unidos a vehículo, dueño y tipo de vehículo.
    pub async fn find_due_on(&self, due_date: NaiveDate) -> Result<Vec<DueMaintenance>> {
        let date_str = due_date.format(DATE_FORMAT).to_string();

        let rows = sqlx::query_as::<_, DueMaintenanceRow>(
            r#"
            SELECT
                m.id, m.current_mileage, m.date_of_next_maintenance,
                v.licence_plate_no,
                c.full_name AS owner_full_name,
                c.email AS owner_email,
                c.phone_number AS owner_phone_number,
                t.name AS vehicle_type_name,
                t.model AS vehicle_type_model,
                t.year AS vehicle_type_year
            FROM next_maintenance m
            JOIN vehicles v ON v.id = m.vehicle_id
            JOIN clients c ON c.id = v.owner_id
            JOIN vehicle_types t ON t.id = v.vehicle_type_id
            WHERE m.date_of_next_maintenance = ?1
              AND m.date_actually_maintained IS NULL
            "#,
        )
        .bind(&date_str)
        .fetch_all(&self.db_pool)
        .await
        .with_context(|| format!("Error buscando mantenimientos para {}", date_str))?;

        log::debug!(
            "(find_due_on) {} mantenimientos pendientes para {}",
            rows.len(),
            date_str
        );

        rows.into_iter().map(DueMaintenance::try_from).collect()
    }

    /// Agenda un mantenimiento nuevo (sin fecha de realización).
    pub async fn schedule(&self, req: CreateMaintenanceRequest) -> Result<MaintenanceRecord> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let due = req.date_of_next_maintenance.format(DATE_FORMAT).to_string();

        sqlx::query(
            r#"
            INSERT INTO next_maintenance (
                id, vehicle_id, current_mileage, date_of_next_maintenance,
                date_actually_maintained, created_at, updated_at
            )
            VALUES (?1, ?2, ?3, ?4, NULL, ?5, ?5)
            "#,
        )
        .bind(&id)
        .bind(&req.vehicle_id)
        .bind(req.current_mileage)
        .bind(&due)
        .bind(&now)
        .execute(&self.db_pool)
        .await
        .context("Fallo al insertar mantenimiento")?;

        log::info!(
            "(schedule) Mantenimiento {} agendado para vehículo {} el {}",
            id,
            req.vehicle_id,
            due
        );

        self.get(&id)
            .await?
            .with_context(|| format!("Mantenimiento {} no encontrado tras insertarlo", id))
    }

    pub async fn get(&self, id: &str) -> Result<Option<MaintenanceRecord>> {
        let sql = format!("{SELECT_MAINTENANCE} WHERE m.id = ?1");
        sqlx::query_as::<_, MaintenanceRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await
            .context("Error leyendo mantenimiento")
    }

    pub async fn list(&self) -> Result<Vec<MaintenanceRecord>> {
        let sql = format!("{SELECT_MAINTENANCE} ORDER BY m.date_of_next_maintenance ASC");
        sqlx::query_as::<_, MaintenanceRecord>(&sql)
            .fetch_all(&self.db_pool)
            .await
            .context("Error listando mantenimientos")
    }

    /// Registra la fecha de realización. Devuelve `None` si el id no existe.
    pub async fn mark_completed(
        &self,
        id: &str,
        completed_on: NaiveDate,
    ) -> Result<Option<MaintenanceRecord>> {
        let now = Utc::now().to_rfc3339();
        let result = sqlx::query(
            r#"
            UPDATE next_maintenance
            SET date_actually_maintained = ?2,
                updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(completed_on.format(DATE_FORMAT).to_string())
        .bind(&now)
        .execute(&self.db_pool)
        .await
        .context("Fallo al marcar mantenimiento como realizado")?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        log::info!(
            "(mark_completed) Mantenimiento {} realizado el {}",
            id,
            completed_on
        );
        self.get(id).await
    }
}
