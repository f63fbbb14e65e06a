use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Formato con el que se guardan las fechas de calendario en SQLite.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Registro de `next_maintenance` con la patente y el dueño del vehículo.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MaintenanceRecord {
    pub id: String,
    pub vehicle_id: String,
    pub current_mileage: i64,
    pub date_of_next_maintenance: String, // "YYYY-MM-DD"
    pub date_actually_maintained: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub licence_plate_no: String,
    pub owner_full_name: String,
}

/// Fila plana que devuelve la consulta de mantenimientos vencidos.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DueMaintenanceRow {
    pub id: String,
    pub current_mileage: i64,
    pub date_of_next_maintenance: String,
    pub licence_plate_no: String,
    pub owner_full_name: String,
    pub owner_email: String,
    pub owner_phone_number: Option<String>,
    pub vehicle_type_name: String,
    pub vehicle_type_model: String,
    pub vehicle_type_year: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnerContact {
    pub full_name: String,
    pub email: String,
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VehicleTypeInfo {
    pub name: String,
    pub model: String,
    pub year: i64,
}

/// Mantenimiento pendiente, ya unido a vehículo, dueño y tipo de vehículo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DueMaintenance {
    pub id: String,
    pub date_of_next_maintenance: NaiveDate,
    pub current_mileage: i64,
    pub licence_plate_no: String,
    pub owner: OwnerContact,
    pub vehicle_type: VehicleTypeInfo,
}

impl TryFrom<DueMaintenanceRow> for DueMaintenance {
    type Error = anyhow::Error;

    fn try_from(row: DueMaintenanceRow) -> Result<Self> {
        let due = NaiveDate::parse_from_str(&row.date_of_next_maintenance, DATE_FORMAT)
            .with_context(|| {
                format!(
                    "Fecha inválida '{}' en mantenimiento {}",
                    row.date_of_next_maintenance, row.id
                )
            })?;

        Ok(DueMaintenance {
            id: row.id,
            date_of_next_maintenance: due,
            current_mileage: row.current_mileage,
            licence_plate_no: row.licence_plate_no,
            owner: OwnerContact {
                full_name: row.owner_full_name,
                email: row.owner_email,
                phone_number: row.owner_phone_number,
            },
            vehicle_type: VehicleTypeInfo {
                name: row.vehicle_type_name,
                model: row.vehicle_type_model,
                year: row.vehicle_type_year,
            },
        })
    }
}

/// Request para agendar un mantenimiento
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMaintenanceRequest {
    pub vehicle_id: String,
    pub current_mileage: i64,
    pub date_of_next_maintenance: NaiveDate,
}

/// Request para marcar un mantenimiento como realizado
#[derive(Debug, Clone, Deserialize)]
pub struct CompleteMaintenanceRequest {
    pub date_actually_maintained: NaiveDate,
}
