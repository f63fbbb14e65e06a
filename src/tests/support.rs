//! Helpers compartidos por las pruebas.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::{Pool, Sqlite};
use uuid::Uuid;

use crate::app::AppServices;
use crate::config::app_config::AppConfig;
use crate::database::setup_memory_database;
use crate::logger::init_test_logger;
use crate::models::maintenance_model::{
    CreateMaintenanceRequest, DueMaintenance, OwnerContact, VehicleTypeInfo,
};
use crate::models::notification_model::{NotificationMessage, NotificationRecipient};
use crate::services::channels::NotificationChannel;

pub struct Fixture {
    pub pool: Pool<Sqlite>,
    pub services: AppServices,
}

pub async fn setup() -> Fixture {
    init_test_logger();
    let pool = setup_memory_database()
        .await
        .expect("Failed to open test database");
    let services = AppServices::new(pool.clone(), &AppConfig::default());
    Fixture { pool, services }
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// "Hoy" fijo para las pruebas del recordatorio.
pub fn today() -> NaiveDate {
    day(2026, 10, 18)
}

/// Inserta cliente, tipo de vehículo y vehículo. Devuelve el id del vehículo.
pub async fn insert_vehicle(pool: &Pool<Sqlite>, plate: &str, owner_email: &str) -> String {
    let now = Utc::now().to_rfc3339();
    let client_id = Uuid::new_v4().to_string();
    let type_id = Uuid::new_v4().to_string();
    let vehicle_id = Uuid::new_v4().to_string();

    sqlx::query(
        "INSERT INTO clients (id, full_name, email, phone_number, address, created_at, updated_at)
         VALUES (?1, ?2, ?3, '+27 82 555 0101', '12 Main Rd', ?4, ?4)",
    )
    .bind(&client_id)
    .bind("Thandi Nkosi")
    .bind(owner_email)
    .bind(&now)
    .execute(pool)
    .await
    .expect("insert client");

    sqlx::query(
        "INSERT INTO vehicle_types (id, name, model, year, created_at, updated_at)
         VALUES (?1, 'Toyota', 'Hilux', 2019, ?2, ?2)",
    )
    .bind(&type_id)
    .bind(&now)
    .execute(pool)
    .await
    .expect("insert vehicle type");

    sqlx::query(
        "INSERT INTO vehicles (id, licence_plate_no, owner_id, driver_id, vehicle_type_id, created_at, updated_at)
         VALUES (?1, ?2, ?3, NULL, ?4, ?5, ?5)",
    )
    .bind(&vehicle_id)
    .bind(plate)
    .bind(&client_id)
    .bind(&type_id)
    .bind(&now)
    .execute(pool)
    .await
    .expect("insert vehicle");

    vehicle_id
}

/// Vehículo nuevo más un mantenimiento pendiente para `due`. Devuelve el id del mantenimiento.
pub async fn schedule_for(fixture: &Fixture, plate: &str, due: NaiveDate) -> String {
    let vehicle_id = insert_vehicle(&fixture.pool, plate, "owner@example.com").await;
    fixture
        .services
        .maintenance_service
        .schedule(CreateMaintenanceRequest {
            vehicle_id,
            current_mileage: 120_000,
            date_of_next_maintenance: due,
        })
        .await
        .expect("schedule maintenance")
        .id
}

pub fn sample_due(due: NaiveDate) -> DueMaintenance {
    DueMaintenance {
        id: "m-1".to_string(),
        date_of_next_maintenance: due,
        current_mileage: 98_000,
        licence_plate_no: "ABC123GP".to_string(),
        owner: OwnerContact {
            full_name: "Sipho Dlamini".to_string(),
            email: "sipho@example.com".to_string(),
            phone_number: None,
        },
        vehicle_type: VehicleTypeInfo {
            name: "Toyota".to_string(),
            model: "Hilux".to_string(),
            year: 2019,
        },
    }
}

/// Canal de prueba que cuenta los envíos y responde siempre lo mismo.
pub struct RecordingChannel {
    name: String,
    succeed: bool,
    pub calls: AtomicUsize,
}

impl RecordingChannel {
    pub fn new(name: &str, succeed: bool) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            succeed,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NotificationChannel for RecordingChannel {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send(&self, _recipient: &NotificationRecipient, _message: &NotificationMessage) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.succeed
    }
}
