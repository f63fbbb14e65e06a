//! services/reminder_service.rs
//! Disparo de recordatorios: busca mantenimientos que vencen hoy, mañana y en
//! 7 días, descarta los ya notificados y envía por los canales activos.

use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use tokio::sync::Mutex;

use crate::{
    models::notification_model::NotificationTally,
    services::{
        channels::EMAIL_CHANNEL, maintenance_service::MaintenanceService,
        notification_log_service::NotificationLogService,
        notification_service::NotificationService,
        notification_type_service::NotificationTypeService,
    },
};

/// Días antes del vencimiento en los que se avisa.
pub const REMINDER_HORIZONS: [i64; 3] = [0, 1, 7];

#[derive(Clone)]
pub struct ReminderService {
    maintenance_service: MaintenanceService,
    log_service: NotificationLogService,
    type_service: NotificationTypeService,
    notification_service: NotificationService,
    // Serializa ejecuciones: el control de duplicados es leer-y-luego-escribir.
    run_lock: Arc<Mutex<()>>,
}

impl ReminderService {
    pub fn new(
        maintenance_service: MaintenanceService,
        log_service: NotificationLogService,
        type_service: NotificationTypeService,
        notification_service: NotificationService,
    ) -> Self {
        Self {
            maintenance_service,
            log_service,
            type_service,
            notification_service,
            run_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Ejecuta los recordatorios tomando como "hoy" la fecha UTC actual.
    pub async fn run_reminders(&self) -> NotificationTally {
        self.run_reminders_on(Utc::now().date_naive()).await
    }

    /// Ejecuta los recordatorios relativos a `today`.
    /// Nunca falla: los errores de envío o de BD se cuentan en `errors`.
    pub async fn run_reminders_on(&self, today: NaiveDate) -> NotificationTally {
        let _guard = self.run_lock.lock().await;
        log::info!("(run_reminders) Iniciando recordatorios para {}", today);

        let active_channels = self.resolve_active_channels().await;
        log::info!("(run_reminders) Canales activos: {:?}", active_channels);

        let mut totals = NotificationTally::default();

        for days_before in REMINDER_HORIZONS {
            let target = today + Duration::days(days_before);

            let due = match self.maintenance_service.find_due_on(target).await {
                Ok(rows) => rows,
                Err(e) => {
                    log::error!(
                        "(run_reminders) Falló la búsqueda de mantenimientos para {} (días={}): {:?}",
                        target,
                        days_before,
                        e
                    );
                    totals.record(false);
                    continue;
                }
            };

            if due.is_empty() {
                log::info!(
                    "(run_reminders) Sin mantenimientos pendientes para {} (días={})",
                    target,
                    days_before
                );
                continue;
            }

            for maintenance in &due {
                match self
                    .log_service
                    .exists_for(&maintenance.id, days_before)
                    .await
                {
                    Ok(true) => {
                        log::info!(
                            "(run_reminders) Mantenimiento {} ya notificado (días={}), se omite",
                            maintenance.id,
                            days_before
                        );
                        continue;
                    }
                    Ok(false) => {}
                    Err(e) => {
                        // Sin saber si ya se envió, no se envía.
                        log::error!(
                            "(run_reminders) No se pudo verificar la bitácora de {} (días={}): {:?}",
                            maintenance.id,
                            days_before,
                            e
                        );
                        totals.record(false);
                        continue;
                    }
                }

                let result = self
                    .notification_service
                    .send_maintenance_reminder(maintenance, days_before, &active_channels)
                    .await;
                totals.merge(result);
            }
        }

        log::info!(
            "(run_reminders) Finalizado: sent={}, errors={}",
            totals.sent,
            totals.errors
        );
        totals
    }

    /// Canales activos. Si no hay ninguno configurado (o no se puede leer la
    /// configuración) se usa solo "email"; si todos están desactivados, ninguno.
    async fn resolve_active_channels(&self) -> Vec<String> {
        match self.type_service.active_channel_names().await {
            Ok(Some(names)) => names,
            Ok(None) => {
                log::warn!("(resolve_active_channels) Sin canales configurados, usando email");
                vec![EMAIL_CHANNEL.to_string()]
            }
            Err(e) => {
                log::error!(
                    "(resolve_active_channels) Error leyendo canales, usando email: {:?}",
                    e
                );
                vec![EMAIL_CHANNEL.to_string()]
            }
        }
    }
}
