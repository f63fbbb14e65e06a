use serde::{Deserialize, Serialize};

/// Destinatario del recordatorio, derivado del dueño del vehículo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationRecipient {
    pub email: String,
    pub phone: Option<String>,
    pub full_name: String,
}

/// Mensaje ya compuesto; es el mismo para todos los canales.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationMessage {
    pub subject: String,
    pub body: String,
    pub maintenance_id: String,
    pub days_before: i64,
}

/// Fila de `notification_types`: un canal y si está habilitado.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct NotificationTypeRecord {
    pub id: String,
    pub name: String, // "email", "whatsapp", "sms"
    pub is_active: bool,
    pub created_at: String,
}

/// Entrada nueva para `notification_logs`
#[derive(Debug, Clone)]
pub struct NewNotificationLog {
    pub maintenance_id: String,
    pub notification_type_id: String,
    pub status: String,
    pub days_before: i64,
    pub message: Option<String>,
}

/// Entrada de la bitácora con datos del canal, vehículo y dueño (para el listado).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct NotificationLogRecord {
    pub id: String,
    pub maintenance_id: String,
    pub channel_name: Option<String>,
    pub sent_at: String,
    pub status: String, // "sent", "failed", ...
    pub days_before: i64,
    pub message: Option<String>,
    pub created_at: String,
    pub date_of_next_maintenance: Option<String>,
    pub licence_plate_no: Option<String>,
    pub owner_full_name: Option<String>,
    pub owner_email: Option<String>,
}

/// Conteo de envíos exitosos y fallidos. Es también la respuesta del trigger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationTally {
    pub sent: u32,
    pub errors: u32,
}

impl NotificationTally {
    #[cfg(test)]
    pub fn new(sent: u32, errors: u32) -> Self {
        NotificationTally { sent, errors }
    }

    pub fn record(&mut self, success: bool) {
        if success {
            self.sent += 1;
        } else {
            self.errors += 1;
        }
    }

    pub fn merge(&mut self, other: NotificationTally) {
        self.sent += other.sent;
        self.errors += other.errors;
    }
}
