use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::{
    models::{
        maintenance_model::DueMaintenance,
        notification_model::{NotificationMessage, NotificationRecipient, NotificationTally},
    },
    services::channels::{
        email_channel::EmailChannel, sms_channel::SmsChannel, whatsapp_channel::WhatsAppChannel,
        NotificationChannel,
    },
};

type ChannelRegistry = HashMap<String, Arc<dyn NotificationChannel>>;

/// Compone los recordatorios y los reparte por los canales registrados.
#[derive(Clone)]
pub struct NotificationService {
    channels: Arc<RwLock<ChannelRegistry>>,
    business_name: String,
}

impl NotificationService {
    /// Servicio sin canales; se agregan con `register_channel`.
    pub fn new(business_name: impl Into<String>) -> Self {
        Self {
            channels: Arc::new(RwLock::new(HashMap::new())),
            business_name: business_name.into(),
        }
    }

    /// Servicio con los canales incluidos: email, whatsapp y sms.
    pub fn with_default_channels(business_name: impl Into<String>, email: EmailChannel) -> Self {
        let service = Self::new(business_name);
        service.register_channel(Arc::new(email));
        service.register_channel(Arc::new(WhatsAppChannel));
        service.register_channel(Arc::new(SmsChannel));
        service
    }

    /// Registra (o reemplaza) un canal bajo su nombre.
    pub fn register_channel(&self, channel: Arc<dyn NotificationChannel>) {
        let name = channel.name().to_string();
        let mut registry = self
            .channels
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if registry.insert(name.clone(), channel).is_some() {
            log::info!("(register_channel) Canal '{}' reemplazado", name);
        } else {
            log::info!("(register_channel) Canal '{}' registrado", name);
        }
    }

    pub fn channel_names(&self) -> Vec<String> {
        let registry = self
            .channels
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut names: Vec<String> = registry.keys().cloned().collect();
        names.sort();
        names
    }

    fn lookup(&self, channel_name: &str) -> Option<Arc<dyn NotificationChannel>> {
        self.channels
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(channel_name)
            .cloned()
    }

    /// Envía por un canal. Canal desconocido = fallo, sin intento.
    pub async fn send_notification(
        &self,
        channel_name: &str,
        recipient: &NotificationRecipient,
        message: &NotificationMessage,
    ) -> bool {
        match self.lookup(channel_name) {
            Some(channel) => channel.send(recipient, message).await,
            None => {
                log::error!(
                    "(send_notification) Canal de notificación desconocido: {}",
                    channel_name
                );
                false
            }
        }
    }

    /// Arma asunto y cuerpo según cuántos días faltan.
    pub fn compose_reminder(
        &self,
        maintenance: &DueMaintenance,
        days_until: i64,
    ) -> (NotificationRecipient, NotificationMessage) {
        let recipient = NotificationRecipient {
            email: maintenance.owner.email.clone(),
            phone: maintenance.owner.phone_number.clone(),
            full_name: maintenance.owner.full_name.clone(),
        };

        let plate = &maintenance.licence_plate_no;
        let business = &self.business_name;
        let vehicle_info = format!(
            "{} {} ({})",
            maintenance.vehicle_type.name, maintenance.vehicle_type.model, plate
        );
        let maintenance_date = maintenance
            .date_of_next_maintenance
            .format("%A, %-d %B %Y")
            .to_string();

        let (subject, when, closing) = match days_until {
            0 => (
                format!("{business}: Maintenance Due Today - {plate}"),
                format!("TODAY ({maintenance_date})"),
                format!("Please bring your vehicle to {business} for servicing."),
            ),
            1 => (
                format!("{business}: Maintenance Due Tomorrow - {plate}"),
                format!("TOMORROW ({maintenance_date})"),
                "Please prepare your vehicle for servicing.".to_string(),
            ),
            n => (
                format!("{business}: Upcoming Maintenance - {plate}"),
                format!("in {n} days ({maintenance_date})"),
                format!("Please plan accordingly to bring your vehicle to {business} for servicing."),
            ),
        };

        let body = format!(
            "Dear {},\n\nThis is a reminder that your vehicle {} is due for maintenance {}.\n\n{}\n\nBest regards,\n{} Team",
            recipient.full_name, vehicle_info, when, closing, business
        );

        let message = NotificationMessage {
            subject,
            body,
            maintenance_id: maintenance.id.clone(),
            days_before: days_until,
        };
        (recipient, message)
    }

    /// Envía el recordatorio de un mantenimiento por cada canal activo.
    /// Cada canal suma un envío o un error, de forma independiente.
    pub async fn send_maintenance_reminder(
        &self,
        maintenance: &DueMaintenance,
        days_until: i64,
        active_channels: &[String],
    ) -> NotificationTally {
        let (recipient, message) = self.compose_reminder(maintenance, days_until);
        let mut tally = NotificationTally::default();

        for channel_name in active_channels {
            let ok = self
                .send_notification(channel_name, &recipient, &message)
                .await;
            log::info!(
                "(send_maintenance_reminder) mantenimiento={} días={} canal='{}' -> {}",
                maintenance.id,
                days_until,
                channel_name,
                if ok { "ok" } else { "error" }
            );
            tally.record(ok);
        }

        tally
    }
}
