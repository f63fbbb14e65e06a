//! services/channels/mod.rs
//! Canales de notificación. Cada medio implementa `NotificationChannel`
//! y se registra por nombre en `NotificationService`.

use async_trait::async_trait;

use crate::models::notification_model::{NotificationMessage, NotificationRecipient};

pub mod email_channel;
pub mod sms_channel;
pub mod whatsapp_channel;

pub const EMAIL_CHANNEL: &str = "email";
pub const WHATSAPP_CHANNEL: &str = "whatsapp";
pub const SMS_CHANNEL: &str = "sms";

#[async_trait]
pub trait NotificationChannel: Send + Sync {
    /// Nombre con el que se registra ("email", "whatsapp", ...).
    fn name(&self) -> &str;

    /// Envía el mensaje. `false` = fallo (se cuenta como error).
    async fn send(&self, recipient: &NotificationRecipient, message: &NotificationMessage)
        -> bool;
}
