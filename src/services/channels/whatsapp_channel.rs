use async_trait::async_trait;

use super::{NotificationChannel, WHATSAPP_CHANNEL};
use crate::models::notification_model::{NotificationMessage, NotificationRecipient};

/// WhatsApp todavía no tiene integración: todo envío se reporta como fallido.
#[derive(Debug, Clone, Default)]
pub struct WhatsAppChannel;

#[async_trait]
impl NotificationChannel for WhatsAppChannel {
    fn name(&self) -> &str {
        WHATSAPP_CHANNEL
    }

    async fn send(
        &self,
        recipient: &NotificationRecipient,
        message: &NotificationMessage,
    ) -> bool {
        log::warn!(
            "(WhatsAppChannel::send) No implementado. Se enviaría a {:?}: {}",
            recipient.phone,
            message.subject
        );
        false
    }
}
