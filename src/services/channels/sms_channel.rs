use async_trait::async_trait;

use super::{NotificationChannel, SMS_CHANNEL};
use crate::models::notification_model::{NotificationMessage, NotificationRecipient};

/// SMS sin proveedor configurado: siempre falla.
#[derive(Debug, Clone, Default)]
pub struct SmsChannel;

#[async_trait]
impl NotificationChannel for SmsChannel {
    fn name(&self) -> &str {
        SMS_CHANNEL
    }

    async fn send(
        &self,
        recipient: &NotificationRecipient,
        message: &NotificationMessage,
    ) -> bool {
        log::warn!(
            "(SmsChannel::send) No implementado. Se enviaría a {:?}: {}",
            recipient.phone,
            message.subject
        );
        false
    }
}
