//! services/channels/email_channel.rs
//!
//! Canal email. Sin SMTP configurado, "enviar" es dejar la entrada en
//! `notification_logs` con estado "sent". Con SMTP, primero se entrega el correo
//! y solo si sale bien se registra en la bitácora.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use super::{NotificationChannel, EMAIL_CHANNEL};
use crate::{
    config::app_config::SmtpSettings,
    models::notification_model::{NewNotificationLog, NotificationMessage, NotificationRecipient},
    services::{
        notification_log_service::NotificationLogService,
        notification_type_service::NotificationTypeService,
    },
};

const SMTP_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct EmailChannel {
    log_service: NotificationLogService,
    type_service: NotificationTypeService,
    smtp: Option<SmtpSettings>,
    sender_name: String,
}

impl EmailChannel {
    pub fn new(
        log_service: NotificationLogService,
        type_service: NotificationTypeService,
        smtp: Option<SmtpSettings>,
        sender_name: String,
    ) -> Self {
        Self {
            log_service,
            type_service,
            smtp,
            sender_name,
        }
    }

    async fn try_send(
        &self,
        recipient: &NotificationRecipient,
        message: &NotificationMessage,
    ) -> Result<()> {
        if let Some(smtp) = &self.smtp {
            self.deliver_via_smtp(smtp, recipient, message)
                .await
                .context("(EmailChannel) Fallo entregando por SMTP")?;
        }

        let type_id = self.type_service.ensure_type_id(EMAIL_CHANNEL).await?;

        self.log_service
            .insert(NewNotificationLog {
                maintenance_id: message.maintenance_id.clone(),
                notification_type_id: type_id,
                status: "sent".to_string(),
                days_before: message.days_before,
                message: Some(format!("Email to {}: {}", recipient.email, message.subject)),
            })
            .await
            .context("(EmailChannel) No se pudo registrar la notificación")?;

        log::info!(
            "(EmailChannel) [Email] Enviado a {}: {}",
            recipient.email,
            message.subject
        );
        Ok(())
    }

    async fn deliver_via_smtp(
        &self,
        smtp: &SmtpSettings,
        recipient: &NotificationRecipient,
        message: &NotificationMessage,
    ) -> Result<()> {
        let from: Mailbox = format!("{} <{}>", self.sender_name, smtp.from)
            .parse()
            .context("Invalid from address")?;
        let to: Mailbox = format!("{} <{}>", recipient.full_name, recipient.email)
            .parse()
            .context("Invalid recipient address")?;

        let tls_params = TlsParameters::new(smtp.host.clone())?;
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(&smtp.host)?
            .port(smtp.port)
            .credentials(Credentials::new(smtp.user.clone(), smtp.pass.clone()))
            .tls(Tls::Required(tls_params))
            .build();

        let email = Message::builder()
            .from(from)
            .to(to)
            .subject(&message.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(message.body.clone())?;

        tokio::time::timeout(SMTP_TIMEOUT, mailer.send(email)).await??;
        Ok(())
    }
}

#[async_trait]
impl NotificationChannel for EmailChannel {
    fn name(&self) -> &str {
        EMAIL_CHANNEL
    }

    async fn send(
        &self,
        recipient: &NotificationRecipient,
        message: &NotificationMessage,
    ) -> bool {
        match self.try_send(recipient, message).await {
            Ok(()) => true,
            Err(e) => {
                log::error!(
                    "(EmailChannel::send) Error enviando a {} (mantenimiento {}): {:?}",
                    recipient.email,
                    message.maintenance_id,
                    e
                );
                false
            }
        }
    }
}
