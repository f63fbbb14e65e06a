//! Pruebas de composición de mensajes y del registro de canales.

#[cfg(test)]
mod tests {
    use crate::models::notification_model::NotificationTally;
    use crate::services::channels::{
        sms_channel::SmsChannel, whatsapp_channel::WhatsAppChannel, NotificationChannel,
    };
    use crate::services::notification_service::NotificationService;
    use crate::tests::support::{day, sample_due, RecordingChannel};

    #[test]
    fn same_day_reminder_says_today() {
        let service = NotificationService::new("KwaBhunu");
        let (recipient, message) = service.compose_reminder(&sample_due(day(2025, 1, 1)), 0);

        assert_eq!(recipient.email, "sipho@example.com");
        assert_eq!(message.subject, "KwaBhunu: Maintenance Due Today - ABC123GP");
        assert!(message.body.contains("TODAY"));
        assert!(message
            .body
            .contains("your vehicle Toyota Hilux (ABC123GP) is due for maintenance TODAY (Wednesday, 1 January 2025)"));
        assert!(message.body.starts_with("Dear Sipho Dlamini,"));
        assert!(message.body.ends_with("Best regards,\nKwaBhunu Team"));
        assert_eq!(message.maintenance_id, "m-1");
        assert_eq!(message.days_before, 0);
    }

    #[test]
    fn next_day_reminder_says_tomorrow() {
        let service = NotificationService::new("KwaBhunu");
        let (_, message) = service.compose_reminder(&sample_due(day(2025, 1, 2)), 1);

        assert_eq!(message.subject, "KwaBhunu: Maintenance Due Tomorrow - ABC123GP");
        assert!(message.body.contains("TOMORROW (Thursday, 2 January 2025)"));
        assert!(!message.body.contains("TODAY"));
    }

    #[test]
    fn week_ahead_reminder_counts_days() {
        let service = NotificationService::new("Garage Uno");
        let (_, message) = service.compose_reminder(&sample_due(day(2025, 1, 8)), 7);

        assert_eq!(message.subject, "Garage Uno: Upcoming Maintenance - ABC123GP");
        assert!(message.body.contains("in 7 days (Wednesday, 8 January 2025)"));
        assert!(message.body.contains("Best regards,\nGarage Uno Team"));
        assert_eq!(message.days_before, 7);
    }

    #[actix_rt::test]
    async fn unknown_channel_is_an_error_but_does_not_stop_others() {
        let service = NotificationService::new("KwaBhunu");
        let push = RecordingChannel::new("push", true);
        service.register_channel(push.clone());

        let channels = vec!["carrier-pigeon".to_string(), "push".to_string()];
        let tally = service
            .send_maintenance_reminder(&sample_due(day(2025, 1, 1)), 0, &channels)
            .await;

        assert_eq!(tally, NotificationTally::new(1, 1));
        assert_eq!(push.call_count(), 1);
    }

    #[actix_rt::test]
    async fn no_active_channels_sends_nothing() {
        let service = NotificationService::new("KwaBhunu");
        let push = RecordingChannel::new("push", true);
        service.register_channel(push.clone());

        let tally = service
            .send_maintenance_reminder(&sample_due(day(2025, 1, 1)), 1, &[])
            .await;

        assert_eq!(tally, NotificationTally::default());
        assert_eq!(push.call_count(), 0);
    }

    #[actix_rt::test]
    async fn each_channel_is_attempted_independently() {
        let service = NotificationService::new("KwaBhunu");
        let ok = RecordingChannel::new("ok", true);
        let broken = RecordingChannel::new("broken", false);
        service.register_channel(ok.clone());
        service.register_channel(broken.clone());

        let channels = vec!["broken".to_string(), "ok".to_string(), "broken".to_string()];
        let tally = service
            .send_maintenance_reminder(&sample_due(day(2025, 1, 1)), 7, &channels)
            .await;

        assert_eq!(tally, NotificationTally::new(1, 2));
        assert_eq!(broken.call_count(), 2);
        assert_eq!(ok.call_count(), 1);
    }

    #[test]
    fn registering_replaces_by_name() {
        let service = NotificationService::new("KwaBhunu");
        service.register_channel(RecordingChannel::new("fax", false));
        service.register_channel(RecordingChannel::new("fax", true));
        service.register_channel(RecordingChannel::new("email", true));

        assert_eq!(service.channel_names(), vec!["email".to_string(), "fax".to_string()]);
    }

    #[actix_rt::test]
    async fn placeholder_channels_always_fail() {
        let (recipient, message) = NotificationService::new("KwaBhunu")
            .compose_reminder(&sample_due(day(2025, 1, 1)), 0);

        assert_eq!(WhatsAppChannel.name(), "whatsapp");
        assert_eq!(SmsChannel.name(), "sms");
        assert!(!WhatsAppChannel.send(&recipient, &message).await);
        assert!(!SmsChannel.send(&recipient, &message).await);
    }
}
