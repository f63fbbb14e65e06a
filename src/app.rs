//! app.rs
use actix_web::web;
use sqlx::{Pool, Sqlite};

use crate::config::app_config::AppConfig;
use crate::handlers::{maintenance_handler, notification_handler, session_handler};
use crate::services::{
    channels::email_channel::EmailChannel, maintenance_service::MaintenanceService,
    notification_log_service::NotificationLogService, notification_service::NotificationService,
    notification_type_service::NotificationTypeService, reminder_service::ReminderService,
    session_service::SessionService,
};

/// Todos los servicios, construidos sobre el mismo pool.
#[derive(Clone)]
pub struct AppServices {
    pub maintenance_service: MaintenanceService,
    pub log_service: NotificationLogService,
    pub type_service: NotificationTypeService,
    pub notification_service: NotificationService,
    pub reminder_service: ReminderService,
    pub session_service: SessionService,
}

impl AppServices {
    pub fn new(db_pool: Pool<Sqlite>, config: &AppConfig) -> Self {
        let maintenance_service = MaintenanceService::new(db_pool.clone());
        let log_service = NotificationLogService::new(db_pool.clone());
        let type_service = NotificationTypeService::new(db_pool.clone());
        let session_service = SessionService::new(db_pool);

        let email_channel = EmailChannel::new(
            log_service.clone(),
            type_service.clone(),
            config.smtp.clone(),
            config.business_name.clone(),
        );
        let notification_service =
            NotificationService::with_default_channels(config.business_name.clone(), email_channel);

        let reminder_service = ReminderService::new(
            maintenance_service.clone(),
            log_service.clone(),
            type_service.clone(),
            notification_service.clone(),
        );

        Self {
            maintenance_service,
            log_service,
            type_service,
            notification_service,
            reminder_service,
            session_service,
        }
    }

    /// Registra cada servicio como `web::Data` para los handlers.
    pub fn register_data(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.maintenance_service.clone()))
            .app_data(web::Data::new(self.log_service.clone()))
            .app_data(web::Data::new(self.type_service.clone()))
            .app_data(web::Data::new(self.notification_service.clone()))
            .app_data(web::Data::new(self.reminder_service.clone()))
            .app_data(web::Data::new(self.session_service.clone()));
    }
}

pub fn init_app(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(session_handler::health_endpoint))
        .service(
            web::scope("/api")
                .service(
                    web::scope("/notifications")
                        .route(
                            "/send",
                            web::post().to(notification_handler::send_reminders_endpoint),
                        )
                        .route(
                            "/types",
                            web::get().to(notification_handler::list_types_endpoint),
                        )
                        .route(
                            "/types/{id}/toggle",
                            web::post().to(notification_handler::toggle_type_endpoint),
                        )
                        .route(
                            "/logs",
                            web::get().to(notification_handler::list_logs_endpoint),
                        ),
                )
                .service(
                    web::scope("/maintenance")
                        .route(
                            "",
                            web::post().to(maintenance_handler::create_maintenance_endpoint),
                        )
                        .route(
                            "",
                            web::get().to(maintenance_handler::list_maintenance_endpoint),
                        )
                        .route(
                            "/{id}/complete",
                            web::post().to(maintenance_handler::complete_maintenance_endpoint),
                        ),
                )
                .service(
                    web::scope("/session")
                        .route("", web::get().to(session_handler::current_session_endpoint))
                        .route("", web::delete().to(session_handler::logout_endpoint)),
                ),
        );
}
