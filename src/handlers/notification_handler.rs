use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::{
    handlers::auth::AuthenticatedAdmin,
    services::{
        notification_log_service::NotificationLogService,
        notification_type_service::NotificationTypeService, reminder_service::ReminderService,
    },
};

const RECENT_LOGS_LIMIT: i64 = 50;

/// POST /api/notifications/send
pub async fn send_reminders_endpoint(
    admin: AuthenticatedAdmin,
    reminder_service: web::Data<ReminderService>,
) -> HttpResponse {
    log::info!("(send_reminders_endpoint) Disparado por {}", admin.user_email);
    let tally = reminder_service.run_reminders().await;
    HttpResponse::Ok().json(tally)
}

/// GET /api/notifications/types
pub async fn list_types_endpoint(
    _admin: AuthenticatedAdmin,
    type_service: web::Data<NotificationTypeService>,
) -> HttpResponse {
    match type_service.list_types().await {
        Ok(types) => HttpResponse::Ok().json(types),
        Err(e) => HttpResponse::InternalServerError().json(json!({
            "error": "Internal server error",
            "details": format!("{:?}", e)
        })),
    }
}

/// POST /api/notifications/types/{id}/toggle
pub async fn toggle_type_endpoint(
    admin: AuthenticatedAdmin,
    type_service: web::Data<NotificationTypeService>,
    path: web::Path<String>,
) -> HttpResponse {
    let type_id = path.into_inner();

    match type_service.toggle(&type_id).await {
        Ok(Some(updated)) => {
            log::info!(
                "(toggle_type_endpoint) {} cambió '{}' a is_active={}",
                admin.user_email,
                updated.name,
                updated.is_active
            );
            HttpResponse::Ok().json(updated)
        }
        Ok(None) => HttpResponse::NotFound().json(json!({
            "error": "Notification type not found",
            "details": type_id
        })),
        Err(e) => HttpResponse::InternalServerError().json(json!({
            "error": "Internal server error",
            "details": format!("{:?}", e)
        })),
    }
}

/// GET /api/notifications/logs
pub async fn list_logs_endpoint(
    _admin: AuthenticatedAdmin,
    log_service: web::Data<NotificationLogService>,
) -> HttpResponse {
    match log_service.list_recent(RECENT_LOGS_LIMIT).await {
        Ok(logs) => HttpResponse::Ok().json(logs),
        Err(e) => HttpResponse::InternalServerError().json(json!({
            "error": "Internal server error",
            "details": format!("{:?}", e)
        })),
    }
}
