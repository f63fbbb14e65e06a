use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::handlers::auth::AuthenticatedAdmin;
use crate::services::session_service::SessionService;

/// GET /api/session
pub async fn current_session_endpoint(admin: AuthenticatedAdmin) -> HttpResponse {
    HttpResponse::Ok().json(json!({ "user_email": admin.user_email }))
}

/// DELETE /api/session
pub async fn logout_endpoint(
    admin: AuthenticatedAdmin,
    session_service: web::Data<SessionService>,
) -> HttpResponse {
    match session_service.revoke(&admin.token).await {
        Ok(_) => HttpResponse::NoContent().finish(),
        Err(e) => HttpResponse::InternalServerError().json(json!({
            "error": "Internal server error",
            "details": format!("{:?}", e)
        })),
    }
}

/// GET /health
pub async fn health_endpoint() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}
