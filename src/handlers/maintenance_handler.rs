//! handlers/maintenance_handler.rs
use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::handlers::auth::AuthenticatedAdmin;
use crate::models::maintenance_model::{CompleteMaintenanceRequest, CreateMaintenanceRequest};
use crate::services::maintenance_service::MaintenanceService;

/// POST /api/maintenance
pub async fn create_maintenance_endpoint(
    _admin: AuthenticatedAdmin,
    maintenance_service: web::Data<MaintenanceService>,
    body: web::Json<CreateMaintenanceRequest>,
) -> HttpResponse {
    let req = body.into_inner();
    if req.current_mileage < 0 {
        return HttpResponse::BadRequest().json(json!({
            "error": "current_mileage must not be negative"
        }));
    }

    match maintenance_service.schedule(req).await {
        Ok(record) => HttpResponse::Created().json(record),
        Err(e) => HttpResponse::InternalServerError().json(json!({
            "error": "Internal server error",
            "details": format!("{:?}", e)
        })),
    }
}

/// GET /api/maintenance
pub async fn list_maintenance_endpoint(
    _admin: AuthenticatedAdmin,
    maintenance_service: web::Data<MaintenanceService>,
) -> HttpResponse {
    match maintenance_service.list().await {
        Ok(list) => HttpResponse::Ok().json(list),
        Err(e) => HttpResponse::InternalServerError().json(json!({
            "error": "Internal server error",
            "details": format!("{:?}", e)
        })),
    }
}

/// POST /api/maintenance/{id}/complete
pub async fn complete_maintenance_endpoint(
    _admin: AuthenticatedAdmin,
    maintenance_service: web::Data<MaintenanceService>,
    path: web::Path<String>,
    body: web::Json<CompleteMaintenanceRequest>,
) -> HttpResponse {
    let id = path.into_inner();

    match maintenance_service
        .mark_completed(&id, body.date_actually_maintained)
        .await
    {
        Ok(Some(record)) => HttpResponse::Ok().json(record),
        Ok(None) => HttpResponse::NotFound().json(json!({
            "error": "Maintenance not found",
            "details": id
        })),
        Err(e) => HttpResponse::InternalServerError().json(json!({
            "error": "Internal server error",
            "details": format!("{:?}", e)
        })),
    }
}
