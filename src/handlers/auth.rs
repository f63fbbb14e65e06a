//! handlers/auth.rs
//! Extractor que exige una sesión de administrador válida.
//! Acepta `Authorization: Bearer <token>` o la cookie `taller_session`.

use std::fmt;

use actix_web::{
    dev::Payload, http::StatusCode, web, FromRequest, HttpRequest, HttpResponse, ResponseError,
};
use futures_util::future::LocalBoxFuture;
use serde_json::json;

use crate::services::session_service::SessionService;

pub const SESSION_COOKIE_NAME: &str = "taller_session";

#[derive(Debug, Clone)]
pub struct AuthenticatedAdmin {
    pub user_email: String,
    pub token: String,
}

#[derive(Debug)]
pub enum AuthError {
    Unauthorized,
    /// SessionService no está registrado en la App.
    Misconfigured,
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::Unauthorized => write!(f, "Unauthorized"),
            AuthError::Misconfigured => write!(f, "Session service not configured"),
        }
    }
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Unauthorized => StatusCode::UNAUTHORIZED,
            AuthError::Misconfigured => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}

/// Token de la cabecera Authorization o, si no hay, de la cookie de sesión.
pub fn extract_session_token(req: &HttpRequest) -> Option<String> {
    let bearer = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());

    bearer.or_else(|| {
        req.cookie(SESSION_COOKIE_NAME)
            .map(|c| c.value().to_string())
            .filter(|t| !t.is_empty())
    })
}

impl FromRequest for AuthenticatedAdmin {
    type Error = AuthError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = extract_session_token(req);
        let sessions = req.app_data::<web::Data<SessionService>>().cloned();

        Box::pin(async move {
            let Some(sessions) = sessions else {
                return Err(AuthError::Misconfigured);
            };
            let Some(token) = token else {
                return Err(AuthError::Unauthorized);
            };

            match sessions.validate(&token).await {
                Ok(Some(session)) => Ok(AuthenticatedAdmin {
                    user_email: session.user_email,
                    token,
                }),
                Ok(None) => Err(AuthError::Unauthorized),
                Err(e) => {
                    log::error!("(AuthenticatedAdmin) Error validando sesión: {:?}", e);
                    Err(AuthError::Unauthorized)
                }
            }
        })
    }
}
