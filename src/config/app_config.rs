//! config/app_config.rs
//! Configuración global leída desde el entorno (.env incluido).

use std::env;

use serde::{Deserialize, Serialize};

/// Credenciales SMTP. Solo se habilitan si vienen host, usuario y contraseña.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
    /// Dirección remitente; si no se define se usa `user`.
    pub from: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    /// Nombre del taller que aparece en los recordatorios.
    pub business_name: String,
    /// Token de sesión que se registra al arrancar (opcional).
    pub admin_token: Option<String>,
    pub admin_email: String,
    pub smtp: Option<SmtpSettings>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database_url: "sqlite:data/taller.db".to_string(),
            server_host: "0.0.0.0".to_string(),
            server_port: 5022,
            business_name: "KwaBhunu".to_string(),
            admin_token: None,
            admin_email: "admin@localhost".to_string(),
            smtp: None,
        }
    }
}

impl AppConfig {
    /// Lee la configuración del entorno. Lo que no esté definido toma el valor por defecto.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Igual que `from_env`, pero con una función de búsqueda inyectable (útil en tests).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AppConfig::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let server_port = match non_empty("SERVER_PORT") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                log::warn!(
                    "(AppConfig) SERVER_PORT='{}' no es válido, usando {}",
                    raw,
                    defaults.server_port
                );
                defaults.server_port
            }),
            None => defaults.server_port,
        };

        let smtp = match (
            non_empty("SMTP_HOST"),
            non_empty("SMTP_USER"),
            non_empty("SMTP_PASS"),
        ) {
            (Some(host), Some(user), Some(pass)) => {
                let port = non_empty("SMTP_PORT")
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(587);
                let from = non_empty("SMTP_FROM").unwrap_or_else(|| user.clone());
                Some(SmtpSettings {
                    host,
                    port,
                    user,
                    pass,
                    from,
                })
            }
            _ => None,
        };

        AppConfig {
            database_url: non_empty("DATABASE_URL").unwrap_or(defaults.database_url),
            server_host: non_empty("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port,
            business_name: non_empty("BUSINESS_NAME").unwrap_or(defaults.business_name),
            admin_token: non_empty("ADMIN_TOKEN"),
            admin_email: non_empty("ADMIN_EMAIL").unwrap_or(defaults.admin_email),
            smtp,
        }
    }
}
