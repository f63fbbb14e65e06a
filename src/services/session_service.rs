//! services/session_service.rs
//! Sesiones de administrador (`admin_sessions`). La emisión real la hace el
//! proveedor de identidad; aquí solo se valida, se registra y se revoca.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{Pool, Sqlite};

use crate::models::session_model::SessionRecord;

#[derive(Clone, Debug)]
pub struct SessionService {
    db_pool: Pool<Sqlite>,
}

impl SessionService {
    pub fn new(db_pool: Pool<Sqlite>) -> Self {
        SessionService { db_pool }
    }

    /// Sesión vigente para `token`, o `None` si no existe o ya expiró.
    pub async fn validate(&self, token: &str) -> Result<Option<SessionRecord>> {
        let session = sqlx::query_as::<_, SessionRecord>(
            r#"
            SELECT token, user_email, created_at, expires_at
            FROM admin_sessions
            WHERE token = ?1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.db_pool)
        .await
        .context("Error consultando admin_sessions")?;

        let Some(session) = session else {
            return Ok(None);
        };

        if let Some(expires_at) = &session.expires_at {
            let expires_at: DateTime<Utc> = expires_at
                .parse()
                .with_context(|| format!("expires_at inválido: {}", expires_at))?;
            if expires_at <= Utc::now() {
                log::info!("(validate) Sesión de {} expirada", session.user_email);
                return Ok(None);
            }
        }

        Ok(Some(session))
    }

    /// Crea una sesión nueva con token aleatorio. `ttl = None` no expira.
    #[cfg(test)]
    pub async fn create_session(
        &self,
        user_email: &str,
        ttl: Option<chrono::Duration>,
    ) -> Result<String> {
        let token = uuid::Uuid::new_v4().simple().to_string();
        self.insert_session(&token, user_email, ttl).await?;
        Ok(token)
    }

    /// Registra un token conocido (p.ej. ADMIN_TOKEN) si todavía no existe.
    pub async fn ensure_session(&self, token: &str, user_email: &str) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        sqlx::query(
            r#"
            INSERT OR IGNORE INTO admin_sessions (token, user_email, created_at, expires_at)
            VALUES (?1, ?2, ?3, NULL)
            "#,
        )
        .bind(token)
        .bind(user_email)
        .bind(&now)
        .execute(&self.db_pool)
        .await
        .context("Error registrando sesión de arranque")?;
        Ok(())
    }

    pub async fn revoke(&self, token: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM admin_sessions WHERE token = ?1")
            .bind(token)
            .execute(&self.db_pool)
            .await
            .context("Error revocando sesión")?;
        Ok(result.rows_affected() > 0)
    }

    #[cfg(test)]
    async fn insert_session(
        &self,
        token: &str,
        user_email: &str,
        ttl: Option<chrono::Duration>,
    ) -> Result<()> {
        let now = Utc::now();
        let expires_at = ttl.map(|d| (now + d).to_rfc3339());

        sqlx::query(
            r#"
            INSERT INTO admin_sessions (token, user_email, created_at, expires_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(token)
        .bind(user_email)
        .bind(now.to_rfc3339())
        .bind(&expires_at)
        .execute(&self.db_pool)
        .await
        .context("Error creando sesión")?;
        Ok(())
    }
}
