use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SessionRecord {
    pub token: String,
    pub user_email: String,
    pub created_at: String,
    pub expires_at: Option<String>, // RFC3339; NULL = no expira
}
