use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Photo {
    pub id: i64,
    pub journey_id: i64,
    /// 上传者，用户被删除后为空
    pub user_id: Option<i64>,
    pub file_path: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
