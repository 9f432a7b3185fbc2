use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use super::role::{Role, RoleName};

/// 用户数据库实体
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// 由 user_roles 关联表加载
    #[sqlx(skip)]
    pub roles: Vec<Role>,
}

impl User {
    pub fn has_role(&self, name: RoleName) -> bool {
        self.roles.iter().any(|r| r.name == name)
    }
}
