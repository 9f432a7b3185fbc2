use sqlx::SqliteConnection;

use crate::database::models::{Role, RoleName};
use crate::error::AppResult;

pub struct RoleRepository;

impl RoleRepository {
    pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> AppResult<Option<Role>> {
        let role = sqlx::query_as::<_, Role>(
            "SELECT id, name, created_at, updated_at FROM roles WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(role)
    }

    pub async fn find_by_name(
        conn: &mut SqliteConnection,
        name: RoleName,
    ) -> AppResult<Option<Role>> {
        let role = sqlx::query_as::<_, Role>(
            "SELECT id, name, created_at, updated_at FROM roles WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(role)
    }

    pub async fn find_all(conn: &mut SqliteConnection) -> AppResult<Vec<Role>> {
        let roles = sqlx::query_as::<_, Role>(
            "SELECT id, name, created_at, updated_at FROM roles ORDER BY id",
        )
        .fetch_all(&mut *conn)
        .await?;
        Ok(roles)
    }

    pub async fn find_by_user_id(
        conn: &mut SqliteConnection,
        user_id: i64,
    ) -> AppResult<Vec<Role>> {
        let roles = sqlx::query_as::<_, Role>(
            r#"
            SELECT r.id, r.name, r.created_at, r.updated_at
            FROM roles r
            JOIN user_roles ur ON ur.role_id = r.id
            WHERE ur.user_id = ?
            ORDER BY r.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&mut *conn)
        .await?;
        Ok(roles)
    }
}
