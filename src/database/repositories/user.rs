use chrono::Utc;
use sqlx::SqliteConnection;

use super::RoleRepository;
use crate::database::models::{Role, User};
use crate::error::{AppError, AppResult};

const USER_COLUMNS: &str = "id, username, email, password_hash, created_at, updated_at";

/// 用户存储库实现
pub struct UserRepository;

impl UserRepository {
    /// 为查询到的用户补充角色
    async fn with_roles(conn: &mut SqliteConnection, user: Option<User>) -> AppResult<Option<User>> {
        match user {
            Some(mut user) => {
                user.roles = RoleRepository::find_by_user_id(conn, user.id).await?;
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }

    pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> AppResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Self::with_roles(conn, user).await
    }

    pub async fn find_by_username(
        conn: &mut SqliteConnection,
        username: &str,
    ) -> AppResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .fetch_optional(&mut *conn)
            .await?;
        Self::with_roles(conn, user).await
    }

    pub async fn find_by_email(
        conn: &mut SqliteConnection,
        email: &str,
    ) -> AppResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&mut *conn)
            .await?;
        Self::with_roles(conn, user).await
    }

    /// 登录标识既可以是用户名也可以是邮箱
    pub async fn find_by_username_or_email(
        conn: &mut SqliteConnection,
        identifier: &str,
    ) -> AppResult<Option<User>> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = ? OR email = ? ORDER BY id LIMIT 1"
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(identifier)
            .bind(identifier)
            .fetch_optional(&mut *conn)
            .await?;
        Self::with_roles(conn, user).await
    }

    pub async fn find_all(conn: &mut SqliteConnection) -> AppResult<Vec<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY username");
        let mut users = sqlx::query_as::<_, User>(&sql)
            .fetch_all(&mut *conn)
            .await?;
        for user in users.iter_mut() {
            user.roles = RoleRepository::find_by_user_id(conn, user.id).await?;
        }
        Ok(users)
    }

    pub async fn insert(
        conn: &mut SqliteConnection,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> AppResult<User> {
        let now = Utc::now();
        let sql = format!(
            r#"
            INSERT INTO users (username, email, password_hash, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING {USER_COLUMNS}
            "#
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .bind(email)
            .bind(password_hash)
            .bind(now)
            .bind(now)
            .fetch_one(&mut *conn)
            .await?;

        tracing::debug!("Inserted user: {}", user.id);
        Ok(user)
    }

    pub async fn update(conn: &mut SqliteConnection, user: &User) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET username = ?, email = ?, password_hash = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(Utc::now())
        .bind(user.id)
        .execute(&mut *conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("User {} not found", user.id)));
        }
        Ok(())
    }

    pub async fn delete_by_id(conn: &mut SqliteConnection, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// 整体替换用户的角色
    pub async fn replace_roles(
        conn: &mut SqliteConnection,
        user_id: i64,
        role_ids: &[i64],
    ) -> AppResult<()> {
        sqlx::query("DELETE FROM user_roles WHERE user_id = ?")
            .bind(user_id)
            .execute(&mut *conn)
            .await?;

        for role_id in role_ids {
            sqlx::query("INSERT OR IGNORE INTO user_roles (user_id, role_id) VALUES (?, ?)")
                .bind(user_id)
                .bind(role_id)
                .execute(&mut *conn)
                .await?;
        }
        Ok(())
    }

    pub async fn find_roles(conn: &mut SqliteConnection, user_id: i64) -> AppResult<Vec<Role>> {
        RoleRepository::find_by_user_id(conn, user_id).await
    }
}
