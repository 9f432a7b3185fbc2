use chrono::Utc;
use sqlx::SqliteConnection;

use crate::database::models::Location;
use crate::error::{AppError, AppResult};

pub struct LocationRepository;

impl LocationRepository {
    pub async fn find_by_id(
        conn: &mut SqliteConnection,
        id: i64,
    ) -> AppResult<Option<Location>> {
        let location = sqlx::query_as::<_, Location>(
            "SELECT id, name, description, created_at, updated_at FROM locations WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(location)
    }

    pub async fn find_by_name(
        conn: &mut SqliteConnection,
        name: &str,
    ) -> AppResult<Option<Location>> {
        let location = sqlx::query_as::<_, Location>(
            "SELECT id, name, description, created_at, updated_at FROM locations WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(location)
    }

    /// 忽略大小写查找其他同名地点，用于重命名时的冲突检查
    ///
    /// SQLite 的 `LOWER` 只折叠 ASCII，比较在 Rust 侧完成。
    pub async fn find_other_by_name_ignore_case(
        conn: &mut SqliteConnection,
        name: &str,
        exclude_id: i64,
    ) -> AppResult<Option<Location>> {
        let needle = name.to_lowercase();
        let location = Self::find_all(conn)
            .await?
            .into_iter()
            .filter(|l| l.id != exclude_id)
            .find(|l| l.name.to_lowercase() == needle);
        Ok(location)
    }

    pub async fn find_all(conn: &mut SqliteConnection) -> AppResult<Vec<Location>> {
        let locations = sqlx::query_as::<_, Location>(
            "SELECT id, name, description, created_at, updated_at FROM locations ORDER BY name",
        )
        .fetch_all(&mut *conn)
        .await?;
        Ok(locations)
    }

    pub async fn insert(
        conn: &mut SqliteConnection,
        name: &str,
        description: Option<&str>,
    ) -> AppResult<Location> {
        let now = Utc::now();
        let location = sqlx::query_as::<_, Location>(
            r#"
            INSERT INTO locations (name, description, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, name, description, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *conn)
        .await?;

        tracing::debug!("Inserted location '{}' with id {}", location.name, location.id);
        Ok(location)
    }

    pub async fn update(
        conn: &mut SqliteConnection,
        id: i64,
        name: &str,
        description: Option<&str>,
    ) -> AppResult<Location> {
        sqlx::query_as::<_, Location>(
            r#"
            UPDATE locations SET name = ?, description = ?, updated_at = ?
            WHERE id = ?
            RETURNING id, name, description, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Location with ID {id} not found")))
    }

    pub async fn delete_by_id(conn: &mut SqliteConnection, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM locations WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// 按名称查找，不存在时创建
    pub async fn find_or_create(
        conn: &mut SqliteConnection,
        name: &str,
        description: Option<&str>,
    ) -> AppResult<Location> {
        if let Some(location) = Self::find_by_name(conn, name).await? {
            return Ok(location);
        }
        Self::insert(conn, name, description).await
    }
}
