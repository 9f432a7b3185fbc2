use chrono::Utc;
use sqlx::SqliteConnection;

use crate::database::models::Tag;
use crate::error::{AppError, AppResult};

pub struct TagRepository;

impl TagRepository {
    pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> AppResult<Option<Tag>> {
        let tag = sqlx::query_as::<_, Tag>(
            "SELECT id, name, created_at, updated_at FROM tags WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(tag)
    }

    pub async fn find_by_name(conn: &mut SqliteConnection, name: &str) -> AppResult<Option<Tag>> {
        let tag = sqlx::query_as::<_, Tag>(
            "SELECT id, name, created_at, updated_at FROM tags WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(tag)
    }

    pub async fn find_all(conn: &mut SqliteConnection) -> AppResult<Vec<Tag>> {
        let tags = sqlx::query_as::<_, Tag>(
            "SELECT id, name, created_at, updated_at FROM tags ORDER BY name",
        )
        .fetch_all(&mut *conn)
        .await?;
        Ok(tags)
    }

    pub async fn find_by_journey_id(
        conn: &mut SqliteConnection,
        journey_id: i64,
    ) -> AppResult<Vec<Tag>> {
        let tags = sqlx::query_as::<_, Tag>(
            r#"
            SELECT t.id, t.name, t.created_at, t.updated_at
            FROM tags t
            JOIN journey_tags jt ON jt.tag_id = t.id
            WHERE jt.journey_id = ?
            ORDER BY t.name
            "#,
        )
        .bind(journey_id)
        .fetch_all(&mut *conn)
        .await?;
        Ok(tags)
    }

    pub async fn insert(conn: &mut SqliteConnection, name: &str) -> AppResult<Tag> {
        let now = Utc::now();
        let tag = sqlx::query_as::<_, Tag>(
            r#"
            INSERT INTO tags (name, created_at, updated_at)
            VALUES (?, ?, ?)
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *conn)
        .await?;

        tracing::debug!("Inserted tag '{}' with id {}", tag.name, tag.id);
        Ok(tag)
    }

    pub async fn update(conn: &mut SqliteConnection, id: i64, name: &str) -> AppResult<Tag> {
        sqlx::query_as::<_, Tag>(
            r#"
            UPDATE tags SET name = ?, updated_at = ?
            WHERE id = ?
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Tag with ID {id} not found")))
    }

    pub async fn delete_by_id(conn: &mut SqliteConnection, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM tags WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn add_to_journey(
        conn: &mut SqliteConnection,
        journey_id: i64,
        tag_id: i64,
    ) -> AppResult<()> {
        sqlx::query("INSERT OR IGNORE INTO journey_tags (journey_id, tag_id) VALUES (?, ?)")
            .bind(journey_id)
            .bind(tag_id)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    pub async fn remove_from_journey(
        conn: &mut SqliteConnection,
        journey_id: i64,
        tag_id: i64,
    ) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM journey_tags WHERE journey_id = ? AND tag_id = ?")
            .bind(journey_id)
            .bind(tag_id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
