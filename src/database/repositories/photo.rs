use chrono::Utc;
use sqlx::SqliteConnection;

use crate::database::models::Photo;
use crate::error::{AppError, AppResult};

const PHOTO_COLUMNS: &str = "id, journey_id, user_id, file_path, description, created_at, updated_at";

pub struct PhotoRepository;

impl PhotoRepository {
    pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> AppResult<Option<Photo>> {
        let sql = format!("SELECT {PHOTO_COLUMNS} FROM photos WHERE id = ?");
        let photo = sqlx::query_as::<_, Photo>(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(photo)
    }

    pub async fn find_by_journey_id(
        conn: &mut SqliteConnection,
        journey_id: i64,
    ) -> AppResult<Vec<Photo>> {
        let sql = format!("SELECT {PHOTO_COLUMNS} FROM photos WHERE journey_id = ? ORDER BY id");
        let photos = sqlx::query_as::<_, Photo>(&sql)
            .bind(journey_id)
            .fetch_all(&mut *conn)
            .await?;
        Ok(photos)
    }

    pub async fn insert(
        conn: &mut SqliteConnection,
        journey_id: i64,
        user_id: i64,
        file_path: &str,
        description: Option<&str>,
    ) -> AppResult<Photo> {
        let now = Utc::now();
        let sql = format!(
            r#"
            INSERT INTO photos (journey_id, user_id, file_path, description, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING {PHOTO_COLUMNS}
            "#
        );
        let photo = sqlx::query_as::<_, Photo>(&sql)
            .bind(journey_id)
            .bind(user_id)
            .bind(file_path)
            .bind(description)
            .bind(now)
            .bind(now)
            .fetch_one(&mut *conn)
            .await?;

        tracing::debug!("Inserted photo {} for journey {}", photo.id, journey_id);
        Ok(photo)
    }

    pub async fn update(
        conn: &mut SqliteConnection,
        id: i64,
        description: Option<&str>,
    ) -> AppResult<Photo> {
        let sql = format!(
            r#"
            UPDATE photos SET description = ?, updated_at = ?
            WHERE id = ?
            RETURNING {PHOTO_COLUMNS}
            "#
        );
        sqlx::query_as::<_, Photo>(&sql)
            .bind(description)
            .bind(Utc::now())
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Photo with ID {id} not found")))
    }

    pub async fn delete_by_id(conn: &mut SqliteConnection, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM photos WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
