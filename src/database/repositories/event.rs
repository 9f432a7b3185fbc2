use chrono::Utc;
use sqlx::SqliteConnection;

use crate::database::models::{Event, EventDraft};
use crate::error::{AppError, AppResult};

const EVENT_COLUMNS: &str = "id, journey_id, location_id, name, description, event_date, event_time, created_at, updated_at";

// 没有日期的事件排在最后
const EVENT_ORDER: &str =
    "ORDER BY event_date IS NULL, event_date, event_time IS NULL, event_time, id";

pub struct EventRepository;

impl EventRepository {
    pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> AppResult<Option<Event>> {
        let sql = format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = ?");
        let event = sqlx::query_as::<_, Event>(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(event)
    }

    pub async fn find_all(conn: &mut SqliteConnection) -> AppResult<Vec<Event>> {
        let sql = format!("SELECT {EVENT_COLUMNS} FROM events {EVENT_ORDER}");
        let events = sqlx::query_as::<_, Event>(&sql)
            .fetch_all(&mut *conn)
            .await?;
        Ok(events)
    }

    pub async fn find_by_journey_id(
        conn: &mut SqliteConnection,
        journey_id: i64,
    ) -> AppResult<Vec<Event>> {
        let sql = format!("SELECT {EVENT_COLUMNS} FROM events WHERE journey_id = ? {EVENT_ORDER}");
        let events = sqlx::query_as::<_, Event>(&sql)
            .bind(journey_id)
            .fetch_all(&mut *conn)
            .await?;
        Ok(events)
    }

    pub async fn insert(conn: &mut SqliteConnection, draft: &EventDraft) -> AppResult<Event> {
        let now = Utc::now();
        let sql = format!(
            r#"
            INSERT INTO events (
                journey_id, location_id, name, description,
                event_date, event_time, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {EVENT_COLUMNS}
            "#
        );
        let event = sqlx::query_as::<_, Event>(&sql)
            .bind(draft.journey_id)
            .bind(draft.location_id)
            .bind(&draft.name)
            .bind(&draft.description)
            .bind(draft.event_date)
            .bind(draft.event_time)
            .bind(now)
            .bind(now)
            .fetch_one(&mut *conn)
            .await?;

        tracing::debug!("Inserted event: {}", event.id);
        Ok(event)
    }

    pub async fn update(
        conn: &mut SqliteConnection,
        id: i64,
        draft: &EventDraft,
    ) -> AppResult<Event> {
        let sql = format!(
            r#"
            UPDATE events
            SET journey_id = ?, location_id = ?, name = ?, description = ?,
                event_date = ?, event_time = ?, updated_at = ?
            WHERE id = ?
            RETURNING {EVENT_COLUMNS}
            "#
        );
        sqlx::query_as::<_, Event>(&sql)
            .bind(draft.journey_id)
            .bind(draft.location_id)
            .bind(&draft.name)
            .bind(&draft.description)
            .bind(draft.event_date)
            .bind(draft.event_time)
            .bind(Utc::now())
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Event with ID {id} not found")))
    }

    pub async fn delete_by_id(conn: &mut SqliteConnection, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM events WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
