use sqlx::{SqliteConnection, SqlitePool};

use super::ensure_journey_owner;
use super::journey::resolve_location;
use crate::database::models::{Event, EventDraft, User};
use crate::database::repositories::EventRepository;
use crate::error::{AppError, AppResult};
use crate::models::{EventCreation, EventUpdate, Validate, non_blank};

#[derive(Clone)]
pub struct EventService {
    pool: SqlitePool,
}

impl EventService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// 创建事件；挂在旅程下时必须是该旅程的所有者
    pub async fn create_event(&self, dto: &EventCreation, user: &User) -> AppResult<Event> {
        dto.validate()?;

        let mut tx = self.pool.begin().await?;
        if let Some(journey_id) = dto.journey_id {
            ensure_journey_owner(&mut tx, journey_id, user).await?;
        }

        let location = resolve_location(
            &mut tx,
            dto.location_name.as_deref(),
            dto.location_description.as_deref(),
        )
        .await?;

        let draft = EventDraft {
            journey_id: dto.journey_id,
            location_id: location.map(|l| l.id),
            name: dto.name.trim().to_string(),
            description: non_blank(dto.description.as_deref()).map(str::to_string),
            event_date: dto.event_date,
            event_time: dto.event_time,
        };
        let event = EventRepository::insert(&mut tx, &draft).await?;
        tx.commit().await?;

        tracing::info!("User {} created event '{}' ({})", user.id, event.name, event.id);
        Ok(event)
    }

    pub async fn get_event_by_id(&self, id: i64) -> AppResult<Event> {
        let mut conn = self.pool.acquire().await?;
        load(&mut conn, id).await
    }

    pub async fn get_all_events(&self) -> AppResult<Vec<Event>> {
        let mut conn = self.pool.acquire().await?;
        EventRepository::find_all(&mut conn).await
    }

    pub async fn get_events_by_journey_id(&self, journey_id: i64) -> AppResult<Vec<Event>> {
        let mut conn = self.pool.acquire().await?;
        EventRepository::find_by_journey_id(&mut conn, journey_id).await
    }

    /// 部分更新事件
    ///
    /// 权限通过当前所属旅程判断；挂到新旅程时还必须拥有目标旅程。
    /// `location_name` 为 `Some("")` 时清除地点。
    pub async fn update_event(&self, id: i64, dto: &EventUpdate, user: &User) -> AppResult<Event> {
        dto.validate()?;

        let mut tx = self.pool.begin().await?;
        let event = load(&mut tx, id).await?;
        if let Some(journey_id) = event.journey_id {
            ensure_journey_owner(&mut tx, journey_id, user).await?;
        }

        let mut draft = EventDraft::from(&event);
        if let Some(target) = dto.journey_id {
            if event.journey_id != Some(target) {
                ensure_journey_owner(&mut tx, target, user).await?;
                draft.journey_id = Some(target);
            }
        }
        if let Some(name) = &dto.name {
            draft.name = name.trim().to_string();
        }
        if let Some(description) = &dto.description {
            draft.description = non_blank(Some(description.as_str())).map(str::to_string);
        }
        if dto.event_date.is_some() {
            draft.event_date = dto.event_date;
        }
        if dto.event_time.is_some() {
            draft.event_time = dto.event_time;
        }
        if let Some(location_name) = &dto.location_name {
            draft.location_id = resolve_location(
                &mut tx,
                Some(location_name.as_str()),
                dto.location_description.as_deref(),
            )
            .await?
            .map(|l| l.id);
        }

        let event = EventRepository::update(&mut tx, id, &draft).await?;
        tx.commit().await?;

        tracing::info!("User {} updated event {}", user.id, id);
        Ok(event)
    }

    pub async fn delete_event(&self, id: i64, user: &User) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;
        let event = load(&mut tx, id).await?;
        if let Some(journey_id) = event.journey_id {
            ensure_journey_owner(&mut tx, journey_id, user).await?;
        }
        EventRepository::delete_by_id(&mut tx, id).await?;
        tx.commit().await?;

        tracing::info!("User {} deleted event {}", user.id, id);
        Ok(())
    }
}

async fn load(conn: &mut SqliteConnection, id: i64) -> AppResult<Event> {
    EventRepository::find_by_id(conn, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Event with ID {id} not found")))
}
