use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// 事件可以独立存在，也可以挂在某个旅程下
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Event {
    pub id: i64,
    pub journey_id: Option<i64>,
    pub location_id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub event_time: Option<NaiveTime>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 事件写入参数，插入和更新共用
#[derive(Debug, Clone, Default)]
pub struct EventDraft {
    pub journey_id: Option<i64>,
    pub location_id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub event_time: Option<NaiveTime>,
}

impl From<&Event> for EventDraft {
    fn from(event: &Event) -> Self {
        EventDraft {
            journey_id: event.journey_id,
            location_id: event.location_id,
            name: event.name.clone(),
            description: event.description.clone(),
            event_date: event.event_date,
            event_time: event.event_time,
        }
    }
}
