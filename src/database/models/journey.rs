use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;

use super::{Event, Location, Photo, Tag, User};

/// 旅程实体
///
/// 列字段直接从 `journeys` 表映射，带 `#[sqlx(skip)]` 的字段由
/// `JourneyRepository` 在查询后填充。
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Journey {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub origin_location_id: Option<i64>,
    pub destination_location_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    #[sqlx(skip)]
    pub owner: Option<User>,
    #[sqlx(skip)]
    pub origin_location: Option<Location>,
    #[sqlx(skip)]
    pub destination_location: Option<Location>,
    #[sqlx(skip)]
    pub tags: Vec<Tag>,
    #[sqlx(skip)]
    pub participants: Vec<User>,
    #[sqlx(skip)]
    pub events: Vec<Event>,
    #[sqlx(skip)]
    pub photos: Vec<Photo>,
}

impl Journey {
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }

    /// 转换为可写回数据库的草稿
    pub fn to_draft(&self) -> JourneyDraft {
        JourneyDraft {
            id: Some(self.id),
            user_id: self.user_id,
            name: self.name.clone(),
            description: self.description.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            origin_location_id: self.origin_location_id,
            destination_location_id: self.destination_location_id,
        }
    }
}

/// `journeys` 表的一行，`id` 为空时插入
#[derive(Debug, Clone)]
pub struct JourneyDraft {
    pub id: Option<i64>,
    pub user_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub origin_location_id: Option<i64>,
    pub destination_location_id: Option<i64>,
}

/// 标签引用：已持久化的按 id，新标签按名称
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum TagRef {
    Id(i64),
    Name(String),
}

/// 参与者引用：按 id 或用户名
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum ParticipantRef {
    Id(i64),
    Username(String),
}

/// 保存旅程时要同步的关联集合
#[derive(Debug, Clone, Default)]
pub struct JourneyLinks {
    pub tags: BTreeSet<TagRef>,
    pub participants: BTreeSet<ParticipantRef>,
}

impl From<&Journey> for JourneyLinks {
    fn from(journey: &Journey) -> Self {
        JourneyLinks {
            tags: journey.tags.iter().map(|t| TagRef::Id(t.id)).collect(),
            participants: journey
                .participants
                .iter()
                .map(|u| ParticipantRef::Id(u.id))
                .collect(),
        }
    }
}
