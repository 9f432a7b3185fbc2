use std::collections::BTreeSet;
use std::path::PathBuf;

use sqlx::{SqliteConnection, SqlitePool};

use super::ensure_journey_owner;
use crate::database::models::{
    Journey, JourneyDraft, JourneyLinks, Location, ParticipantRef, Tag, TagRef, User,
};
use crate::database::repositories::{
    JourneyRepository, LocationRepository, TagRepository, UserRepository,
};
use crate::error::{AppError, AppResult};
use crate::models::{
    JourneyCreation, JourneyUpdate, TagCreation, Validate, Violations, non_blank,
};

#[derive(Clone)]
pub struct JourneyService {
    pool: SqlitePool,
}

/// 起点或终点
#[derive(Debug, Clone, Copy)]
enum Endpoint {
    Origin,
    Destination,
}

impl JourneyService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_journey(&self, dto: &JourneyCreation, user: &User) -> AppResult<Journey> {
        dto.validate()?;

        let mut tx = self.pool.begin().await?;

        let origin = resolve_location(
            &mut tx,
            dto.origin_location_name.as_deref(),
            dto.origin_location_description.as_deref(),
        )
        .await?;
        let destination = resolve_location(
            &mut tx,
            dto.destination_location_name.as_deref(),
            dto.destination_location_description.as_deref(),
        )
        .await?;

        let draft = JourneyDraft {
            id: None,
            user_id: user.id,
            name: dto.name.trim().to_string(),
            description: non_blank(dto.description.as_deref()).map(str::to_string),
            start_date: dto.start_date,
            end_date: dto.end_date,
            origin_location_id: origin.map(|l| l.id),
            destination_location_id: destination.map(|l| l.id),
        };
        let links = JourneyLinks {
            tags: tag_refs(&dto.tag_names),
            participants: participant_refs(&dto.participant_usernames),
        };

        let id = JourneyRepository::save(&mut tx, &draft, &links).await?;
        let journey = load(&mut tx, id).await?;
        tx.commit().await?;

        tracing::info!("User {} created journey '{}' ({})", user.id, journey.name, id);
        Ok(journey)
    }

    pub async fn get_journey_by_id(&self, id: i64) -> AppResult<Journey> {
        let mut conn = self.pool.acquire().await?;
        load(&mut conn, id).await
    }

    pub async fn get_all_journeys(&self) -> AppResult<Vec<Journey>> {
        let mut conn = self.pool.acquire().await?;
        JourneyRepository::find_all(&mut conn).await
    }

    pub async fn get_journeys_by_user_id(&self, user_id: i64) -> AppResult<Vec<Journey>> {
        let mut conn = self.pool.acquire().await?;
        JourneyRepository::find_by_user_id(&mut conn, user_id).await
    }

    pub async fn get_participated_journeys(&self, user: &User) -> AppResult<Vec<Journey>> {
        let mut conn = self.pool.acquire().await?;
        JourneyRepository::find_by_participant_id(&mut conn, user.id).await
    }

    /// 部分更新旅程，只修改 `Some` 的字段
    pub async fn update_journey(
        &self,
        id: i64,
        dto: &JourneyUpdate,
        user: &User,
    ) -> AppResult<Journey> {
        dto.validate()?;

        let mut tx = self.pool.begin().await?;
        let journey = load_owned(&mut tx, id, user).await?;
        let mut draft = journey.to_draft();
        let mut links = JourneyLinks::from(&journey);

        if let Some(name) = &dto.name {
            draft.name = name.trim().to_string();
        }
        if let Some(description) = &dto.description {
            draft.description = non_blank(Some(description.as_str())).map(str::to_string);
        }
        if dto.start_date.is_some() {
            draft.start_date = dto.start_date;
        }
        if dto.end_date.is_some() {
            draft.end_date = dto.end_date;
        }
        if let (Some(start), Some(end)) = (draft.start_date, draft.end_date) {
            if end < start {
                return Err(AppError::validation("End date must not be before start date"));
            }
        }

        if let Some(name) = &dto.origin_location_name {
            draft.origin_location_id = resolve_location(
                &mut tx,
                Some(name.as_str()),
                dto.origin_location_description.as_deref(),
            )
            .await?
            .map(|l| l.id);
        }
        if let Some(name) = &dto.destination_location_name {
            draft.destination_location_id = resolve_location(
                &mut tx,
                Some(name.as_str()),
                dto.destination_location_description.as_deref(),
            )
            .await?
            .map(|l| l.id);
        }

        if let Some(tag_names) = &dto.tag_names {
            links.tags = tag_refs(tag_names);
        }
        if let Some(usernames) = &dto.participant_usernames {
            links.participants = participant_refs(usernames);
        }

        JourneyRepository::save(&mut tx, &draft, &links).await?;
        let journey = load(&mut tx, id).await?;
        tx.commit().await?;

        tracing::info!("User {} updated journey {}", user.id, id);
        Ok(journey)
    }

    /// 删除旅程及其事件和照片，随后尽量删除已复制的照片文件
    pub async fn delete_journey(&self, id: i64, user: &User) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;
        let journey = load_owned(&mut tx, id, user).await?;
        let files: Vec<PathBuf> = journey
            .photos
            .iter()
            .map(|p| PathBuf::from(&p.file_path))
            .collect();

        JourneyRepository::delete_by_id(&mut tx, id).await?;
        tx.commit().await?;

        for file in files {
            if let Err(e) = tokio::fs::remove_file(&file).await {
                tracing::warn!("Failed to remove photo file {}: {}", file.display(), e);
            }
        }

        tracing::info!("User {} deleted journey {}", user.id, id);
        Ok(())
    }

    /// 添加标签，标签不存在时自动创建
    pub async fn add_tag_to_journey(
        &self,
        journey_id: i64,
        tag_name: &str,
        user: &User,
    ) -> AppResult<Journey> {
        TagCreation {
            name: tag_name.to_string(),
        }
        .validate()?;

        let mut tx = self.pool.begin().await?;
        let journey = load_owned(&mut tx, journey_id, user).await?;
        let mut links = JourneyLinks::from(&journey);
        links.tags.insert(TagRef::Name(tag_name.trim().to_string()));

        JourneyRepository::save(&mut tx, &journey.to_draft(), &links).await?;
        let journey = load(&mut tx, journey_id).await?;
        tx.commit().await?;

        tracing::info!("Added tag '{}' to journey {}", tag_name.trim(), journey_id);
        Ok(journey)
    }

    pub async fn remove_tag_from_journey(
        &self,
        journey_id: i64,
        tag_name: &str,
        user: &User,
    ) -> AppResult<Journey> {
        let tag_name = tag_name.trim();

        let mut tx = self.pool.begin().await?;
        let journey = load_owned(&mut tx, journey_id, user).await?;
        let tag = TagRepository::find_by_name(&mut tx, tag_name)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Tag with name '{tag_name}' not found")))?;

        let mut links = JourneyLinks::from(&journey);
        links.tags.remove(&TagRef::Id(tag.id));

        JourneyRepository::save(&mut tx, &journey.to_draft(), &links).await?;
        let journey = load(&mut tx, journey_id).await?;
        tx.commit().await?;

        tracing::info!("Removed tag '{}' from journey {}", tag_name, journey_id);
        Ok(journey)
    }

    pub async fn get_tags_for_journey(&self, journey_id: i64) -> AppResult<Vec<Tag>> {
        let mut conn = self.pool.acquire().await?;
        TagRepository::find_by_journey_id(&mut conn, journey_id).await
    }

    pub async fn set_origin_location(
        &self,
        journey_id: i64,
        name: &str,
        description: Option<&str>,
        user: &User,
    ) -> AppResult<Journey> {
        self.set_endpoint(journey_id, Endpoint::Origin, Some((name, description)), user)
            .await
    }

    pub async fn set_destination_location(
        &self,
        journey_id: i64,
        name: &str,
        description: Option<&str>,
        user: &User,
    ) -> AppResult<Journey> {
        self.set_endpoint(journey_id, Endpoint::Destination, Some((name, description)), user)
            .await
    }

    pub async fn remove_origin_location(&self, journey_id: i64, user: &User) -> AppResult<Journey> {
        self.set_endpoint(journey_id, Endpoint::Origin, None, user)
            .await
    }

    pub async fn remove_destination_location(
        &self,
        journey_id: i64,
        user: &User,
    ) -> AppResult<Journey> {
        self.set_endpoint(journey_id, Endpoint::Destination, None, user)
            .await
    }

    async fn set_endpoint(
        &self,
        journey_id: i64,
        endpoint: Endpoint,
        location: Option<(&str, Option<&str>)>,
        user: &User,
    ) -> AppResult<Journey> {
        if let Some((name, description)) = location {
            let mut v = Violations::new();
            v.required("Location name", name, 1, 100);
            v.max_length("Location description", description, 255);
            v.into_result()?;
        }

        let mut tx = self.pool.begin().await?;
        let journey = load_owned(&mut tx, journey_id, user).await?;
        let mut draft = journey.to_draft();

        let location_id = match location {
            Some((name, description)) => resolve_location(&mut tx, Some(name), description)
                .await?
                .map(|l| l.id),
            None => None,
        };
        match endpoint {
            Endpoint::Origin => draft.origin_location_id = location_id,
            Endpoint::Destination => draft.destination_location_id = location_id,
        }

        JourneyRepository::save(&mut tx, &draft, &JourneyLinks::from(&journey)).await?;
        let journey = load(&mut tx, journey_id).await?;
        tx.commit().await?;

        tracing::info!("Set {:?} location of journey {} to {:?}", endpoint, journey_id, location_id);
        Ok(journey)
    }

    /// 按用户名或邮箱添加参与者
    pub async fn add_participant(
        &self,
        journey_id: i64,
        identifier: &str,
        user: &User,
    ) -> AppResult<Journey> {
        let mut tx = self.pool.begin().await?;
        let journey = load_owned(&mut tx, journey_id, user).await?;
        let participant = find_participant(&mut tx, identifier).await?;

        let mut links = JourneyLinks::from(&journey);
        links.participants.insert(ParticipantRef::Id(participant.id));

        JourneyRepository::save(&mut tx, &journey.to_draft(), &links).await?;
        let journey = load(&mut tx, journey_id).await?;
        tx.commit().await?;

        tracing::info!("Added participant {} to journey {}", participant.username, journey_id);
        Ok(journey)
    }

    pub async fn remove_participant(
        &self,
        journey_id: i64,
        identifier: &str,
        user: &User,
    ) -> AppResult<Journey> {
        let mut tx = self.pool.begin().await?;
        let journey = load_owned(&mut tx, journey_id, user).await?;
        let participant = find_participant(&mut tx, identifier).await?;

        let mut links = JourneyLinks::from(&journey);
        links.participants.remove(&ParticipantRef::Id(participant.id));

        JourneyRepository::save(&mut tx, &journey.to_draft(), &links).await?;
        let journey = load(&mut tx, journey_id).await?;
        tx.commit().await?;

        tracing::info!(
            "Removed participant {} from journey {}",
            participant.username,
            journey_id
        );
        Ok(journey)
    }

    pub async fn get_participants(&self, journey_id: i64) -> AppResult<Vec<User>> {
        let mut conn = self.pool.acquire().await?;
        JourneyRepository::find_participants(&mut conn, journey_id).await
    }

    /// 在所有旅程中搜索，空关键字返回全部
    pub async fn search_journeys(&self, keyword: &str) -> AppResult<Vec<Journey>> {
        let mut conn = self.pool.acquire().await?;
        JourneyRepository::search(&mut conn, keyword.trim()).await
    }

    /// 标签不存在时返回空列表
    pub async fn filter_journeys_by_tag(&self, tag_name: &str) -> AppResult<Vec<Journey>> {
        let mut conn = self.pool.acquire().await?;
        match TagRepository::find_by_name(&mut conn, tag_name.trim()).await? {
            Some(tag) => JourneyRepository::find_by_tag_id(&mut conn, tag.id).await,
            None => Ok(Vec::new()),
        }
    }
}

async fn load(conn: &mut SqliteConnection, id: i64) -> AppResult<Journey> {
    JourneyRepository::find_by_id(conn, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Journey with ID {id} not found")))
}

async fn load_owned(conn: &mut SqliteConnection, id: i64, user: &User) -> AppResult<Journey> {
    ensure_journey_owner(conn, id, user).await?;
    load(conn, id).await
}

async fn find_participant(conn: &mut SqliteConnection, identifier: &str) -> AppResult<User> {
    let identifier = identifier.trim();
    UserRepository::find_by_username_or_email(conn, identifier)
        .await?
        .ok_or_else(|| {
            AppError::not_found(format!("Participant with identifier '{identifier}' not found"))
        })
}

/// 按名称查找或创建地点，空白名称返回 None
pub(crate) async fn resolve_location(
    conn: &mut SqliteConnection,
    name: Option<&str>,
    description: Option<&str>,
) -> AppResult<Option<Location>> {
    match non_blank(name) {
        Some(name) => {
            let location =
                LocationRepository::find_or_create(conn, name, non_blank(description)).await?;
            Ok(Some(location))
        }
        None => Ok(None),
    }
}

fn tag_refs(names: &BTreeSet<String>) -> BTreeSet<TagRef> {
    names
        .iter()
        .filter_map(|n| non_blank(Some(n.as_str())))
        .map(|n| TagRef::Name(n.to_string()))
        .collect()
}

fn participant_refs(usernames: &BTreeSet<String>) -> BTreeSet<ParticipantRef> {
    usernames
        .iter()
        .filter_map(|n| non_blank(Some(n.as_str())))
        .map(|n| ParticipantRef::Username(n.to_string()))
        .collect()
}
