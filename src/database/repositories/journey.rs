use std::collections::BTreeSet;

use chrono::Utc;
use sqlx::SqliteConnection;

use super::{EventRepository, LocationRepository, PhotoRepository, TagRepository, UserRepository};
use crate::database::models::{Journey, JourneyDraft, JourneyLinks, ParticipantRef, TagRef, User};
use crate::error::{AppError, AppResult};

const JOURNEY_COLUMNS: &str = "j.id, j.user_id, j.name, j.description, j.start_date, j.end_date, \
     j.origin_location_id, j.destination_location_id, j.created_at, j.updated_at";

/// 旅程存储库
///
/// 查询返回的旅程都已填充所有者、起止地点、标签、参与者、事件和照片。
pub struct JourneyRepository;

impl JourneyRepository {
    async fn hydrate(conn: &mut SqliteConnection, mut journey: Journey) -> AppResult<Journey> {
        journey.owner = UserRepository::find_by_id(conn, journey.user_id).await?;
        if let Some(id) = journey.origin_location_id {
            journey.origin_location = LocationRepository::find_by_id(conn, id).await?;
        }
        if let Some(id) = journey.destination_location_id {
            journey.destination_location = LocationRepository::find_by_id(conn, id).await?;
        }
        journey.tags = TagRepository::find_by_journey_id(conn, journey.id).await?;
        journey.participants = Self::find_participants(conn, journey.id).await?;
        journey.events = EventRepository::find_by_journey_id(conn, journey.id).await?;
        journey.photos = PhotoRepository::find_by_journey_id(conn, journey.id).await?;
        Ok(journey)
    }

    async fn hydrate_all(
        conn: &mut SqliteConnection,
        journeys: Vec<Journey>,
    ) -> AppResult<Vec<Journey>> {
        let mut hydrated = Vec::with_capacity(journeys.len());
        for journey in journeys {
            hydrated.push(Self::hydrate(conn, journey).await?);
        }
        Ok(hydrated)
    }

    pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> AppResult<Option<Journey>> {
        let sql = format!("SELECT {JOURNEY_COLUMNS} FROM journeys j WHERE j.id = ?");
        let journey = sqlx::query_as::<_, Journey>(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        match journey {
            Some(journey) => Ok(Some(Self::hydrate(conn, journey).await?)),
            None => Ok(None),
        }
    }

    /// 只查询所有者，用于权限检查
    pub async fn find_owner_id(conn: &mut SqliteConnection, id: i64) -> AppResult<Option<i64>> {
        let owner = sqlx::query_scalar::<_, i64>("SELECT user_id FROM journeys WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(owner)
    }

    pub async fn find_all(conn: &mut SqliteConnection) -> AppResult<Vec<Journey>> {
        let sql = format!("SELECT {JOURNEY_COLUMNS} FROM journeys j ORDER BY j.id");
        let journeys = sqlx::query_as::<_, Journey>(&sql)
            .fetch_all(&mut *conn)
            .await?;
        Self::hydrate_all(conn, journeys).await
    }

    pub async fn find_by_user_id(
        conn: &mut SqliteConnection,
        user_id: i64,
    ) -> AppResult<Vec<Journey>> {
        let sql = format!("SELECT {JOURNEY_COLUMNS} FROM journeys j WHERE j.user_id = ? ORDER BY j.id");
        let journeys = sqlx::query_as::<_, Journey>(&sql)
            .bind(user_id)
            .fetch_all(&mut *conn)
            .await?;
        Self::hydrate_all(conn, journeys).await
    }

    pub async fn find_by_participant_id(
        conn: &mut SqliteConnection,
        user_id: i64,
    ) -> AppResult<Vec<Journey>> {
        let sql = format!(
            r#"
            SELECT {JOURNEY_COLUMNS}
            FROM journeys j
            JOIN journey_participants jp ON jp.journey_id = j.id
            WHERE jp.user_id = ?
            ORDER BY j.id
            "#
        );
        let journeys = sqlx::query_as::<_, Journey>(&sql)
            .bind(user_id)
            .fetch_all(&mut *conn)
            .await?;
        Self::hydrate_all(conn, journeys).await
    }

    pub async fn find_by_tag_id(
        conn: &mut SqliteConnection,
        tag_id: i64,
    ) -> AppResult<Vec<Journey>> {
        let sql = format!(
            r#"
            SELECT {JOURNEY_COLUMNS}
            FROM journeys j
            JOIN journey_tags jt ON jt.journey_id = j.id
            WHERE jt.tag_id = ?
            ORDER BY j.id
            "#
        );
        let journeys = sqlx::query_as::<_, Journey>(&sql)
            .bind(tag_id)
            .fetch_all(&mut *conn)
            .await?;
        Self::hydrate_all(conn, journeys).await
    }

    /// 不区分大小写的关键字搜索
    ///
    /// 匹配旅程名称、描述、标签名以及起止地点名称，结果去重。
    /// SQLite 的 `LOWER`/`LIKE` 只折叠 ASCII，大小写折叠在 Rust 侧完成。
    pub async fn search(conn: &mut SqliteConnection, keyword: &str) -> AppResult<Vec<Journey>> {
        let needle = keyword.to_lowercase();
        let rows = sqlx::query_as::<_, SearchRow>(
            r#"
            SELECT j.id, j.name, j.description,
                   t.name AS tag_name, o.name AS origin_name, d.name AS destination_name
            FROM journeys j
            LEFT JOIN journey_tags jt ON jt.journey_id = j.id
            LEFT JOIN tags t ON t.id = jt.tag_id
            LEFT JOIN locations o ON o.id = j.origin_location_id
            LEFT JOIN locations d ON d.id = j.destination_location_id
            "#,
        )
        .fetch_all(&mut *conn)
        .await?;

        let ids: BTreeSet<i64> = rows
            .iter()
            .filter(|row| row.matches(&needle))
            .map(|row| row.id)
            .collect();
        tracing::debug!("Keyword '{}' matched {} journeys", keyword, ids.len());

        let mut journeys = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(journey) = Self::find_by_id(conn, id).await? {
                journeys.push(journey);
            }
        }
        Ok(journeys)
    }

    /// 插入或更新旅程行，然后同步标签和参与者
    ///
    /// 更新语句不修改 `user_id`，所有权在创建后不可变。
    pub async fn save(
        conn: &mut SqliteConnection,
        draft: &JourneyDraft,
        links: &JourneyLinks,
    ) -> AppResult<i64> {
        let now = Utc::now();

        let journey_id = match draft.id {
            Some(id) => {
                let result = sqlx::query(
                    r#"
                    UPDATE journeys
                    SET name = ?, description = ?, start_date = ?, end_date = ?,
                        origin_location_id = ?, destination_location_id = ?, updated_at = ?
                    WHERE id = ?
                    "#,
                )
                .bind(&draft.name)
                .bind(&draft.description)
                .bind(draft.start_date)
                .bind(draft.end_date)
                .bind(draft.origin_location_id)
                .bind(draft.destination_location_id)
                .bind(now)
                .bind(id)
                .execute(&mut *conn)
                .await?;

                if result.rows_affected() == 0 {
                    return Err(AppError::not_found(format!("Journey with ID {id} not found")));
                }
                id
            }
            None => {
                sqlx::query_scalar::<_, i64>(
                    r#"
                    INSERT INTO journeys (
                        user_id, name, description, start_date, end_date,
                        origin_location_id, destination_location_id, created_at, updated_at
                    )
                    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                    RETURNING id
                    "#,
                )
                .bind(draft.user_id)
                .bind(&draft.name)
                .bind(&draft.description)
                .bind(draft.start_date)
                .bind(draft.end_date)
                .bind(draft.origin_location_id)
                .bind(draft.destination_location_id)
                .bind(now)
                .bind(now)
                .fetch_one(&mut *conn)
                .await?
            }
        };

        Self::sync_links(conn, journey_id, links).await?;
        Ok(journey_id)
    }

    /// 删除并重新插入关联行
    ///
    /// 名称先全部解析完成再动关联表；未知标签自动创建，未知参与者报错。
    async fn sync_links(
        conn: &mut SqliteConnection,
        journey_id: i64,
        links: &JourneyLinks,
    ) -> AppResult<()> {
        let mut tag_ids = BTreeSet::new();
        for tag in &links.tags {
            let tag_id = match tag {
                TagRef::Id(id) => *id,
                TagRef::Name(name) => match TagRepository::find_by_name(conn, name).await? {
                    Some(existing) => existing.id,
                    None => {
                        tracing::debug!("Creating tag '{}' while saving journey {}", name, journey_id);
                        TagRepository::insert(conn, name).await?.id
                    }
                },
            };
            tag_ids.insert(tag_id);
        }

        let mut participant_ids = BTreeSet::new();
        for participant in &links.participants {
            let user_id = match participant {
                ParticipantRef::Id(id) => *id,
                ParticipantRef::Username(username) => {
                    UserRepository::find_by_username(conn, username)
                        .await?
                        .ok_or_else(|| {
                            AppError::not_found(format!("User '{username}' not found"))
                        })?
                        .id
                }
            };
            participant_ids.insert(user_id);
        }

        sqlx::query("DELETE FROM journey_tags WHERE journey_id = ?")
            .bind(journey_id)
            .execute(&mut *conn)
            .await?;
        for tag_id in tag_ids {
            TagRepository::add_to_journey(conn, journey_id, tag_id).await?;
        }

        sqlx::query("DELETE FROM journey_participants WHERE journey_id = ?")
            .bind(journey_id)
            .execute(&mut *conn)
            .await?;
        for user_id in participant_ids {
            Self::add_participant(conn, journey_id, user_id).await?;
        }

        Ok(())
    }

    pub async fn delete_by_id(conn: &mut SqliteConnection, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM journeys WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn add_participant(
        conn: &mut SqliteConnection,
        journey_id: i64,
        user_id: i64,
    ) -> AppResult<()> {
        sqlx::query(
            "INSERT OR IGNORE INTO journey_participants (journey_id, user_id) VALUES (?, ?)",
        )
        .bind(journey_id)
        .bind(user_id)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    pub async fn remove_participant(
        conn: &mut SqliteConnection,
        journey_id: i64,
        user_id: i64,
    ) -> AppResult<bool> {
        let result =
            sqlx::query("DELETE FROM journey_participants WHERE journey_id = ? AND user_id = ?")
                .bind(journey_id)
                .bind(user_id)
                .execute(&mut *conn)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn find_participants(
        conn: &mut SqliteConnection,
        journey_id: i64,
    ) -> AppResult<Vec<User>> {
        let mut participants = sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.username, u.email, u.password_hash, u.created_at, u.updated_at
            FROM users u
            JOIN journey_participants jp ON jp.user_id = u.id
            WHERE jp.journey_id = ?
            ORDER BY u.username
            "#,
        )
        .bind(journey_id)
        .fetch_all(&mut *conn)
        .await?;

        for user in participants.iter_mut() {
            user.roles = UserRepository::find_roles(conn, user.id).await?;
        }
        Ok(participants)
    }
}

/// 搜索用的扁平行，每个标签一行
#[derive(Debug, sqlx::FromRow)]
struct SearchRow {
    id: i64,
    name: String,
    description: Option<String>,
    tag_name: Option<String>,
    origin_name: Option<String>,
    destination_name: Option<String>,
}

impl SearchRow {
    /// `needle` 必须已转为小写
    fn matches(&self, needle: &str) -> bool {
        std::iter::once(Some(self.name.as_str()))
            .chain([
                self.description.as_deref(),
                self.tag_name.as_deref(),
                self.origin_name.as_deref(),
                self.destination_name.as_deref(),
            ])
            .flatten()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::SearchRow;

    fn row(name: &str, destination: Option<&str>) -> SearchRow {
        SearchRow {
            id: 1,
            name: name.into(),
            description: None,
            tag_name: Some("winter".into()),
            origin_name: None,
            destination_name: destination.map(str::to_string),
        }
    }

    #[test]
    fn matching_folds_unicode_case() {
        let trip = row("Поїздка до Києва", Some("Київ"));
        assert!(trip.matches(&"ПОЇЗДКА".to_lowercase()));
        assert!(trip.matches(&"Києва".to_lowercase()));
        assert!(trip.matches("київ"));
        assert!(trip.matches("win"));
        assert!(!trip.matches("львів"));
    }

    #[test]
    fn wildcard_characters_match_literally() {
        assert!(row("50% off", None).matches("50%"));
        assert!(!row("50 off", None).matches("50%"));
        assert!(!row("abc", None).matches("a_c"));
    }
}
