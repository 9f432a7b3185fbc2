use sqlx::SqlitePool;

use crate::database::models::Tag;
use crate::database::repositories::TagRepository;
use crate::error::{AppError, AppResult};
use crate::models::{TagCreation, Validate};

#[derive(Clone)]
pub struct TagService {
    pool: SqlitePool,
}

impl TagService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// 显式创建标签，名称已存在时报错
    pub async fn create_tag(&self, dto: &TagCreation) -> AppResult<Tag> {
        dto.validate()?;
        let name = dto.name.trim();

        let mut tx = self.pool.begin().await?;
        if TagRepository::find_by_name(&mut tx, name).await?.is_some() {
            return Err(AppError::already_exists(format!(
                "Tag with name '{name}' already exists"
            )));
        }
        let tag = TagRepository::insert(&mut tx, name).await?;
        tx.commit().await?;

        tracing::info!("Created tag '{}' ({})", tag.name, tag.id);
        Ok(tag)
    }

    pub async fn get_tag_by_id(&self, id: i64) -> AppResult<Tag> {
        let mut conn = self.pool.acquire().await?;
        TagRepository::find_by_id(&mut conn, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Tag with ID {id} not found")))
    }

    pub async fn get_tag_by_name(&self, name: &str) -> AppResult<Tag> {
        let name = name.trim();
        let mut conn = self.pool.acquire().await?;
        TagRepository::find_by_name(&mut conn, name)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Tag with name '{name}' not found")))
    }

    pub async fn get_all_tags(&self) -> AppResult<Vec<Tag>> {
        let mut conn = self.pool.acquire().await?;
        TagRepository::find_all(&mut conn).await
    }

    pub async fn update_tag(&self, id: i64, dto: &TagCreation) -> AppResult<Tag> {
        dto.validate()?;
        let name = dto.name.trim();

        let mut tx = self.pool.begin().await?;
        if TagRepository::find_by_id(&mut tx, id).await?.is_none() {
            return Err(AppError::not_found(format!("Tag with ID {id} not found")));
        }
        if let Some(other) = TagRepository::find_by_name(&mut tx, name).await? {
            if other.id != id {
                return Err(AppError::already_exists(format!(
                    "Tag with name '{name}' already exists"
                )));
            }
        }
        let tag = TagRepository::update(&mut tx, id, name).await?;
        tx.commit().await?;

        tracing::info!("Renamed tag {} to '{}'", id, tag.name);
        Ok(tag)
    }

    /// 删除标签，关联表中的记录随之级联删除
    pub async fn delete_tag(&self, id: i64) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;
        if !TagRepository::delete_by_id(&mut tx, id).await? {
            return Err(AppError::not_found(format!("Tag with ID {id} not found")));
        }
        tx.commit().await?;

        tracing::info!("Deleted tag {}", id);
        Ok(())
    }

    pub async fn get_tags_by_journey_id(&self, journey_id: i64) -> AppResult<Vec<Tag>> {
        let mut conn = self.pool.acquire().await?;
        TagRepository::find_by_journey_id(&mut conn, journey_id).await
    }
}
