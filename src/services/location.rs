use sqlx::SqlitePool;

use crate::database::models::Location;
use crate::database::repositories::LocationRepository;
use crate::error::{AppError, AppResult};
use crate::models::{LocationCreation, LocationUpdate, Validate, non_blank};

#[derive(Clone)]
pub struct LocationService {
    pool: SqlitePool,
}

impl LocationService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_location(&self, dto: &LocationCreation) -> AppResult<Location> {
        dto.validate()?;
        let name = dto.name.trim();
        let description = non_blank(dto.description.as_deref());

        let mut tx = self.pool.begin().await?;
        if LocationRepository::find_by_name(&mut tx, name).await?.is_some() {
            return Err(AppError::already_exists(format!(
                "Location with name '{name}' already exists"
            )));
        }
        let location = LocationRepository::insert(&mut tx, name, description).await?;
        tx.commit().await?;

        tracing::info!("Created location '{}' ({})", location.name, location.id);
        Ok(location)
    }

    pub async fn get_location_by_id(&self, id: i64) -> AppResult<Location> {
        let mut conn = self.pool.acquire().await?;
        LocationRepository::find_by_id(&mut conn, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Location with ID {id} not found")))
    }

    pub async fn get_location_by_name(&self, name: &str) -> AppResult<Location> {
        let name = name.trim();
        let mut conn = self.pool.acquire().await?;
        LocationRepository::find_by_name(&mut conn, name)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Location with name '{name}' not found")))
    }

    pub async fn get_all_locations(&self) -> AppResult<Vec<Location>> {
        let mut conn = self.pool.acquire().await?;
        LocationRepository::find_all(&mut conn).await
    }

    /// 空白名称保留原名；描述为 `Some` 时覆盖，空白则清空
    pub async fn update_location(&self, id: i64, dto: &LocationUpdate) -> AppResult<Location> {
        dto.validate()?;

        let mut tx = self.pool.begin().await?;
        let current = LocationRepository::find_by_id(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Location with ID {id} not found")))?;

        let name = match non_blank(dto.name.as_deref()) {
            Some(new_name) => {
                if LocationRepository::find_other_by_name_ignore_case(&mut tx, new_name, id)
                    .await?
                    .is_some()
                {
                    return Err(AppError::already_exists(format!(
                        "Location with name '{new_name}' already exists"
                    )));
                }
                new_name.to_string()
            }
            None => current.name.clone(),
        };

        let description = match dto.description.as_deref() {
            Some(d) => non_blank(Some(d)).map(str::to_string),
            None => current.description.clone(),
        };

        let location =
            LocationRepository::update(&mut tx, id, &name, description.as_deref()).await?;
        tx.commit().await?;

        tracing::info!("Updated location {}", id);
        Ok(location)
    }

    /// 引用该地点的旅程和事件会被置空
    pub async fn delete_location(&self, id: i64) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;
        if !LocationRepository::delete_by_id(&mut tx, id).await? {
            return Err(AppError::not_found(format!("Location with ID {id} not found")));
        }
        tx.commit().await?;

        tracing::info!("Deleted location {}", id);
        Ok(())
    }
}
