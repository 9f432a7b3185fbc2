// 业务服务层
// 负责参数校验、权限检查和唯一性检查，每个写操作都在单个事务中完成

pub mod event;
pub mod journey;
pub mod location;
pub mod photo;
pub mod tag;
pub mod user;

pub use event::EventService;
pub use journey::JourneyService;
pub use location::LocationService;
pub use photo::PhotoService;
pub use tag::TagService;
pub use user::UserService;

use sqlx::{SqliteConnection, SqlitePool};

use crate::config::Config;
use crate::database::models::User;
use crate::database::repositories::JourneyRepository;
use crate::error::{AppError, AppResult};

/// 所有服务的集合，控制台和 HTTP 接口共用
#[derive(Clone)]
pub struct Services {
    pub users: UserService,
    pub tags: TagService,
    pub locations: LocationService,
    pub journeys: JourneyService,
    pub events: EventService,
    pub photos: PhotoService,
}

impl Services {
    pub fn new(pool: SqlitePool, config: &Config) -> AppResult<Self> {
        Ok(Self {
            users: UserService::new(pool.clone(), config.bcrypt_cost),
            tags: TagService::new(pool.clone()),
            locations: LocationService::new(pool.clone()),
            journeys: JourneyService::new(pool.clone()),
            events: EventService::new(pool.clone()),
            photos: PhotoService::new(pool, &config.upload_dir)?,
        })
    }
}

/// 旅程不存在返回 NotFound，不是所有者返回 Forbidden
pub(crate) async fn ensure_journey_owner(
    conn: &mut SqliteConnection,
    journey_id: i64,
    user: &User,
) -> AppResult<()> {
    let owner_id = JourneyRepository::find_owner_id(conn, journey_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Journey with ID {journey_id} not found")))?;

    if owner_id != user.id {
        tracing::warn!(
            "User {} tried to modify journey {} owned by {}",
            user.id,
            journey_id,
            owner_id
        );
        return Err(AppError::forbidden(
            "You do not have permission to modify this journey",
        ));
    }
    Ok(())
}
