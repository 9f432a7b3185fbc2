#![allow(dead_code)]

use std::sync::Arc;

use sqlx::SqlitePool;
use tempfile::TempDir;
use trailtales::{
    AppState,
    config::Config,
    database::{self, models::User},
    models::UserRegistration,
    services::Services,
};

pub const PASSWORD: &str = "secret1";

// bcrypt 允许的最小 cost
pub const TEST_BCRYPT_COST: u32 = 4;

pub struct TestApp {
    pub pool: SqlitePool,
    pub state: AppState,
    pub services: Arc<Services>,
    // 测试结束时删除上传目录
    pub upload_dir: TempDir,
}

pub async fn setup() -> TestApp {
    let upload_dir = tempfile::tempdir().unwrap();
    let config = Config {
        database_url: "sqlite::memory:".into(),
        upload_dir: upload_dir.path().join("uploads"),
        jwt_secret: Some("test-secret".into()),
        bcrypt_cost: TEST_BCRYPT_COST,
        ..Config::default()
    };

    let pool = database::connect(&config.database_url).await.unwrap();
    database::initialize(&pool).await.unwrap();

    let state = AppState::new(pool.clone(), config).unwrap();
    TestApp {
        pool,
        services: state.services.clone(),
        state,
        upload_dir,
    }
}

pub async fn register(services: &Services, username: &str) -> User {
    services
        .users
        .register(&UserRegistration {
            username: username.into(),
            email: format!("{username}@example.com"),
            password: PASSWORD.into(),
        })
        .await
        .unwrap()
}

pub async fn count(pool: &SqlitePool, sql: &str, id: i64) -> i64 {
    sqlx::query_scalar(sql).bind(id).fetch_one(pool).await.unwrap()
}
