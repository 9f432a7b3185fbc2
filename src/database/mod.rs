// 数据库模块
// 包含连接池创建、建表脚本、实体定义和存储库

pub mod models;
pub mod repositories;

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::error::AppResult;

const DDL_SCRIPT: &str = include_str!("ddl.sql");
const DML_SCRIPT: &str = include_str!("dml.sql");

/// 创建连接池，每个连接都开启外键约束
pub async fn connect(database_url: &str) -> AppResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    // 内存库每个连接都是独立的数据库，只能使用单个常驻连接
    let pool_options = if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    };

    let pool = pool_options.connect_with(options).await?;

    Ok(pool)
}

/// 在同一个事务中执行建表脚本和初始数据脚本，失败时整体回滚
pub async fn initialize(pool: &SqlitePool) -> AppResult<()> {
    let mut tx = pool.begin().await?;

    tracing::debug!("Executing ddl.sql");
    sqlx::raw_sql(DDL_SCRIPT).execute(&mut *tx).await?;

    tracing::debug!("Executing dml.sql");
    sqlx::raw_sql(DML_SCRIPT).execute(&mut *tx).await?;

    tx.commit().await?;
    tracing::info!("Database initialized");
    Ok(())
}
