use std::sync::Arc;

use config::Config;
use services::Services;
use sqlx::SqlitePool;

pub mod config;
pub mod console;
pub mod database;
pub mod error;
pub mod middleware;
pub mod models;
pub mod result;
pub mod router;
pub mod routes;
pub mod services;
pub mod utils;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub services: Arc<Services>,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: Config) -> error::AppResult<Self> {
        let services = Services::new(pool, &config)?;
        Ok(Self {
            config,
            services: Arc::new(services),
        })
    }
}
