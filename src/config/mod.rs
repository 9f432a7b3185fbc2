use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub upload_dir: PathBuf,
    pub server_host: String,
    pub server_port: u16,
    /// 仅 `serve` 模式需要
    pub jwt_secret: Option<String>,
    pub jwt_expiration_secs: u64,
    pub bcrypt_cost: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://trailtales.db?mode=rwc".into(),
            upload_dir: PathBuf::from("uploads"),
            server_host: "127.0.0.1".into(),
            server_port: 3000,
            jwt_secret: None,
            jwt_expiration_secs: 24 * 3600,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let defaults = Config::default();

        let jwt_expiration_secs = env::var("JWT_EXPIRATION")
            .ok()
            .and_then(|v| parse_expiration_hours(&v))
            .unwrap_or(defaults.jwt_expiration_secs);

        Config {
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            upload_dir: env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_dir),
            server_host: env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            jwt_secret: env::var("JWT_SECRET").ok().filter(|s| !s.is_empty()),
            jwt_expiration_secs,
            bcrypt_cost: env::var("BCRYPT_COST")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.bcrypt_cost),
        }
    }

    pub fn jwt_expiration(&self) -> Duration {
        Duration::from_secs(self.jwt_expiration_secs)
    }
}

/// `24` 或 `24h`，单位小时；溢出或无法解析时返回 None
fn parse_expiration_hours(value: &str) -> Option<u64> {
    value
        .trim()
        .trim_end_matches('h')
        .parse::<u64>()
        .ok()
        .and_then(|hours| hours.checked_mul(3600))
        // 与 chrono 的 TimeDelta 上限保持一致
        .filter(|secs| i64::try_from(*secs).is_ok_and(|s| s <= i64::MAX / 1000))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiration_accepts_hour_suffix() {
        assert_eq!(parse_expiration_hours("24"), Some(24 * 3600));
        assert_eq!(parse_expiration_hours("2h"), Some(7200));
        assert_eq!(parse_expiration_hours("soon"), None);
    }

    #[test]
    fn oversized_expiration_is_rejected() {
        assert_eq!(parse_expiration_hours(&u64::MAX.to_string()), None);
        assert_eq!(parse_expiration_hours("5124095576030431"), None);
    }
}
