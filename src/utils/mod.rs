use axum::Json;
use bcrypt::{hash, verify};
use chrono::{TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::result::ApiResponse;

pub fn hash_password(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    hash(password.as_bytes(), cost)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password.as_bytes(), hash)
}

/// 邮箱格式的最小检查：`@` 两侧都不能为空
pub fn is_valid_email_format(email: &str) -> bool {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // 用户ID
    pub exp: i64,    // 过期时间
    pub iat: i64,    // 签发时间
}

impl Claims {
    pub fn user_id(&self) -> AppResult<i64> {
        self.sub
            .parse()
            .map_err(|_| AppError::auth_failed("Token subject is not a user id"))
    }
}

pub fn generate_token(user_id: i64, config: &Config) -> AppResult<(String, i64)> {
    let secret = config
        .jwt_secret
        .as_deref()
        .ok_or_else(|| AppError::Internal("JWT_SECRET is not configured".into()))?;

    let now = Utc::now();
    let expiration = i64::try_from(config.jwt_expiration().as_secs())
        .ok()
        .and_then(TimeDelta::try_seconds)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or_else(|| AppError::Internal("token expiration overflow".into()))?
        .timestamp();

    let claims = Claims {
        sub: user_id.to_string(),
        exp: expiration,
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    tracing::debug!("Generated token for user: {}", user_id);
    Ok((token, expiration))
}

pub fn verify_token(token: &str, config: &Config) -> AppResult<Claims> {
    let secret = config
        .jwt_secret
        .as_deref()
        .ok_or_else(|| AppError::Internal("JWT_SECRET is not configured".into()))?;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

pub fn success_to_api_response<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        code: error_codes::SUCCESS,
        msg: "success".into(),
        resp_data: Some(data),
    })
}

pub fn error_to_api_response<T>(code: i32, msg: String) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        code,
        msg,
        resp_data: None,
    })
}

pub mod error_codes {
    pub const SUCCESS: i32 = 0;
    pub const VALIDATION_ERROR: i32 = 1000;
    pub const ALREADY_EXISTS: i32 = 1001;
    pub const AUTH_FAILED: i32 = 1002;
    pub const PERMISSION_DENIED: i32 = 1003;
    pub const NOT_FOUND: i32 = 1004;
    pub const INTERNAL_ERROR: i32 = 5000;
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_BCRYPT_COST: u32 = 4;

    #[test]
    fn email_format() {
        assert!(is_valid_email_format("anna@example.com"));
        assert!(is_valid_email_format(" a@b "));
        assert!(!is_valid_email_format("anna.example.com"));
        assert!(!is_valid_email_format("@example.com"));
        assert!(!is_valid_email_format("anna@"));
        assert!(!is_valid_email_format("a@b@c"));
    }

    #[test]
    fn password_hash_roundtrip() {
        let hashed = hash_password("secret1", TEST_BCRYPT_COST).unwrap();
        assert!(verify_password("secret1", &hashed).unwrap());
        assert!(!verify_password("secret2", &hashed).unwrap());
    }

    #[test]
    fn token_carries_user_id() {
        let config = Config {
            jwt_secret: Some("test-secret".into()),
            ..Config::default()
        };
        let (token, _) = generate_token(42, &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();
        assert_eq!(claims.user_id().unwrap(), 42);
    }

    #[test]
    fn oversized_expiration_is_an_error() {
        let config = Config {
            jwt_secret: Some("test-secret".into()),
            jwt_expiration_secs: u64::MAX,
            ..Config::default()
        };
        assert!(matches!(
            generate_token(1, &config),
            Err(AppError::Internal(_))
        ));
    }

    #[test]
    fn token_requires_secret() {
        let config = Config::default();
        assert!(matches!(
            generate_token(1, &config),
            Err(AppError::Internal(_))
        ));
    }
}
