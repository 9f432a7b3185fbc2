use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::utils::{error_codes, error_to_api_response};

/// 应用统一错误类型
///
/// 校验失败、资源不存在、越权是面向用户的三类错误，其余为基础设施错误。
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    AlreadyExists(String),

    #[error("{0}")]
    AuthFailed(String),

    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),

    #[error("file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("password hashing failed: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("{0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        // 唯一约束冲突属于用户可见错误
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return AppError::AlreadyExists(db_err.message().to_string());
            }
        }
        AppError::Database(err)
    }
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(vec![message.into()])
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        AppError::Forbidden(message.into())
    }

    pub fn already_exists(message: impl Into<String>) -> Self {
        AppError::AlreadyExists(message.into())
    }

    pub fn auth_failed(message: impl Into<String>) -> Self {
        AppError::AuthFailed(message.into())
    }

    pub fn status_and_code(&self) -> (StatusCode, i32) {
        match self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, error_codes::VALIDATION_ERROR),
            AppError::AlreadyExists(_) => (StatusCode::CONFLICT, error_codes::ALREADY_EXISTS),
            AppError::AuthFailed(_) | AppError::Token(_) => {
                (StatusCode::UNAUTHORIZED, error_codes::AUTH_FAILED)
            }
            AppError::Forbidden(_) => (StatusCode::FORBIDDEN, error_codes::PERMISSION_DENIED),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, error_codes::NOT_FOUND),
            AppError::Database(_)
            | AppError::Io(_)
            | AppError::PasswordHash(_)
            | AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_codes::INTERNAL_ERROR,
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let body = error_to_api_response::<()>(code, self.to_string());
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_are_joined() {
        let err = AppError::Validation(vec![
            "Journey name must not be blank".into(),
            "Description must be at most 500 characters".into(),
        ]);
        assert_eq!(
            err.to_string(),
            "Journey name must not be blank; Description must be at most 500 characters"
        );
    }

    #[test]
    fn categories_map_to_distinct_statuses() {
        assert_eq!(
            AppError::not_found("x").status_and_code().0,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::forbidden("x").status_and_code().0,
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::validation("x").status_and_code().1,
            error_codes::VALIDATION_ERROR
        );
    }

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: AppError = io_err.into();
        assert!(matches!(err, AppError::Io(_)));
    }
}
