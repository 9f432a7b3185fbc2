use axum::Json;

use crate::{error::AppError, result::ApiResponse};

pub mod event;
pub mod journey;
pub mod location;
pub mod photo;
pub mod tag;
pub mod user;

/// 处理函数统一返回类型，错误由 `AppError` 转换为响应
pub type HandlerResult<T> = Result<Json<ApiResponse<T>>, AppError>;
