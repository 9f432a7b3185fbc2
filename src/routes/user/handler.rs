use axum::{
    extract::{Extension, Json, State},
    http::StatusCode,
};

use super::model::{AuthResponse, UserInfo};
use crate::{
    AppState,
    database::models::User,
    error::AppError,
    models::{UserLogin, UserRegistration},
    result::ApiResponse,
    routes::HandlerResult,
    utils::{generate_token, success_to_api_response},
};

#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<UserRegistration>,
) -> Result<(StatusCode, Json<ApiResponse<AuthResponse>>), AppError> {
    let user = state.services.users.register(&req).await?;
    let (token, expires_at) = generate_token(user.id, &state.config)?;

    Ok((
        StatusCode::CREATED,
        success_to_api_response(AuthResponse {
            user: UserInfo::from(&user),
            token,
            expires_at,
        }),
    ))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<UserLogin>,
) -> HandlerResult<AuthResponse> {
    let user = state.services.users.login(&req).await?;
    let (token, expires_at) = generate_token(user.id, &state.config)?;

    Ok(success_to_api_response(AuthResponse {
        user: UserInfo::from(&user),
        token,
        expires_at,
    }))
}

pub async fn me(Extension(user): Extension<User>) -> HandlerResult<UserInfo> {
    Ok(success_to_api_response(UserInfo::from(&user)))
}
