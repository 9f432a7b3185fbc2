use axum::{
    extract::{Extension, Json, Path, State},
    http::StatusCode,
};

use crate::{
    AppState,
    database::models::{Photo, User},
    error::AppError,
    models::{PhotoDescriptionUpdate, PhotoUpload},
    result::ApiResponse,
    routes::HandlerResult,
    utils::success_to_api_response,
};

/// 服务只监听本机，上传使用服务端可见的本地路径
pub async fn upload_photo(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(req): Json<PhotoUpload>,
) -> Result<(StatusCode, Json<ApiResponse<Photo>>), AppError> {
    let photo = state.services.photos.upload_photo(&req, &user).await?;
    Ok((StatusCode::CREATED, success_to_api_response(photo)))
}

pub async fn get_photo(State(state): State<AppState>, Path(id): Path<i64>) -> HandlerResult<Photo> {
    let photo = state.services.photos.get_photo_by_id(id).await?;
    Ok(success_to_api_response(photo))
}

pub async fn update_photo(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
    Json(req): Json<PhotoDescriptionUpdate>,
) -> HandlerResult<Photo> {
    let photo = state
        .services
        .photos
        .update_photo_description(id, &req, &user)
        .await?;
    Ok(success_to_api_response(photo))
}

pub async fn delete_photo(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
) -> HandlerResult<()> {
    state.services.photos.delete_photo(id, &user).await?;
    Ok(success_to_api_response(()))
}
