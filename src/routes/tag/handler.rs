use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
};

use crate::{
    AppState,
    database::models::Tag,
    error::AppError,
    models::TagCreation,
    result::ApiResponse,
    routes::HandlerResult,
    utils::success_to_api_response,
};

pub async fn create_tag(
    State(state): State<AppState>,
    Json(req): Json<TagCreation>,
) -> Result<(StatusCode, Json<ApiResponse<Tag>>), AppError> {
    let tag = state.services.tags.create_tag(&req).await?;
    Ok((StatusCode::CREATED, success_to_api_response(tag)))
}

pub async fn list_tags(State(state): State<AppState>) -> HandlerResult<Vec<Tag>> {
    Ok(success_to_api_response(state.services.tags.get_all_tags().await?))
}

pub async fn get_tag(State(state): State<AppState>, Path(id): Path<i64>) -> HandlerResult<Tag> {
    Ok(success_to_api_response(state.services.tags.get_tag_by_id(id).await?))
}

pub async fn get_tag_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> HandlerResult<Tag> {
    Ok(success_to_api_response(state.services.tags.get_tag_by_name(&name).await?))
}

pub async fn update_tag(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<TagCreation>,
) -> HandlerResult<Tag> {
    Ok(success_to_api_response(state.services.tags.update_tag(id, &req).await?))
}

pub async fn delete_tag(State(state): State<AppState>, Path(id): Path<i64>) -> HandlerResult<()> {
    state.services.tags.delete_tag(id).await?;
    Ok(success_to_api_response(()))
}
