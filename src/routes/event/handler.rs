use axum::{
    extract::{Extension, Json, Path, State},
    http::StatusCode,
};

use crate::{
    AppState,
    database::models::{Event, User},
    error::AppError,
    models::{EventCreation, EventUpdate},
    result::ApiResponse,
    routes::HandlerResult,
    utils::success_to_api_response,
};

pub async fn create_event(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(req): Json<EventCreation>,
) -> Result<(StatusCode, Json<ApiResponse<Event>>), AppError> {
    let event = state.services.events.create_event(&req, &user).await?;
    Ok((StatusCode::CREATED, success_to_api_response(event)))
}

pub async fn list_events(State(state): State<AppState>) -> HandlerResult<Vec<Event>> {
    let events = state.services.events.get_all_events().await?;
    Ok(success_to_api_response(events))
}

pub async fn get_event(State(state): State<AppState>, Path(id): Path<i64>) -> HandlerResult<Event> {
    let event = state.services.events.get_event_by_id(id).await?;
    Ok(success_to_api_response(event))
}

pub async fn update_event(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
    Json(req): Json<EventUpdate>,
) -> HandlerResult<Event> {
    let event = state.services.events.update_event(id, &req, &user).await?;
    Ok(success_to_api_response(event))
}

pub async fn delete_event(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
) -> HandlerResult<()> {
    state.services.events.delete_event(id, &user).await?;
    Ok(success_to_api_response(()))
}
