use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
};

use crate::{
    AppState,
    database::models::Location,
    error::AppError,
    models::{LocationCreation, LocationUpdate},
    result::ApiResponse,
    routes::HandlerResult,
    utils::success_to_api_response,
};

pub async fn create_location(
    State(state): State<AppState>,
    Json(req): Json<LocationCreation>,
) -> Result<(StatusCode, Json<ApiResponse<Location>>), AppError> {
    let location = state.services.locations.create_location(&req).await?;
    Ok((StatusCode::CREATED, success_to_api_response(location)))
}

pub async fn list_locations(State(state): State<AppState>) -> HandlerResult<Vec<Location>> {
    let locations = state.services.locations.get_all_locations().await?;
    Ok(success_to_api_response(locations))
}

pub async fn get_location(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<Location> {
    let location = state.services.locations.get_location_by_id(id).await?;
    Ok(success_to_api_response(location))
}

pub async fn get_location_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> HandlerResult<Location> {
    let location = state.services.locations.get_location_by_name(&name).await?;
    Ok(success_to_api_response(location))
}

pub async fn update_location(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<LocationUpdate>,
) -> HandlerResult<Location> {
    let location = state.services.locations.update_location(id, &req).await?;
    Ok(success_to_api_response(location))
}

pub async fn delete_location(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<()> {
    state.services.locations.delete_location(id).await?;
    Ok(success_to_api_response(()))
}
