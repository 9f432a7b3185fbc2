use axum::{
    extract::{Extension, Json, Path, Query, State},
    http::StatusCode,
};

use super::model::{AddTagRequest, ParticipantRequest, SearchQuery, SetLocationRequest, TagQuery};
use crate::{
    AppState,
    database::models::{Event, Journey, Photo, Tag, User},
    error::AppError,
    models::{JourneyCreation, JourneyUpdate},
    result::ApiResponse,
    routes::HandlerResult,
    utils::success_to_api_response,
};

pub async fn create_journey(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(req): Json<JourneyCreation>,
) -> Result<(StatusCode, Json<ApiResponse<Journey>>), AppError> {
    let journey = state.services.journeys.create_journey(&req, &user).await?;
    Ok((StatusCode::CREATED, success_to_api_response(journey)))
}

pub async fn list_journeys(State(state): State<AppState>) -> HandlerResult<Vec<Journey>> {
    let journeys = state.services.journeys.get_all_journeys().await?;
    Ok(success_to_api_response(journeys))
}

pub async fn my_journeys(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> HandlerResult<Vec<Journey>> {
    let journeys = state.services.journeys.get_journeys_by_user_id(user.id).await?;
    Ok(success_to_api_response(journeys))
}

pub async fn participated_journeys(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> HandlerResult<Vec<Journey>> {
    let journeys = state.services.journeys.get_participated_journeys(&user).await?;
    Ok(success_to_api_response(journeys))
}

pub async fn search_journeys(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> HandlerResult<Vec<Journey>> {
    let journeys = state.services.journeys.search_journeys(&query.keyword).await?;
    Ok(success_to_api_response(journeys))
}

pub async fn filter_by_tag(
    State(state): State<AppState>,
    Query(query): Query<TagQuery>,
) -> HandlerResult<Vec<Journey>> {
    let journeys = state.services.journeys.filter_journeys_by_tag(&query.tag).await?;
    Ok(success_to_api_response(journeys))
}

pub async fn get_journey(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<Journey> {
    let journey = state.services.journeys.get_journey_by_id(id).await?;
    Ok(success_to_api_response(journey))
}

pub async fn update_journey(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
    Json(req): Json<JourneyUpdate>,
) -> HandlerResult<Journey> {
    let journey = state.services.journeys.update_journey(id, &req, &user).await?;
    Ok(success_to_api_response(journey))
}

pub async fn delete_journey(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
) -> HandlerResult<()> {
    state.services.journeys.delete_journey(id, &user).await?;
    Ok(success_to_api_response(()))
}

pub async fn journey_tags(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<Vec<Tag>> {
    let tags = state.services.journeys.get_tags_for_journey(id).await?;
    Ok(success_to_api_response(tags))
}

pub async fn add_tag(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
    Json(req): Json<AddTagRequest>,
) -> HandlerResult<Journey> {
    let journey = state
        .services
        .journeys
        .add_tag_to_journey(id, &req.name, &user)
        .await?;
    Ok(success_to_api_response(journey))
}

pub async fn remove_tag(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path((id, name)): Path<(i64, String)>,
) -> HandlerResult<Journey> {
    let journey = state
        .services
        .journeys
        .remove_tag_from_journey(id, &name, &user)
        .await?;
    Ok(success_to_api_response(journey))
}

pub async fn journey_participants(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<Vec<User>> {
    let participants = state.services.journeys.get_participants(id).await?;
    Ok(success_to_api_response(participants))
}

pub async fn add_participant(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
    Json(req): Json<ParticipantRequest>,
) -> HandlerResult<Journey> {
    let journey = state
        .services
        .journeys
        .add_participant(id, &req.identifier, &user)
        .await?;
    Ok(success_to_api_response(journey))
}

pub async fn remove_participant(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path((id, identifier)): Path<(i64, String)>,
) -> HandlerResult<Journey> {
    let journey = state
        .services
        .journeys
        .remove_participant(id, &identifier, &user)
        .await?;
    Ok(success_to_api_response(journey))
}

pub async fn set_origin(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
    Json(req): Json<SetLocationRequest>,
) -> HandlerResult<Journey> {
    let journey = state
        .services
        .journeys
        .set_origin_location(id, &req.name, req.description.as_deref(), &user)
        .await?;
    Ok(success_to_api_response(journey))
}

pub async fn remove_origin(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
) -> HandlerResult<Journey> {
    let journey = state.services.journeys.remove_origin_location(id, &user).await?;
    Ok(success_to_api_response(journey))
}

pub async fn set_destination(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
    Json(req): Json<SetLocationRequest>,
) -> HandlerResult<Journey> {
    let journey = state
        .services
        .journeys
        .set_destination_location(id, &req.name, req.description.as_deref(), &user)
        .await?;
    Ok(success_to_api_response(journey))
}

pub async fn remove_destination(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
) -> HandlerResult<Journey> {
    let journey = state
        .services
        .journeys
        .remove_destination_location(id, &user)
        .await?;
    Ok(success_to_api_response(journey))
}

pub async fn journey_events(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<Vec<Event>> {
    let events = state.services.events.get_events_by_journey_id(id).await?;
    Ok(success_to_api_response(events))
}

pub async fn journey_photos(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<Vec<Photo>> {
    let photos = state.services.photos.get_photos_by_journey_id(id).await?;
    Ok(success_to_api_response(photos))
}
