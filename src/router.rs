use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::{
    AppState,
    middleware::{auth_middleware, log_errors},
    routes,
};

// 公开路由：注册和登录
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/users/register", post(routes::user::register))
        .route("/users/login", post(routes::user::login))
}

fn journey_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/journeys",
            post(routes::journey::create_journey).get(routes::journey::list_journeys),
        )
        .route("/journeys/mine", get(routes::journey::my_journeys))
        .route(
            "/journeys/participated",
            get(routes::journey::participated_journeys),
        )
        .route("/journeys/search", get(routes::journey::search_journeys))
        .route("/journeys/by-tag", get(routes::journey::filter_by_tag))
        .route(
            "/journeys/{id}",
            get(routes::journey::get_journey)
                .put(routes::journey::update_journey)
                .delete(routes::journey::delete_journey),
        )
        .route(
            "/journeys/{id}/tags",
            get(routes::journey::journey_tags).post(routes::journey::add_tag),
        )
        .route(
            "/journeys/{id}/tags/{name}",
            delete(routes::journey::remove_tag),
        )
        .route(
            "/journeys/{id}/participants",
            get(routes::journey::journey_participants).post(routes::journey::add_participant),
        )
        .route(
            "/journeys/{id}/participants/{identifier}",
            delete(routes::journey::remove_participant),
        )
        .route(
            "/journeys/{id}/origin",
            put(routes::journey::set_origin).delete(routes::journey::remove_origin),
        )
        .route(
            "/journeys/{id}/destination",
            put(routes::journey::set_destination).delete(routes::journey::remove_destination),
        )
        .route("/journeys/{id}/events", get(routes::journey::journey_events))
        .route("/journeys/{id}/photos", get(routes::journey::journey_photos))
}

fn catalog_routes() -> Router<AppState> {
    Router::new()
        // 标签
        .route(
            "/tags",
            post(routes::tag::create_tag).get(routes::tag::list_tags),
        )
        .route("/tags/by-name/{name}", get(routes::tag::get_tag_by_name))
        .route(
            "/tags/{id}",
            get(routes::tag::get_tag)
                .put(routes::tag::update_tag)
                .delete(routes::tag::delete_tag),
        )
        // 地点
        .route(
            "/locations",
            post(routes::location::create_location).get(routes::location::list_locations),
        )
        .route(
            "/locations/by-name/{name}",
            get(routes::location::get_location_by_name),
        )
        .route(
            "/locations/{id}",
            get(routes::location::get_location)
                .put(routes::location::update_location)
                .delete(routes::location::delete_location),
        )
}

fn event_photo_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/events",
            post(routes::event::create_event).get(routes::event::list_events),
        )
        .route(
            "/events/{id}",
            get(routes::event::get_event)
                .put(routes::event::update_event)
                .delete(routes::event::delete_event),
        )
        .route("/photos", post(routes::photo::upload_photo))
        .route(
            "/photos/{id}",
            get(routes::photo::get_photo)
                .put(routes::photo::update_photo)
                .delete(routes::photo::delete_photo),
        )
}

/// 构建完整路由，除注册和登录外都需要认证
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/users/me", get(routes::user::me))
        .merge(journey_routes())
        .merge(catalog_routes())
        .merge(event_photo_routes())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let router = Router::new()
        .merge(public_routes())
        .merge(protected_routes)
        .layer(axum::middleware::from_fn(log_errors))
        .layer(TraceLayer::new_for_http());

    // 开发模式下允许跨域
    #[cfg(debug_assertions)]
    let router = router.layer(tower_http::cors::CorsLayer::permissive());

    router.with_state(state)
}
