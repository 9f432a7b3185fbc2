use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};

use crate::{
    AppState,
    error::AppError,
    utils::verify_token,
};

/// 校验 Bearer token，并把当前用户放入请求扩展
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let Some(Authorization(bearer)) = req.headers().typed_get::<Authorization<Bearer>>() else {
        return Err(AppError::auth_failed("Missing bearer token"));
    };

    let claims = verify_token(bearer.token(), &state.config).map_err(|e| {
        tracing::debug!("Token rejected: {}", e);
        AppError::auth_failed("Invalid or expired token")
    })?;

    // 令牌有效但用户已被删除
    let user = state
        .services
        .users
        .get_user_by_id(claims.user_id()?)
        .await
        .map_err(|e| match e {
            AppError::NotFound(_) => AppError::auth_failed("User no longer exists"),
            other => other,
        })?;

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}
