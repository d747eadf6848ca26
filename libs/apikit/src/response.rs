use axum::{
    Json,
    http::{StatusCode, Uri, header},
    response::IntoResponse,
};

use crate::problem::Problem;

/// Standard result type for API handlers; any error converts into a `Problem`.
pub type ApiResult<T = ()> = Result<T, Problem>;

/// Short alias for JSON responses
pub type JsonBody<T> = Json<T>;

/// 201 Created + JSON with Location header pointing at the new resource
pub fn created_json<T: serde::Serialize>(
    value: T,
    uri: &Uri,
    new_id: &str,
) -> impl IntoResponse + use<T> {
    let location = [uri.path().trim_end_matches('/'), new_id].join("/");
    (
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(value),
    )
}

/// 204 No Content
#[must_use]
pub fn no_content() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}
