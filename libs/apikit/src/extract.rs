//! Request extractors whose rejections are `Problem` documents.
//!
//! Drop-in replacements for axum's `Json`, `Path` and `Query`: malformed input is
//! reported as `application/problem+json` carrying the rejection's own status.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Json, Path, Query, Request};
use axum::http::request::Parts;
use axum::http::{StatusCode, Uri};

use crate::problem::Problem;
use crate::trace_layer::WithRequestContext;

/// Code carried by every extractor rejection.
pub const INVALID_REQUEST: &str = "INVALID_REQUEST";

fn rejection_problem(status: StatusCode, detail: String, uri: &Uri) -> Problem {
    let title = status.canonical_reason().unwrap_or("Bad Request");
    Problem::new(status, title, detail)
        .with_code(INVALID_REQUEST)
        .with_request_context(uri)
}

/// JSON request body.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = Problem;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let uri = req.uri().clone();
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(error = %rejection, "Rejected request body");
                Err(rejection_problem(rejection.status(), rejection.body_text(), &uri))
            }
        }
    }
}

/// Typed path parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    Path<T>: FromRequestParts<S, Rejection = PathRejection>,
    S: Send + Sync,
{
    type Rejection = Problem;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Path::<T>::from_request_parts(parts, state)
            .await
            .map(|Path(value)| Self(value))
            .map_err(|r| rejection_problem(r.status(), r.body_text(), &parts.uri))
    }
}

/// Typed query string.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    Query<T>: FromRequestParts<S, Rejection = QueryRejection>,
    S: Send + Sync,
{
    type Rejection = Problem;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(value)| Self(value))
            .map_err(|r| rejection_problem(r.status(), r.body_text(), &parts.uri))
    }
}
