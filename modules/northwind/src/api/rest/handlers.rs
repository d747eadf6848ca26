//! Generic CRUD handlers, instantiated once per record kind.

use std::sync::Arc;

use apikit::{
    ApiJson, ApiPath, ApiResult, JsonBody, Problem, WithRequestContext, created_json, no_content,
};
use axum::{
    Extension, Json,
    http::Uri,
    response::{IntoResponse, Response},
};
use tracing::info;

use super::dto::RestResource;
use crate::domain::error::DomainError;
use crate::domain::service::ResourceService;

fn to_problem(uri: &Uri) -> impl FnOnce(DomainError) -> Problem + '_ {
    move |e| Problem::from(e).with_request_context(uri)
}

#[tracing::instrument(skip(svc, uri), fields(kind = R::KIND))]
pub async fn list<R: RestResource>(
    uri: Uri,
    Extension(svc): Extension<Arc<ResourceService<R>>>,
) -> ApiResult<JsonBody<Vec<R::Dto>>> {
    let items = svc.list().await.map_err(to_problem(&uri))?;
    Ok(Json(items.into_iter().map(R::Dto::from).collect()))
}

#[tracing::instrument(skip(svc, uri), fields(kind = R::KIND))]
pub async fn get<R: RestResource>(
    uri: Uri,
    Extension(svc): Extension<Arc<ResourceService<R>>>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<JsonBody<R::Dto>> {
    let item = svc.get(id).await.map_err(to_problem(&uri))?;
    Ok(Json(R::Dto::from(item)))
}

#[tracing::instrument(skip(svc, uri, body), fields(kind = R::KIND))]
pub async fn create<R: RestResource>(
    uri: Uri,
    Extension(svc): Extension<Arc<ResourceService<R>>>,
    ApiJson(body): ApiJson<R::Dto>,
) -> ApiResult<Response> {
    let created = svc.create(body.into()).await.map_err(to_problem(&uri))?;
    let id = created.id().to_string();
    info!(id = %id, "Record created");
    Ok(created_json(R::Dto::from(created), &uri, &id).into_response())
}

#[tracing::instrument(skip(svc, uri, body), fields(kind = R::KIND))]
pub async fn update<R: RestResource>(
    uri: Uri,
    Extension(svc): Extension<Arc<ResourceService<R>>>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(body): ApiJson<R::Dto>,
) -> ApiResult<Response> {
    svc.update(id, body.into()).await.map_err(to_problem(&uri))?;
    Ok(no_content().into_response())
}

#[tracing::instrument(skip(svc, uri), fields(kind = R::KIND))]
pub async fn delete<R: RestResource>(
    uri: Uri,
    Extension(svc): Extension<Arc<ResourceService<R>>>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Response> {
    svc.delete(id).await.map_err(to_problem(&uri))?;
    Ok(no_content().into_response())
}
