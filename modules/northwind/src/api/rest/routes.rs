//! REST route definitions - OpenAPI and Axum routing.

use std::sync::Arc;

use apikit::{OpenApiRegistry, OperationBuilder};
use axum::{Extension, Router};
use http::StatusCode;

use super::dto::RestResource;
use super::handlers;
use crate::domain::service::ResourceService;

/// Mount the five CRUD operations of `R` under `/api/{collection}`.
pub fn register_resource<R: RestResource>(
    router: Router,
    openapi: &dyn OpenApiRegistry,
    service: Arc<ResourceService<R>>,
) -> Router {
    let collection = R::COLLECTION;
    let base = R::base_path();
    let item = format!("{base}/{{id}}");
    let kind = R::KIND;
    let mut routes = Router::new();

    routes = OperationBuilder::get(base.clone())
        .operation_id(format!("{collection}.list"))
        .summary(format!("List all {collection}"))
        .tag(collection)
        .handler(handlers::list::<R>)
        .json_array_response::<R::Dto>(openapi, StatusCode::OK, format!("All {collection}"))
        .error_500(openapi)
        .register(routes, openapi);

    routes = OperationBuilder::get(item.clone())
        .operation_id(format!("{collection}.get"))
        .summary(format!("Get a {kind} by id"))
        .tag(collection)
        .path_param("id", format!("{kind} id"))
        .handler(handlers::get::<R>)
        .json_response_with_schema::<R::Dto>(openapi, StatusCode::OK, format!("The {kind}"))
        .error_400(openapi)
        .error_404(openapi)
        .error_500(openapi)
        .register(routes, openapi);

    routes = OperationBuilder::post(base)
        .operation_id(format!("{collection}.create"))
        .summary(format!("Create a {kind}"))
        .tag(collection)
        .json_request::<R::Dto>(openapi, format!("{kind} to create; omit the id to have one assigned"))
        .handler(handlers::create::<R>)
        .json_response_with_schema::<R::Dto>(
            openapi,
            StatusCode::CREATED,
            format!("Created {kind}"),
        )
        .error_400(openapi)
        .error_409(openapi)
        .error_500(openapi)
        .register(routes, openapi);

    routes = OperationBuilder::put(item.clone())
        .operation_id(format!("{collection}.update"))
        .summary(format!("Replace a {kind}"))
        .tag(collection)
        .path_param("id", format!("{kind} id; must match the body id"))
        .json_request::<R::Dto>(openapi, format!("Full {kind} record"))
        .handler(handlers::update::<R>)
        .empty_response(StatusCode::NO_CONTENT, format!("{kind} updated"))
        .error_400(openapi)
        .error_404(openapi)
        .error_409(openapi)
        .error_500(openapi)
        .register(routes, openapi);

    routes = OperationBuilder::delete(item)
        .operation_id(format!("{collection}.delete"))
        .summary(format!("Delete a {kind}"))
        .tag(collection)
        .path_param("id", format!("{kind} id"))
        .handler(handlers::delete::<R>)
        .empty_response(StatusCode::NO_CONTENT, format!("{kind} deleted"))
        .error_400(openapi)
        .error_404(openapi)
        .error_500(openapi)
        .register(routes, openapi);

    router.merge(routes.layer(Extension(service)))
}
