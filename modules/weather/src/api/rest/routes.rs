use std::sync::Arc;

use apikit::{OpenApiRegistry, OperationBuilder};
use axum::{Extension, Router};
use http::StatusCode;

use super::handlers;
use crate::domain::model::WeatherData;
use crate::domain::service::WeatherService;

pub fn register_routes(
    router: Router,
    openapi: &dyn OpenApiRegistry,
    service: Arc<WeatherService>,
) -> Router {
    let mut routes = Router::new();

    routes = OperationBuilder::get("/api/weather")
        .operation_id("weather.by_query")
        .summary("36-hour comfort forecast for a city")
        .tag("weather")
        .query_param("city", true, "City name as known to the weather bureau")
        .handler(handlers::get_weather)
        .json_response_with_schema::<WeatherData>(openapi, StatusCode::OK, "Upstream forecast")
        .error_400(openapi)
        .error_500(openapi)
        .register(routes, openapi);

    routes = OperationBuilder::get("/api/weatherbureau/{city}")
        .operation_id("weather.by_path")
        .summary("36-hour comfort forecast for a city")
        .tag("weather")
        .string_path_param("city", "City name as known to the weather bureau")
        .handler(handlers::get_weather_bureau)
        .json_response_with_schema::<WeatherData>(openapi, StatusCode::OK, "Upstream forecast")
        .error_500(openapi)
        .register(routes, openapi);

    router.merge(routes.layer(Extension(service)))
}
