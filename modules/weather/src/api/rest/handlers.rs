use std::sync::Arc;

use apikit::{ApiPath, ApiQuery, ApiResult, JsonBody, Problem, WithRequestContext};
use axum::{Extension, Json, http::Uri};
use tracing::info;

use super::dto::CityQuery;
use crate::domain::model::WeatherData;
use crate::domain::service::WeatherService;

async fn relay(svc: &WeatherService, city: &str, uri: &Uri) -> ApiResult<JsonBody<WeatherData>> {
    let data = svc
        .forecast(city)
        .await
        .map_err(|e| Problem::from(e).with_request_context(uri))?;
    Ok(Json(data))
}

/// `GET /api/weather?city=NAME`
#[tracing::instrument(skip(svc, uri))]
pub async fn get_weather(
    uri: Uri,
    Extension(svc): Extension<Arc<WeatherService>>,
    ApiQuery(query): ApiQuery<CityQuery>,
) -> ApiResult<JsonBody<WeatherData>> {
    info!("Weather lookup");
    relay(&svc, query.city.as_deref().unwrap_or_default(), &uri).await
}

/// `GET /api/weatherbureau/{city}`
#[tracing::instrument(skip(svc, uri))]
pub async fn get_weather_bureau(
    uri: Uri,
    Extension(svc): Extension<Arc<WeatherService>>,
    ApiPath(city): ApiPath<String>,
) -> ApiResult<JsonBody<WeatherData>> {
    info!("Weather bureau lookup");
    relay(&svc, &city, &uri).await
}
