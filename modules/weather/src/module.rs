use std::sync::Arc;

use apikit::{OpenApiRegistry, RestfulModule};
use axum::Router;
use tracing::{info, warn};

use crate::api::rest::routes::register_routes;
use crate::config::WeatherConfig;
use crate::domain::service::{WeatherProvider, WeatherService};
use crate::infra::cwa_client::CwaClient;

/// Weather passthrough module.
#[derive(Clone)]
pub struct WeatherModule {
    service: Arc<WeatherService>,
}

impl WeatherModule {
    /// Module backed by the CWA datastore client.
    pub fn from_config(cfg: &WeatherConfig) -> anyhow::Result<Self> {
        if cfg.api_key.is_none() {
            warn!("weather.api_key is not set; weather lookups will fail until it is configured");
        }
        let client = CwaClient::new(cfg)?;
        info!(endpoint = %client.endpoint(), "Weather client configured");
        Ok(Self::with_provider(Arc::new(client)))
    }

    #[must_use]
    pub fn with_provider(provider: Arc<dyn WeatherProvider>) -> Self {
        Self {
            service: Arc::new(WeatherService::new(provider)),
        }
    }
}

impl RestfulModule for WeatherModule {
    fn name(&self) -> &'static str {
        "weather"
    }

    fn register_rest(
        &self,
        router: Router,
        openapi: &dyn OpenApiRegistry,
    ) -> anyhow::Result<Router> {
        info!("Weather REST routes registering");
        Ok(register_routes(router, openapi, Arc::clone(&self.service)))
    }
}
