use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, instrument};

use crate::domain::error::WeatherError;
use crate::domain::model::WeatherData;

/// Source of forecasts for a named city.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn forecast(&self, city: &str) -> Result<WeatherData, WeatherError>;
}

#[derive(Clone)]
pub struct WeatherService {
    provider: Arc<dyn WeatherProvider>,
}

impl WeatherService {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    /// Forecast for `city`. Blank names are rejected before anything goes upstream.
    #[instrument(skip(self))]
    pub async fn forecast(&self, city: &str) -> Result<WeatherData, WeatherError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(WeatherError::MissingCity);
        }

        match self.provider.forecast(city).await {
            Ok(data) => {
                debug!(locations = data.records.location.len(), "Forecast received");
                Ok(data)
            }
            Err(e) => {
                error!(error = %e, city = %city, "Error fetching weather data for city");
                Err(e)
            }
        }
    }
}
