//! reqwest client for the CWA open-data datastore.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};
use url::Url;

use crate::config::WeatherConfig;
use crate::domain::error::WeatherError;
use crate::domain::model::WeatherData;
use crate::domain::service::WeatherProvider;

pub struct CwaClient {
    http: reqwest::Client,
    endpoint: Url,
    element_name: String,
    api_key: Option<SecretString>,
}

impl CwaClient {
    pub fn new(cfg: &WeatherConfig) -> Result<Self, WeatherError> {
        let endpoint = format!(
            "{}/{}",
            cfg.base_url.trim_end_matches('/'),
            cfg.dataset_id
        );
        let endpoint = Url::parse(&endpoint)
            .map_err(|e| WeatherError::configuration(format!("invalid base_url: {e}")))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .map_err(|e| {
                WeatherError::configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            http,
            endpoint,
            element_name: cfg.element_name.clone(),
            api_key: cfg.api_key.clone(),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl WeatherProvider for CwaClient {
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn forecast(&self, city: &str) -> Result<WeatherData, WeatherError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| WeatherError::configuration("weather.api_key is not set"))?;

        let response = self
            .http
            .get(self.endpoint.clone())
            .query(&[
                ("Authorization", api_key.expose_secret()),
                ("format", "JSON"),
                ("locationName", city),
                ("elementName", self.element_name.as_str()),
                ("sort", "time"),
            ])
            .send()
            .await
            .map_err(|e| WeatherError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::upstream_status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| WeatherError::transport(e.to_string()))?;
        debug!(bytes = body.len(), "Upstream body received");

        serde_json::from_slice::<Option<WeatherData>>(&body)
            .map_err(|e| WeatherError::decode(e.to_string()))?
            .ok_or(WeatherError::EmptyPayload)
    }
}
