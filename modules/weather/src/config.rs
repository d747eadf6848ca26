use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Configuration for the weather passthrough
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeatherConfig {
    /// Datastore root; the dataset id is appended as the last path segment.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_dataset_id")]
    pub dataset_id: String,
    #[serde(default = "default_element_name")]
    pub element_name: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// CWA authorization key. Never serialized; set it via `APP__WEATHER__API_KEY`.
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            dataset_id: default_dataset_id(),
            element_name: default_element_name(),
            timeout_secs: default_timeout_secs(),
            api_key: None,
        }
    }
}

fn default_base_url() -> String {
    "https://opendata.cwa.gov.tw/api/v1/rest/datastore".to_owned()
}

fn default_dataset_id() -> String {
    "F-C0032-001".to_owned()
}

fn default_element_name() -> String {
    "CI".to_owned()
}

fn default_timeout_secs() -> u64 {
    30
}
