use serde::Deserialize;

/// Query string of `GET /api/weather`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CityQuery {
    pub city: Option<String>,
}
