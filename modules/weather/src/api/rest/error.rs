use apikit::problem::{self, Problem};

use crate::domain::error::WeatherError;

/// Upstream failures all collapse into one opaque 500; the detail stays in the logs.
pub fn weather_error_to_problem(e: &WeatherError) -> Problem {
    match e {
        WeatherError::MissingCity => {
            problem::bad_request("A city name is required.").with_code("WEATHER_BAD_REQUEST")
        }
        WeatherError::Transport { .. }
        | WeatherError::UpstreamStatus { .. }
        | WeatherError::Decode { .. }
        | WeatherError::EmptyPayload
        | WeatherError::Configuration { .. } => {
            problem::internal_error("An error occurred while processing your request.")
                .with_code("WEATHER_UPSTREAM")
        }
    }
}

impl From<WeatherError> for Problem {
    fn from(e: WeatherError) -> Self {
        weather_error_to_problem(&e)
    }
}
