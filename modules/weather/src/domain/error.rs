use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WeatherError {
    #[error("city must not be empty")]
    MissingCity,

    #[error("upstream request failed: {message}")]
    Transport { message: String },

    #[error("upstream returned HTTP {status}")]
    UpstreamStatus { status: u16 },

    #[error("upstream body could not be decoded: {message}")]
    Decode { message: String },

    #[error("upstream returned an empty payload")]
    EmptyPayload,

    #[error("weather client is misconfigured: {message}")]
    Configuration { message: String },
}

impl WeatherError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn upstream_status(status: u16) -> Self {
        Self::UpstreamStatus { status }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}
