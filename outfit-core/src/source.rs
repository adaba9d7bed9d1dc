use crate::{Config, FetchError, WeatherPayload, source::http::HttpWeatherSource};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod http;

/// Relative path of the single weather endpoint.
pub const WEATHER_PATH: &str = "/api/weather";

/// Where weather payloads come from.
///
/// One call is one round trip. Implementations do not retry.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn fetch(&self) -> Result<WeatherPayload, FetchError>;
}

/// Build the HTTP source for the configured origin.
pub fn source_from_config(config: &Config) -> HttpWeatherSource {
    HttpWeatherSource::new(config.base_url())
}

/// Join an origin and the weather path.
pub fn endpoint_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), WEATHER_PATH)
}
