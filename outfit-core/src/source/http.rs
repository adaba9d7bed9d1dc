use async_trait::async_trait;
use reqwest::{
    Client,
    header::{CACHE_CONTROL, PRAGMA},
};

use crate::{FetchError, WeatherPayload};

use super::{WeatherSource, endpoint_url};

/// `GET /api/weather` over HTTP with caching disabled.
///
/// No explicit timeout is set; the transport default applies.
#[derive(Debug, Clone)]
pub struct HttpWeatherSource {
    endpoint: String,
    http: Client,
}

impl HttpWeatherSource {
    pub fn new(base_url: &str) -> Self {
        Self { endpoint: endpoint_url(base_url), http: Client::new() }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl WeatherSource for HttpWeatherSource {
    async fn fetch(&self) -> Result<WeatherPayload, FetchError> {
        tracing::debug!(endpoint = %self.endpoint, "fetching weather");

        let res = self
            .http
            .get(&self.endpoint)
            .header(CACHE_CONTROL, "no-store")
            .header(PRAGMA, "no-cache")
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::Status { status: status.as_u16(), body: truncate_body(&body) });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_bodies() {
        assert_eq!(truncate_body("oops"), "oops");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let body = "날".repeat(100);
        let cut = truncate_body(&body);
        assert!(cut.ends_with("..."));
        assert!(cut.len() <= 203);
    }
}
