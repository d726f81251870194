use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::{
    error::LookupError,
    model::{IconRef, WeatherReport},
};

use super::WeatherProvider;

const CURRENT_WEATHER_PATH: &str = "data/2.5/weather";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    endpoint: Url,
    api_key: String,
    http: Client,
}

impl OpenWeatherProvider {
    /// `base_url` is the provider root, e.g. `https://api.openweathermap.org`.
    pub fn new(base_url: &str, api_key: String) -> anyhow::Result<Self> {
        let raw = format!("{}/{}", base_url.trim_end_matches('/'), CURRENT_WEATHER_PATH);
        let endpoint = Url::parse(&raw)
            .with_context(|| format!("Invalid provider base URL: {base_url}"))?;

        Ok(Self {
            endpoint,
            api_key,
            http: Client::new(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn fetch_current(&self, city: &str) -> Result<WeatherReport, LookupError> {
        tracing::debug!(city, endpoint = %self.endpoint, "requesting current weather");

        let res = self
            .http
            .get(self.endpoint.clone())
            .query(&[
                ("q", city),
                ("units", "metric"),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();

        if !status.is_success() {
            // The status alone decides the outcome; the body is only logged.
            let body = res.text().await.unwrap_or_default();
            tracing::warn!(city, %status, body = %truncate_body(&body), "OpenWeather request failed");
            return Err(LookupError::from_status(status));
        }

        let body = res.text().await?;

        tracing::trace!(body = %body, "OpenWeather payload");

        let parsed: OwCurrentResponse =
            serde_json::from_str(&body).map_err(|e| LookupError::Decode(e.to_string()))?;

        parsed.into_report()
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

impl OwCurrentResponse {
    /// An empty `weather` list is malformed; a condition without an icon
    /// code shows as clear.
    fn into_report(self) -> Result<WeatherReport, LookupError> {
        let condition = self
            .weather
            .first()
            .ok_or_else(|| LookupError::Decode("response contained no weather conditions".into()))?;

        Ok(WeatherReport {
            temperature: self.main.temp.floor() as i32,
            humidity: humidity_pct(self.main.humidity),
            wind_speed: self.wind.speed,
            icon: IconRef::from_condition_code(&condition.icon),
            location: self.name,
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, city: &str) -> Result<WeatherReport, LookupError> {
        self.fetch_current(city).await
    }
}

/// Rounds to a whole percent; out-of-range or NaN readings are clamped.
fn humidity_pct(raw: f64) -> u8 {
    if raw.is_nan() {
        return 0;
    }
    raw.round().clamp(0.0, 100.0) as u8
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
