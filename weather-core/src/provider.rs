use crate::{Config, LookupError, WeatherReport, provider::openweather::OpenWeatherProvider};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod openweather;

/// One current-conditions lookup by city name.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, city: &str) -> Result<WeatherReport, LookupError>;
}

/// Construct the provider described by `config`.
///
/// Never fails on a missing API key; the request goes out without one and the
/// 401 answer is surfaced to the user.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let provider = OpenWeatherProvider::new(config.base_url(), config.api_key().unwrap_or_default())?;
    Ok(Arc::new(provider))
}
