use crate::{Config, model::LookupOutcome, provider::openweather::OpenWeatherClient};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Abstraction over the weather data source.
///
/// `city` is expected to be non-empty and already trimmed by the caller.
/// Implementations convert every failure into a [`LookupOutcome`] error;
/// they never panic on provider misbehavior.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, city: &str) -> LookupOutcome;
}

/// Construct the weather provider from config.
///
/// Fails loudly on an incomplete config rather than issuing malformed
/// requests later.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let client = OpenWeatherClient::from_config(config)?;
    Ok(Box::new(client))
}
