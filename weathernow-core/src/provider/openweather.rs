use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::{
    Config,
    error::LookupError,
    model::{Condition, LookupOutcome, WeatherRecord},
};

use super::WeatherProvider;

/// Client for the OpenWeatherMap current-weather endpoint.
///
/// Stateless apart from the shared HTTP connection pool: one outbound
/// request per lookup, no retries, no caching.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    /// Build a client from config, refusing incomplete settings.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        config.validate()?;

        Ok(Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            http: Client::new(),
        })
    }

    fn map_error_status(status: StatusCode, body: &str, city: &str) -> LookupError {
        match status {
            StatusCode::NOT_FOUND => LookupError::NotFound(city.to_string()),
            StatusCode::UNAUTHORIZED => LookupError::Unauthorized,
            _ => {
                let message = serde_json::from_str::<OwErrorBody>(body)
                    .ok()
                    .and_then(|b| b.message)
                    .filter(|m| !m.trim().is_empty());

                match message {
                    Some(message) => LookupError::Provider(message),
                    None => LookupError::provider_fallback(),
                }
            }
        }
    }

    fn parse_record(body: &str) -> LookupOutcome {
        let parsed: OwCurrentResponse = serde_json::from_str(body).map_err(|err| {
            warn!(error = %err, "malformed current-weather payload");
            LookupError::Unexpected
        })?;

        if parsed.weather.is_empty() {
            warn!("current-weather payload has no condition entries");
            return Err(LookupError::Unexpected);
        }

        let conditions = parsed
            .weather
            .into_iter()
            .map(|w| Condition { summary: w.main, description: w.description, icon_id: w.icon })
            .collect();

        let observed_at = DateTime::from_timestamp(parsed.dt, 0).unwrap_or_else(Utc::now);

        Ok(WeatherRecord {
            location_name: parsed.name,
            temperature_c: parsed.main.temp,
            feels_like_c: parsed.main.feels_like,
            humidity_pct: parsed.main.humidity,
            wind_speed_mps: parsed.wind.speed,
            conditions,
            observed_at,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

/// Error body shape OpenWeather uses for non-2xx responses.
#[derive(Debug, Deserialize)]
struct OwErrorBody {
    message: Option<String>,
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    #[instrument(skip(self), fields(city = %city))]
    async fn current_weather(&self, city: &str) -> LookupOutcome {
        let res = self
            .http
            .get(&self.base_url)
            .query(&[("q", city), ("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await
            .map_err(|err| {
                warn!(error = %err, "transport failure reaching weather endpoint");
                LookupError::Unexpected
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|err| {
            warn!(error = %err, "failed to read weather response body");
            LookupError::Unexpected
        })?;

        if !status.is_success() {
            let err = Self::map_error_status(status, &body, city);
            debug!(%status, error = %err, "weather lookup failed");
            return Err(err);
        }

        let record = Self::parse_record(&body)?;
        debug!(location = %record.location_name, temp = record.temperature_c, "weather lookup succeeded");
        Ok(record)
    }
}
