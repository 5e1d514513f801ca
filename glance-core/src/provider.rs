use crate::{
    Config,
    error::FetchError,
    model::{WeatherQuery, WeatherReport},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Env var that overrides the API key stored in the config file.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_weather(&self, query: &WeatherQuery) -> Result<WeatherReport, FetchError>;
}

/// Construct the OpenWeather provider from config. The environment
/// variable wins over the stored key.
pub fn provider_from_config(config: &Config) -> anyhow::Result<OpenWeatherProvider> {
    let env_key = std::env::var(API_KEY_ENV).ok();
    let api_key = resolve_api_key(env_key.as_deref(), config)?;

    Ok(OpenWeatherProvider::new(api_key))
}

fn resolve_api_key(env_key: Option<&str>, config: &Config) -> anyhow::Result<String> {
    env_key
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .or_else(|| config.api_key())
        .map(str::to_owned)
        .ok_or_else(|| {
            anyhow::anyhow!(
                "No API key configured.\n\
                 Hint: run `glance configure` and enter your OpenWeather API key,\n\
                 or set the {API_KEY_ENV} environment variable."
            )
        })
}
