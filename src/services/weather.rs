use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

use crate::models::domain::{Coordinates, WeatherReading};

/// Errors that can occur when fetching weather data
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// OpenWeather current-conditions client
pub struct WeatherClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl WeatherClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key,
            client,
        }
    }

    /// Fetch the current weather reading for the given coordinates
    pub async fn current(&self, coords: Coordinates) -> Result<WeatherReading, WeatherError> {
        let url = format!(
            "{}/data/2.5/weather?lat={}&lon={}&units=metric&appid={}",
            self.base_url.trim_end_matches('/'),
            coords.lat,
            coords.lon,
            self.api_key
        );

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(WeatherError::ApiError(format!(
                "Weather request failed: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let temp_c = json
            .pointer("/main/temp")
            .and_then(Value::as_f64)
            .ok_or_else(|| WeatherError::InvalidResponse("Missing temperature".into()))?;
        let condition = json
            .pointer("/weather/0/main")
            .and_then(Value::as_str)
            .ok_or_else(|| WeatherError::InvalidResponse("Missing condition".into()))?
            .to_string();
        let description = json
            .pointer("/weather/0/description")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        Ok(WeatherReading {
            temp_c,
            condition,
            description,
        })
    }

    /// Fetch the current weather, substituting the fixed default reading on
    /// any failure. The recommendation flow never fails on weather.
    pub async fn current_or_default(&self, coords: Coordinates) -> WeatherReading {
        match self.current(coords).await {
            Ok(reading) => reading,
            Err(e) => {
                tracing::warn!("Weather lookup failed ({}), using default reading", e);
                WeatherReading::fallback()
            }
        }
    }
}
