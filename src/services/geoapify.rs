use std::time::Duration;

use moka::future::Cache;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

use crate::models::domain::{Coordinates, Venue, VenueTag};

/// Errors that can occur when talking to Geoapify
#[derive(Debug, Error)]
pub enum GeoapifyError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Geoapify API client
///
/// Handles forward geocoding (with an in-process cache of successful
/// lookups) and nearby place search. Raw provider categories are parsed
/// into the closed tag vocabulary here, at the decode boundary.
pub struct GeoapifyClient {
    base_url: String,
    api_key: String,
    client: Client,
    geocode_cache: Cache<String, Coordinates>,
    radius_m: u32,
    limit: u32,
}

impl GeoapifyClient {
    pub fn new(
        base_url: String,
        api_key: String,
        cache_size: u64,
        cache_ttl_secs: u64,
        radius_m: u32,
        limit: u32,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        let geocode_cache = Cache::builder()
            .max_capacity(cache_size)
            .time_to_live(Duration::from_secs(cache_ttl_secs))
            .build();

        Self {
            base_url,
            api_key,
            client,
            geocode_cache,
            radius_m,
            limit,
        }
    }

    /// Resolve a free-text location to coordinates.
    ///
    /// `Ok(None)` means the provider had no result for the query, which the
    /// caller surfaces as a user-facing failure.
    pub async fn geocode(&self, location: &str) -> Result<Option<Coordinates>, GeoapifyError> {
        let cache_key = location.trim().to_lowercase();
        if let Some(coords) = self.geocode_cache.get(&cache_key).await {
            tracing::trace!("Geocode cache hit: {}", cache_key);
            return Ok(Some(coords));
        }

        let url = format!(
            "{}/v1/geocode/search?text={}&apiKey={}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(location),
            self.api_key
        );

        tracing::debug!("Geocoding '{}'", location);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(GeoapifyError::ApiError(format!(
                "Geocode request failed: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;
        let features = json
            .get("features")
            .and_then(|f| f.as_array())
            .ok_or_else(|| GeoapifyError::InvalidResponse("Missing features array".into()))?;

        let first = match features.first() {
            Some(feature) => feature,
            None => return Ok(None),
        };

        let props = first
            .get("properties")
            .ok_or_else(|| GeoapifyError::InvalidResponse("Missing properties".into()))?;
        let lat = props
            .get("lat")
            .and_then(Value::as_f64)
            .ok_or_else(|| GeoapifyError::InvalidResponse("Missing lat".into()))?;
        let lon = props
            .get("lon")
            .and_then(Value::as_f64)
            .ok_or_else(|| GeoapifyError::InvalidResponse("Missing lon".into()))?;

        let coords = Coordinates { lat, lon };
        self.geocode_cache.insert(cache_key, coords).await;

        Ok(Some(coords))
    }

    /// Search venues near the given coordinates, restricted to the provided
    /// comma-joined category filter. Results are bounded by the configured
    /// limit; distances come pre-computed from the provider.
    pub async fn search_places(
        &self,
        coords: Coordinates,
        categories: &str,
    ) -> Result<Vec<Venue>, GeoapifyError> {
        let url = format!(
            "{}/v2/places?categories={}&filter=circle:{},{},{}&bias=proximity:{},{}&limit={}&apiKey={}",
            self.base_url.trim_end_matches('/'),
            categories,
            coords.lon,
            coords.lat,
            self.radius_m,
            coords.lon,
            coords.lat,
            self.limit,
            self.api_key
        );

        tracing::debug!("Searching places: categories={}", categories);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(GeoapifyError::ApiError(format!(
                "Place search failed: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;
        let features = json
            .get("features")
            .and_then(|f| f.as_array())
            .ok_or_else(|| GeoapifyError::InvalidResponse("Missing features array".into()))?;

        let venues: Vec<Venue> = features.iter().map(decode_feature).collect();

        tracing::debug!("Found {} places", venues.len());

        Ok(venues)
    }
}

fn decode_feature(feature: &Value) -> Venue {
    let props = feature.get("properties");

    let name = props
        .and_then(|p| p.get("name"))
        .and_then(Value::as_str)
        .filter(|n| !n.is_empty())
        .unwrap_or("Unknown Place")
        .to_string();

    let distance_m = props
        .and_then(|p| p.get("distance"))
        .and_then(Value::as_f64)
        .unwrap_or(0.0);

    let raw_categories: Vec<String> = props
        .and_then(|p| p.get("categories"))
        .and_then(Value::as_array)
        .map(|cats| {
            cats.iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();

    Venue {
        name,
        distance_m,
        tags: VenueTag::parse_all(&raw_categories),
    }
}
