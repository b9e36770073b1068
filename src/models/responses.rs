use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::models::domain::ScoredVenue;

/// Average walking speed used to turn meters into a "N min walk" label
const WALK_METERS_PER_MIN: f64 = 80.0;

/// One recommended venue as returned to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceResponse {
    pub name: String,
    pub distance: String,
    pub duration: String,
    pub reason: Vec<String>,
    pub score: i32,
    pub weather: String,
    pub must_take: Vec<String>,
    /// Kept for wire compatibility with older clients; always null
    #[serde(default)]
    pub alternative: Option<String>,
    #[serde(default)]
    pub music_recommendations: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl PlaceResponse {
    /// Shape one scored pick into a response record.
    ///
    /// Surfaces at most two reasons, most specific first (the scorer emits
    /// them in adjustment order).
    pub fn from_pick(pick: &ScoredVenue, time_raw: &str, weather_summary: &str) -> Self {
        let walk_min = (pick.distance_m / WALK_METERS_PER_MIN) as i64;
        Self {
            name: pick.name.clone(),
            distance: format!("{} min walk", walk_min),
            duration: format!("{} Minutes", time_raw),
            reason: pick.reasons.iter().take(2).cloned().collect(),
            score: pick.score,
            weather: weather_summary.to_string(),
            must_take: pick.packing_list.clone(),
            alternative: None,
            music_recommendations: pick.music.clone(),
            image_url: Some(catalog::placeholder_image(&pick.tags).to_string()),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Simple acknowledgement response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
