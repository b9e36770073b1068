use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::Coordinates;

/// Request to get venue recommendations
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendRequest {
    #[validate(length(min = 1))]
    pub location: String,
    /// Time budget in minutes, as free text; non-numeric input falls back
    /// to the default budget
    pub time: String,
    /// Vibe preference, e.g. "Chill", "Active", "Romantic"
    pub preference: String,
    #[serde(default)]
    pub budget: Option<String>,
}

/// Request to save a favorite venue
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddFavoriteRequest {
    #[validate(length(min = 1))]
    pub name: String,
    pub location: String,
    pub score: i32,
}

/// Request to generate a quest
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct QuestRequest {
    #[validate(length(min = 1))]
    pub user_id: String,
    pub location: Coordinates,
    pub time_available: u32,
    pub weather_condition: String,
    pub vibe_preference: String,
    pub budget_tier: String,
}
