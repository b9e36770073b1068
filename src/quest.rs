//! Quest generation: a stubbed itinerary builder layered on top of the
//! same context signals the recommender uses. The safety and social
//! engines are constant-valued placeholders until real telemetry exists.

use serde::{Deserialize, Serialize};

use crate::models::domain::Coordinates;
use crate::models::requests::QuestRequest;

/// Safety score returned while the safety engine is a stub
const STUB_SAFETY_SCORE: u8 = 85;

/// Social scores returned by the stub social engine
const SOCIAL_SCORE_WET: u8 = 60;
const SOCIAL_SCORE_DRY: u8 = 92;

/// One stop on a quest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestStep {
    pub step_id: String,
    pub place_name: String,
    pub description: String,
    /// Gamification hook, e.g. "Find the hidden mural"
    pub action_item: String,
    pub coordinates: Coordinates,
    /// Minutes
    pub estimated_duration: u32,
}

/// A generated quest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestNetwork {
    pub quest_id: String,
    pub title: String,
    pub narrative: String,
    /// 0-100
    pub safety_score: u8,
    /// 0-100
    pub social_vibe_score: u8,
    pub steps: Vec<QuestStep>,
    pub gamification_challenges: Vec<String>,
    /// Sum of the step durations, in minutes
    pub total_duration: u32,
}

/// Builds quests by querying the context engines jointly and assembling
/// steps and challenges from the result
#[derive(Debug, Clone, Default)]
pub struct QuestOrchestrator;

impl QuestOrchestrator {
    pub fn new() -> Self {
        Self
    }

    pub async fn generate_quest(&self, req: &QuestRequest) -> QuestNetwork {
        // Both engines are independent lookups, issued together
        let (safety_score, social_vibe_score) = tokio::join!(
            self.safety_score(req.location, req.time_available),
            self.social_vibe(req.location, &req.weather_condition)
        );

        let steps = self.build_steps(req);
        let gamification_challenges = self.build_challenges(req);

        QuestNetwork {
            quest_id: uuid::Uuid::new_v4().to_string(),
            title: format!(
                "{} Adventure in {}",
                req.vibe_preference, req.weather_condition
            ),
            narrative: format!(
                "A curated journey for a {} mood. Weather is {}, so we picked spots accordingly.",
                req.vibe_preference.to_lowercase(),
                req.weather_condition
            ),
            safety_score,
            social_vibe_score,
            total_duration: steps.iter().map(|s| s.estimated_duration).sum(),
            steps,
            gamification_challenges,
        }
    }

    /// Safety engine stub; a real implementation would consult crime and
    /// lighting data for the location and hour
    async fn safety_score(&self, _location: Coordinates, _time_available: u32) -> u8 {
        STUB_SAFETY_SCORE
    }

    /// Social engine stub; rain and storms empty the streets
    async fn social_vibe(&self, _location: Coordinates, weather: &str) -> u8 {
        match weather.to_lowercase().as_str() {
            "rain" | "storm" => SOCIAL_SCORE_WET,
            _ => SOCIAL_SCORE_DRY,
        }
    }

    fn build_steps(&self, req: &QuestRequest) -> Vec<QuestStep> {
        vec![
            QuestStep {
                step_id: "step_1".to_string(),
                place_name: "The Catalyst Cafe".to_string(),
                description: "Start your engine with a strong brew.".to_string(),
                action_item: "Order the 'Mystery Roosevelt' blend.".to_string(),
                coordinates: req.location,
                estimated_duration: 30,
            },
            QuestStep {
                step_id: "step_2".to_string(),
                place_name: "Neon Arcade".to_string(),
                description: "Level up your day.".to_string(),
                action_item: "Beat the high score on Pac-Man.".to_string(),
                coordinates: Coordinates {
                    lat: req.location.lat + 0.001,
                    lon: req.location.lon + 0.001,
                },
                estimated_duration: 45,
            },
        ]
    }

    fn build_challenges(&self, req: &QuestRequest) -> Vec<String> {
        let mut challenges = vec!["Check-in at every location".to_string()];
        if req.time_available > 60 {
            challenges.push("Complete the quest in under 90 minutes".to_string());
        }
        if req.vibe_preference.to_lowercase() == "adventure" {
            challenges.push("Find the hidden QR code at the final stop".to_string());
        }
        challenges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(time_available: u32, weather: &str, vibe: &str) -> QuestRequest {
        QuestRequest {
            user_id: "user-1".to_string(),
            location: Coordinates {
                lat: 52.52,
                lon: 13.405,
            },
            time_available,
            weather_condition: weather.to_string(),
            vibe_preference: vibe.to_string(),
            budget_tier: "budget".to_string(),
        }
    }

    #[tokio::test]
    async fn test_social_score_drops_in_rain() {
        let orchestrator = QuestOrchestrator::new();

        let wet = orchestrator.generate_quest(&request(45, "Rain", "Chill")).await;
        assert_eq!(wet.social_vibe_score, 60);

        let dry = orchestrator.generate_quest(&request(45, "Clear", "Chill")).await;
        assert_eq!(dry.social_vibe_score, 92);
    }

    #[tokio::test]
    async fn test_total_duration_sums_steps() {
        let orchestrator = QuestOrchestrator::new();
        let quest = orchestrator.generate_quest(&request(45, "Clear", "Chill")).await;

        let sum: u32 = quest.steps.iter().map(|s| s.estimated_duration).sum();
        assert_eq!(quest.total_duration, sum);
        assert_eq!(quest.total_duration, 75);
        assert_eq!(quest.safety_score, 85);
    }

    #[tokio::test]
    async fn test_challenges_scale_with_context() {
        let orchestrator = QuestOrchestrator::new();

        let short = orchestrator.generate_quest(&request(45, "Clear", "Chill")).await;
        assert_eq!(short.gamification_challenges.len(), 1);

        let long_adventure = orchestrator
            .generate_quest(&request(120, "Clear", "Adventure"))
            .await;
        assert_eq!(long_adventure.gamification_challenges.len(), 3);
        assert!(long_adventure.title.starts_with("Adventure"));
    }
}
