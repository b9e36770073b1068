use crate::models::domain::{BudgetTier, RecommendContext, Venue, VenueTag, VenueType, WeatherKind};

/// Additive scoring parameters.
///
/// The default values are empirical; they are carried as configuration so
/// they can be tuned without touching the scoring code, but changing them
/// changes ranking behavior.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    /// Score every candidate starts from
    pub base: i32,
    /// Bonus when the type predictor agrees with a candidate tag
    pub predictor_match: i32,
    /// Penalty for outdoor venues in precipitation
    pub rain_outdoor_penalty: i32,
    /// Bonus for indoor venues in precipitation
    pub rain_indoor_bonus: i32,
    /// Bonus for outdoor venues in clear weather
    pub sun_outdoor_bonus: i32,
    /// Bonus for free-friendly venues on the free tier
    pub free_bonus: i32,
    /// Bonus for restaurants on the premium tier
    pub premium_bonus: i32,
    /// Penalty when the venue is far and time is short
    pub far_penalty: i32,
    /// Time budget below which distance starts to matter, in minutes
    pub short_time_min: u32,
    /// Distance beyond which a short time budget is penalized, in meters
    pub far_distance_m: f64,
    /// Lower clamp bound for the final score
    pub min_score: i32,
    /// Upper clamp bound for the final score
    pub max_score: i32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            base: 70,
            predictor_match: 5,
            rain_outdoor_penalty: 30,
            rain_indoor_bonus: 20,
            sun_outdoor_bonus: 25,
            free_bonus: 20,
            premium_bonus: 15,
            far_penalty: 15,
            short_time_min: 45,
            far_distance_m: 3000.0,
            min_score: 40,
            max_score: 99,
        }
    }
}

/// Score one candidate venue against the request context.
///
/// Adjustments apply in a fixed order (predictor, weather, budget,
/// time/distance) so the reason list is deterministic; callers surface the
/// first two reasons, so reordering adjustments would change what users
/// see and how ties resolve after sorting.
///
/// Returns the clamped score plus at least one reason.
pub fn score_venue(
    ctx: &RecommendContext,
    weather: WeatherKind,
    predicted: Option<VenueType>,
    venue: &Venue,
    weights: &ScoreWeights,
) -> (i32, Vec<String>) {
    let mut score = weights.base;
    let mut reasons = Vec::new();

    // 1. Predictor agreement
    if let Some(kind) = predicted {
        if venue.has_tag(&kind.tag()) {
            score += weights.predictor_match;
            reasons.push(format!("AI suggests {}s right now.", kind.label()));
        }
    }

    // 2. Weather impact
    if weather.is_precipitation() {
        if venue.is_outdoor() {
            score -= weights.rain_outdoor_penalty;
            reasons.push("Rain makes outdoors less ideal.".to_string());
        } else {
            score += weights.rain_indoor_bonus;
            reasons.push("Great indoor shelter.".to_string());
        }
    } else if weather == WeatherKind::Sunny && venue.is_outdoor() {
        score += weights.sun_outdoor_bonus;
        reasons.push("Perfect weather for outdoors.".to_string());
    }

    // 3. Budget impact
    match ctx.budget {
        BudgetTier::Free if venue.is_free_friendly() => {
            score += weights.free_bonus;
            reasons.push("Wallet-friendly.".to_string());
        }
        BudgetTier::Premium if venue.has_tag(&VenueTag::Restaurant) => {
            score += weights.premium_bonus;
            reasons.push("Premium vibe.".to_string());
        }
        _ => {}
    }

    // 4. Time/distance fit
    if ctx.time_available_min < weights.short_time_min && venue.distance_m > weights.far_distance_m {
        score -= weights.far_penalty;
        reasons.push("A bit far for your time.".to_string());
    }

    // 5. Clamp
    score = score.clamp(weights.min_score, weights.max_score);

    // Every candidate carries at least one reason
    if reasons.is_empty() {
        reasons.push(format!("Matches your {} vibe.", ctx.vibe));
    }

    (score, reasons)
}
