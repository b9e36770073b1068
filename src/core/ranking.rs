use std::sync::Arc;

use crate::core::music::music_recommendations;
use crate::core::packing::packing_list;
use crate::core::scoring::{score_venue, ScoreWeights};
use crate::ml::{FeedbackEvent, FeedbackRecorder, TypePredictor};
use crate::models::domain::{RecommendContext, ScoredVenue, Venue, WeatherKind, WeatherReading};

/// Number of scored candidates retained after sorting
pub const DEFAULT_TOP_K: usize = 6;

/// Rating proxy fed to the type predictor; candidate venues carry no
/// rating of their own, so inference runs with a fixed value.
pub const RATING_PROXY: f64 = 4.5;

/// Meters per unit of the predictor's distance feature
const DISTANCE_METRIC_SCALE: f64 = 100.0;

/// Fixed score of the pseudo-candidate emitted for empty search results
const FALLBACK_SCORE: i32 = 80;

/// Result of one ranking pass
#[derive(Debug)]
pub struct RankOutcome {
    /// Best first, at most `top_k` entries, never empty
    pub picks: Vec<ScoredVenue>,
    pub total_candidates: usize,
}

/// Ranking pipeline
///
/// Scores every candidate against the request context (consulting the type
/// predictor per candidate), sorts descending, truncates to the top picks
/// and attaches the derived packing and music artifacts.
#[derive(Clone)]
pub struct Ranker {
    weights: ScoreWeights,
    top_k: usize,
    predictor: Arc<TypePredictor>,
    feedback: FeedbackRecorder,
}

impl Ranker {
    pub fn new(
        weights: ScoreWeights,
        top_k: usize,
        predictor: Arc<TypePredictor>,
        feedback: FeedbackRecorder,
    ) -> Self {
        Self {
            weights,
            top_k,
            predictor,
            feedback,
        }
    }

    /// Ranker with default weights, a disabled predictor and no feedback
    /// sink. Scoring behavior matches the production defaults.
    pub fn with_defaults() -> Self {
        Self::new(
            ScoreWeights::default(),
            DEFAULT_TOP_K,
            Arc::new(TypePredictor::disabled()),
            FeedbackRecorder::disabled(),
        )
    }

    pub fn predictor_loaded(&self) -> bool {
        self.predictor.is_loaded()
    }

    /// Run the full pipeline for one request.
    ///
    /// An empty candidate list yields exactly one fallback pick instead of
    /// an empty outcome.
    pub fn rank(
        &self,
        ctx: &RecommendContext,
        weather: &WeatherReading,
        candidates: Vec<Venue>,
    ) -> RankOutcome {
        let total_candidates = candidates.len();

        if candidates.is_empty() {
            return RankOutcome {
                picks: vec![self.fallback_pick(ctx, weather)],
                total_candidates,
            };
        }

        let weather_kind = WeatherKind::from_condition(&weather.condition);

        let mut picks: Vec<ScoredVenue> = candidates
            .into_iter()
            .map(|venue| {
                let predicted = self.predictor.predict(
                    weather_kind,
                    ctx.time_available_min,
                    RATING_PROXY,
                    venue.distance_m / DISTANCE_METRIC_SCALE,
                );

                // A confirmed prediction feeds the offline retraining log;
                // the send never blocks the scoring path
                if let Some(kind) = predicted {
                    if venue.has_tag(&kind.tag()) {
                        self.feedback.record(FeedbackEvent::new(ctx, kind));
                    }
                }

                let (score, reasons) =
                    score_venue(ctx, weather_kind, predicted, &venue, &self.weights);

                ScoredVenue {
                    name: venue.name,
                    distance_m: venue.distance_m,
                    tags: venue.tags,
                    score,
                    reasons,
                    packing_list: Vec::new(),
                    music: Vec::new(),
                }
            })
            .collect();

        // Stable sort: candidates with equal scores keep their input order,
        // which decides what survives truncation
        picks.sort_by(|a, b| b.score.cmp(&a.score));
        picks.truncate(self.top_k);

        for pick in &mut picks {
            pick.packing_list = packing_list(weather, &ctx.vibe, &pick.tags)
                .into_iter()
                .collect();
            pick.music = music_recommendations(weather, &ctx.vibe, &pick.tags);
        }

        RankOutcome {
            picks,
            total_candidates,
        }
    }

    fn fallback_pick(&self, ctx: &RecommendContext, weather: &WeatherReading) -> ScoredVenue {
        let tags = Vec::new();
        ScoredVenue {
            name: "City Walk".to_string(),
            distance_m: 0.0,
            score: FALLBACK_SCORE,
            reasons: vec!["Explore the area on foot!".to_string()],
            packing_list: packing_list(weather, &ctx.vibe, &tags)
                .into_iter()
                .collect(),
            music: music_recommendations(weather, &ctx.vibe, &tags),
            tags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::ModelArtifact;
    use crate::models::domain::{BudgetTier, Coordinates, VenueTag};

    fn create_context(time: u32, budget: BudgetTier) -> RecommendContext {
        RecommendContext {
            coords: Coordinates {
                lat: 52.52,
                lon: 13.405,
            },
            time_available_min: time,
            vibe: "Chill".to_string(),
            budget,
        }
    }

    fn create_venue(name: &str, distance_m: f64, tags: Vec<VenueTag>) -> Venue {
        Venue {
            name: name.to_string(),
            distance_m,
            tags,
        }
    }

    fn reading(condition: &str) -> WeatherReading {
        WeatherReading {
            temp_c: 18.0,
            condition: condition.to_string(),
            description: String::new(),
        }
    }

    /// Predictor that outputs the same class for every input
    fn constant_predictor(class: &str) -> TypePredictor {
        let artifact = ModelArtifact {
            classes: vec![class.to_string()],
            weather_labels: vec![
                "cloudy".to_string(),
                "rainy".to_string(),
                "sunny".to_string(),
            ],
            coefficients: vec![vec![0.0, 0.0, 0.0, 0.0]],
            intercepts: vec![0.0],
        };
        TypePredictor::from_artifact(artifact).expect("valid artifact")
    }

    #[test]
    fn test_picks_sorted_descending() {
        let ranker = Ranker::with_defaults();
        let ctx = create_context(60, BudgetTier::Budget);

        let candidates = vec![
            create_venue("Park", 500.0, vec![VenueTag::Park]),
            create_venue("Cafe", 500.0, vec![VenueTag::Cafe]),
        ];

        let outcome = ranker.rank(&ctx, &reading("Rain"), candidates);

        assert_eq!(outcome.total_candidates, 2);
        // Indoor cafe outranks the rained-out park
        assert_eq!(outcome.picks[0].name, "Cafe");
        assert!(outcome.picks[0].score > outcome.picks[1].score);
    }

    #[test]
    fn test_equal_scores_keep_input_order() {
        let ranker = Ranker::with_defaults();
        let ctx = create_context(60, BudgetTier::Budget);

        // Identical tags and distance, so identical scores
        let candidates = vec![
            create_venue("First", 500.0, vec![VenueTag::Cafe]),
            create_venue("Second", 500.0, vec![VenueTag::Cafe]),
            create_venue("Third", 500.0, vec![VenueTag::Cafe]),
        ];

        let outcome = ranker.rank(&ctx, &reading("Clouds"), candidates);

        let names: Vec<&str> = outcome.picks.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_truncates_to_top_k() {
        let ranker = Ranker::with_defaults();
        let ctx = create_context(60, BudgetTier::Budget);

        let candidates: Vec<Venue> = (0..15)
            .map(|i| create_venue(&format!("Venue {}", i), 500.0, vec![VenueTag::Cafe]))
            .collect();

        let outcome = ranker.rank(&ctx, &reading("Clear"), candidates);

        assert_eq!(outcome.picks.len(), DEFAULT_TOP_K);
        assert_eq!(outcome.total_candidates, 15);
    }

    #[test]
    fn test_empty_candidates_yield_fallback() {
        let ranker = Ranker::with_defaults();
        let ctx = create_context(60, BudgetTier::Budget);

        let outcome = ranker.rank(&ctx, &reading("Clear"), Vec::new());

        assert_eq!(outcome.picks.len(), 1);
        assert_eq!(outcome.total_candidates, 0);

        let pick = &outcome.picks[0];
        assert_eq!(pick.name, "City Walk");
        assert_eq!(pick.score, 80);
        assert_eq!(pick.reasons, vec!["Explore the area on foot!".to_string()]);
        // The fallback carries real artifacts like any other pick
        assert!(pick.packing_list.contains(&"Smartphone".to_string()));
        assert_eq!(pick.music.len(), 3);
    }

    #[test]
    fn test_artifacts_attached_to_every_pick() {
        let ranker = Ranker::with_defaults();
        let ctx = create_context(60, BudgetTier::Budget);

        let candidates = vec![
            create_venue("Cafe", 400.0, vec![VenueTag::Cafe]),
            create_venue("Park", 900.0, vec![VenueTag::Park]),
            create_venue("Museum", 1500.0, vec![VenueTag::Museum]),
        ];

        let outcome = ranker.rank(&ctx, &reading("Rain"), candidates);

        for pick in &outcome.picks {
            assert!(pick.packing_list.contains(&"Smartphone".to_string()));
            assert!(pick.packing_list.contains(&"Wallet".to_string()));
            assert_eq!(pick.music.len(), 3);
            assert!(!pick.reasons.is_empty());
        }
    }

    #[test]
    fn test_scores_stay_within_bounds() {
        let ranker = Ranker::with_defaults();

        for budget in [BudgetTier::Free, BudgetTier::Budget, BudgetTier::Premium] {
            for condition in ["Rain", "Clear", "Clouds"] {
                let ctx = create_context(30, budget);
                let candidates = vec![
                    create_venue("Far Park", 4500.0, vec![VenueTag::Park]),
                    create_venue("Near Mix", 100.0, vec![VenueTag::Park, VenueTag::Restaurant]),
                ];
                let outcome = ranker.rank(&ctx, &reading(condition), candidates);
                for pick in &outcome.picks {
                    assert!((40..=99).contains(&pick.score));
                }
            }
        }
    }

    #[test]
    fn test_predictor_agreement_raises_score() {
        let ctx = create_context(60, BudgetTier::Budget);
        let candidates = || vec![create_venue("Corner Cafe", 400.0, vec![VenueTag::Cafe])];

        let with_predictor = Ranker::new(
            ScoreWeights::default(),
            DEFAULT_TOP_K,
            Arc::new(constant_predictor("cafe")),
            FeedbackRecorder::disabled(),
        );
        let without_predictor = Ranker::with_defaults();

        let agreed = with_predictor.rank(&ctx, &reading("Clouds"), candidates());
        let plain = without_predictor.rank(&ctx, &reading("Clouds"), candidates());

        assert_eq!(agreed.picks[0].score, plain.picks[0].score + 5);
        assert_eq!(agreed.picks[0].reasons[0], "AI suggests cafes right now.");
    }

    #[test]
    fn test_prediction_outside_vocabulary_is_ignored() {
        let ctx = create_context(60, BudgetTier::Budget);
        let ranker = Ranker::new(
            ScoreWeights::default(),
            DEFAULT_TOP_K,
            Arc::new(constant_predictor("aquarium")),
            FeedbackRecorder::disabled(),
        );

        let outcome = ranker.rank(
            &ctx,
            &reading("Clouds"),
            vec![create_venue("Corner Cafe", 400.0, vec![VenueTag::Cafe])],
        );

        assert_eq!(outcome.picks[0].score, 70);
    }
}
