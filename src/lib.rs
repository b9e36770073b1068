//! PocketPlan - context-aware venue recommendation service
//!
//! This library provides the recommendation scoring/ranking pipeline used
//! by the PocketPlan app: weak signals (current weather, stated vibe,
//! budget tier, time/distance fit, and a statistical type predictor) are
//! fused into one bounded score per candidate venue, and the top picks are
//! decorated with packing and music suggestions.

pub mod catalog;
pub mod config;
pub mod core;
pub mod ml;
pub mod models;
pub mod quest;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{RankOutcome, Ranker, ScoreWeights};
pub use crate::ml::{FeedbackRecorder, TypePredictor};
pub use crate::models::{
    PlaceResponse, RecommendContext, RecommendRequest, ScoredVenue, Venue, VenueTag,
    WeatherReading,
};
