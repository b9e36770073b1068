// Core scoring and ranking exports
pub mod music;
pub mod packing;
pub mod ranking;
pub mod scoring;

pub use music::music_recommendations;
pub use packing::packing_list;
pub use ranking::{RankOutcome, Ranker, DEFAULT_TOP_K};
pub use scoring::{score_venue, ScoreWeights};
