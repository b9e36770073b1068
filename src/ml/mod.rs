// Type predictor and feedback exports
pub mod feedback;
pub mod predictor;

pub use feedback::{FeedbackEvent, FeedbackRecorder};
pub use predictor::{ModelArtifact, ModelError, TypePredictor};
