use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::models::domain::{VenueType, WeatherKind};

/// Feature order expected by the inference artifact:
/// weather_encoded, time_available, distance_metric, rating
pub const FEATURE_COUNT: usize = 4;

/// Encoder index used for weather labels outside the trained vocabulary
const FALLBACK_WEATHER_INDEX: usize = 0;

/// Errors raised while loading or validating a model artifact
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("inconsistent model artifact: {0}")]
    Shape(String),
}

/// Serialized multinomial logistic regression produced by the offline
/// training pipeline: one coefficient row and intercept per class label.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelArtifact {
    pub classes: Vec<String>,
    pub weather_labels: Vec<String>,
    pub coefficients: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
}

impl ModelArtifact {
    fn validate(&self) -> Result<(), ModelError> {
        if self.classes.is_empty() {
            return Err(ModelError::Shape("no class labels".to_string()));
        }
        if self.weather_labels.is_empty() {
            return Err(ModelError::Shape("no weather labels".to_string()));
        }
        if self.coefficients.len() != self.classes.len() {
            return Err(ModelError::Shape(format!(
                "{} coefficient rows for {} classes",
                self.coefficients.len(),
                self.classes.len()
            )));
        }
        if self.intercepts.len() != self.classes.len() {
            return Err(ModelError::Shape(format!(
                "{} intercepts for {} classes",
                self.intercepts.len(),
                self.classes.len()
            )));
        }
        for (idx, row) in self.coefficients.iter().enumerate() {
            if row.len() != FEATURE_COUNT {
                return Err(ModelError::Shape(format!(
                    "coefficient row {} has {} features, expected {}",
                    idx,
                    row.len(),
                    FEATURE_COUNT
                )));
            }
        }
        Ok(())
    }
}

/// Stateless venue type predictor
///
/// Loaded once at startup and shared read-only across requests. Construction
/// never fails: a missing or invalid artifact produces a disabled predictor
/// that answers `None` for every input.
#[derive(Debug)]
pub struct TypePredictor {
    model: Option<ModelArtifact>,
}

impl TypePredictor {
    /// Predictor without a model; every prediction is `None`
    pub fn disabled() -> Self {
        Self { model: None }
    }

    /// Build a predictor from an already-deserialized artifact
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, ModelError> {
        artifact.validate()?;
        Ok(Self {
            model: Some(artifact),
        })
    }

    /// Load the inference artifact from disk.
    ///
    /// Never fails the caller: any load error leaves the predictor disabled.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(predictor) => {
                tracing::info!("Type predictor loaded from {}", path.display());
                predictor
            }
            Err(e) => {
                tracing::warn!("Type predictor unavailable ({}), predictions disabled", e);
                Self::disabled()
            }
        }
    }

    fn try_load(path: &Path) -> Result<Self, ModelError> {
        let raw = std::fs::read_to_string(path)?;
        let artifact: ModelArtifact = serde_json::from_str(&raw)?;
        Self::from_artifact(artifact)
    }

    pub fn is_loaded(&self) -> bool {
        self.model.is_some()
    }

    /// Predict the preferred venue type for the given context.
    ///
    /// Deterministic over its inputs when a model is loaded. Weather labels
    /// the encoder has never seen map to a fixed fallback index instead of
    /// being rejected. A class label outside the venue type vocabulary
    /// yields `None`.
    pub fn predict(
        &self,
        weather: WeatherKind,
        time_available: u32,
        rating: f64,
        distance_metric: f64,
    ) -> Option<VenueType> {
        let model = self.model.as_ref()?;

        let weather_encoded = model
            .weather_labels
            .iter()
            .position(|label| label == weather.as_label())
            .unwrap_or(FALLBACK_WEATHER_INDEX);

        let features = [
            weather_encoded as f64,
            f64::from(time_available),
            distance_metric,
            rating,
        ];

        // Softmax is monotone, so the argmax of the linear activations is
        // the predicted class
        let mut best: Option<(usize, f64)> = None;
        for (idx, (row, intercept)) in model
            .coefficients
            .iter()
            .zip(model.intercepts.iter())
            .enumerate()
        {
            let activation: f64 = row
                .iter()
                .zip(features.iter())
                .map(|(coef, x)| coef * x)
                .sum::<f64>()
                + intercept;
            if best.map_or(true, |(_, top)| activation > top) {
                best = Some((idx, activation));
            }
        }

        let (idx, _) = best?;
        VenueType::from_label(&model.classes[idx])
    }
}
