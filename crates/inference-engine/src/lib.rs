//! Prediction Dispatch
//!
//! Routes a feature vector to independently trained per-target regression
//! models. A failing target is reported as `null` and never affects the
//! other targets.

mod engine;
mod model;
mod registry;

pub use engine::{PredictionDispatcher, PredictionResult};
pub use model::{LinearModel, RegressionModel};
pub use registry::{ModelRegistry, ModelRegistryBuilder};

use feature_engine::FeatureError;
use thiserror::Error;

/// Target names used by the trained model set
pub mod target {
    /// Diastolic blood pressure
    pub const DBP: &str = "DBP";
    /// Systolic blood pressure
    pub const SBP: &str = "SBP";
    /// Pulse rate
    pub const PULSE: &str = "Pulse";
}

/// Errors during a single target's prediction
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("Model requested unknown feature: {0}")]
    UnknownFeature(String),
    #[error("Invalid input shape: expected {expected} features, got {actual}")]
    FeatureCount { expected: usize, actual: usize },
    #[error("Model produced non-finite output: {0}")]
    NonFinite(f64),
    #[error("Model artifact invalid: {0}")]
    InvalidArtifact(String),
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
}

impl From<FeatureError> for PredictionError {
    fn from(err: FeatureError) -> Self {
        match err {
            FeatureError::UnknownFeature(name) => PredictionError::UnknownFeature(name),
        }
    }
}
