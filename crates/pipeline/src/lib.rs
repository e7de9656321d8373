//! PPG Blood Pressure Pipeline
//!
//! raw waveform → [`SignalConditioner`] → [`FeatureExtractor`] →
//! [`PredictionDispatcher`] → per-target predictions.
//!
//! The pipeline holds no mutable state; one instance can serve concurrent
//! requests behind an `Arc`.

mod config;
mod pipeline;

pub use config::PipelineConfig;
pub use pipeline::{Pipeline, PipelineOutput};

pub use feature_engine::{FeatureExtractor, FeatureVector, FEATURE_NAMES};
pub use inference_engine::{
    target, LinearModel, ModelRegistry, PredictionDispatcher, PredictionError, PredictionResult,
    RegressionModel,
};
pub use signal_conditioner::{ConditionedWaveform, ErrorKind, SignalConditioner, SignalError};

use thiserror::Error;

/// Errors that abort a pipeline run
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Signal(#[from] SignalError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PipelineError {
    /// Whether the error is caused by the submitted waveform rather than
    /// by the pipeline configuration
    pub fn is_input_error(&self) -> bool {
        match self {
            PipelineError::Signal(SignalError::InvalidFilterDesign(_)) => false,
            PipelineError::Signal(_) => true,
            PipelineError::InvalidConfig(_) => false,
        }
    }
}
