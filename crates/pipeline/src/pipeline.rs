//! Pipeline Implementation

use crate::config::PipelineConfig;
use crate::PipelineError;
use feature_engine::{FeatureExtractor, FeatureVector};
use inference_engine::{ModelRegistry, PredictionDispatcher, PredictionResult};
use serde::Serialize;
use signal_conditioner::{ConditionedWaveform, SignalConditioner};
use std::sync::Arc;
use tracing::{debug, info};

/// Result of one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineOutput {
    /// Extracted features
    pub features: FeatureVector,
    /// One entry per registered target
    pub predictions: PredictionResult,
    /// Conditioned waveform the features were computed from
    #[serde(skip)]
    pub waveform: ConditionedWaveform,
}

/// Condition → extract → predict
#[derive(Debug, Clone)]
pub struct Pipeline {
    conditioner: SignalConditioner,
    extractor: FeatureExtractor,
    dispatcher: PredictionDispatcher,
}

impl Pipeline {
    /// Build a pipeline; the band-pass is designed here, once
    pub fn new(config: &PipelineConfig, registry: Arc<ModelRegistry>) -> Result<Self, PipelineError> {
        if !config.min_peak_separation_s.is_finite() || config.min_peak_separation_s < 0.0 {
            return Err(PipelineError::InvalidConfig(format!(
                "min_peak_separation_s must be a non-negative number, got {}",
                config.min_peak_separation_s
            )));
        }

        info!(
            "Creating pipeline: fs={} Hz, band=[{}, {}] Hz, order={}, targets={}",
            config.sample_rate_hz,
            config.low_cutoff_hz,
            config.high_cutoff_hz,
            config.filter_order,
            registry.len()
        );

        Ok(Self {
            conditioner: SignalConditioner::new(config.bandpass())?,
            extractor: FeatureExtractor::new(config.peaks()),
            dispatcher: PredictionDispatcher::new(registry),
        })
    }

    /// Sample rate the pipeline expects
    pub fn sample_rate_hz(&self) -> f64 {
        self.conditioner.sample_rate_hz()
    }

    /// Registered models
    pub fn registry(&self) -> &ModelRegistry {
        self.dispatcher.registry()
    }

    /// Run on a raw waveform sampled at the configured rate
    pub fn run(&self, raw: &[f64]) -> Result<PipelineOutput, PipelineError> {
        self.run_with_time(raw, None)
    }

    /// Run with explicit per-sample timestamps (seconds)
    pub fn run_with_time(
        &self,
        raw: &[f64],
        time: Option<&[f64]>,
    ) -> Result<PipelineOutput, PipelineError> {
        let waveform = self.conditioner.condition(raw)?;
        let features = self.extractor.extract(&waveform, time);
        let predictions = self.dispatcher.predict(&features);

        debug!(
            "Pipeline run: {} samples, {} beats, {} prediction(s)",
            raw.len(),
            features.num_beats,
            predictions.len()
        );

        Ok(PipelineOutput {
            features,
            predictions,
            waveform,
        })
    }
}
