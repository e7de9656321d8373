//! Signal Conditioner

use crate::error::SignalError;
use crate::filter::{BandpassConfig, ButterworthBandpass};
use crate::normalizer::{min_max, remove_dc};
use crate::validator::Validator;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Waveform after DC removal, band-pass filtering and rescaling to [0, 1]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionedWaveform {
    /// Normalized samples in [0, 1]
    pub samples: Vec<f64>,
    /// Band-passed samples before normalization
    pub filtered: Vec<f64>,
    /// Sample rate (Hz)
    pub sample_rate_hz: f64,
}

impl ConditionedWaveform {
    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the waveform has no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Timestamps derived from the sample index
    pub fn uniform_time(&self) -> Vec<f64> {
        (0..self.samples.len())
            .map(|i| i as f64 / self.sample_rate_hz)
            .collect()
    }
}

/// DC removal → zero-phase band-pass → min-max normalization
///
/// The band-pass coefficients are designed once in [`SignalConditioner::new`]
/// and shared by every call, so a conditioner can be reused across threads.
#[derive(Debug, Clone)]
pub struct SignalConditioner {
    filter: ButterworthBandpass,
    validator: Validator,
}

impl SignalConditioner {
    /// Create a conditioner, designing the band-pass up front
    pub fn new(config: BandpassConfig) -> Result<Self, SignalError> {
        Ok(Self {
            filter: ButterworthBandpass::design(config)?,
            validator: Validator::new(),
        })
    }

    /// Sample rate the filter was designed for
    pub fn sample_rate_hz(&self) -> f64 {
        self.filter.config().sample_rate_hz
    }

    /// Band-pass filter in use
    pub fn filter(&self) -> &ButterworthBandpass {
        &self.filter
    }

    /// Condition one raw waveform
    pub fn condition(&self, raw: &[f64]) -> Result<ConditionedWaveform, SignalError> {
        self.validator.validate(raw)?;

        let centered = remove_dc(raw);
        let filtered = self.filter.filtfilt(&centered)?;
        let samples = min_max(&filtered)?;

        debug!("Conditioned waveform: {} samples", samples.len());

        Ok(ConditionedWaveform {
            samples,
            filtered,
            sample_rate_hz: self.sample_rate_hz(),
        })
    }
}
