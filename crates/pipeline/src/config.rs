//! Pipeline configuration

use feature_engine::PeakConfig;
use serde::{Deserialize, Serialize};
use signal_conditioner::BandpassConfig;

/// Pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Acquisition sample rate (Hz), must match the sensor firmware
    pub sample_rate_hz: f64,

    /// Band-pass lower cutoff (Hz)
    pub low_cutoff_hz: f64,

    /// Band-pass upper cutoff (Hz)
    pub high_cutoff_hz: f64,

    /// Butterworth prototype order
    pub filter_order: usize,

    /// Minimum time between detected beats (seconds)
    pub min_peak_separation_s: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: 25.0,
            low_cutoff_hz: 0.5,
            high_cutoff_hz: 5.0,
            filter_order: 4,
            min_peak_separation_s: 0.3,
        }
    }
}

impl PipelineConfig {
    /// Band-pass design parameters
    pub fn bandpass(&self) -> BandpassConfig {
        BandpassConfig {
            sample_rate_hz: self.sample_rate_hz,
            low_cutoff_hz: self.low_cutoff_hz,
            high_cutoff_hz: self.high_cutoff_hz,
            order: self.filter_order,
        }
    }

    /// Peak detection parameters
    pub fn peaks(&self) -> PeakConfig {
        PeakConfig {
            min_separation_s: self.min_peak_separation_s,
        }
    }
}
