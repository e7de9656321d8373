//! Feature Vector Assembly

use crate::peaks::{PeakConfig, PeakDetector};
use crate::statistics::{mean_std, StatisticalFeatures};
use serde::{Deserialize, Serialize};
use signal_conditioner::ConditionedWaveform;
use thiserror::Error;
use tracing::{debug, warn};

/// Number of features in the vector
pub const FEATURE_DIMENSION: usize = 11;

/// Feature names in schema order
pub const FEATURE_NAMES: [&str; FEATURE_DIMENSION] = [
    "mean",
    "median",
    "std",
    "var",
    "max",
    "min",
    "p2p_amplitude",
    "num_beats",
    "mean_rr",
    "std_rr",
    "heart_rate_bpm",
];

/// Errors while selecting features by name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeatureError {
    #[error("Unknown feature: {0}")]
    UnknownFeature(String),
}

/// Fixed-schema feature record; every field is always present
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub var: f64,
    pub max: f64,
    pub min: f64,
    pub p2p_amplitude: f64,
    /// Accepted peaks
    pub num_beats: usize,
    /// Mean RR interval (s), 0 with fewer than two beats
    pub mean_rr: f64,
    /// RR interval standard deviation (s), 0 with fewer than two beats
    pub std_rr: f64,
    /// 60 / mean_rr, 0 with fewer than two beats
    pub heart_rate_bpm: f64,
}

impl FeatureVector {
    /// Look up one feature by its schema name
    pub fn get(&self, name: &str) -> Option<f64> {
        let value = match name {
            "mean" => self.mean,
            "median" => self.median,
            "std" => self.std,
            "var" => self.var,
            "max" => self.max,
            "min" => self.min,
            "p2p_amplitude" => self.p2p_amplitude,
            "num_beats" => self.num_beats as f64,
            "mean_rr" => self.mean_rr,
            "std_rr" => self.std_rr,
            "heart_rate_bpm" => self.heart_rate_bpm,
            _ => return None,
        };
        Some(value)
    }

    /// All values in schema order
    pub fn values(&self) -> [f64; FEATURE_DIMENSION] {
        [
            self.mean,
            self.median,
            self.std,
            self.var,
            self.max,
            self.min,
            self.p2p_amplitude,
            self.num_beats as f64,
            self.mean_rr,
            self.std_rr,
            self.heart_rate_bpm,
        ]
    }

    /// Every feature, in schema order
    pub fn all(&self) -> FeatureSubset {
        FeatureSubset {
            entries: FEATURE_NAMES.iter().copied().zip(self.values()).collect(),
        }
    }

    /// Pick the named features, in the order given
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<FeatureSubset, FeatureError> {
        let entries = names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                let key = FEATURE_NAMES
                    .iter()
                    .copied()
                    .find(|&k| k == name)
                    .ok_or_else(|| FeatureError::UnknownFeature(name.to_string()))?;
                let value = self
                    .get(key)
                    .ok_or_else(|| FeatureError::UnknownFeature(name.to_string()))?;
                Ok((key, value))
            })
            .collect::<Result<Vec<_>, FeatureError>>()?;
        Ok(FeatureSubset { entries })
    }
}

/// Ordered named selection of features handed to a model
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSubset {
    entries: Vec<(&'static str, f64)>,
}

impl FeatureSubset {
    /// Feature names in order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    /// Feature values in order
    pub fn values(&self) -> Vec<f64> {
        self.entries.iter().map(|(_, v)| *v).collect()
    }

    /// Value of one selected feature
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Feature extractor for conditioned waveforms
#[derive(Debug, Clone, Default)]
pub struct FeatureExtractor {
    detector: PeakDetector,
}

impl FeatureExtractor {
    /// Create a new feature extractor
    pub fn new(config: PeakConfig) -> Self {
        Self {
            detector: PeakDetector::new(config),
        }
    }

    /// Extract features from a conditioned waveform
    ///
    /// `time` holds one timestamp (s) per sample; when it is absent, its
    /// length does not match or it holds a non-finite value, `index / fs` is
    /// used instead.
    pub fn extract(&self, waveform: &ConditionedWaveform, time: Option<&[f64]>) -> FeatureVector {
        self.extract_samples(&waveform.samples, time, waveform.sample_rate_hz)
    }

    /// Extract features from raw samples at the given sample rate
    pub fn extract_samples(
        &self,
        signal: &[f64],
        time: Option<&[f64]>,
        sample_rate_hz: f64,
    ) -> FeatureVector {
        let stats = StatisticalFeatures::compute(signal);
        let peaks = self.detector.detect(signal, sample_rate_hz);
        let num_beats = peaks.len();

        let (mean_rr, std_rr, heart_rate_bpm) = if num_beats >= 2 {
            let rr: Vec<f64> = match time {
                Some(t) if t.len() == signal.len() && t.iter().all(|v| v.is_finite()) => {
                    peaks.windows(2).map(|w| t[w[1]] - t[w[0]]).collect()
                }
                other => {
                    if let Some(t) = other {
                        warn!(
                            "Unusable timestamps ({} for {} samples, finite={}), using index / fs",
                            t.len(),
                            signal.len(),
                            t.iter().all(|v| v.is_finite())
                        );
                    }
                    peaks
                        .windows(2)
                        .map(|w| (w[1] - w[0]) as f64 / sample_rate_hz)
                        .collect()
                }
            };
            let (mean_rr, std_rr) = mean_std(&rr);
            let heart_rate_bpm = if mean_rr > 0.0 { 60.0 / mean_rr } else { 0.0 };
            (mean_rr, std_rr, heart_rate_bpm)
        } else {
            (0.0, 0.0, 0.0)
        };

        debug!(
            "Extracted features: {} samples, {} beats, {:.1} bpm",
            signal.len(),
            num_beats,
            heart_rate_bpm
        );

        FeatureVector {
            mean: stats.mean,
            median: stats.median,
            std: stats.std_dev,
            var: stats.variance,
            max: stats.max,
            min: stats.min,
            p2p_amplitude: stats.range(),
            num_beats,
            mean_rr,
            std_rr,
            heart_rate_bpm,
        }
    }
}
