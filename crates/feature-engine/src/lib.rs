//! Feature Engineering Engine
//!
//! Provides statistical and beat-based feature extraction for blood pressure
//! and pulse regression models.

mod features;
mod peaks;
mod statistics;

pub use features::{
    FeatureError, FeatureExtractor, FeatureSubset, FeatureVector, FEATURE_DIMENSION, FEATURE_NAMES,
};
pub use peaks::{PeakConfig, PeakDetector};
pub use statistics::StatisticalFeatures;
