//! Prediction Dispatcher

use crate::model::RegressionModel;
use crate::registry::ModelRegistry;
use crate::PredictionError;
use feature_engine::FeatureVector;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Per-target predictions; a registered target that failed maps to `None`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredictionResult {
    values: BTreeMap<String, Option<f64>>,
}

impl PredictionResult {
    /// Entry for a target: `None` if the target was not registered,
    /// `Some(None)` if its prediction failed
    pub fn get(&self, target: &str) -> Option<Option<f64>> {
        self.values.get(target).copied()
    }

    /// Predicted value, if the target is registered and succeeded
    pub fn value(&self, target: &str) -> Option<f64> {
        self.get(target).flatten()
    }

    /// Whether the target has an entry (null or not)
    pub fn contains(&self, target: &str) -> bool {
        self.values.contains_key(target)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<f64>)> {
        self.values.iter().map(|(t, v)| (t.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Maps a feature vector to one prediction per registered target
#[derive(Debug, Clone)]
pub struct PredictionDispatcher {
    registry: Arc<ModelRegistry>,
}

impl PredictionDispatcher {
    /// Create a dispatcher over a frozen registry
    pub fn new(registry: Arc<ModelRegistry>) -> Self {
        Self { registry }
    }

    /// Registry in use
    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// Run every registered model; failures become `null` entries
    pub fn predict(&self, features: &FeatureVector) -> PredictionResult {
        let start = std::time::Instant::now();

        let values = self
            .registry
            .iter()
            .map(|(target, model)| {
                let value = match Self::predict_target(model, features) {
                    Ok(value) => Some(value),
                    Err(e) => {
                        warn!("Prediction for {} failed: {}", target, e);
                        None
                    }
                };
                (target.to_string(), value)
            })
            .collect();

        debug!(
            "Dispatched {} target(s) in {}us",
            self.registry.len(),
            start.elapsed().as_micros()
        );

        PredictionResult { values }
    }

    fn predict_target(
        model: &dyn RegressionModel,
        features: &FeatureVector,
    ) -> Result<f64, PredictionError> {
        let subset = match model.required_features() {
            Some(names) => features.select(names)?,
            None => features.all(),
        };
        model.predict(&subset)
    }
}
