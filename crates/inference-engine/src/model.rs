//! Regression Model Capability

use crate::PredictionError;
use feature_engine::FeatureSubset;
use serde::{Deserialize, Serialize};

/// A trained per-target regression model
///
/// Implementations are created once at startup and shared read-only, so they
/// must be `Send + Sync`.
pub trait RegressionModel: Send + Sync {
    /// Feature names the model was trained on, in input order.
    /// `None` means the full feature vector in schema order.
    fn required_features(&self) -> Option<&[String]> {
        None
    }

    /// Predict a scalar from the selected features
    fn predict(&self, features: &FeatureSubset) -> Result<f64, PredictionError>;
}

/// Linear regression artifact: `intercept + Σ coefficient_i · feature_i`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    /// Input features, schema order when absent
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    /// One coefficient per input feature
    pub coefficients: Vec<f64>,
    /// Constant term
    #[serde(default)]
    pub intercept: f64,
}

impl LinearModel {
    /// Create a model over the full feature vector
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            feature_names: None,
            coefficients,
            intercept,
        }
    }

    /// Restrict the model to named features
    pub fn with_features<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.feature_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Parse a JSON artifact
    pub fn from_json(json: &str) -> Result<Self, PredictionError> {
        let model: Self = serde_json::from_str(json)
            .map_err(|e| PredictionError::InvalidArtifact(e.to_string()))?;
        if let Some(names) = &model.feature_names {
            if names.len() != model.coefficients.len() {
                return Err(PredictionError::InvalidArtifact(format!(
                    "{} feature names but {} coefficients",
                    names.len(),
                    model.coefficients.len()
                )));
            }
        }
        Ok(model)
    }
}

impl RegressionModel for LinearModel {
    fn required_features(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    fn predict(&self, features: &FeatureSubset) -> Result<f64, PredictionError> {
        if features.len() != self.coefficients.len() {
            return Err(PredictionError::FeatureCount {
                expected: self.coefficients.len(),
                actual: features.len(),
            });
        }

        let output = self.intercept
            + self
                .coefficients
                .iter()
                .zip(features.values())
                .map(|(c, x)| c * x)
                .sum::<f64>();

        if output.is_finite() {
            Ok(output)
        } else {
            Err(PredictionError::NonFinite(output))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feature_engine::{FeatureVector, FEATURE_DIMENSION};

    fn features() -> FeatureVector {
        FeatureVector {
            heart_rate_bpm: 72.0,
            mean_rr: 0.8,
            ..Default::default()
        }
    }

    #[test]
    fn test_linear_over_named_features() {
        let model = LinearModel::new(vec![0.5, 10.0], 40.0).with_features(["heart_rate_bpm", "mean_rr"]);
        let names = model.required_features().unwrap();
        let subset = features().select(names).unwrap();
        assert!((model.predict(&subset).unwrap() - 84.0).abs() < 1e-9);
    }

    #[test]
    fn test_linear_over_full_vector() {
        let mut coefficients = vec![0.0; FEATURE_DIMENSION];
        coefficients[FEATURE_DIMENSION - 1] = 1.0;
        let model = LinearModel::new(coefficients, 0.0);
        assert!(model.required_features().is_none());
        assert_eq!(model.predict(&features().all()).unwrap(), 72.0);
    }

    #[test]
    fn test_feature_count_mismatch() {
        let model = LinearModel::new(vec![1.0, 2.0, 3.0], 0.0);
        let subset = features().select(&["mean"]).unwrap();
        assert!(matches!(
            model.predict(&subset),
            Err(PredictionError::FeatureCount { expected: 3, actual: 1 })
        ));
    }

    #[test]
    fn test_non_finite_output_rejected() {
        let model = LinearModel::new(vec![f64::INFINITY], 0.0).with_features(["mean_rr"]);
        let subset = features().select(&["mean_rr"]).unwrap();
        assert!(matches!(model.predict(&subset), Err(PredictionError::NonFinite(_))));
    }

    #[test]
    fn test_from_json() {
        let json = r#"{"feature_names": ["heart_rate_bpm"], "coefficients": [1.0], "intercept": 2.5}"#;
        let model = LinearModel::from_json(json).unwrap();
        assert_eq!(model.intercept, 2.5);
        assert_eq!(model.required_features().unwrap(), ["heart_rate_bpm".to_string()]);

        let json = r#"{"coefficients": [1.0, 2.0]}"#;
        let model = LinearModel::from_json(json).unwrap();
        assert_eq!(model.intercept, 0.0);
        assert!(model.feature_names.is_none());
    }

    #[test]
    fn test_from_json_rejects_mismatched_artifact() {
        let json = r#"{"feature_names": ["mean", "std"], "coefficients": [1.0]}"#;
        assert!(matches!(
            LinearModel::from_json(json),
            Err(PredictionError::InvalidArtifact(_))
        ));
        assert!(LinearModel::from_json("not json").is_err());
    }
}
