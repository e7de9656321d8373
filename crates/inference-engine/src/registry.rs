//! Model Registry

use crate::model::RegressionModel;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::info;

/// Immutable target → model mapping, built once at startup
#[derive(Clone, Default)]
pub struct ModelRegistry {
    models: BTreeMap<String, Arc<dyn RegressionModel>>,
}

impl ModelRegistry {
    /// Start building a registry
    pub fn builder() -> ModelRegistryBuilder {
        ModelRegistryBuilder::default()
    }

    /// Registry with no models
    pub fn empty() -> Self {
        Self::default()
    }

    /// Model registered for a target
    pub fn get(&self, target: &str) -> Option<&dyn RegressionModel> {
        self.models.get(target).map(|m| m.as_ref())
    }

    /// Registered target names, sorted
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }

    /// Registered (target, model) pairs, sorted by target
    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn RegressionModel)> {
        self.models.iter().map(|(t, m)| (t.as_str(), m.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("targets", &self.models.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for [`ModelRegistry`]
#[derive(Default)]
pub struct ModelRegistryBuilder {
    models: BTreeMap<String, Arc<dyn RegressionModel>>,
}

impl ModelRegistryBuilder {
    /// Register a model, replacing any previous model for the target
    pub fn register(self, target: impl Into<String>, model: impl RegressionModel + 'static) -> Self {
        self.register_shared(target, Arc::new(model))
    }

    /// Register an already shared model
    pub fn register_shared(
        mut self,
        target: impl Into<String>,
        model: Arc<dyn RegressionModel>,
    ) -> Self {
        self.models.insert(target.into(), model);
        self
    }

    /// Freeze the registry
    pub fn build(self) -> ModelRegistry {
        info!(
            "Model registry ready with {} target(s): {:?}",
            self.models.len(),
            self.models.keys().collect::<Vec<_>>()
        );
        ModelRegistry {
            models: self.models,
        }
    }
}
