//! Model artifact loading

use crate::config::ModelArtifact;
use anyhow::Context;
use pipeline::{LinearModel, ModelRegistry};
use std::path::Path;
use tracing::{info, warn};

/// Read one JSON model artifact
pub fn load_model(path: &Path) -> anyhow::Result<LinearModel> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let model = LinearModel::from_json(&json)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(model)
}

/// Load every configured artifact; missing or broken ones are skipped
pub fn load_registry(models: &[ModelArtifact]) -> ModelRegistry {
    let mut builder = ModelRegistry::builder();
    for artifact in models {
        match load_model(&artifact.path) {
            Ok(model) => {
                info!("Model {} loaded from {}", artifact.target, artifact.path.display());
                builder = builder.register(artifact.target.clone(), model);
            }
            Err(e) => {
                warn!("Model {} not loaded, skipping: {:#}", artifact.target, e);
            }
        }
    }
    builder.build()
}
