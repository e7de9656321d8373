//! Server configuration

use pipeline::{target, PipelineConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable naming the configuration file
pub const CONFIG_PATH_ENV: &str = "BP_CONFIG";

/// Where to find the model for one target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Target name reported in predictions
    pub target: String,
    /// JSON artifact path
    pub path: PathBuf,
}

impl ModelArtifact {
    pub fn new(target: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
            path: path.into(),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address
    pub bind_addr: String,

    /// CSV column holding the infrared waveform
    pub channel: String,

    /// Emit logs as JSON lines
    pub json_logs: bool,

    /// Signal processing settings
    pub pipeline: PipelineConfig,

    /// Model artifacts, kept as a list so target names keep their case
    pub models: Vec<ModelArtifact>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let models = vec![
            ModelArtifact::new(target::DBP, "models/dbp.json"),
            ModelArtifact::new(target::SBP, "models/sbp.json"),
            ModelArtifact::new(target::PULSE, "models/pulse.json"),
        ];

        Self {
            bind_addr: "0.0.0.0:5001".to_string(),
            channel: "IR".to_string(),
            json_logs: false,
            pipeline: PipelineConfig::default(),
            models,
        }
    }
}

impl ServerConfig {
    /// Load defaults, then the optional config file, then `BP_*` variables
    ///
    /// The file is `path` if given, else `$BP_CONFIG`, else `config/server`
    /// (any format the `config` crate recognises by extension).
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let path = path
            .map(str::to_string)
            .or_else(|| std::env::var(CONFIG_PATH_ENV).ok())
            .unwrap_or_else(|| "config/server".to_string());

        config::Config::builder()
            .add_source(config::File::with_name(&path).required(false))
            .add_source(
                config::Environment::with_prefix("BP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.channel, "IR");
        assert_eq!(config.pipeline.sample_rate_hz, 25.0);
        assert_eq!(config.models.len(), 3);
        assert!(config.models.iter().any(|m| m.target == "Pulse"));
    }

    #[test]
    fn test_load_from_file_overrides() {
        let path = std::env::temp_dir().join(format!("bp-server-test-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "channel = \"Infrared\"\n\n[pipeline]\nsample_rate_hz = 50.0\n\n[[models]]\ntarget = \"SBP\"\npath = \"/opt/sbp.json\"\n",
        )
        .unwrap();

        let config = ServerConfig::load(path.to_str()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.channel, "Infrared");
        assert_eq!(config.pipeline.sample_rate_hz, 50.0);
        assert_eq!(config.pipeline.filter_order, 4);
        assert_eq!(config.models.len(), 1);
        assert_eq!(config.models[0], ModelArtifact::new("SBP", "/opt/sbp.json"));
    }

    #[test]
    fn test_env_overrides_use_single_underscore_prefix() {
        std::env::set_var("BP_PIPELINE__SAMPLE_RATE_HZ", "50");
        std::env::set_var("BP_BIND_ADDR", "127.0.0.1:6001");

        let missing = std::env::temp_dir().join(format!("bp-server-absent-{}", std::process::id()));
        let config = ServerConfig::load(missing.to_str());

        std::env::remove_var("BP_PIPELINE__SAMPLE_RATE_HZ");
        std::env::remove_var("BP_BIND_ADDR");

        let config = config.unwrap();
        assert_eq!(config.pipeline.sample_rate_hz, 50.0);
        assert_eq!(config.bind_addr, "127.0.0.1:6001");
        assert_eq!(config.pipeline.filter_order, 4);
    }
}
