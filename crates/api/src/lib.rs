//! Blood Pressure Estimation API Server
//!
//! Accepts CSV recordings from the PPG sensor, runs the conditioning,
//! feature extraction and prediction pipeline and returns the estimates.

use axum::{
    routing::{get, post},
    Router,
};
use pipeline::Pipeline;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod config;
mod error;
mod input;
mod models;
mod routes;

pub use self::config::{ModelArtifact, ServerConfig, CONFIG_PATH_ENV};
pub use error::ApiError;
pub use input::parse_channel;
pub use models::{load_model, load_registry};

/// Application state shared across handlers, read-only after startup
pub struct AppState {
    /// Processing pipeline with its frozen model registry
    pub pipeline: Pipeline,
    /// CSV column holding the waveform
    pub channel: String,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(pipeline: Pipeline, channel: impl Into<String>) -> Self {
        Self {
            pipeline,
            channel: channel.into(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }

    /// Load models and build the pipeline from configuration
    pub fn from_config(config: &ServerConfig) -> anyhow::Result<Self> {
        let registry = Arc::new(load_registry(&config.models));
        let pipeline = Pipeline::new(&config.pipeline, registry)?;
        Ok(Self::new(pipeline, config.channel.clone()))
    }
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/upload", post(routes::upload::post_upload))
        .route("/api/v1/upload", post(routes::upload::post_upload))
        .route("/api/v1/health", get(routes::health::get_health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Initialize logging; later calls keep the first subscriber
pub fn init_logging(json: bool) {
    let builder = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true);

    let result = if json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };

    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}

/// Run the server
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let state = Arc::new(AppState::from_config(&config)?);
    let app = create_router(state);

    info!("Starting API server on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use pipeline::{target, LinearModel, ModelRegistry, PipelineConfig};
    use serde_json::Value;
    use std::f64::consts::PI;
    use tower::ServiceExt;

    fn app(registry: ModelRegistry) -> Router {
        let pipeline = Pipeline::new(&PipelineConfig::default(), Arc::new(registry)).unwrap();
        create_router(Arc::new(AppState::new(pipeline, "IR")))
    }

    fn recording(len: usize) -> String {
        let mut csv = String::from("Time,IR,Red\n");
        for i in 0..len {
            let ir = 2000.0 + 100.0 * (2.0 * PI * 1.2 * i as f64 / 25.0).sin();
            csv.push_str(&format!("{},{:.3},1500\n", i * 40, ir));
        }
        csv
    }

    async fn post(app: Router, body: impl Into<Body>) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/upload")
                    .header("content-type", "text/csv")
                    .body(body.into())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_upload_success() {
        let registry = ModelRegistry::builder()
            .register(
                target::PULSE,
                LinearModel::new(vec![1.0], 0.0).with_features(["heart_rate_bpm"]),
            )
            .register(
                target::DBP,
                LinearModel::new(vec![1.0], 0.0).with_features(["reflection_index"]),
            )
            .build();

        let (status, json) = post(app(registry), recording(250)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "success");
        assert_eq!(json["samples"], 250);
        let pulse = json["predictions"]["Pulse"].as_f64().unwrap();
        assert!((pulse - 72.0).abs() < 5.0);
        assert!(json["predictions"]["DBP"].is_null());
        assert!(json["predictions"].get("SBP").is_none());
        assert!(json["features"]["num_beats"].as_u64().unwrap() >= 11);
    }

    #[tokio::test]
    async fn test_upload_without_models() {
        let (status, json) = post(app(ModelRegistry::empty()), recording(250)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["predictions"], serde_json::json!({}));
    }

    #[tokio::test]
    async fn test_upload_empty_body() {
        let (status, json) = post(app(ModelRegistry::empty()), String::new()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "No data received");
    }

    #[tokio::test]
    async fn test_upload_invalid_utf8_is_json_error() {
        let body = Body::from(b"IR\n1\n\xff".to_vec());
        let (status, json) = post(app(ModelRegistry::empty()), body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["status"], "error");
        assert!(json["message"]
            .as_str()
            .unwrap()
            .starts_with("Upload is not valid UTF-8"));
    }

    #[tokio::test]
    async fn test_upload_missing_channel() {
        let (status, json) = post(app(ModelRegistry::empty()), "Red\n1\n2\n".to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "No IR column found");
    }

    #[tokio::test]
    async fn test_upload_flat_signal() {
        let body = format!("IR\n{}", "0\n".repeat(100));
        let (status, json) = post(app(ModelRegistry::empty()), body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "IR signal flat");
    }

    #[tokio::test]
    async fn test_upload_too_short() {
        let (status, json) = post(app(ModelRegistry::empty()), recording(10)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["message"].as_str().unwrap().starts_with("Filter failure"));
    }

    #[tokio::test]
    async fn test_health() {
        let registry = ModelRegistry::builder()
            .register(target::SBP, LinearModel::new(vec![], 120.0).with_features(Vec::<String>::new()))
            .build();
        let response = app(registry)
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["models"], serde_json::json!(["SBP"]));
        assert_eq!(json["sample_rate_hz"], 25.0);
    }
}
