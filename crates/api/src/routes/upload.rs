//! Upload Route

use axum::{body::Bytes, extract::State, Json};
use pipeline::{FeatureVector, PipelineError, PredictionResult, SignalError};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use crate::error::ApiError;
use crate::input::parse_channel;
use crate::AppState;

/// Response for a processed upload
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub status: &'static str,
    /// Number of samples read from the channel
    pub samples: usize,
    pub features: FeatureVector,
    pub predictions: PredictionResult,
}

/// Accept a CSV recording and return features and predictions
pub async fn post_upload(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<UploadResponse>, ApiError> {
    let body = std::str::from_utf8(&body)?;
    let samples = parse_channel(body, &state.channel)?;
    info!("Upload received: {} {} samples", samples.len(), state.channel);

    let output = state.pipeline.run(&samples).map_err(|e| match e {
        PipelineError::Signal(SignalError::Flat { .. }) => ApiError::FlatSignal(state.channel.clone()),
        other => ApiError::Pipeline(other),
    })?;

    info!(
        "Upload processed: {} beats, {:.1} bpm, predictions={:?}",
        output.features.num_beats,
        output.features.heart_rate_bpm,
        output.predictions
    );

    Ok(Json(UploadResponse {
        status: "success",
        samples: samples.len(),
        features: output.features,
        predictions: output.predictions,
    }))
}
