//! Signal Conditioning Error Types

use thiserror::Error;

/// Broad category of a conditioning failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The waveform itself is unusable (empty, non-finite, flat)
    InvalidInput,
    /// The band-pass stage could not run on this waveform or configuration
    FilterFailure,
}

/// Errors during waveform conditioning
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SignalError {
    /// No samples at all
    #[error("Invalid input: waveform is empty")]
    Empty,

    /// Every sample has the same value
    #[error("Invalid input: waveform is flat (all {len} samples equal {value})")]
    Flat { len: usize, value: f64 },

    /// NaN or infinite sample
    #[error("Invalid input: non-finite sample {value} at index {index}")]
    NonFinite { index: usize, value: f64 },

    /// Waveform shorter than the zero-phase filter padding allows
    #[error("Filter failure: waveform has {len} samples, at least {min} required")]
    TooShort { len: usize, min: usize },

    /// Cutoffs, order or sample rate cannot produce a stable band-pass
    #[error("Filter failure: invalid filter design: {0}")]
    InvalidFilterDesign(String),

    /// Band-pass output has no range left to normalize
    #[error("Filter failure: filtered waveform has zero range")]
    DegenerateOutput,
}

impl SignalError {
    /// Category used by callers to report the failure
    pub fn kind(&self) -> ErrorKind {
        match self {
            SignalError::Empty | SignalError::Flat { .. } | SignalError::NonFinite { .. } => {
                ErrorKind::InvalidInput
            }
            SignalError::TooShort { .. }
            | SignalError::InvalidFilterDesign(_)
            | SignalError::DegenerateOutput => ErrorKind::FilterFailure,
        }
    }
}
