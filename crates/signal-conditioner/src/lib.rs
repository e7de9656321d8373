//! PPG Signal Conditioning
//!
//! Removes the DC offset, band-limits the waveform to the cardiac pulsatile
//! band with a zero-phase Butterworth filter and rescales it to [0, 1].

mod conditioner;
mod error;
mod filter;
mod normalizer;
mod validator;

pub use conditioner::{ConditionedWaveform, SignalConditioner};
pub use error::{ErrorKind, SignalError};
pub use filter::{BandpassConfig, Biquad, ButterworthBandpass};
pub use normalizer::{min_max, remove_dc};
pub use validator::Validator;
