//! Waveform Guards

use crate::error::SignalError;

/// Checks a raw waveform before any filtering happens
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator;

impl Validator {
    /// Create a new validator
    pub fn new() -> Self {
        Self
    }

    /// Reject empty waveforms
    pub fn validate_not_empty(&self, samples: &[f64]) -> Result<(), SignalError> {
        if samples.is_empty() {
            Err(SignalError::Empty)
        } else {
            Ok(())
        }
    }

    /// Reject NaN and infinite samples
    pub fn validate_finite(&self, samples: &[f64]) -> Result<(), SignalError> {
        match samples.iter().position(|v| !v.is_finite()) {
            Some(index) => Err(SignalError::NonFinite {
                index,
                value: samples[index],
            }),
            None => Ok(()),
        }
    }

    /// Reject waveforms with fewer than two distinct values
    pub fn validate_not_flat(&self, samples: &[f64]) -> Result<(), SignalError> {
        match samples.first() {
            Some(&first) if samples.iter().all(|&v| v == first) => Err(SignalError::Flat {
                len: samples.len(),
                value: first,
            }),
            _ => Ok(()),
        }
    }

    /// Run every guard in order
    pub fn validate(&self, samples: &[f64]) -> Result<(), SignalError> {
        self.validate_not_empty(samples)?;
        self.validate_finite(samples)?;
        self.validate_not_flat(samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_rejected() {
        assert_eq!(Validator::new().validate(&[]), Err(SignalError::Empty));
    }

    #[test]
    fn test_all_zeros_rejected_as_flat() {
        let samples = vec![0.0; 100];
        assert_eq!(
            Validator::new().validate(&samples),
            Err(SignalError::Flat { len: 100, value: 0.0 })
        );
    }

    #[test]
    fn test_single_sample_is_flat() {
        assert!(matches!(
            Validator::new().validate(&[42.0]),
            Err(SignalError::Flat { len: 1, .. })
        ));
    }

    #[test]
    fn test_non_finite_reported_with_index() {
        let samples = [1.0, 2.0, f64::NAN, 3.0];
        assert!(matches!(
            Validator::new().validate(&samples),
            Err(SignalError::NonFinite { index: 2, .. })
        ));
    }

    #[test]
    fn test_two_distinct_values_accepted() {
        assert!(Validator::new().validate(&[1.0, 1.0, 2.0]).is_ok());
    }
}
