//! DC Removal and Min-Max Normalization
//!
//! Both operations are recomputed per waveform; no scale is carried between
//! recordings, so normalized values are only comparable within one waveform.

use crate::error::SignalError;

/// Subtract the arithmetic mean from every sample
pub fn remove_dc(samples: &[f64]) -> Vec<f64> {
    if samples.is_empty() {
        return Vec::new();
    }
    let mean = samples.iter().sum::<f64>() / samples.len() as f64;
    samples.iter().map(|&v| v - mean).collect()
}

/// Rescale linearly so the minimum maps to 0 and the maximum to 1
pub fn min_max(samples: &[f64]) -> Result<Vec<f64>, SignalError> {
    let min = samples.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    if !range.is_finite() || range <= 0.0 {
        return Err(SignalError::DegenerateOutput);
    }

    Ok(samples.iter().map(|&v| (v - min) / range).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_remove_dc_offset() {
        let centered = remove_dc(&[2000.0, 2100.0, 1900.0]);
        assert_eq!(centered, vec![0.0, 100.0, -100.0]);
    }

    #[test]
    fn test_remove_dc_empty() {
        assert!(remove_dc(&[]).is_empty());
    }

    #[test]
    fn test_min_max_bounds() {
        let normalized = min_max(&[-2.0, 0.0, 2.0]).unwrap();
        assert_eq!(normalized, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_min_max_flat_rejected() {
        assert_eq!(min_max(&[1.0, 1.0]), Err(SignalError::DegenerateOutput));
        assert_eq!(min_max(&[]), Err(SignalError::DegenerateOutput));
    }

    proptest! {
        #[test]
        fn prop_remove_dc_zero_mean(samples in prop::collection::vec(-1.0e4f64..1.0e4, 1..300)) {
            let centered = remove_dc(&samples);
            let mean = centered.iter().sum::<f64>() / centered.len() as f64;
            prop_assert!(mean.abs() < 1e-9);
        }

        #[test]
        fn prop_min_max_attains_both_bounds(
            samples in prop::collection::vec(-1.0e4f64..1.0e4, 2..300)
        ) {
            prop_assume!(samples.iter().any(|&v| v != samples[0]));
            let normalized = min_max(&samples).unwrap();
            prop_assert!(normalized.iter().all(|&v| (0.0..=1.0).contains(&v)));
            prop_assert!(normalized.iter().any(|&v| v == 0.0));
            prop_assert!(normalized.iter().any(|&v| v == 1.0));
        }
    }
}
