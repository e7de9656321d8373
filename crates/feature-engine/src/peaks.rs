//! Beat Detection
//!
//! Local maxima with a minimum spacing between accepted peaks. When two
//! candidates are closer than the spacing, the taller one wins; on equal
//! heights the later candidate wins.

use serde::{Deserialize, Serialize};

/// Peak detection parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeakConfig {
    /// Minimum time between accepted peaks (seconds). At 0.3 s the detectable
    /// rate is capped by spacing alone well above normal resting rates.
    pub min_separation_s: f64,
}

impl Default for PeakConfig {
    fn default() -> Self {
        Self {
            min_separation_s: 0.3,
        }
    }
}

/// Local-maximum peak detector
#[derive(Debug, Clone, Copy, Default)]
pub struct PeakDetector {
    config: PeakConfig,
}

impl PeakDetector {
    /// Create a new peak detector
    pub fn new(config: PeakConfig) -> Self {
        Self { config }
    }

    /// Minimum spacing in samples at the given sample rate
    pub fn min_distance(&self, sample_rate_hz: f64) -> usize {
        let samples = (self.config.min_separation_s * sample_rate_hz).ceil();
        if samples.is_finite() && samples >= 1.0 {
            samples as usize
        } else {
            1
        }
    }

    /// Indices of accepted peaks, in ascending order
    pub fn detect(&self, signal: &[f64], sample_rate_hz: f64) -> Vec<usize> {
        let candidates = local_maxima(signal);
        select_by_distance(signal, &candidates, self.min_distance(sample_rate_hz))
    }
}

/// Strict local maxima; a flat top counts once at its middle sample
fn local_maxima(x: &[f64]) -> Vec<usize> {
    let mut peaks = Vec::new();
    if x.len() < 3 {
        return peaks;
    }

    let last = x.len() - 1;
    let mut i = 1;
    while i < last {
        if x[i - 1] < x[i] {
            let mut ahead = i + 1;
            while ahead < last && x[ahead] == x[i] {
                ahead += 1;
            }
            if x[ahead] < x[i] {
                peaks.push((i + ahead - 1) / 2);
                i = ahead;
            }
        }
        i += 1;
    }
    peaks
}

/// Suppress candidates closer than `distance` to a taller accepted peak
fn select_by_distance(x: &[f64], peaks: &[usize], distance: usize) -> Vec<usize> {
    if distance <= 1 || peaks.len() < 2 {
        return peaks.to_vec();
    }

    let mut order: Vec<usize> = (0..peaks.len()).collect();
    order.sort_by(|&a, &b| x[peaks[b]].total_cmp(&x[peaks[a]]).then(b.cmp(&a)));

    let mut keep = vec![true; peaks.len()];
    for &i in &order {
        if !keep[i] {
            continue;
        }
        for j in (0..i).rev() {
            if peaks[i] - peaks[j] >= distance {
                break;
            }
            keep[j] = false;
        }
        for j in i + 1..peaks.len() {
            if peaks[j] - peaks[i] >= distance {
                break;
            }
            keep[j] = false;
        }
    }

    peaks
        .iter()
        .zip(keep)
        .filter_map(|(&p, k)| k.then_some(p))
        .collect()
}
