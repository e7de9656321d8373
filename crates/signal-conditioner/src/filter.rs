//! Zero-Phase Butterworth Band-Pass Filter
//!
//! The filter is designed once as a cascade of second-order sections
//! (analog Butterworth prototype, low-pass to band-pass transform,
//! bilinear transform with pre-warped cutoffs) and applied forward then
//! backward so the output has no phase shift relative to the input.

use crate::error::SignalError;
use rustfft::num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::{debug, info};

/// One second-order section, `a[0]` is always 1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Biquad {
    /// Numerator coefficients
    pub b: [f64; 3],
    /// Denominator coefficients
    pub a: [f64; 3],
}

impl Biquad {
    /// Gain at z = 1
    fn dc_gain(&self) -> f64 {
        (self.b[0] + self.b[1] + self.b[2]) / (self.a[0] + self.a[1] + self.a[2])
    }

    /// Transposed direct-form II state for a unit step that has settled
    fn steady_state(&self) -> [f64; 2] {
        let g = self.dc_gain();
        let z1 = self.b[2] - self.a[2] * g;
        let z0 = self.b[1] + self.b[2] - (self.a[1] + self.a[2]) * g;
        [z0, z1]
    }
}

/// Band-pass design parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandpassConfig {
    /// Sample rate (Hz)
    pub sample_rate_hz: f64,
    /// Lower cutoff (Hz)
    pub low_cutoff_hz: f64,
    /// Upper cutoff (Hz)
    pub high_cutoff_hz: f64,
    /// Prototype order, the digital filter has twice as many poles
    pub order: usize,
}

impl Default for BandpassConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: 25.0,
            low_cutoff_hz: 0.5,
            high_cutoff_hz: 5.0,
            order: 4,
        }
    }
}

/// Butterworth band-pass stored as second-order sections
#[derive(Debug, Clone)]
pub struct ButterworthBandpass {
    config: BandpassConfig,
    sections: Vec<Biquad>,
    /// Per-section steady-state for a unit input, cascade gain included
    zi: Vec<[f64; 2]>,
    /// Odd-extension length on each side
    padlen: usize,
}

impl ButterworthBandpass {
    /// Design the filter for the given configuration
    pub fn design(config: BandpassConfig) -> Result<Self, SignalError> {
        let BandpassConfig {
            sample_rate_hz: fs,
            low_cutoff_hz: low,
            high_cutoff_hz: high,
            order,
        } = config;

        if !fs.is_finite() || fs <= 0.0 {
            return Err(SignalError::InvalidFilterDesign(format!(
                "sample rate must be positive, got {}",
                fs
            )));
        }
        if order == 0 {
            return Err(SignalError::InvalidFilterDesign(
                "order must be at least 1".to_string(),
            ));
        }
        let nyquist = fs / 2.0;
        if !(low > 0.0 && low < high && high < nyquist) {
            return Err(SignalError::InvalidFilterDesign(format!(
                "band [{}, {}] Hz must satisfy 0 < low < high < {} Hz",
                low, high, nyquist
            )));
        }

        // Bilinear transform constant and pre-warped analog edges
        let fs2 = 2.0 * fs;
        let warp = |f: f64| fs2 * (PI * f / fs).tan();
        let (w1, w2) = (warp(low), warp(high));
        let bw = w2 - w1;
        let wo2 = w1 * w2;

        let n = order as f64;
        let mut analog_poles = Vec::with_capacity(2 * order);
        for k in 0..order {
            let m = -(n - 1.0) + 2.0 * k as f64;
            let prototype = -Complex64::from_polar(1.0, PI * m / (2.0 * n));
            let shifted = prototype * (bw / 2.0);
            let disc = (shifted * shifted - wo2).sqrt();
            analog_poles.push(shifted + disc);
            analog_poles.push(shifted - disc);
        }

        // `order` zeros at s = 0 map to z = 1, the rest (at infinity) to z = -1
        let mut gain_ratio = Complex64::new(fs2.powi(order as i32), 0.0);
        let digital_poles: Vec<Complex64> = analog_poles
            .iter()
            .map(|&p| {
                gain_ratio /= fs2 - p;
                (fs2 + p) / (fs2 - p)
            })
            .collect();
        let gain = bw.powi(order as i32) * gain_ratio.re;

        let sections = Self::pair_sections(&digital_poles, gain, order)?;

        let mut zi = Vec::with_capacity(sections.len());
        let mut scale = 1.0;
        for section in &sections {
            let [z0, z1] = section.steady_state();
            zi.push([scale * z0, scale * z1]);
            scale *= section.dc_gain();
        }

        let padlen = 3 * (2 * order + 1);

        info!(
            "Designed Butterworth band-pass: order={}, band=[{}, {}] Hz, fs={} Hz, sections={}, padlen={}",
            order,
            low,
            high,
            fs,
            sections.len(),
            padlen
        );

        Ok(Self {
            config,
            sections,
            zi,
            padlen,
        })
    }

    /// Group poles into conjugate (or real) pairs, one zero pair per section
    fn pair_sections(
        poles: &[Complex64],
        gain: f64,
        order: usize,
    ) -> Result<Vec<Biquad>, SignalError> {
        let mut denominators = Vec::with_capacity(order);
        let mut real_poles = Vec::new();

        for p in poles {
            let tolerance = 1e-12 * p.norm().max(1.0);
            if p.im > tolerance {
                denominators.push([1.0, -2.0 * p.re, p.norm_sqr()]);
            } else if p.im.abs() <= tolerance {
                real_poles.push(p.re);
            }
        }

        if real_poles.len() % 2 != 0 {
            return Err(SignalError::InvalidFilterDesign(
                "unpaired real pole".to_string(),
            ));
        }
        real_poles.sort_by(|a, b| a.total_cmp(b));
        for pair in real_poles.chunks(2) {
            denominators.push([1.0, -(pair[0] + pair[1]), pair[0] * pair[1]]);
        }

        if denominators.len() != order {
            return Err(SignalError::InvalidFilterDesign(format!(
                "expected {} sections, paired {}",
                order,
                denominators.len()
            )));
        }

        Ok(denominators
            .into_iter()
            .enumerate()
            .map(|(i, a)| {
                let k = if i == 0 { gain } else { 1.0 };
                Biquad {
                    b: [k, 0.0, -k],
                    a,
                }
            })
            .collect())
    }

    /// Design parameters
    pub fn config(&self) -> &BandpassConfig {
        &self.config
    }

    /// Second-order sections in cascade order
    pub fn sections(&self) -> &[Biquad] {
        &self.sections
    }

    /// Smallest waveform length accepted by [`Self::filtfilt`]
    pub fn min_len(&self) -> usize {
        self.padlen + 1
    }

    /// Run the cascade over `x` in place, starting from steady state at `x0`
    fn run(&self, x: &mut [f64], x0: f64) {
        for (section, zi) in self.sections.iter().zip(&self.zi) {
            let [b0, b1, b2] = section.b;
            let [_, a1, a2] = section.a;
            let mut z0 = zi[0] * x0;
            let mut z1 = zi[1] * x0;
            for v in x.iter_mut() {
                let input = *v;
                let y = b0 * input + z0;
                z0 = b1 * input - a1 * y + z1;
                z1 = b2 * input - a2 * y;
                *v = y;
            }
        }
    }

    /// Forward-backward filtering with odd extension at both ends
    pub fn filtfilt(&self, x: &[f64]) -> Result<Vec<f64>, SignalError> {
        let n = x.len();
        if n < self.min_len() {
            return Err(SignalError::TooShort {
                len: n,
                min: self.min_len(),
            });
        }

        let pad = self.padlen;
        let first = x[0];
        let last = x[n - 1];

        let mut ext = Vec::with_capacity(n + 2 * pad);
        ext.extend((1..=pad).rev().map(|i| 2.0 * first - x[i]));
        ext.extend_from_slice(x);
        ext.extend((1..=pad).map(|i| 2.0 * last - x[n - 1 - i]));

        let x0 = ext[0];
        self.run(&mut ext, x0);
        ext.reverse();
        let y0 = ext[0];
        self.run(&mut ext, y0);
        ext.reverse();

        debug!("filtfilt: {} samples, {} padding each side", n, pad);

        Ok(ext[pad..pad + n].to_vec())
    }
}
