//! Magnitude spectrum of a real-valued signal
//!
//! Uses realfft so only the non-negative half of the transform is
//! computed: a signal of N samples yields N/2 + 1 bins, bin `i` sitting
//! at `i * sample_rate / N` Hz.

use crate::error::{AnalysisError, Result};
use realfft::RealFftPlanner;

/// One frequency bin of a spectrum
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyBin {
    /// Bin center in Hz
    pub frequency: f64,
    /// Absolute value of the complex coefficient
    pub magnitude: f64,
}

/// Frequency-ascending magnitude spectrum
#[derive(Debug, Clone)]
pub struct Spectrum {
    bins: Vec<FrequencyBin>,
    sample_rate: u32,
    sample_count: usize,
}

impl Spectrum {
    /// Transform `samples` (taken at `sample_rate` Hz) into a spectrum.
    ///
    /// No windowing or DC removal is applied; the 0 Hz bin is kept like
    /// every other bin.
    pub fn compute(samples: &[f32], sample_rate: u32) -> Result<Self> {
        if samples.is_empty() {
            return Err(AnalysisError::EmptySampleSequence);
        }
        if sample_rate == 0 {
            return Err(AnalysisError::InvalidSampleRate(sample_rate));
        }

        let n = samples.len();
        let mut planner = RealFftPlanner::<f64>::new();
        let r2c = planner.plan_fft_forward(n);

        let mut input = r2c.make_input_vec();
        for (dst, &src) in input.iter_mut().zip(samples) {
            *dst = src as f64;
        }
        let mut output = r2c.make_output_vec();

        r2c.process(&mut input, &mut output)
            .map_err(|e| AnalysisError::Internal(format!("FFT failed: {}", e)))?;

        let rate = sample_rate as f64;
        let bins = output
            .iter()
            .enumerate()
            .map(|(i, c)| FrequencyBin {
                frequency: i as f64 * rate / n as f64,
                magnitude: c.norm(),
            })
            .collect::<Vec<_>>();

        log::debug!(
            "Spectrum: {} samples -> {} bins, {:.4} Hz per bin",
            n,
            bins.len(),
            rate / n as f64
        );

        Ok(Self {
            bins,
            sample_rate,
            sample_count: n,
        })
    }

    pub fn bins(&self) -> &[FrequencyBin] {
        &self.bins
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Spacing between adjacent bins in Hz
    pub fn bin_width(&self) -> f64 {
        self.sample_rate as f64 / self.sample_count as f64
    }

    /// The bin with the largest magnitude (first one wins on ties)
    pub fn peak(&self) -> Option<&FrequencyBin> {
        let magnitudes: Vec<f64> = self.bins.iter().map(|b| b.magnitude).collect();
        peak_index(&magnitudes).map(|i| &self.bins[i])
    }
}

/// Index of the maximum value, keeping the earliest index on ties.
/// NaN values never win.
pub fn peak_index(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        let better = match best {
            Some((_, best_v)) => v > best_v,
            None => !v.is_nan(),
        };
        if better {
            best = Some((i, v));
        }
    }
    best.map(|(i, _)| i)
}
