//! Dominant-frequency analyzer
//!
//! Finds the strongest bin of a clip's spectrum and checks whether it
//! falls within a fixed band around 432 Hz.

use super::spectrum::Spectrum;
use crate::error::{AnalysisError, Result};

/// Reference frequency the dominant tone is compared against
pub const REFERENCE_HZ: f64 = 432.0;

/// Half-width of the "close to" band, inclusive
pub const TOLERANCE_HZ: f64 = 5.0;

/// Outcome of analyzing one clip
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    /// Frequency of the strongest spectrum bin in Hz
    pub dominant_frequency: f64,

    /// Whether the dominant frequency lies within the tolerance of 432 Hz
    pub is_close_to_432hz: bool,

    /// Human-readable summary
    pub message: String,
}

impl AnalysisResult {
    /// Dominant frequency as "X.XX Hz"
    pub fn formatted_frequency(&self) -> String {
        format!("{:.2} Hz", self.dominant_frequency)
    }
}

/// Stateless spectral analyzer
#[derive(Debug, Clone)]
pub struct SpectralAnalyzer {
    tolerance_hz: f64,
}

impl SpectralAnalyzer {
    pub fn new() -> Self {
        Self {
            tolerance_hz: TOLERANCE_HZ,
        }
    }

    /// Use a different tolerance band (negative values are treated as 0)
    pub fn with_tolerance(mut self, tolerance_hz: f64) -> Self {
        self.tolerance_hz = tolerance_hz.max(0.0);
        self
    }

    pub fn tolerance_hz(&self) -> f64 {
        self.tolerance_hz
    }

    /// Whether `frequency` is within the tolerance band around 432 Hz
    pub fn is_close(&self, frequency: f64) -> bool {
        (frequency - REFERENCE_HZ).abs() <= self.tolerance_hz
    }

    /// Analyze a mono sample sequence
    pub fn analyze(&self, samples: &[f32], sample_rate: u32) -> Result<AnalysisResult> {
        let spectrum = Spectrum::compute(samples, sample_rate)?;
        self.analyze_spectrum(&spectrum)
    }

    /// Classify an already computed spectrum
    pub fn analyze_spectrum(&self, spectrum: &Spectrum) -> Result<AnalysisResult> {
        let peak = spectrum.peak().ok_or_else(|| {
            AnalysisError::Internal("spectrum has no comparable magnitudes".into())
        })?;

        let dominant_frequency = peak.frequency;
        let is_close_to_432hz = self.is_close(dominant_frequency);
        let verdict = if is_close_to_432hz {
            "close to"
        } else {
            "not close to"
        };
        let message = format!(
            "The dominant frequency is {:.2} Hz, {} {}Hz.",
            dominant_frequency, verdict, REFERENCE_HZ
        );

        log::debug!(
            "Peak at {:.2} Hz (magnitude {:.3}, bin width {:.4} Hz)",
            dominant_frequency,
            peak.magnitude,
            spectrum.bin_width()
        );

        Ok(AnalysisResult {
            dominant_frequency,
            is_close_to_432hz,
            message,
        })
    }
}

impl Default for SpectralAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
