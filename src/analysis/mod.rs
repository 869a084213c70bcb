//! Spectral analysis layer
//!
//! Computes a clip's magnitude spectrum and reports its dominant
//! frequency against the 432 Hz reference.

mod analyzer;
pub mod spectrum;

pub use analyzer::{AnalysisResult, SpectralAnalyzer, REFERENCE_HZ, TOLERANCE_HZ};
pub use spectrum::{FrequencyBin, Spectrum};
