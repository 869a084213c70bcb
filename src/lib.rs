//! freq432 - dominant frequency detection for audio clips
//!
//! Decodes an audio file of any supported container/codec to mono PCM,
//! computes its spectrum and reports the dominant frequency, flagging
//! whether it sits close to 432 Hz.

pub mod analysis;
pub mod decode;
pub mod error;
pub mod service;

pub use analysis::{AnalysisResult, SpectralAnalyzer};
pub use decode::{AudioDecoder, SymphoniaDecoder};
pub use error::AnalysisError;
pub use service::{FrequencyPipeline, ServiceConfig};
