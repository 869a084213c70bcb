//! Upload → decode → analyze orchestration

use super::config::ServiceConfig;
use super::intake::{content_type_for_path, validate_upload, IntakeError, Upload};
use crate::analysis::{AnalysisResult, SpectralAnalyzer};
use crate::decode::AudioDecoder;
use crate::error::AnalysisError;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Anything that can stop one upload from producing a result
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Refused before decoding
    #[error(transparent)]
    Rejected(#[from] IntakeError),

    /// Decoding or analysis failed
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    /// The file could not be read from disk
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    /// HTTP-equivalent status for this failure
    pub fn status_code(&self) -> u16 {
        match self {
            PipelineError::Rejected(_) => 400,
            PipelineError::Analysis(e) => e.status_code(),
            PipelineError::Io { .. } => 500,
        }
    }

    /// Caller-facing description
    pub fn public_detail(&self) -> String {
        match self {
            PipelineError::Rejected(e) => e.to_string(),
            PipelineError::Analysis(e) => e.public_detail(),
            PipelineError::Io { .. } => "Failed to read the audio file".to_string(),
        }
    }
}

/// Stateless analysis pipeline; one call handles one upload end to end
pub struct FrequencyPipeline<D: AudioDecoder> {
    config: ServiceConfig,
    decoder: D,
    analyzer: SpectralAnalyzer,
}

impl<D: AudioDecoder> FrequencyPipeline<D> {
    /// Create a new pipeline
    pub fn new(config: ServiceConfig, decoder: D) -> Self {
        let analyzer = SpectralAnalyzer::new().with_tolerance(config.tolerance_hz);
        Self {
            config,
            decoder,
            analyzer,
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Validate, decode and analyze one upload
    pub fn analyze_upload(&self, upload: Upload) -> Result<AnalysisResult, PipelineError> {
        validate_upload(&upload, &self.config)?;

        let name = upload.display_name().to_string();
        log::debug!("Analyzing {} ({} bytes)", name, upload.bytes.len());

        let Upload {
            bytes, content_type, ..
        } = upload;
        let audio = self.decoder.decode(bytes, content_type.as_deref())?;

        log::debug!(
            "{}: {} samples ({:.2}s) at {}Hz",
            name,
            audio.samples.len(),
            audio.duration_secs(),
            audio.sample_rate
        );

        let result = self.analyzer.analyze(&audio.samples, audio.sample_rate)?;

        log::info!("{}: {}", name, result.message);
        Ok(result)
    }

    /// Read a file from disk and analyze it as an upload
    pub fn analyze_file(&self, path: &Path) -> Result<AnalysisResult, PipelineError> {
        let bytes = std::fs::read(path).map_err(|source| PipelineError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let upload = Upload::new(bytes)
            .with_content_type(content_type_for_path(path))
            .with_file_name(path.display().to_string());

        self.analyze_upload(upload)
    }

    /// Analyze many files in parallel, preserving input order
    pub fn analyze_files(
        &self,
        paths: &[PathBuf],
    ) -> Vec<(PathBuf, Result<AnalysisResult, PipelineError>)> {
        log::info!("Analyzing {} file(s)", paths.len());

        paths
            .par_iter()
            .map(|path| (path.clone(), self.analyze_file(path)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::DecodedAudio;
    use crate::error::Result as CoreResult;

    /// Decoder that ignores the bytes and returns fixed samples
    struct FixedDecoder {
        samples: Vec<f32>,
        sample_rate: u32,
    }

    impl AudioDecoder for FixedDecoder {
        fn decode(&self, _bytes: Vec<u8>, _content_type: Option<&str>) -> CoreResult<DecodedAudio> {
            Ok(DecodedAudio::new(self.samples.clone(), self.sample_rate))
        }
    }

    fn tone(freq: f64, sample_rate: u32) -> Vec<f32> {
        (0..sample_rate as usize)
            .map(|i| (2.0 * std::f64::consts::PI * freq * i as f64 / sample_rate as f64).sin() as f32)
            .collect()
    }

    #[test]
    fn test_pipeline_runs_analyzer() {
        let decoder = FixedDecoder {
            samples: tone(430.0, 8000),
            sample_rate: 8000,
        };
        let pipeline = FrequencyPipeline::new(ServiceConfig::new(), decoder);
        let upload = Upload::new(vec![1, 2, 3]).with_content_type("audio/wav");
        let result = pipeline.analyze_upload(upload).unwrap();
        assert!((result.dominant_frequency - 430.0).abs() < 1e-9);
        assert!(result.is_close_to_432hz);
    }

    #[test]
    fn test_tolerance_flows_from_config() {
        let decoder = FixedDecoder {
            samples: tone(430.0, 8000),
            sample_rate: 8000,
        };
        let config = ServiceConfig::new().with_tolerance(1.0);
        let pipeline = FrequencyPipeline::new(config, decoder);
        let upload = Upload::new(vec![0]).with_content_type("audio/wav");
        assert!(!pipeline.analyze_upload(upload).unwrap().is_close_to_432hz);
    }

    #[test]
    fn test_intake_runs_before_decoding() {
        let decoder = FixedDecoder {
            samples: Vec::new(),
            sample_rate: 8000,
        };
        let pipeline = FrequencyPipeline::new(ServiceConfig::new(), decoder);
        let err = pipeline
            .analyze_upload(Upload::new(vec![0]).with_content_type("image/png"))
            .unwrap_err();
        assert!(matches!(err, PipelineError::Rejected(_)));
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.public_detail(), "File must be an audio type");
    }

    #[test]
    fn test_empty_samples_surface_as_client_error() {
        let decoder = FixedDecoder {
            samples: Vec::new(),
            sample_rate: 8000,
        };
        let pipeline = FrequencyPipeline::new(ServiceConfig::new(), decoder);
        let err = pipeline
            .analyze_upload(Upload::new(vec![0]).with_content_type("audio/wav"))
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Analysis(AnalysisError::EmptySampleSequence)
        ));
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let decoder = FixedDecoder {
            samples: Vec::new(),
            sample_rate: 8000,
        };
        let pipeline = FrequencyPipeline::new(ServiceConfig::new(), decoder);
        let err = pipeline
            .analyze_file(Path::new("/nonexistent/file.wav"))
            .unwrap_err();
        assert!(matches!(err, PipelineError::Io { .. }));
    }
}
