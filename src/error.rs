//! Error types for the decode → analyze pipeline

use thiserror::Error;

/// Failures raised by the decoder or the spectral analyzer.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The buffer is not any audio container/codec we can read
    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),

    /// The container parsed, but it carries no decodable audio
    #[error("empty or corrupt audio stream: {0}")]
    EmptyOrCorruptStream(String),

    /// Nothing to transform
    #[error("sample sequence is empty")]
    EmptySampleSequence,

    /// A sample rate of zero makes every frequency bin meaningless
    #[error("invalid sample rate: {0}")]
    InvalidSampleRate(u32),

    /// Anything else that went wrong while decoding or transforming
    #[error("internal failure: {0}")]
    Internal(String),
}

/// Who is at fault for a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The supplied audio is unusable; fixable by the caller
    ClientInput,
    /// Unexpected failure on our side
    Internal,
}

impl AnalysisError {
    pub fn class(&self) -> ErrorClass {
        match self {
            AnalysisError::UnsupportedFormat(_)
            | AnalysisError::EmptyOrCorruptStream(_)
            | AnalysisError::EmptySampleSequence
            | AnalysisError::InvalidSampleRate(_) => ErrorClass::ClientInput,
            AnalysisError::Internal(_) => ErrorClass::Internal,
        }
    }

    /// HTTP-equivalent status for this failure
    pub fn status_code(&self) -> u16 {
        match self.class() {
            ErrorClass::ClientInput => 400,
            ErrorClass::Internal => 500,
        }
    }

    /// Text that is safe to show to whoever submitted the audio.
    ///
    /// Client-input errors carry enough detail to fix the input. Internal
    /// failures are reported generically so decoder internals don't leak.
    pub fn public_detail(&self) -> String {
        match self {
            AnalysisError::UnsupportedFormat(_) => {
                "Invalid audio file or unsupported format".to_string()
            }
            AnalysisError::EmptyOrCorruptStream(reason) => {
                format!("Audio file contains no decodable audio: {}", reason)
            }
            AnalysisError::EmptySampleSequence => "Audio file contains no samples".to_string(),
            AnalysisError::InvalidSampleRate(rate) => {
                format!("Audio file reports an invalid sample rate ({} Hz)", rate)
            }
            AnalysisError::Internal(_) => {
                "An internal error occurred while analyzing the audio".to_string()
            }
        }
    }
}

/// Result alias for core operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_map_to_400() {
        let errors = [
            AnalysisError::UnsupportedFormat("probe".into()),
            AnalysisError::EmptyOrCorruptStream("no track".into()),
            AnalysisError::EmptySampleSequence,
            AnalysisError::InvalidSampleRate(0),
        ];
        for e in &errors {
            assert_eq!(e.class(), ErrorClass::ClientInput, "{:?}", e);
            assert_eq!(e.status_code(), 400);
        }
    }

    #[test]
    fn test_internal_detail_is_opaque() {
        let e = AnalysisError::Internal("allocator exploded at 0xdeadbeef".into());
        assert_eq!(e.status_code(), 500);
        assert!(!e.public_detail().contains("0xdeadbeef"));
    }
}
