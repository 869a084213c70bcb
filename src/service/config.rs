//! Service configuration

use crate::analysis::TOLERANCE_HZ;

/// Default upload cap: 20 MiB
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Configuration for the upload-facing side of the pipeline
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Largest accepted upload in bytes (None = unlimited)
    pub max_upload_bytes: Option<usize>,

    /// Reject uploads whose declared type is not `audio/*`
    pub require_audio_type: bool,

    /// Half-width of the 432 Hz band
    pub tolerance_hz: f64,
}

impl ServiceConfig {
    /// Create a configuration with the default limits
    pub fn new() -> Self {
        Self {
            max_upload_bytes: Some(DEFAULT_MAX_UPLOAD_BYTES),
            require_audio_type: true,
            tolerance_hz: TOLERANCE_HZ,
        }
    }

    /// Set the upload cap
    pub fn with_max_upload_bytes(mut self, max: Option<usize>) -> Self {
        self.max_upload_bytes = max;
        self
    }

    /// Toggle the declared-type check
    pub fn with_audio_type_check(mut self, enable: bool) -> Self {
        self.require_audio_type = enable;
        self
    }

    /// Set the 432 Hz tolerance
    pub fn with_tolerance(mut self, tolerance_hz: f64) -> Self {
        self.tolerance_hz = tolerance_hz;
        self
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::new()
    }
}
