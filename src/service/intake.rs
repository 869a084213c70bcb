//! Upload intake: cheap checks done before any decoding
//!
//! The declared content type and size are only used to reject obviously
//! bad uploads early. The decoder never trusts them.

use super::config::ServiceConfig;
use std::path::Path;
use thiserror::Error;

/// One uploaded audio file
#[derive(Debug, Clone)]
pub struct Upload {
    /// Raw file contents
    pub bytes: Vec<u8>,

    /// Declared MIME type, if any
    pub content_type: Option<String>,

    /// Original file name, for logging
    pub file_name: Option<String>,
}

impl Upload {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            content_type: None,
            file_name: None,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Name to use in log lines
    pub fn display_name(&self) -> &str {
        self.file_name.as_deref().unwrap_or("<upload>")
    }
}

/// Reasons an upload is refused before decoding
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntakeError {
    #[error("File must be an audio type")]
    NotAudio { content_type: Option<String> },

    #[error("File size should not exceed {}MB.", .max_bytes / (1024 * 1024))]
    TooLarge { size: usize, max_bytes: usize },
}

/// Check the declared type and size of an upload
pub fn validate_upload(upload: &Upload, config: &ServiceConfig) -> Result<(), IntakeError> {
    if config.require_audio_type {
        let is_audio = upload
            .content_type
            .as_deref()
            .map(|ct| ct.trim().to_ascii_lowercase().starts_with("audio/"))
            .unwrap_or(false);
        if !is_audio {
            return Err(IntakeError::NotAudio {
                content_type: upload.content_type.clone(),
            });
        }
    }

    if let Some(max_bytes) = config.max_upload_bytes {
        if upload.bytes.len() > max_bytes {
            return Err(IntakeError::TooLarge {
                size: upload.bytes.len(),
                max_bytes,
            });
        }
    }

    Ok(())
}

/// Guess a MIME type from a file extension
pub fn content_type_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("mp3") => "audio/mpeg",
        Some("wav") | Some("wave") => "audio/wav",
        Some("flac") => "audio/flac",
        Some("ogg") | Some("oga") => "audio/ogg",
        Some("m4a") | Some("mp4") | Some("aac") | Some("alac") => "audio/mp4",
        _ => "application/octet-stream",
    }
}

/// Whether a path looks like an audio file we can decode
pub fn is_audio_path(path: &Path) -> bool {
    content_type_for_path(path).starts_with("audio/")
}
