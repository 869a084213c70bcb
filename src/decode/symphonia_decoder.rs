//! Multi-codec decoder backed by symphonia
//!
//! The buffer is probed for its container, the first audio track is
//! decoded packet by packet, and every decoded block is averaged down to
//! mono before being appended to the output.

use super::traits::{downmix_interleaved, AudioDecoder, DecodedAudio};
use crate::error::{AnalysisError, Result};
use std::io::Cursor;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Decoder using symphonia's default format and codec registries
#[derive(Debug, Clone, Default)]
pub struct SymphoniaDecoder;

impl SymphoniaDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl AudioDecoder for SymphoniaDecoder {
    fn decode(&self, bytes: Vec<u8>, content_type: Option<&str>) -> Result<DecodedAudio> {
        log::debug!(
            "Decoding {} bytes (declared type: {})",
            bytes.len(),
            content_type.unwrap_or("none")
        );

        // The stream owns the buffer; it is dropped with the format reader
        let mss = MediaSourceStream::new(Box::new(Cursor::new(bytes)), Default::default());

        let mut hint = Hint::new();
        if let Some(mime) = content_type {
            hint.mime_type(mime);
        }

        let format_opts = FormatOptions::default();
        let metadata_opts = MetadataOptions::default();

        let probed = symphonia::default::get_probe()
            .format(&hint, mss, &format_opts, &metadata_opts)
            .map_err(|e| AnalysisError::UnsupportedFormat(e.to_string()))?;

        let mut format = probed.format;

        let track = format
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or_else(|| AnalysisError::EmptyOrCorruptStream("no audio track found".into()))?;

        let track_id = track.id;
        let sample_rate = track.codec_params.sample_rate.ok_or_else(|| {
            AnalysisError::EmptyOrCorruptStream("no sample rate in audio track".into())
        })?;

        if track.codec_params.channels.map(|c| c.count()) == Some(0) {
            return Err(AnalysisError::EmptyOrCorruptStream(
                "audio track has no channels".into(),
            ));
        }

        let dec_opts = DecoderOptions::default();
        let mut decoder = symphonia::default::get_codecs()
            .make(&track.codec_params, &dec_opts)
            .map_err(|e| AnalysisError::UnsupportedFormat(e.to_string()))?;

        let mut all_samples: Vec<f32> = Vec::new();

        loop {
            let packet = match format.next_packet() {
                Ok(p) => p,
                Err(SymphoniaError::IoError(e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(SymphoniaError::ResetRequired) => {
                    log::debug!("Stream reset requested, stopping at {} samples", all_samples.len());
                    break;
                }
                Err(e) => {
                    log::warn!("Error reading packet: {:?}", e);
                    break;
                }
            };

            if packet.track_id() != track_id {
                continue;
            }

            let decoded = match decoder.decode(&packet) {
                Ok(d) => d,
                Err(SymphoniaError::DecodeError(e)) => {
                    log::warn!("Error decoding packet: {}", e);
                    continue;
                }
                Err(SymphoniaError::Unsupported(e)) => {
                    return Err(AnalysisError::UnsupportedFormat(e.to_string()));
                }
                Err(e) => return Err(AnalysisError::Internal(e.to_string())),
            };

            let spec = *decoded.spec();
            let channels = spec.channels.count();
            if channels == 0 {
                return Err(AnalysisError::EmptyOrCorruptStream(
                    "decoded block has no channels".into(),
                ));
            }

            let mut sample_buf = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
            sample_buf.copy_interleaved_ref(decoded);

            downmix_interleaved(sample_buf.samples(), channels, &mut all_samples);
        }

        if all_samples.is_empty() {
            return Err(AnalysisError::EmptyOrCorruptStream(
                "audio track contains no frames".into(),
            ));
        }

        log::debug!(
            "Decoded {} samples ({:.2}s) at {}Hz",
            all_samples.len(),
            all_samples.len() as f64 / sample_rate as f64,
            sample_rate
        );

        Ok(DecodedAudio::new(all_samples, sample_rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_is_unsupported() {
        let bytes = b"This is definitely not an audio file, just some text.".to_vec();
        let result = SymphoniaDecoder::new().decode(bytes, Some("audio/mpeg"));
        assert!(matches!(result, Err(AnalysisError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_empty_buffer_is_unsupported() {
        let result = SymphoniaDecoder::new().decode(Vec::new(), None);
        assert!(matches!(result, Err(AnalysisError::UnsupportedFormat(_))));
    }
}
