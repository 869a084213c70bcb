//! Decoder trait definitions and data structures

use crate::error::Result;

/// Audio decoder trait - lets the pipeline swap codec backends
pub trait AudioDecoder: Send + Sync {
    /// Decode one complete audio file into mono samples.
    ///
    /// Takes ownership of the buffer so it can be released as soon as
    /// decoding finishes. `content_type` is a hint and may be wrong.
    fn decode(&self, bytes: Vec<u8>, content_type: Option<&str>) -> Result<DecodedAudio>;
}

/// Mono PCM produced by a decoder
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAudio {
    /// One amplitude value per time step
    pub samples: Vec<f32>,

    /// Samples per second
    pub sample_rate: u32,
}

impl DecodedAudio {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Clip length in seconds (0.0 for a zero sample rate)
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Average interleaved frames down to one channel, appending to `out`.
///
/// A trailing partial frame is averaged over the channels it has.
pub fn downmix_interleaved(samples: &[f32], channels: usize, out: &mut Vec<f32>) {
    if channels <= 1 {
        out.extend_from_slice(samples);
        return;
    }

    out.reserve(samples.len() / channels + 1);
    for frame in samples.chunks(channels) {
        let mono = frame.iter().sum::<f32>() / frame.len() as f32;
        out.push(mono);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downmix_mono_passthrough() {
        let mut out = Vec::new();
        downmix_interleaved(&[0.1, -0.2, 0.3], 1, &mut out);
        assert_eq!(out, vec![0.1, -0.2, 0.3]);
    }

    #[test]
    fn test_downmix_averages_channels() {
        let mut out = vec![1.0];
        downmix_interleaved(&[0.5, -0.5, 1.0, 0.0, 0.25, 0.25], 2, &mut out);
        assert_eq!(out, vec![1.0, 0.0, 0.5, 0.25]);
    }

    #[test]
    fn test_downmix_identical_channels_is_lossless() {
        let mono = [0.123f32, -0.777, 0.5];
        let stereo: Vec<f32> = mono.iter().flat_map(|&s| [s, s]).collect();
        let mut out = Vec::new();
        downmix_interleaved(&stereo, 2, &mut out);
        assert_eq!(out, mono.to_vec());
    }

    #[test]
    fn test_duration() {
        let audio = DecodedAudio::new(vec![0.0; 22050], 44100);
        assert!((audio.duration_secs() - 0.5).abs() < 1e-12);
        assert_eq!(DecodedAudio::new(vec![0.0; 4], 0).duration_secs(), 0.0);
    }
}
