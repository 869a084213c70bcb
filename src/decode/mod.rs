//! Audio decoding layer
//!
//! Turns an opaque byte buffer into a mono sample sequence. The container
//! and codec are sniffed from the bytes; any caller-supplied content type
//! is only a hint.

mod symphonia_decoder;
mod traits;

pub use symphonia_decoder::SymphoniaDecoder;
pub use traits::{downmix_interleaved, AudioDecoder, DecodedAudio};
