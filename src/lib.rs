//! Audio I/O into numeric sample matrices and a short-time Fourier transform.
//!
//! [`codec`] moves audio between encoded files or buffers and `(frames, channels)`
//! matrices; [`stft`] turns a mono sequence into a `(frames, bins, 2)` spectrogram.
//! Both are generic over the [`Sample`] element kinds.

/// Application directory resolution.
pub mod app_dirs;
/// Encoded audio to and from sample matrices.
pub mod codec;
/// Settings file handling.
pub mod config;
/// Tracing subscriber setup.
pub mod logging;
/// Numeric element kinds.
pub mod sample;
/// Short-time Fourier transform.
pub mod stft;

pub use codec::{
    AudioFormat, CodecError, DecodedAudio, EncodeOptions, compress, decompress, load, save,
};
pub use sample::{Sample, SampleKind};
pub use stft::{StftError, StftParams, WindowType, stft, stft_mono};
