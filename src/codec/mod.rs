//! Audio codec adapter: encoded files and buffers to and from sample matrices.
//!
//! Matrices are `(frames, channels)` with samples on the signed 32-bit integer
//! scale: a 16-bit sample `v` decodes as `v << 16`, a float sample `f` as
//! `f * 2^31`. Encoding reads values on the same scale. WAV is read with hound;
//! anything hound rejects, and every other container, goes through symphonia.
//!
//! In-memory buffers carry an 8-byte sample-count prefix (see [`framing`]).

mod decode;
mod encode;
mod error;
pub mod framing;
mod format;
mod registry;

use std::fs::File;
use std::io::{BufWriter, Cursor};
use std::path::Path;

use ndarray::{Array2, ArrayView2};

use crate::sample::Sample;

pub use encode::EncodeOptions;
pub use error::CodecError;
pub use format::AudioFormat;
pub use registry::{CodecRegistry, init, is_initialized};

/// Decoded samples plus the stream's sample rate.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAudio<T> {
    /// `(frames, channels)` samples.
    pub samples: Array2<T>,
    pub sample_rate: u32,
}

impl<T> DecodedAudio<T> {
    pub fn frames(&self) -> usize {
        self.samples.nrows()
    }

    pub fn channels(&self) -> usize {
        self.samples.ncols()
    }

    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames() as f64 / f64::from(self.sample_rate)
    }
}

/// Decode a file, using its extension as the format hint when it names a known format.
pub fn load<T: Sample>(path: impl AsRef<Path>) -> Result<DecodedAudio<T>, CodecError> {
    let path = path.as_ref();
    load_with_hint(path, AudioFormat::from_path(path).map(AudioFormat::extension))
}

/// Decode a file with an explicit format hint (`None` lets the probe decide).
pub fn load_with_hint<T: Sample>(
    path: impl AsRef<Path>,
    format_hint: Option<&str>,
) -> Result<DecodedAudio<T>, CodecError> {
    let path = path.as_ref();
    let origin = path.display().to_string();
    let bytes = std::fs::read(path).map_err(|err| CodecError::Decode {
        origin: origin.clone(),
        message: format!("open failed: {err}"),
    })?;
    decode::decode_stream(&bytes, format_hint, None, &origin)
}

/// Decode an encoded stream held in memory, without a length prefix.
pub fn decode_bytes<T: Sample>(
    bytes: &[u8],
    format_hint: Option<&str>,
) -> Result<DecodedAudio<T>, CodecError> {
    decode::decode_stream(bytes, format_hint, None, "memory buffer")
}

/// Decode a length-prefixed buffer produced by [`compress`].
///
/// The prefix bounds how many interleaved samples are read.
pub fn decompress<T: Sample>(buffer: &[u8], format: &str) -> Result<DecodedAudio<T>, CodecError> {
    let (sample_count, payload) = framing::unframe(buffer)?;
    let limit = usize::try_from(sample_count).unwrap_or(usize::MAX);
    decode::decode_stream(payload, Some(format), Some(limit), "compressed buffer")
}

/// Encode a matrix to a file at the default precision.
pub fn save<T: Sample>(
    path: impl AsRef<Path>,
    samples: ArrayView2<'_, T>,
    format: &str,
    sample_rate: u32,
) -> Result<(), CodecError> {
    save_with_options(path, samples, format, sample_rate, &EncodeOptions::default())
}

pub fn save_with_options<T: Sample>(
    path: impl AsRef<Path>,
    samples: ArrayView2<'_, T>,
    format: &str,
    sample_rate: u32,
    options: &EncodeOptions,
) -> Result<(), CodecError> {
    let path = path.as_ref();
    AudioFormat::for_encode(format)?;
    let prepared = encode::prepare(&samples, sample_rate, options)?;
    let target = path.display().to_string();
    write_replacing(path, |writer| encode::write_wav(writer, &prepared, &target))
}

/// Write through a sibling `.tmp` file and move it over `path` only on success.
///
/// On failure the temporary file is removed and `path` is left as it was.
fn write_replacing(
    path: &Path,
    write: impl FnOnce(BufWriter<File>) -> Result<(), CodecError>,
) -> Result<(), CodecError> {
    let target = path.display().to_string();
    let tmp = path.with_extension("tmp");
    let file = File::create(&tmp).map_err(|err| CodecError::Encode {
        target: target.clone(),
        message: format!("create {} failed: {err}", tmp.display()),
    })?;
    if let Err(err) = write(BufWriter::new(file)) {
        let _ = std::fs::remove_file(&tmp);
        return Err(err);
    }
    std::fs::rename(&tmp, path).map_err(|err| {
        let _ = std::fs::remove_file(&tmp);
        CodecError::Encode {
            target,
            message: format!("move into place failed: {err}"),
        }
    })
}

/// Encode a matrix without the length prefix.
pub fn encode_bytes<T: Sample>(
    samples: ArrayView2<'_, T>,
    format: &str,
    sample_rate: u32,
    options: &EncodeOptions,
) -> Result<Vec<u8>, CodecError> {
    AudioFormat::for_encode(format)?;
    let prepared = encode::prepare(&samples, sample_rate, options)?;
    let mut cursor = Cursor::new(Vec::new());
    encode::write_wav(&mut cursor, &prepared, "memory buffer")?;
    Ok(cursor.into_inner())
}

/// Encode a matrix into a length-prefixed buffer at the default precision.
pub fn compress<T: Sample>(
    samples: ArrayView2<'_, T>,
    format: &str,
    sample_rate: u32,
) -> Result<Vec<u8>, CodecError> {
    compress_with_options(samples, format, sample_rate, &EncodeOptions::default())
}

pub fn compress_with_options<T: Sample>(
    samples: ArrayView2<'_, T>,
    format: &str,
    sample_rate: u32,
    options: &EncodeOptions,
) -> Result<Vec<u8>, CodecError> {
    let sample_count = samples.len() as u64;
    let payload = encode_bytes(samples, format, sample_rate, options)?;
    Ok(framing::frame(sample_count, &payload))
}
