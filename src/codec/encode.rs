use std::io::{Seek, Write};

use hound::{SampleFormat, WavSpec, WavWriter};
use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};

use super::CodecError;
use crate::sample::Sample;

const SUPPORTED_BITS: [u16; 4] = [8, 16, 24, 32];

/// Encoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeOptions {
    /// Integer precision written to the file. Matrix values are read on the
    /// signed 32-bit scale and shifted down to this width.
    pub bits_per_sample: u16,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            bits_per_sample: 32,
        }
    }
}

impl EncodeOptions {
    pub fn validate(&self) -> Result<(), CodecError> {
        if SUPPORTED_BITS.contains(&self.bits_per_sample) {
            Ok(())
        } else {
            Err(CodecError::InvalidBitDepth {
                bits: self.bits_per_sample,
            })
        }
    }
}

/// A matrix that passed layout checks and can be streamed to an encoder.
pub(super) struct PreparedSamples<'a, T> {
    interleaved: &'a [T],
    spec: WavSpec,
}

/// Validate the matrix and options before any output is created.
pub(super) fn prepare<'a, T: Sample>(
    samples: &'a ArrayView2<'_, T>,
    sample_rate: u32,
    options: &EncodeOptions,
) -> Result<PreparedSamples<'a, T>, CodecError> {
    options.validate()?;
    let interleaved = samples.as_slice().ok_or(CodecError::NonContiguousInput)?;
    let channels = samples.ncols();
    let channels = u16::try_from(channels)
        .ok()
        .filter(|count| *count > 0)
        .ok_or(CodecError::InvalidChannelCount { channels })?;
    Ok(PreparedSamples {
        interleaved,
        spec: WavSpec {
            channels,
            sample_rate,
            bits_per_sample: options.bits_per_sample,
            sample_format: SampleFormat::Int,
        },
    })
}

/// Write prepared samples as WAV, one interleaved sample at a time.
pub(super) fn write_wav<T: Sample, W: Write + Seek>(
    writer: W,
    prepared: &PreparedSamples<'_, T>,
    target: &str,
) -> Result<(), CodecError> {
    let encode_error = |err: hound::Error| CodecError::Encode {
        target: target.to_string(),
        message: err.to_string(),
    };
    let shift = 32 - u32::from(prepared.spec.bits_per_sample);
    let mut wav = WavWriter::new(writer, prepared.spec).map_err(encode_error)?;
    for &sample in prepared.interleaved {
        let value = i32::from_f64(sample.to_f64()) >> shift;
        wav.write_sample(value).map_err(encode_error)?;
    }
    wav.finalize().map_err(encode_error)?;
    tracing::debug!(
        output = target,
        samples = prepared.interleaved.len(),
        channels = prepared.spec.channels,
        sample_rate = prepared.spec.sample_rate,
        bits = prepared.spec.bits_per_sample,
        "encoded audio"
    );
    Ok(())
}
