use std::io::Cursor;

use hound::SampleFormat;
use ndarray::Array2;
use symphonia::core::{
    audio::SampleBuffer,
    codecs::{Decoder, DecoderOptions},
    errors::Error,
    formats::{FormatOptions, Packet},
    io::MediaSourceStream,
    meta::MetadataOptions,
    probe::Hint,
};

use super::registry::{self, CodecRegistry};
use super::{AudioFormat, CodecError, DecodedAudio};
use crate::sample::Sample;

/// Full-scale factor for float samples on the signed 32-bit scale.
const FLOAT_TO_I32_SCALE: f64 = 2_147_483_648.0;

/// Interleaved samples on the signed 32-bit scale.
struct Interleaved {
    samples: Vec<i32>,
    channels: usize,
    sample_rate: u32,
}

/// Decode an encoded stream into a `(frames, channels)` matrix.
///
/// `origin` names the source in errors; `max_samples` caps the interleaved sample count.
pub(super) fn decode_stream<T: Sample>(
    bytes: &[u8],
    format_hint: Option<&str>,
    max_samples: Option<usize>,
    origin: &str,
) -> Result<DecodedAudio<T>, CodecError> {
    let registry = registry::init();
    let wav_candidate =
        format_hint.is_none_or(|hint| AudioFormat::from_tag(hint) == Some(AudioFormat::Wav));
    let wav = if wav_candidate {
        read_wav(bytes, max_samples, origin)?
    } else {
        None
    };
    let decoded = match wav {
        Some(decoded) => decoded,
        None => read_with_symphonia(registry, bytes, format_hint, max_samples, origin)?,
    };
    let audio = into_matrix(decoded, origin)?;
    tracing::debug!(
        origin,
        frames = audio.frames(),
        channels = audio.channels(),
        sample_rate = audio.sample_rate,
        kind = %T::KIND,
        "decoded audio"
    );
    Ok(audio)
}

/// Read a WAV stream with hound. `Ok(None)` means hound rejected the header.
fn read_wav(
    bytes: &[u8],
    max_samples: Option<usize>,
    origin: &str,
) -> Result<Option<Interleaved>, CodecError> {
    let mut reader = match hound::WavReader::new(Cursor::new(bytes)) {
        Ok(reader) => reader,
        Err(err) => {
            tracing::debug!(origin, "hound rejected stream, probing instead: {err}");
            return Ok(None);
        }
    };
    let spec = reader.spec();
    let limit = max_samples.unwrap_or(usize::MAX);
    let sample_error = |err: hound::Error| CodecError::Decode {
        origin: origin.to_string(),
        message: format!("WAV sample read failed: {err}"),
    };
    let samples = match spec.sample_format {
        SampleFormat::Int => {
            let shift = 32 - u32::from(spec.bits_per_sample.clamp(1, 32));
            reader
                .samples::<i32>()
                .take(limit)
                .map(|sample| sample.map(|value| value << shift).map_err(sample_error))
                .collect::<Result<Vec<_>, _>>()?
        }
        SampleFormat::Float => reader
            .samples::<f32>()
            .take(limit)
            .map(|sample| sample.map(float_to_i32).map_err(sample_error))
            .collect::<Result<Vec<_>, _>>()?,
    };
    Ok(Some(Interleaved {
        samples,
        channels: usize::from(spec.channels),
        sample_rate: spec.sample_rate,
    }))
}

fn read_with_symphonia(
    registry: &CodecRegistry,
    bytes: &[u8],
    format_hint: Option<&str>,
    max_samples: Option<usize>,
    origin: &str,
) -> Result<Interleaved, CodecError> {
    let decode_error = |message: String| CodecError::Decode {
        origin: origin.to_string(),
        message,
    };
    let mss = MediaSourceStream::new(Box::new(Cursor::new(bytes.to_vec())), Default::default());
    let mut hint = Hint::new();
    if let Some(tag) = format_hint {
        hint.with_extension(tag.trim_start_matches('.'));
    }
    let probed = registry
        .probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|err| decode_error(format!("probe failed: {err}")))?;
    let mut format = probed.format;
    let track = format
        .default_track()
        .ok_or_else(|| decode_error("no default track".to_string()))?;
    let track_id = track.id;
    let codec_params = track.codec_params.clone();
    let sample_rate = codec_params
        .sample_rate
        .ok_or_else(|| decode_error("missing sample rate".to_string()))?;
    let channels = codec_params
        .channels
        .ok_or_else(|| decode_error("missing channel layout".to_string()))?
        .count();
    let mut decoder = registry
        .decoders()
        .make(&codec_params, &DecoderOptions::default())
        .map_err(|err| decode_error(format!("no decoder: {err}")))?;

    let limit = max_samples.unwrap_or(usize::MAX);
    let mut samples = Vec::new();
    while samples.len() < limit {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(Error::IoError(_)) | Err(Error::ResetRequired) => break,
            Err(err) => return Err(decode_error(format!("packet read failed: {err}"))),
        };
        if packet.track_id() != track_id {
            continue;
        }
        append_packet(decoder.as_mut(), &packet, &mut samples, origin)?;
    }
    samples.truncate(limit);
    Ok(Interleaved {
        samples,
        channels,
        sample_rate,
    })
}

/// Decode one packet onto the end of `samples`. A corrupt packet fails the whole stream.
fn append_packet(
    decoder: &mut dyn Decoder,
    packet: &Packet,
    samples: &mut Vec<i32>,
    origin: &str,
) -> Result<(), CodecError> {
    let audio_buf = decoder.decode(packet).map_err(|err| CodecError::Decode {
        origin: origin.to_string(),
        message: format!("packet at ts {} failed: {err}", packet.ts()),
    })?;
    let spec = *audio_buf.spec();
    let mut sample_buf = SampleBuffer::<i32>::new(audio_buf.capacity() as u64, spec);
    sample_buf.copy_interleaved_ref(audio_buf);
    samples.extend_from_slice(sample_buf.samples());
    Ok(())
}

fn into_matrix<T: Sample>(decoded: Interleaved, origin: &str) -> Result<DecodedAudio<T>, CodecError> {
    let Interleaved {
        mut samples,
        channels,
        sample_rate,
    } = decoded;
    if channels == 0 {
        return Err(CodecError::InvalidChannelCount { channels });
    }
    let frames = samples.len() / channels;
    samples.truncate(frames * channels);
    if samples.is_empty() {
        return Err(CodecError::EmptyStream {
            origin: origin.to_string(),
        });
    }
    let converted: Vec<T> = samples
        .into_iter()
        .map(|value| T::from_f64(f64::from(value)))
        .collect();
    let samples = Array2::from_shape_vec((frames, channels), converted).map_err(|err| {
        CodecError::Decode {
            origin: origin.to_string(),
            message: format!("sample layout mismatch: {err}"),
        }
    })?;
    Ok(DecodedAudio {
        samples,
        sample_rate,
    })
}

fn float_to_i32(value: f32) -> i32 {
    (f64::from(value) * FLOAT_TO_I32_SCALE).round() as i32
}
