//! Length-prefixed framing for in-memory encoded buffers.
//!
//! Layout: bytes `0..8` hold the total sample count (all channels) as a
//! little-endian `u64`; the encoded stream follows. Some containers report
//! their own length unreliably, so the prefix is what bounds decoding.

use super::CodecError;

/// Size of the sample-count prefix.
pub const LENGTH_PREFIX_BYTES: usize = 8;

/// Prepend the sample count to an encoded payload.
pub fn frame(sample_count: u64, payload: &[u8]) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(LENGTH_PREFIX_BYTES + payload.len());
    buffer.extend_from_slice(&sample_count.to_le_bytes());
    buffer.extend_from_slice(payload);
    buffer
}

/// Split a framed buffer into its sample count and payload.
pub fn unframe(buffer: &[u8]) -> Result<(u64, &[u8]), CodecError> {
    let Some((prefix, payload)) = buffer.split_first_chunk::<LENGTH_PREFIX_BYTES>() else {
        return Err(CodecError::InvalidFraming { len: buffer.len() });
    };
    Ok((u64::from_le_bytes(*prefix), payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_is_little_endian_sample_count() {
        let framed = frame(0x0102_0304, b"RIFF");
        assert_eq!(&framed[..8], &[0x04, 0x03, 0x02, 0x01, 0, 0, 0, 0]);
        assert_eq!(&framed[8..], b"RIFF");
    }

    #[test]
    fn unframe_splits_count_and_payload() {
        let framed = frame(12, &[9, 8, 7]);
        let (count, payload) = unframe(&framed).unwrap();
        assert_eq!(count, 12);
        assert_eq!(payload, &[9, 8, 7]);
    }

    #[test]
    fn short_buffer_is_rejected() {
        assert!(matches!(
            unframe(&[1, 2, 3]),
            Err(CodecError::InvalidFraming { len: 3 })
        ));
        let (count, payload) = unframe(&[0; 8]).unwrap();
        assert_eq!(count, 0);
        assert!(payload.is_empty());
    }
}
