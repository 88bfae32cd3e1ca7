use thiserror::Error;

/// Failures while moving audio between encoded streams and sample matrices.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The source could not be opened, probed or decoded.
    #[error("Failed to decode {origin}: {message}")]
    Decode { origin: String, message: String },
    /// The stream decoded cleanly but held no complete sample frame.
    #[error("No samples decoded from {origin}")]
    EmptyStream { origin: String },
    /// Encoding requires a row-major `(frames, channels)` matrix without gaps.
    #[error("Sample matrix must be contiguous and row-major (frames x channels)")]
    NonContiguousInput,
    /// The codec rejected the destination or a sample write.
    #[error("Failed to encode {target}: {message}")]
    Encode { target: String, message: String },
    /// The format tag is unknown or cannot be used for this operation.
    #[error("Unsupported audio format '{format}' for {operation}")]
    UnsupportedFormat {
        format: String,
        operation: &'static str,
    },
    /// An in-memory buffer is too short to carry its length prefix.
    #[error("Compressed buffer holds {len} bytes, fewer than the 8-byte length prefix")]
    InvalidFraming { len: usize },
    /// Zero channels, or more than the container can describe.
    #[error("Unsupported channel count {channels}")]
    InvalidChannelCount { channels: usize },
    /// Integer precision the encoder cannot write.
    #[error("Unsupported bit depth {bits} (expected 8, 16, 24 or 32)")]
    InvalidBitDepth { bits: u16 },
}
