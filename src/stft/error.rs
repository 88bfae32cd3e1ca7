use thiserror::Error;

/// Reasons an STFT request is rejected before any frame is computed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StftError {
    /// The signal has more (or fewer) than one channel.
    #[error("STFT needs a single-channel signal, got {channels} channels")]
    UnsupportedChannelLayout { channels: usize },
    /// The window type code is outside `1..=4`.
    #[error("Unknown window type {0} (expected 1=rectangular, 2=hamming, 3=hann, 4=bartlett)")]
    UnknownWindowType(i64),
    /// The window type name is not recognized.
    #[error("Unknown window type '{0}' (expected rectangular, hamming, hann or bartlett)")]
    UnknownWindowName(String),
    /// The window must cover at least one sample.
    #[error("Window size must be at least 1, got {0}")]
    InvalidWindowSize(i64),
    /// The hop is zero, or the signal cannot hold a single window.
    #[error("Invalid stride: {message}")]
    InvalidStride { message: String },
    /// The FFT backend refused the planned buffers.
    #[error("FFT failed: {message}")]
    Transform { message: String },
}
