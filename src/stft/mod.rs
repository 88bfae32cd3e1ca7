//! Short-time Fourier transform over a mono sample sequence.
//!
//! Each frame of `window_size` samples is widened to `f64`, tapered, transformed
//! with a real-input FFT and written as `window_size / 2 + 1` (real, imaginary)
//! pairs. Output bins run from the highest frequency down to DC: output bin 0
//! holds the Nyquist (or near-Nyquist) coefficient and the last output bin holds
//! DC. Downstream consumers rely on that ordering.
//!
//! Any window size is accepted. Sizes whose prime factors are small (2, 3, 5, 7)
//! transform fastest.

mod engine;
mod error;
mod window;

use serde::{Deserialize, Serialize};

pub use engine::{bin_count, frame_count, stft, stft_mono};
pub use error::StftError;
pub use window::WindowType;

/// Frame geometry and taper for one STFT call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StftParams {
    /// Samples per frame.
    pub window_size: usize,
    /// Taper applied to every frame.
    pub window_type: WindowType,
    /// Samples between consecutive frame starts. May exceed `window_size`.
    pub hop: usize,
}

impl Default for StftParams {
    fn default() -> Self {
        Self {
            window_size: 1024,
            window_type: WindowType::Hann,
            hop: 512,
        }
    }
}

impl StftParams {
    pub fn new(window_size: usize, window_type: WindowType, hop: usize) -> Self {
        Self {
            window_size,
            window_type,
            hop,
        }
    }

    /// Build parameters from the raw integers a binding layer receives.
    pub fn from_codes(window_size: i64, window_type: i64, hop: i64) -> Result<Self, StftError> {
        let window_type = WindowType::from_code(window_type)?;
        let window_size = usize::try_from(window_size)
            .ok()
            .filter(|size| *size > 0)
            .ok_or(StftError::InvalidWindowSize(window_size))?;
        let hop = usize::try_from(hop)
            .ok()
            .filter(|hop| *hop > 0)
            .ok_or_else(|| StftError::InvalidStride {
                message: format!("hop must be at least 1, got {hop}"),
            })?;
        Ok(Self::new(window_size, window_type, hop))
    }

    /// Check the length-independent preconditions.
    pub fn validate(&self) -> Result<(), StftError> {
        if self.window_size == 0 {
            return Err(StftError::InvalidWindowSize(0));
        }
        if self.hop == 0 {
            return Err(StftError::InvalidStride {
                message: "hop must be at least 1, got 0".to_string(),
            });
        }
        Ok(())
    }
}
