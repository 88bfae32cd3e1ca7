use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::StftError;

/// Taper applied to each frame before the transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowType {
    /// No taper.
    Rectangular,
    /// Hamming window with the 0.53836 / 0.46164 coefficients.
    Hamming,
    /// Hann (raised cosine) window.
    #[default]
    Hann,
    /// Triangular window reaching zero at both ends.
    Bartlett,
}

impl WindowType {
    /// Map a binding-level code (`1..=4`) to a window type.
    pub fn from_code(code: i64) -> Result<Self, StftError> {
        match code {
            1 => Ok(Self::Rectangular),
            2 => Ok(Self::Hamming),
            3 => Ok(Self::Hann),
            4 => Ok(Self::Bartlett),
            other => Err(StftError::UnknownWindowType(other)),
        }
    }

    /// Binding-level code for this window type.
    pub fn code(self) -> i64 {
        match self {
            Self::Rectangular => 1,
            Self::Hamming => 2,
            Self::Hann => 3,
            Self::Bartlett => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Rectangular => "rectangular",
            Self::Hamming => "hamming",
            Self::Hann => "hann",
            Self::Bartlett => "bartlett",
        }
    }

    /// Window coefficient for sample `k` of a `len`-sample window.
    ///
    /// Single-sample windows have the coefficient 1 for every shape.
    pub fn coefficient(self, k: usize, len: usize) -> f64 {
        if len <= 1 {
            return 1.0;
        }
        let m = (len - 1) as f64;
        let k = k as f64;
        match self {
            Self::Rectangular => 1.0,
            Self::Hamming => 0.53836 - 0.46164 * (2.0 * PI * k / m).cos(),
            Self::Hann => 0.5 - 0.5 * (2.0 * PI * k / m).cos(),
            Self::Bartlett => 2.0 / m * (m / 2.0 - (k - m / 2.0).abs()),
        }
    }

    /// Full coefficient table for a `len`-sample window.
    pub fn coefficients(self, len: usize) -> Vec<f64> {
        (0..len).map(|k| self.coefficient(k, len)).collect()
    }
}

impl fmt::Display for WindowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WindowType {
    type Err = StftError;

    /// Accepts either a window name or its numeric code.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if let Ok(code) = trimmed.parse::<i64>() {
            return Self::from_code(code);
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "rectangular" | "rect" | "boxcar" => Ok(Self::Rectangular),
            "hamming" => Ok(Self::Hamming),
            "hann" | "hanning" => Ok(Self::Hann),
            "bartlett" | "triangular" => Ok(Self::Bartlett),
            _ => Err(StftError::UnknownWindowName(value.to_string())),
        }
    }
}
