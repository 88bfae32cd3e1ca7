//! Numeric element kinds supported by sample matrices and spectrograms.

use std::fmt;
use std::str::FromStr;

/// Runtime tag for a [`Sample`] implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleKind {
    /// 8-bit unsigned integer.
    U8,
    /// 8-bit signed integer.
    I8,
    /// 16-bit signed integer.
    I16,
    /// 32-bit signed integer.
    I32,
    /// 64-bit signed integer.
    I64,
    /// 32-bit float.
    F32,
    /// 64-bit float.
    F64,
}

impl SampleKind {
    /// All supported kinds, narrowest integer first.
    pub const ALL: [SampleKind; 7] = [
        Self::U8,
        Self::I8,
        Self::I16,
        Self::I32,
        Self::I64,
        Self::F32,
        Self::F64,
    ];

    /// Short lowercase name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }

    /// True for the floating point kinds.
    pub fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }
}

impl fmt::Display for SampleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a sample kind name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown sample kind '{0}' (expected one of u8, i8, i16, i32, i64, f32, f64)")]
pub struct UnknownSampleKind(pub String);

impl FromStr for SampleKind {
    type Err = UnknownSampleKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let lowered = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == lowered)
            .ok_or_else(|| UnknownSampleKind(value.to_string()))
    }
}

/// Element type of a sample matrix or spectrogram.
///
/// All arithmetic happens in `f64`; values are widened with [`Sample::to_f64`] and
/// narrowed back with [`Sample::from_f64`]. Narrowing to an integer kind truncates
/// toward zero and saturates at the type bounds (NaN becomes zero).
pub trait Sample: Copy + Default + fmt::Debug + Send + Sync + 'static {
    /// Runtime tag for this element type.
    const KIND: SampleKind;

    /// Widen to double precision.
    fn to_f64(self) -> f64;

    /// Narrow from double precision.
    fn from_f64(value: f64) -> Self;
}

macro_rules! impl_sample {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Sample for $ty {
                const KIND: SampleKind = SampleKind::$kind;

                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }

                #[inline]
                fn from_f64(value: f64) -> Self {
                    value as $ty
                }
            }
        )*
    };
}

impl_sample!(
    u8 => U8,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    f32 => F32,
    f64 => F64,
);
