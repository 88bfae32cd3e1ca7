use std::fmt;
use std::path::Path;
use std::str::FromStr;

use super::CodecError;

/// Container formats known by tag.
///
/// Every format decodes; only WAV encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioFormat {
    Wav,
    Aiff,
    Flac,
}

impl AudioFormat {
    /// Match a format tag or file extension, ignoring case and a leading dot.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim().trim_start_matches('.');
        if tag.eq_ignore_ascii_case("wav") || tag.eq_ignore_ascii_case("wave") {
            Some(Self::Wav)
        } else if tag.eq_ignore_ascii_case("aif")
            || tag.eq_ignore_ascii_case("aiff")
            || tag.eq_ignore_ascii_case("aifc")
        {
            Some(Self::Aiff)
        } else if tag.eq_ignore_ascii_case("flac") {
            Some(Self::Flac)
        } else {
            None
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_tag)
    }

    /// Canonical tag, also used as the probe hint.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::Aiff => "aiff",
            Self::Flac => "flac",
        }
    }

    pub fn can_encode(self) -> bool {
        matches!(self, Self::Wav)
    }

    /// Resolve a tag that must name an encodable format.
    pub(crate) fn for_encode(tag: &str) -> Result<Self, CodecError> {
        Self::from_tag(tag)
            .filter(|format| format.can_encode())
            .ok_or_else(|| CodecError::UnsupportedFormat {
                format: tag.to_string(),
                operation: "encode",
            })
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for AudioFormat {
    type Err = CodecError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_tag(value).ok_or_else(|| CodecError::UnsupportedFormat {
            format: value.to_string(),
            operation: "decode",
        })
    }
}
