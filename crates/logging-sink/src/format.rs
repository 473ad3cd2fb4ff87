//! crates/logging-sink/src/format.rs
//! Header layout selection.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseFormatError;

/// Layout of the header prepended to every log line.
///
/// The format only changes how headers are rendered; it never affects where
/// lines are written.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Format {
    /// `LMMDD hh:mm:ss.uuuuuu pid file:line] `
    #[default]
    Default,
    /// `YYYY-MM-DDThh:mm:ssZ L pid file:line] `
    Iso8601,
}

impl Format {
    /// Lower-case name, as accepted by [`FromStr`].
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Iso8601 => "iso8601",
        }
    }

    pub(crate) const fn to_bits(self) -> u8 {
        match self {
            Self::Default => 0,
            Self::Iso8601 => 1,
        }
    }

    pub(crate) const fn from_bits(bits: u8) -> Self {
        match bits {
            1 => Self::Iso8601,
            _ => Self::Default,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "iso8601" | "iso-8601" => Ok(Self::Iso8601),
            _ => Err(ParseFormatError::new(s)),
        }
    }
}
