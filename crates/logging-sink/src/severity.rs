//! crates/logging-sink/src/severity.rs
//! Severity levels and their single-character tags.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseSeverityError;

/// Importance tag of a log line.
///
/// Lower numeric codes are more severe. Codes above [`Severity::Info`] are
/// never rejected; [`Severity::from_level`] clamps them to `Info`.
#[repr(u32)]
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Severity {
    /// Error conditions.
    Error = 0,
    /// Warning conditions.
    Warning = 1,
    /// Informational messages.
    Info = 2,
}

impl Severity {
    /// All severities, most severe first.
    pub const ALL: [Self; 3] = [Self::Error, Self::Warning, Self::Info];

    const TAGS: [char; 3] = ['E', 'W', 'I'];

    /// Maps an arbitrary numeric level onto a severity.
    ///
    /// Values past the last defined severity are treated as [`Severity::Info`].
    ///
    /// ```
    /// use logging_sink::Severity;
    ///
    /// assert_eq!(Severity::from_level(0), Severity::Error);
    /// assert_eq!(Severity::from_level(2), Severity::Info);
    /// assert_eq!(Severity::from_level(u32::MAX), Severity::Info);
    /// ```
    pub const fn from_level(level: u32) -> Self {
        match level {
            0 => Self::Error,
            1 => Self::Warning,
            _ => Self::Info,
        }
    }

    /// Numeric code of the severity.
    pub const fn as_level(self) -> u32 {
        self as u32
    }

    /// Display character used in log headers.
    pub const fn tag(self) -> char {
        Self::TAGS[self as usize]
    }

    /// Lower-case name, as accepted by [`FromStr`].
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl From<Severity> for u32 {
    fn from(severity: Severity) -> Self {
        severity.as_level()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" | "e" => Ok(Self::Error),
            "warning" | "warn" | "w" => Ok(Self::Warning),
            "info" | "i" => Ok(Self::Info),
            _ => Err(ParseSeverityError::new(s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_puts_error_first() {
        assert!(Severity::Error < Severity::Warning);
        assert!(Severity::Warning < Severity::Info);
    }

    #[test]
    fn tags_match_severities() {
        assert_eq!(Severity::Error.tag(), 'E');
        assert_eq!(Severity::Warning.tag(), 'W');
        assert_eq!(Severity::Info.tag(), 'I');
    }

    #[test]
    fn out_of_range_levels_clamp_to_info() {
        for level in [2, 3, 7, 1000, u32::MAX] {
            assert_eq!(Severity::from_level(level), Severity::Info);
            assert_eq!(Severity::from_level(level).tag(), 'I');
        }
    }

    #[test]
    fn level_round_trips_through_code() {
        for severity in Severity::ALL {
            assert_eq!(Severity::from_level(severity.as_level()), severity);
        }
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("ERROR".parse::<Severity>().unwrap(), Severity::Error);
        assert_eq!("warn".parse::<Severity>().unwrap(), Severity::Warning);
        assert_eq!("Info".parse::<Severity>().unwrap(), Severity::Info);
    }

    #[test]
    fn rejects_unknown_names() {
        let error = "debug".parse::<Severity>().unwrap_err();
        assert_eq!(error.to_string(), "unknown severity 'debug'");
    }
}
