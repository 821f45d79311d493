//! Severity scale shared by thresholds and requested record levels.
//!
//! The scale is totally ordered by rank. Two members are sentinels:
//! [`LogLevel::Invalid`] marks "no level" (unknown text, unregistered
//! source) and [`LogLevel::None`] is a threshold that suppresses everything.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use thiserror::Error;

/// Severity of a record or minimum severity of a threshold.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum LogLevel {
    #[default]
    Invalid = 0,
    /// Marker level used by raw buffer dumps.
    Raw = 1,
    Trace = 2,
    Debug = 3,
    Info = 4,
    Warning = 5,
    Error = 6,
    /// Threshold that disables output.
    None = 7,
}

/// Returned when text does not name a level.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown log level: {0:?}")]
pub struct ParseLevelError(pub String);

impl LogLevel {
    /// Number of ranks on the scale; the first rank past [`LogLevel::None`].
    pub const COUNT: u8 = 8;

    /// All levels in ascending order.
    pub const ALL: [LogLevel; 8] = [
        LogLevel::Invalid,
        LogLevel::Raw,
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warning,
        LogLevel::Error,
        LogLevel::None,
    ];

    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Create from a rank (returns `None` past the end of the scale).
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(LogLevel::Invalid),
            1 => Some(LogLevel::Raw),
            2 => Some(LogLevel::Trace),
            3 => Some(LogLevel::Debug),
            4 => Some(LogLevel::Info),
            5 => Some(LogLevel::Warning),
            6 => Some(LogLevel::Error),
            7 => Some(LogLevel::None),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            LogLevel::Invalid => "INVALID",
            LogLevel::Raw => "RAW",
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::None => "NONE",
        }
    }

    /// Name of the level with the given rank, `"INVALID"` when out of range.
    pub const fn name_for_rank(rank: u8) -> &'static str {
        match Self::from_u8(rank) {
            Some(level) => level.as_str(),
            None => LogLevel::Invalid.as_str(),
        }
    }

    /// Case-insensitive lookup returning [`LogLevel::Invalid`] for unknown text.
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or(LogLevel::Invalid)
    }

    /// Single-character tag used in record prefixes.
    pub const fn tag(self) -> char {
        match self {
            LogLevel::Invalid => 'I',
            LogLevel::Raw => 'R',
            LogLevel::Trace => 'T',
            LogLevel::Debug => 'D',
            LogLevel::Info => 'I',
            LogLevel::Warning => 'W',
            LogLevel::Error => 'E',
            LogLevel::None => 'N',
        }
    }

    /// Whether the level may be used as a global or per-source threshold.
    #[inline]
    pub const fn is_threshold(self) -> bool {
        !matches!(self, LogLevel::Invalid)
    }

    /// Whether a record may be requested at this level.
    #[inline]
    pub const fn is_requestable(self) -> bool {
        !matches!(self, LogLevel::Invalid | LogLevel::None)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LogLevel::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseLevelError(s.to_owned()))
    }
}

impl Serialize for LogLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn ordering_follows_rank() {
        for pair in LogLevel::ALL.windows(2) {
            assert!(pair[0] < pair[1], "{} should sort before {}", pair[0], pair[1]);
        }
    }

    #[rstest]
    #[case("trace", LogLevel::Trace)]
    #[case("Debug", LogLevel::Debug)]
    #[case("INFO", LogLevel::Info)]
    #[case("warning", LogLevel::Warning)]
    #[case("ERROR", LogLevel::Error)]
    #[case("none", LogLevel::None)]
    #[case("raw", LogLevel::Raw)]
    #[case("invalid", LogLevel::Invalid)]
    #[case("warn", LogLevel::Invalid)]
    #[case("", LogLevel::Invalid)]
    fn from_name_is_case_insensitive(#[case] text: &str, #[case] expected: LogLevel) {
        assert_eq!(LogLevel::from_name(text), expected);
    }

    #[test]
    fn unknown_text_fails_to_parse() {
        let err = "verbose".parse::<LogLevel>().expect_err("should not parse");
        assert_eq!(err, ParseLevelError("verbose".into()));
    }

    #[rstest]
    #[case(0, "INVALID")]
    #[case(5, "WARNING")]
    #[case(7, "NONE")]
    #[case(8, "INVALID")]
    #[case(255, "INVALID")]
    fn rank_names_never_fail(#[case] rank: u8, #[case] expected: &str) {
        assert_eq!(LogLevel::name_for_rank(rank), expected);
    }

    #[test]
    fn rank_round_trips_for_whole_scale() {
        for level in LogLevel::ALL {
            assert_eq!(LogLevel::from_u8(level.as_u8()), Some(level));
        }
        assert_eq!(LogLevel::from_u8(LogLevel::COUNT), None);
    }

    #[test]
    fn sentinels_are_excluded_where_required() {
        assert!(!LogLevel::Invalid.is_threshold());
        assert!(LogLevel::None.is_threshold());
        assert!(!LogLevel::None.is_requestable());
        assert!(LogLevel::Raw.is_requestable());
    }

    #[test]
    fn serde_uses_level_names() {
        let json = serde_json::to_string(&LogLevel::Warning).expect("serialise");
        assert_eq!(json, "\"WARNING\"");
        let level: LogLevel = serde_json::from_str("\"debug\"").expect("deserialise");
        assert_eq!(level, LogLevel::Debug);
        assert!(serde_json::from_str::<LogLevel>("\"loud\"").is_err());
    }
}
