//! The [`TimeStamp`] scalar: an offset into a video measured in whole seconds.
//!
//! Time stamps travel over the wire as JSON and are accepted in several
//! human-friendly shapes:
//!
//! | Input              | Seconds |
//! |--------------------|---------|
//! | `1500`, `3.54`     | 1500, 3 |
//! | `"1500"`, `"0900"` | 1500, 900 |
//! | `"15:00"`          | 900     |
//! | `"10:45:15"`       | 38715   |
//! | `"3h4m5s"`         | 11045   |
//!
//! Fractions of a second are truncated toward zero. On output a time stamp is
//! always rendered as a zero-padded `"HH:MM:SS"` string whose hour field
//! grows past two digits instead of wrapping at 24 hours.
//!
//! Negative values decode without complaint; range checks belong to the
//! caller (see [`crate::annotation::validate_interval`]).
//!
//! Clock and duration strings are evaluated in signed 64-bit nanoseconds, so
//! they only decode up to [`TimeStamp::MAX_TEXT`] (`"2562047:47:16"`, about
//! 292 years). Larger values still encode, but their clock form does not
//! decode back; send them as plain seconds instead.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::error::Category;
use serde_json::Value;

use crate::duration::{parse_duration, DurationError, SECOND};

/// `(HOURS:)?MINUTES:SECONDS`, each component one or more ASCII digits.
const CLOCK_PATTERN: &str = r"^(?:([0-9]+):)?([0-9]+):([0-9]+)$";

static CLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(CLOCK_PATTERN).expect("valid regex"));

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;

/// Errors produced while decoding a [`TimeStamp`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeStampError {
    /// The raw input is not JSON at all.
    #[error("{0}")]
    MalformedJson(String),

    /// Valid JSON, but neither a number nor a string.
    #[error("invalid time stamp: {0}")]
    InvalidShape(String),

    /// A `HH:MM:SS` / `MM:SS` string whose rewritten duration failed to parse.
    #[error("{source} (from clock time {input:?})")]
    Clock {
        input: String,
        #[source]
        source: DurationError,
    },

    /// A string that is neither numeric, a clock time, nor a valid duration.
    #[error(transparent)]
    Parse(#[from] DurationError),
}

impl TimeStampError {
    /// Classify a JSON lexing failure the way API clients expect to see it.
    fn from_json_error(err: serde_json::Error) -> Self {
        match err.classify() {
            Category::Eof => Self::MalformedJson(format!("unexpected end of JSON input ({err})")),
            _ => Self::MalformedJson(format!("invalid character in JSON input ({err})")),
        }
    }
}

/// Elapsed time in whole seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeStamp(i64);

impl TimeStamp {
    pub const ZERO: Self = Self(0);

    /// Largest value a clock or duration string can express.
    pub const MAX_TEXT: Self = Self(i64::MAX / SECOND as i64);

    pub const fn from_secs(secs: i64) -> Self {
        Self(secs)
    }

    pub const fn as_secs(self) -> i64 {
        self.0
    }

    /// Decode a time stamp from a raw JSON document.
    ///
    /// Lexing errors surface as [`TimeStampError::MalformedJson`] before any
    /// time stamp grammar is attempted.
    pub fn from_json(bytes: &[u8]) -> Result<Self, TimeStampError> {
        let value: Value = serde_json::from_slice(bytes).map_err(TimeStampError::from_json_error)?;
        Self::decode_value(value)
    }

    /// Decode a time stamp from an already-parsed JSON value.
    pub fn decode_value(value: Value) -> Result<Self, TimeStampError> {
        match value {
            Value::Number(number) => Ok(Self::from_number(&number)),
            Value::String(text) => text.parse(),
            other => Err(TimeStampError::InvalidShape(other.to_string())),
        }
    }

    /// Encode as a quoted `"HH:MM:SS"` JSON string.
    pub fn to_json(self) -> String {
        format!("\"{self}\"")
    }

    fn from_number(number: &serde_json::Number) -> Self {
        match number.as_i64() {
            Some(secs) => Self(secs),
            None => Self(truncate(number.as_f64().unwrap_or_default())),
        }
    }

    fn from_duration_nanos(nanos: i64) -> Self {
        Self(nanos / SECOND as i64)
    }
}

/// Drop the fractional part; out-of-range values saturate.
fn truncate(value: f64) -> i64 {
    value.trunc() as i64
}

/// Plain integer or decimal seconds (`"1500"`, `"0900"`, `"3.54"`).
fn parse_numeric(text: &str) -> Option<i64> {
    if let Ok(secs) = text.parse::<i64>() {
        return Some(secs);
    }
    text.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .map(truncate)
}

/// Rewrite `H:M:S` / `M:S` into the equivalent `<H>h<M>m<S>s` duration.
fn clock_to_duration(text: &str) -> Option<String> {
    let caps = CLOCK_RE.captures(text)?;
    let hours = caps.get(1).map_or("0", |m| m.as_str());
    Some(format!("{hours}h{}m{}s", &caps[2], &caps[3]))
}

impl FromStr for TimeStamp {
    type Err = TimeStampError;

    /// Parse the string forms of a time stamp, in order: numeric seconds,
    /// clock time, then unit-suffixed duration.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if let Some(secs) = parse_numeric(text) {
            return Ok(Self(secs));
        }

        if let Some(expression) = clock_to_duration(text) {
            return parse_duration(&expression)
                .map(Self::from_duration_nanos)
                .map_err(|source| TimeStampError::Clock {
                    input: text.to_string(),
                    source,
                });
        }

        Ok(Self::from_duration_nanos(parse_duration(text)?))
    }
}

impl fmt::Display for TimeStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let total = self.0.unsigned_abs();
        let hours = total / SECONDS_PER_HOUR;
        let minutes = total % SECONDS_PER_HOUR / SECONDS_PER_MINUTE;
        let seconds = total % SECONDS_PER_MINUTE;
        write!(f, "{sign}{hours:02}:{minutes:02}:{seconds:02}")
    }
}

impl From<i64> for TimeStamp {
    fn from(secs: i64) -> Self {
        Self(secs)
    }
}

impl From<TimeStamp> for i64 {
    fn from(timestamp: TimeStamp) -> Self {
        timestamp.0
    }
}

impl Serialize for TimeStamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeStamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::decode_value(value).map_err(de::Error::custom)
    }
}
