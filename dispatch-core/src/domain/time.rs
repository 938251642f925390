//! Delivery time of day
//!
//! Times cross every boundary as `HH:MM` strings but are stored and compared
//! as a minute count since midnight.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced when parsing an `HH:MM` string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeParseError {
    /// The input has no `:` separator
    #[error("time '{0}' is missing the ':' separator")]
    MissingSeparator(String),

    /// The input splits into more than two fields
    #[error("time must have exactly two fields, found {0}")]
    FieldCount(usize),

    /// The hours field is not an integer
    #[error("invalid hours field '{field}': {source}")]
    InvalidHours {
        field: String,
        #[source]
        source: ParseIntError,
    },

    /// The minutes field is not an integer
    #[error("invalid minutes field '{field}': {source}")]
    InvalidMinutes {
        field: String,
        #[source]
        source: ParseIntError,
    },

    /// `hours * 60 + minutes` does not fit in a minute count
    #[error("time '{0}' overflows the minute counter")]
    Overflow(String),
}

/// A time of day expressed as minutes since midnight
///
/// Field ranges are not validated: `"10:75"` is accepted and equals `"11:15"`,
/// and signed fields are accepted too, so `"-1:30"` is thirty minutes before
/// midnight. Formatting always uses at least two digits per field, so any value
/// from midnight up to 24 hours survives a format/parse round trip unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeliveryTime(i32);

impl DeliveryTime {
    /// Midnight, `"00:00"`
    pub const MIDNIGHT: DeliveryTime = DeliveryTime(0);

    pub const fn from_minutes(minutes: i32) -> Self {
        DeliveryTime(minutes)
    }

    pub const fn minutes(self) -> i32 {
        self.0
    }
}

impl FromStr for DeliveryTime {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split(':').collect();
        let (hours, minutes) = match fields.as_slice() {
            [_] => return Err(TimeParseError::MissingSeparator(s.to_string())),
            [hours, minutes] => (*hours, *minutes),
            other => return Err(TimeParseError::FieldCount(other.len())),
        };

        let hours: i32 = hours
            .parse()
            .map_err(|source| TimeParseError::InvalidHours {
                field: hours.to_string(),
                source,
            })?;
        let minutes: i32 = minutes
            .parse()
            .map_err(|source| TimeParseError::InvalidMinutes {
                field: minutes.to_string(),
                source,
            })?;

        hours
            .checked_mul(60)
            .and_then(|h| h.checked_add(minutes))
            .map(DeliveryTime)
            .ok_or_else(|| TimeParseError::Overflow(s.to_string()))
    }
}

impl fmt::Display for DeliveryTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl TryFrom<String> for DeliveryTime {
    type Error = TimeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DeliveryTime> for String {
    fn from(time: DeliveryTime) -> Self {
        time.to_string()
    }
}
