use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::ValidationError;

/// Point in time normalized to UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcDateTime(OffsetDateTime);

impl UtcDateTime {
    /// Parse the timestamp shapes the news endpoint emits.
    ///
    /// RFC 3339 with any offset, `YYYY-MM-DD HH:MM:SS` with or without an
    /// offset (naive values are taken as UTC), and integer epoch seconds.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        let invalid = || ValidationError::InvalidTimestamp {
            value: input.to_owned(),
        };

        if let Ok(parsed) = OffsetDateTime::parse(trimmed, &Rfc3339) {
            return Ok(Self::from_offset_datetime(parsed));
        }

        let with_offset = format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second][offset_hour sign:mandatory]:[offset_minute]"
        );
        if let Ok(parsed) = OffsetDateTime::parse(trimmed, with_offset) {
            return Ok(Self::from_offset_datetime(parsed));
        }

        let naive_space = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
        let naive_t = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
        if let Ok(parsed) = PrimitiveDateTime::parse(trimmed, naive_space)
            .or_else(|_| PrimitiveDateTime::parse(trimmed, naive_t))
        {
            return Ok(Self(parsed.assume_utc()));
        }

        let seconds = trimmed.parse::<i64>().map_err(|_| invalid())?;
        Self::from_unix_seconds(seconds).ok_or_else(invalid)
    }

    pub fn from_unix_seconds(seconds: i64) -> Option<Self> {
        OffsetDateTime::from_unix_timestamp(seconds)
            .ok()
            .map(Self)
    }

    pub fn from_offset_datetime(value: OffsetDateTime) -> Self {
        Self(value.to_offset(UtcOffset::UTC))
    }

    pub fn format_rfc3339(self) -> String {
        self.0
            .format(&Rfc3339)
            .unwrap_or_else(|_| self.0.unix_timestamp().to_string())
    }

    /// Human-facing rendering, e.g. `2024-01-05 14:30 UTC`.
    pub fn format_display(self) -> String {
        let layout = format_description!("[year]-[month]-[day] [hour]:[minute] UTC");
        self.0
            .format(layout)
            .unwrap_or_else(|_| self.format_rfc3339())
    }
}

impl Display for UtcDateTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_rfc3339())
    }
}

impl Serialize for UtcDateTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_rfc3339())
    }
}

impl<'de> Deserialize<'de> for UtcDateTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}

/// Extract the calendar date from an ISO date or date-time string.
///
/// Only the leading `YYYY-MM-DD` is read, so `2024-01-01`,
/// `2024-01-01T00:00:00-05:00` and `2024-01-01 00:00:00` all give the same
/// day regardless of their offset.
pub fn calendar_date(input: &str) -> Option<Date> {
    let head = input.trim().get(..10)?;
    Date::parse(head, format_description!("[year]-[month]-[day]")).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rfc3339_and_normalizes_to_utc() {
        let parsed = UtcDateTime::parse("2024-01-01T01:00:00+01:00").expect("must parse");
        assert_eq!(parsed.format_rfc3339(), "2024-01-01T00:00:00Z");
    }

    #[test]
    fn parses_naive_timestamp_as_utc() {
        let parsed = UtcDateTime::parse("2024-03-05 14:30:00").expect("must parse");
        assert_eq!(parsed.format_display(), "2024-03-05 14:30 UTC");
    }

    #[test]
    fn parses_epoch_seconds() {
        let parsed = UtcDateTime::parse("1704067200").expect("must parse");
        assert_eq!(parsed.format_rfc3339(), "2024-01-01T00:00:00Z");
    }

    #[test]
    fn rejects_garbage() {
        let err = UtcDateTime::parse("yesterday").expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidTimestamp { .. }));
    }

    #[test]
    fn calendar_date_ignores_time_and_offset() {
        let date = calendar_date("2024-01-01T00:00:00-05:00").expect("date");
        assert_eq!(date.day(), 1);
        assert_eq!(u8::from(date.month()), 1);
        assert!(calendar_date("Jan 1").is_none());
    }
}
