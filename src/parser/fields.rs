//! Field-level helpers shared by both dump tables.

use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use csv::StringRecord;

use crate::error::RowError;

/// Timestamp layout used by airodump-ng.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Time zone the capture host wrote its timestamps in.
///
/// Records always expose local date-times; this only controls how the naive
/// dump timestamps are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DumpZone {
    #[default]
    Local,
    Utc,
}

impl DumpZone {
    /// Returns `None` for local times skipped by a DST transition. Ambiguous
    /// local times resolve to the earlier instant.
    pub fn to_local(self, naive: NaiveDateTime) -> Option<DateTime<Local>> {
        match self {
            DumpZone::Local => Local.from_local_datetime(&naive).earliest(),
            DumpZone::Utc => Some(Utc.from_utc_datetime(&naive).with_timezone(&Local)),
        }
    }
}

pub(crate) fn require_columns(record: &StringRecord, expected: usize) -> Result<(), RowError> {
    if record.len() < expected {
        return Err(RowError::TooFewColumns {
            expected,
            actual: record.len(),
        });
    }
    Ok(())
}

/// Column text without its leading padding, or empty when the row is shorter.
///
/// Trailing whitespace is kept: it can be part of an ESSID.
pub(crate) fn column(record: &StringRecord, index: usize) -> &str {
    record.get(index).unwrap_or("").trim_start()
}

pub(crate) fn parse_timestamp(
    value: &str,
    field: &'static str,
    zone: DumpZone,
) -> Result<DateTime<Local>, RowError> {
    NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT)
        .ok()
        .and_then(|naive| zone.to_local(naive))
        .ok_or_else(|| RowError::InvalidTimestamp {
            field,
            value: value.to_string(),
        })
}

pub(crate) fn parse_integer<T: FromStr>(value: &str, field: &'static str) -> Result<T, RowError> {
    value.trim().parse().map_err(|_| RowError::InvalidInteger {
        field,
        value: value.to_string(),
    })
}

/// True for rows made only of blank fields (e.g. whitespace-only lines).
pub(crate) fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|field| field.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_timestamp_local() {
        let ts = parse_timestamp("2024-01-01 10:05:00", "last_seen", DumpZone::Local).unwrap();
        assert_eq!(ts.year(), 2024);
        assert_eq!(ts.hour(), 10);
        assert_eq!(ts.minute(), 5);
    }

    #[test]
    fn test_parse_timestamp_utc() {
        let ts = parse_timestamp("2024-01-01 10:05:00", "last_seen", DumpZone::Utc).unwrap();
        assert_eq!(ts.with_timezone(&Utc).hour(), 10);
    }

    #[test]
    fn test_parse_timestamp_rejects_other_layouts() {
        let err = parse_timestamp("01/01/2024 10:05", "first_seen", DumpZone::Local).unwrap_err();
        assert_eq!(
            err,
            RowError::InvalidTimestamp {
                field: "first_seen",
                value: "01/01/2024 10:05".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer::<i32>("-40", "power"), Ok(-40));
        assert_eq!(parse_integer::<u64>("12", "packets"), Ok(12));
        assert!(parse_integer::<u64>("-1", "packets").is_err());
        assert!(parse_integer::<i32>("", "power").is_err());
    }

    #[test]
    fn test_require_columns() {
        let record = StringRecord::from(vec!["a", "b", "c"]);
        assert!(require_columns(&record, 3).is_ok());
        assert_eq!(
            require_columns(&record, 7),
            Err(RowError::TooFewColumns {
                expected: 7,
                actual: 3
            })
        );
    }

    #[test]
    fn test_column_keeps_trailing_whitespace() {
        let record = StringRecord::from(vec!["  Net ", " 54 "]);
        assert_eq!(column(&record, 0), "Net ");
        assert_eq!(column(&record, 7), "");
        assert_eq!(parse_integer::<i32>(column(&record, 1), "speed"), Ok(54));
    }

    #[test]
    fn test_parse_timestamp_ignores_padding() {
        assert!(parse_timestamp("2024-01-01 10:05:00 ", "last_seen", DumpZone::Local).is_ok());
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(&StringRecord::from(vec![""])));
        assert!(is_blank(&StringRecord::from(vec!["  ", " "])));
        assert!(!is_blank(&StringRecord::from(vec!["", "x"])));
    }
}
