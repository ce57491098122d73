//! Temporal column codecs: DATE, DATETIME, TIMESTAMP, TIME and YEAR.
//!
//! Row events deliver DATETIME and TIMESTAMP as epoch microseconds (UTC),
//! snapshot queries as chrono values or strings. Two raw integers are
//! reserved for MySQL's broken dates:
//!
//! - [`ZERO_DATE_SENTINEL`] (`i64::MIN`) for any date-like column;
//! - `0` for TIMESTAMP columns only. A DATETIME holding `0` is the real
//!   instant `1970-01-01 00:00:00`.
//!
//! Snapshot queries return broken dates as the literal zero string, which
//! is treated the same way.
//!
//! Broken dates render as `0000-00-00 00:00:00` (padded to the declared
//! fractional-second length) or as `null` when
//! [`OutputConfig::zero_dates_as_null`] is set.
//!
//! TIME is a signed duration, not a time of day: it spans
//! `-838:59:59` to `838:59:59` and arrives as microseconds.
//!
//! ```text
//! value ──▶ broken? ──yes──▶ zero_dates_as_null ? null : "0000-00-00 00:00:00[.000]"
//!             │
//!             no
//!             ▼
//!          decode ──fail──▶ ColumnError::Cast
//!             │
//!             ▼
//!   "YYYY-MM-DD HH:MM:SS" + fractional digits
//! ```

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use serde_json::Value;

use super::string::quote_sql;
use super::{ColumnDef, ColumnKind};
use crate::config::OutputConfig;
use crate::error::{ColumnError, ColumnResult};
use crate::value::{ColumnValue, ZERO_DATE_SENTINEL};

/// Rendering of a broken DATETIME or TIMESTAMP.
pub const ZERO_DATETIME: &str = "0000-00-00 00:00:00";

/// Rendering of a broken DATE.
pub const ZERO_DATE: &str = "0000-00-00";

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DATETIME_INPUT_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];
const DATE_FORMAT: &str = "%Y-%m-%d";
const MICROS_PER_SECOND: i64 = 1_000_000;
/// `838:59:59`, the TIME range bound in either direction.
const MAX_TIME_MICROS: i64 = (838 * 3600 + 59 * 60 + 59) * MICROS_PER_SECOND;

/// Appends `column_length` digits of sub-second precision to `formatted`.
///
/// Digits come from `nanos`, truncated (never rounded) and zero padded.
/// A length of zero or `None` appends nothing; lengths above nine are
/// capped at nanosecond precision.
#[must_use]
pub fn append_fractional_seconds(
    formatted: &str,
    nanos: u32,
    column_length: Option<u64>,
) -> String {
    let digits = column_length.map_or(0, |len| usize::try_from(len.min(9)).unwrap_or(9));
    if digits == 0 {
        return formatted.to_string();
    }
    let padded = format!("{:09}", nanos % 1_000_000_000);
    format!("{formatted}.{}", &padded[..digits])
}

/// Formats a temporal value under `config`.
///
/// Returns `Ok(None)` for broken dates when
/// [`OutputConfig::zero_dates_as_null`] is set.
///
/// # Errors
///
/// Returns [`ColumnError::Cast`] if the value cannot be decoded, or
/// [`ColumnError::UnsupportedType`] if `col` is not a temporal column.
pub fn format_value(
    col: &ColumnDef,
    value: &ColumnValue,
    config: &OutputConfig,
) -> ColumnResult<Option<String>> {
    if value.is_null() {
        return Ok(None);
    }
    let zero_as_null = config.zero_dates_as_null;
    match col.kind() {
        ColumnKind::Date => format_date(col, value, zero_as_null),
        ColumnKind::DateTime { column_length } => {
            format_datetime(col, false, *column_length, value, zero_as_null)
        }
        ColumnKind::Timestamp { column_length } => {
            format_datetime(col, true, *column_length, value, zero_as_null)
        }
        ColumnKind::Time { column_length } => format_time(col, *column_length, value).map(Some),
        ColumnKind::Year => year_value(col, value).map(|y| Some(format!("{y:04}"))),
        _ => Err(ColumnError::UnsupportedType {
            type_name: col.type_name()?.to_string(),
        }),
    }
}

fn is_broken(value: &ColumnValue, zero_is_broken: bool) -> bool {
    match value {
        ColumnValue::Int(v) => *v == ZERO_DATE_SENTINEL || (*v == 0 && zero_is_broken),
        ColumnValue::UInt(v) => *v == 0 && zero_is_broken,
        ColumnValue::String(s) => is_zero_date_text(s),
        _ => false,
    }
}

/// Matches `0000-00-00`, optionally followed by `00:00:00` and zero fraction digits.
fn is_zero_date_text(s: &str) -> bool {
    let s = s.trim();
    s.starts_with(ZERO_DATE)
        && s.bytes()
            .all(|b| matches!(b, b'0' | b'-' | b':' | b'.' | b' ' | b'T'))
}

fn in_mysql_range(dt: NaiveDateTime) -> bool {
    (0..=9999).contains(&dt.year())
}

fn decode_datetime(col: &ColumnDef, value: &ColumnValue) -> ColumnResult<NaiveDateTime> {
    let decoded = match value {
        ColumnValue::Int(micros) => {
            DateTime::<Utc>::from_timestamp_micros(*micros).map(|dt| dt.naive_utc())
        }
        ColumnValue::UInt(micros) => i64::try_from(*micros)
            .ok()
            .and_then(DateTime::<Utc>::from_timestamp_micros)
            .map(|dt| dt.naive_utc()),
        ColumnValue::DateTime(ndt) => Some(*ndt),
        ColumnValue::Timestamp(dt) => Some(dt.naive_utc()),
        ColumnValue::Date(d) => Some(d.and_time(NaiveTime::MIN)),
        ColumnValue::String(s) => DATETIME_INPUT_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s.trim(), fmt).ok()),
        _ => None,
    };
    decoded
        .filter(|dt| in_mysql_range(*dt))
        .ok_or_else(|| col.cast_error(value))
}

fn format_datetime(
    col: &ColumnDef,
    is_timestamp: bool,
    column_length: Option<u64>,
    value: &ColumnValue,
    zero_as_null: bool,
) -> ColumnResult<Option<String>> {
    if is_broken(value, is_timestamp) {
        if zero_as_null {
            return Ok(None);
        }
        return Ok(Some(append_fractional_seconds(ZERO_DATETIME, 0, column_length)));
    }

    let dt = decode_datetime(col, value)?;
    let formatted = dt.format(DATETIME_FORMAT).to_string();
    tracing::debug!(column = col.name(), formatted = %formatted, "formatted datetime");
    Ok(Some(append_fractional_seconds(&formatted, dt.nanosecond(), column_length)))
}

pub(super) fn datetime_sql(
    col: &ColumnDef,
    is_timestamp: bool,
    column_length: Option<u64>,
    value: &ColumnValue,
) -> ColumnResult<String> {
    Ok(format_datetime(col, is_timestamp, column_length, value, false)?
        .map_or_else(|| "NULL".to_string(), |s| quote_sql(&s)))
}

pub(super) fn datetime_json(
    col: &ColumnDef,
    is_timestamp: bool,
    column_length: Option<u64>,
    value: &ColumnValue,
    config: &OutputConfig,
) -> ColumnResult<Value> {
    Ok(
        format_datetime(col, is_timestamp, column_length, value, config.zero_dates_as_null)?
            .map_or(Value::Null, Value::String),
    )
}

fn decode_date(col: &ColumnDef, value: &ColumnValue) -> ColumnResult<NaiveDate> {
    match value {
        ColumnValue::Date(d) if (0..=9999).contains(&d.year()) => Ok(*d),
        ColumnValue::String(s) => NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
            .ok()
            .filter(|d| (0..=9999).contains(&d.year()))
            .ok_or_else(|| col.cast_error(value)),
        ColumnValue::Date(_) => Err(col.cast_error(value)),
        _ => decode_datetime(col, value).map(|dt| dt.date()),
    }
}

fn format_date(
    col: &ColumnDef,
    value: &ColumnValue,
    zero_as_null: bool,
) -> ColumnResult<Option<String>> {
    if is_broken(value, false) {
        return Ok((!zero_as_null).then(|| ZERO_DATE.to_string()));
    }
    decode_date(col, value).map(|d| Some(d.format(DATE_FORMAT).to_string()))
}

pub(super) fn date_sql(col: &ColumnDef, value: &ColumnValue) -> ColumnResult<String> {
    Ok(format_date(col, value, false)?.map_or_else(|| "NULL".to_string(), |s| quote_sql(&s)))
}

pub(super) fn date_json(
    col: &ColumnDef,
    value: &ColumnValue,
    config: &OutputConfig,
) -> ColumnResult<Value> {
    Ok(format_date(col, value, config.zero_dates_as_null)?.map_or(Value::Null, Value::String))
}

/// Parses `[-]H+:MM:SS[.ffffff]` into signed microseconds.
fn parse_time(s: &str) -> Option<i64> {
    let s = s.trim();
    let (negative, body) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let (hms, frac) = body.split_once('.').unwrap_or((body, ""));
    let mut parts = hms.split(':');
    let (hours, minutes, seconds) = (parts.next()?, parts.next()?, parts.next()?);
    let digits = |p: &str, max_len: usize| {
        !p.is_empty() && p.len() <= max_len && p.bytes().all(|b| b.is_ascii_digit())
    };
    if parts.next().is_some()
        || !digits(hours, 3)
        || minutes.len() != 2
        || seconds.len() != 2
        || !digits(minutes, 2)
        || !digits(seconds, 2)
        || !(frac.is_empty() || digits(frac, 6))
    {
        return None;
    }
    let (h, m, sec): (i64, i64, i64) =
        (hours.parse().ok()?, minutes.parse().ok()?, seconds.parse().ok()?);
    if m > 59 || sec > 59 {
        return None;
    }
    let frac_micros: i64 = if frac.is_empty() {
        0
    } else {
        format!("{frac:0<6}").parse().ok()?
    };
    let micros = (h * 3600 + m * 60 + sec) * MICROS_PER_SECOND + frac_micros;
    Some(if negative { -micros } else { micros })
}

fn time_of_day_micros(t: NaiveTime) -> i64 {
    // Leap-second nanos (>= 1e9) clamp into the last second.
    let sub_micros = t.nanosecond().min(999_999_999) / 1_000;
    i64::from(t.num_seconds_from_midnight()) * MICROS_PER_SECOND + i64::from(sub_micros)
}

fn decode_time(col: &ColumnDef, value: &ColumnValue) -> ColumnResult<i64> {
    let decoded = match value {
        ColumnValue::Int(micros) => Some(*micros),
        ColumnValue::Time(t) => Some(time_of_day_micros(*t)),
        ColumnValue::DateTime(ndt) => Some(time_of_day_micros(ndt.time())),
        ColumnValue::String(s) => parse_time(s),
        _ => None,
    };
    decoded
        .filter(|micros| (-MAX_TIME_MICROS..=MAX_TIME_MICROS).contains(micros))
        .ok_or_else(|| col.cast_error(value))
}

#[allow(clippy::cast_possible_truncation)]
fn format_time(
    col: &ColumnDef,
    column_length: Option<u64>,
    value: &ColumnValue,
) -> ColumnResult<String> {
    let micros = decode_time(col, value)?;
    let sign = if micros < 0 { "-" } else { "" };
    let abs = micros.unsigned_abs();
    let total_secs = abs / 1_000_000;
    let formatted = format!(
        "{sign}{:02}:{:02}:{:02}",
        total_secs / 3600,
        total_secs / 60 % 60,
        total_secs % 60
    );
    // Below 1e9 after the modulo.
    let nanos = (abs % 1_000_000 * 1_000) as u32;
    Ok(append_fractional_seconds(&formatted, nanos, column_length))
}

pub(super) fn time_sql(
    col: &ColumnDef,
    column_length: Option<u64>,
    value: &ColumnValue,
) -> ColumnResult<String> {
    format_time(col, column_length, value).map(|s| quote_sql(&s))
}

pub(super) fn time_json(
    col: &ColumnDef,
    column_length: Option<u64>,
    value: &ColumnValue,
) -> ColumnResult<Value> {
    format_time(col, column_length, value).map(Value::String)
}

fn year_value(col: &ColumnDef, value: &ColumnValue) -> ColumnResult<i64> {
    let year = match value {
        ColumnValue::Int(y) => Some(*y),
        ColumnValue::UInt(y) => i64::try_from(*y).ok(),
        ColumnValue::Date(d) => Some(i64::from(d.year())),
        ColumnValue::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    year.filter(|y| (0..=9999).contains(y))
        .ok_or_else(|| col.cast_error(value))
}

pub(super) fn year_sql(col: &ColumnDef, value: &ColumnValue) -> ColumnResult<String> {
    year_value(col, value).map(|y| format!("{y:04}"))
}

pub(super) fn year_json(col: &ColumnDef, value: &ColumnValue) -> ColumnResult<Value> {
    year_value(col, value).map(Value::from)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    fn column(ty: &str, column_length: Option<u64>) -> ColumnDef {
        ColumnDef::build("ts", None, ty, 0, true, None, column_length).unwrap()
    }

    fn null_zero_dates() -> OutputConfig {
        OutputConfig {
            zero_dates_as_null: true,
            ..OutputConfig::default()
        }
    }

    #[test]
    fn test_append_fractional_seconds() {
        assert_eq!(append_fractional_seconds("x", 123_456_789, Some(3)), "x.123");
        assert_eq!(append_fractional_seconds("x", 123_456_789, Some(6)), "x.123456");
        assert_eq!(append_fractional_seconds("x", 5_000, Some(6)), "x.000005");
        assert_eq!(append_fractional_seconds("x", 999_999_999, Some(1)), "x.9");
        assert_eq!(append_fractional_seconds("x", 123, Some(0)), "x");
        assert_eq!(append_fractional_seconds("x", 123, None), "x");
        assert_eq!(append_fractional_seconds("x", 1, Some(12)), "x.000000001");
    }

    #[test]
    fn test_sentinel_renders_zero_date() {
        let c = column("datetime", Some(3));
        let out = format_value(&c, &ColumnValue::Int(i64::MIN), &OutputConfig::default());
        assert_eq!(out.unwrap().as_deref(), Some("0000-00-00 00:00:00.000"));
    }

    #[test]
    fn test_sentinel_without_fraction() {
        let c = column("timestamp", None);
        let out = format_value(&c, &ColumnValue::Int(i64::MIN), &OutputConfig::default());
        assert_eq!(out.unwrap().as_deref(), Some(ZERO_DATETIME));
    }

    #[test]
    fn test_sentinel_as_null() {
        let c = column("datetime", Some(3));
        let out = format_value(&c, &ColumnValue::Int(i64::MIN), &null_zero_dates()).unwrap();
        assert_eq!(out, None);
        assert_eq!(
            c.to_json_value(&ColumnValue::Int(i64::MIN), &null_zero_dates()).unwrap(),
            Value::Null
        );
    }

    #[test]
    fn test_zero_is_broken_only_for_timestamp() {
        let ts = column("timestamp", None);
        let dt = column("datetime", None);
        let cfg = OutputConfig::default();
        assert_eq!(
            format_value(&ts, &ColumnValue::Int(0), &cfg).unwrap().as_deref(),
            Some(ZERO_DATETIME)
        );
        assert_eq!(
            format_value(&dt, &ColumnValue::Int(0), &cfg).unwrap().as_deref(),
            Some("1970-01-01 00:00:00")
        );
        assert_eq!(format_value(&ts, &ColumnValue::Int(0), &null_zero_dates()).unwrap(), None);
    }

    #[test]
    fn test_fractional_milliseconds() {
        let c = column("datetime", Some(3));
        let dt = NaiveDate::from_ymd_opt(2024, 2, 29)
            .unwrap()
            .and_hms_nano_opt(13, 45, 7, 123_000_000)
            .unwrap();
        let out = format_value(&c, &ColumnValue::DateTime(dt), &OutputConfig::default())
            .unwrap()
            .unwrap();
        assert_eq!(out, "2024-02-29 13:45:07.123");
        assert!(out.ends_with(".123"));
    }

    #[test]
    fn test_epoch_micros() {
        let c = column("timestamp", Some(6));
        // 2021-03-04 05:06:07.000089 UTC
        let micros = Utc
            .with_ymd_and_hms(2021, 3, 4, 5, 6, 7)
            .unwrap()
            .timestamp_micros()
            + 89;
        assert_eq!(
            c.to_sql_literal(&ColumnValue::Int(micros)).unwrap(),
            "'2021-03-04 05:06:07.000089'"
        );
    }

    #[test]
    fn test_timestamp_value() {
        let c = column("timestamp", None);
        let ts = Utc.with_ymd_and_hms(1999, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(
            c.to_json_value(&ColumnValue::Timestamp(ts), &OutputConfig::default())
                .unwrap(),
            json!("1999-12-31 23:59:59")
        );
    }

    #[test]
    fn test_string_input() {
        let c = column("datetime", Some(2));
        assert_eq!(
            c.to_json_value(
                &ColumnValue::from("2020-01-02 03:04:05.678"),
                &OutputConfig::default()
            )
            .unwrap(),
            json!("2020-01-02 03:04:05.67")
        );
    }

    #[test]
    fn test_malformed_is_cast_error() {
        let c = column("datetime", None);
        let cfg = OutputConfig::default();
        for bad in [
            ColumnValue::from("yesterday"),
            ColumnValue::from("2020-13-01 00:00:00"),
            ColumnValue::Bytes(vec![1, 2, 3]),
            ColumnValue::Double(1.5),
            ColumnValue::Int(i64::MAX),
        ] {
            let err = format_value(&c, &bad, &cfg).unwrap_err();
            assert!(matches!(err, ColumnError::Cast { .. }), "{bad:?}");
        }
    }

    #[test]
    fn test_sql_ignores_null_policy() {
        let c = column("timestamp", Some(2));
        assert_eq!(
            c.to_sql_literal(&ColumnValue::Int(0)).unwrap(),
            "'0000-00-00 00:00:00.00'"
        );
    }

    #[test]
    fn test_date() {
        let c = column("date", None);
        let cfg = OutputConfig::default();
        let d = NaiveDate::from_ymd_opt(2023, 7, 1).unwrap();
        assert_eq!(c.to_sql_literal(&ColumnValue::Date(d)).unwrap(), "'2023-07-01'");
        assert_eq!(
            c.to_json_value(&ColumnValue::Int(i64::MIN), &cfg).unwrap(),
            json!(ZERO_DATE)
        );
        assert_eq!(
            c.to_json_value(&ColumnValue::Int(i64::MIN), &null_zero_dates()).unwrap(),
            Value::Null
        );
        assert_eq!(c.to_json_value(&ColumnValue::Int(0), &cfg).unwrap(), json!("1970-01-01"));
        assert!(c.to_sql_literal(&ColumnValue::from("2023-02-30")).is_err());
    }

    #[test]
    fn test_time() {
        let c = column("time", Some(3));
        let micros = ((13 * 3600 + 5 * 60 + 9) * 1_000_000) + 250_000;
        assert_eq!(
            c.to_sql_literal(&ColumnValue::Int(micros)).unwrap(),
            "'13:05:09.250'"
        );
        let t = NaiveTime::from_hms_opt(1, 2, 3).unwrap();
        assert_eq!(
            c.to_json_value(&ColumnValue::Time(t), &OutputConfig::default()).unwrap(),
            json!("01:02:03.000")
        );
        assert!(c.to_sql_literal(&ColumnValue::Int(MAX_TIME_MICROS + 1)).is_err());
        assert!(c.to_sql_literal(&ColumnValue::Int(-MAX_TIME_MICROS - 1)).is_err());
        assert!(c.to_sql_literal(&ColumnValue::from("12:60:00")).is_err());
        assert!(c.to_sql_literal(&ColumnValue::from("noon")).is_err());
    }

    #[test]
    fn test_time_is_a_signed_duration() {
        let c = column("time", None);
        let hour = 3600 * MICROS_PER_SECOND;
        assert_eq!(
            c.to_sql_literal(&ColumnValue::Int(25 * hour)).unwrap(),
            "'25:00:00'"
        );
        assert_eq!(
            c.to_sql_literal(&ColumnValue::Int(-hour)).unwrap(),
            "'-01:00:00'"
        );
        assert_eq!(
            c.to_json_value(&ColumnValue::Int(MAX_TIME_MICROS), &OutputConfig::default())
                .unwrap(),
            json!("838:59:59")
        );
        assert_eq!(
            c.to_json_value(&ColumnValue::Int(-MAX_TIME_MICROS), &OutputConfig::default())
                .unwrap(),
            json!("-838:59:59")
        );
    }

    #[test]
    fn test_time_string_input() {
        let c = column("time", Some(6));
        let cfg = OutputConfig::default();
        assert_eq!(
            c.to_json_value(&ColumnValue::from("838:59:59"), &cfg).unwrap(),
            json!("838:59:59.000000")
        );
        assert_eq!(
            c.to_json_value(&ColumnValue::from("-01:00:00.5"), &cfg).unwrap(),
            json!("-01:00:00.500000")
        );
        assert_eq!(
            c.to_sql_literal(&ColumnValue::from("25:00:00")).unwrap(),
            "'25:00:00.000000'"
        );
        assert!(c.to_sql_literal(&ColumnValue::from("839:00:00")).is_err());
    }

    #[test]
    fn test_year() {
        let c = column("year", None);
        assert_eq!(c.to_sql_literal(&ColumnValue::Int(2155)).unwrap(), "2155");
        let d = NaiveDate::from_ymd_opt(1987, 5, 5).unwrap();
        assert_eq!(
            c.to_json_value(&ColumnValue::Date(d), &OutputConfig::default()).unwrap(),
            json!(1987)
        );
        assert!(c.to_sql_literal(&ColumnValue::Int(-4)).is_err());
    }

    #[test]
    fn test_year_sql_is_four_digits() {
        let c = column("year", None);
        assert_eq!(c.to_sql_literal(&ColumnValue::Int(0)).unwrap(), "0000");
        assert_eq!(c.to_sql_literal(&ColumnValue::Int(99)).unwrap(), "0099");
        assert_eq!(
            format_value(&c, &ColumnValue::Int(0), &OutputConfig::default())
                .unwrap()
                .as_deref(),
            Some("0000")
        );
        assert_eq!(
            c.to_json_value(&ColumnValue::Int(0), &OutputConfig::default()).unwrap(),
            json!(0)
        );
    }

    #[test]
    fn test_unsigned_zero_is_broken_for_timestamp() {
        let ts = column("timestamp", None);
        let dt = column("datetime", None);
        assert_eq!(format_value(&ts, &ColumnValue::UInt(0), &null_zero_dates()).unwrap(), None);
        assert_eq!(
            format_value(&ts, &ColumnValue::UInt(0), &OutputConfig::default())
                .unwrap()
                .as_deref(),
            Some(ZERO_DATETIME)
        );
        assert_eq!(
            format_value(&dt, &ColumnValue::UInt(0), &OutputConfig::default())
                .unwrap()
                .as_deref(),
            Some("1970-01-01 00:00:00")
        );
    }

    #[test]
    fn test_zero_date_string_follows_null_policy() {
        let ts = column("timestamp", Some(3));
        let zero = ColumnValue::from("0000-00-00 00:00:00");
        assert_eq!(format_value(&ts, &zero, &null_zero_dates()).unwrap(), None);
        assert_eq!(
            format_value(&ts, &zero, &OutputConfig::default()).unwrap().as_deref(),
            Some("0000-00-00 00:00:00.000")
        );
        assert_eq!(
            ts.to_sql_literal(&ColumnValue::from("0000-00-00 00:00:00.000")).unwrap(),
            "'0000-00-00 00:00:00.000'"
        );

        let date = column("date", None);
        assert_eq!(
            date.to_json_value(&ColumnValue::from("0000-00-00"), &null_zero_dates())
                .unwrap(),
            Value::Null
        );
        assert!(date.to_sql_literal(&ColumnValue::from("0000-00-01")).is_err());
    }

    #[test]
    fn test_format_value_rejects_non_temporal() {
        let c = column("varchar", None);
        let err = format_value(&c, &ColumnValue::Int(1), &OutputConfig::default()).unwrap_err();
        assert!(matches!(err, ColumnError::UnsupportedType { .. }));
    }

    #[test]
    fn test_input_not_mutated() {
        let c = column("datetime", Some(6));
        let v = ColumnValue::Int(1_000_001);
        let before = v.clone();
        let _ = format_value(&c, &v, &OutputConfig::default());
        assert_eq!(v, before);
    }
}
