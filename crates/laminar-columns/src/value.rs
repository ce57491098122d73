//! Decoded cell values handed over by the binlog reader.
//!
//! The reader decodes the wire bytes; this crate only sees the resulting
//! [`ColumnValue`]. Its shape follows the physical encoding of the source
//! column, so one logical type may arrive in several shapes (a DATETIME can
//! be a [`NaiveDateTime`] from a snapshot query or an `Int` of epoch
//! microseconds from a row event).

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Raw integer that marks a broken or zero date.
pub const ZERO_DATE_SENTINEL: i64 = i64::MIN;

/// A single decoded column value.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValue {
    /// SQL NULL.
    Null,
    /// Signed integer. Temporal columns use it for epoch microseconds
    /// (UTC), TIME for microseconds since midnight.
    Int(i64),
    /// Unsigned integer (BIGINT UNSIGNED above `i64::MAX`).
    UInt(u64),
    /// FLOAT.
    Float(f32),
    /// DOUBLE.
    Double(f64),
    /// DECIMAL in its exact textual form.
    Decimal(String),
    /// Text already decoded to UTF-8.
    String(String),
    /// Raw bytes: undecoded text, BLOB, BIT or geometry payloads.
    Bytes(Vec<u8>),
    /// DATE.
    Date(NaiveDate),
    /// DATETIME without time zone.
    DateTime(NaiveDateTime),
    /// TIMESTAMP normalized to UTC.
    Timestamp(DateTime<Utc>),
    /// TIME of day.
    Time(NaiveTime),
    /// Parsed JSON document.
    Json(serde_json::Value),
}

impl ColumnValue {
    /// Returns `true` for [`ColumnValue::Null`].
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, ColumnValue::Null)
    }

    /// Returns the value as `i64` if it is an integer that fits.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ColumnValue::Int(v) => Some(*v),
            ColumnValue::UInt(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }
}

impl From<i64> for ColumnValue {
    fn from(v: i64) -> Self {
        ColumnValue::Int(v)
    }
}

impl From<u64> for ColumnValue {
    fn from(v: u64) -> Self {
        ColumnValue::UInt(v)
    }
}

impl From<f64> for ColumnValue {
    fn from(v: f64) -> Self {
        ColumnValue::Double(v)
    }
}

impl From<&str> for ColumnValue {
    fn from(v: &str) -> Self {
        ColumnValue::String(v.to_string())
    }
}

impl From<String> for ColumnValue {
    fn from(v: String) -> Self {
        ColumnValue::String(v)
    }
}

impl From<Vec<u8>> for ColumnValue {
    fn from(v: Vec<u8>) -> Self {
        ColumnValue::Bytes(v)
    }
}

impl From<NaiveDate> for ColumnValue {
    fn from(v: NaiveDate) -> Self {
        ColumnValue::Date(v)
    }
}

impl From<NaiveDateTime> for ColumnValue {
    fn from(v: NaiveDateTime) -> Self {
        ColumnValue::DateTime(v)
    }
}

impl From<DateTime<Utc>> for ColumnValue {
    fn from(v: DateTime<Utc>) -> Self {
        ColumnValue::Timestamp(v)
    }
}

impl From<NaiveTime> for ColumnValue {
    fn from(v: NaiveTime) -> Self {
        ColumnValue::Time(v)
    }
}

impl From<serde_json::Value> for ColumnValue {
    fn from(v: serde_json::Value) -> Self {
        ColumnValue::Json(v)
    }
}

impl<T: Into<ColumnValue>> From<Option<T>> for ColumnValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(ColumnValue::Null, Into::into)
    }
}
