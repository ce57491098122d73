//! ENUM and SET codecs.
//!
//! Row events carry ENUM as a 1-based index into the declared members
//! (0 is MySQL's error value, the empty string) and SET as a bitmask over
//! the members. Snapshot queries deliver both as plain strings.

use std::borrow::Cow;

use serde_json::Value;

use super::string::quote_sql;
use super::ColumnDef;
use crate::error::ColumnResult;
use crate::value::ColumnValue;

fn enum_member<'a>(
    col: &ColumnDef,
    values: &'a [String],
    value: &'a ColumnValue,
) -> ColumnResult<Cow<'a, str>> {
    match value {
        ColumnValue::String(s) => Ok(Cow::Borrowed(s)),
        ColumnValue::Int(0) | ColumnValue::UInt(0) => Ok(Cow::Borrowed("")),
        ColumnValue::Int(_) | ColumnValue::UInt(_) => value
            .as_i64()
            .and_then(|i| i.checked_sub(1))
            .and_then(|i| usize::try_from(i).ok())
            .and_then(|i| values.get(i))
            .map(|s| Cow::Borrowed(s.as_str()))
            .ok_or_else(|| col.cast_error(value)),
        _ => Err(col.cast_error(value)),
    }
}

pub(super) fn enum_sql(
    col: &ColumnDef,
    values: &[String],
    value: &ColumnValue,
) -> ColumnResult<String> {
    enum_member(col, values, value).map(|s| quote_sql(&s))
}

pub(super) fn enum_json(
    col: &ColumnDef,
    values: &[String],
    value: &ColumnValue,
) -> ColumnResult<Value> {
    enum_member(col, values, value).map(|s| Value::String(s.into_owned()))
}

#[allow(clippy::cast_sign_loss)]
fn set_members<'a>(
    col: &ColumnDef,
    values: &'a [String],
    value: &'a ColumnValue,
) -> ColumnResult<Vec<&'a str>> {
    let mask = match value {
        ColumnValue::String(s) if s.is_empty() => return Ok(Vec::new()),
        ColumnValue::String(s) => return Ok(s.split(',').collect()),
        ColumnValue::Int(v) => *v as u64,
        ColumnValue::UInt(v) => *v,
        _ => return Err(col.cast_error(value)),
    };
    // Bits beyond the declared members cannot come from a valid row.
    if values.len() < 64 && mask >> values.len() != 0 {
        return Err(col.cast_error(value));
    }
    Ok(values
        .iter()
        .take(64)
        .enumerate()
        .filter(|(i, _)| mask & (1 << i) != 0)
        .map(|(_, v)| v.as_str())
        .collect())
}

pub(super) fn set_sql(
    col: &ColumnDef,
    values: &[String],
    value: &ColumnValue,
) -> ColumnResult<String> {
    set_members(col, values, value).map(|members| quote_sql(&members.join(",")))
}

pub(super) fn set_json(
    col: &ColumnDef,
    values: &[String],
    value: &ColumnValue,
) -> ColumnResult<Value> {
    set_members(col, values, value)
        .map(|members| Value::Array(members.into_iter().map(Value::from).collect()))
}
