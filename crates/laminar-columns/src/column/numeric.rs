//! Integer, floating point, decimal and bit codecs.
//!
//! The binlog encodes unsigned integers in the signed storage type, so an
//! `INT UNSIGNED` holding `4294967295` arrives as `-1`. Unsigned columns
//! fold negative raw values back by adding `2^bits`.

use serde_json::Value;

use super::ColumnDef;
use crate::config::OutputConfig;
use crate::error::ColumnResult;
use crate::value::ColumnValue;

/// Values outside the column's storage range are a cast error.
fn int_value(col: &ColumnDef, bits: u8, signed: bool, value: &ColumnValue) -> ColumnResult<i64> {
    let half = 1_i64 << (bits - 1);
    let decoded = match value {
        ColumnValue::Int(v) if !signed && (-half..0).contains(v) => Some(v + (half << 1)),
        ColumnValue::Int(v) => Some(*v),
        ColumnValue::UInt(v) => i64::try_from(*v).ok(),
        _ => None,
    };
    let range = if signed { -half..half } else { 0..(half << 1) };
    decoded
        .filter(|v| range.contains(v))
        .ok_or_else(|| col.cast_error(value))
}

pub(super) fn int_sql(
    col: &ColumnDef,
    bits: u8,
    signed: bool,
    value: &ColumnValue,
) -> ColumnResult<String> {
    int_value(col, bits, signed, value).map(|v| v.to_string())
}

pub(super) fn int_json(
    col: &ColumnDef,
    bits: u8,
    signed: bool,
    value: &ColumnValue,
) -> ColumnResult<Value> {
    int_value(col, bits, signed, value).map(Value::from)
}

/// BIGINT as either signed or unsigned 64-bit.
enum Big {
    Signed(i64),
    Unsigned(u64),
}

#[allow(clippy::cast_sign_loss)]
fn bigint_value(col: &ColumnDef, signed: bool, value: &ColumnValue) -> ColumnResult<Big> {
    match value {
        // Two's complement reinterpretation is exactly `v + 2^64`.
        ColumnValue::Int(v) if !signed && *v < 0 => Ok(Big::Unsigned(*v as u64)),
        ColumnValue::Int(v) => Ok(Big::Signed(*v)),
        ColumnValue::UInt(v) => Ok(Big::Unsigned(*v)),
        _ => Err(col.cast_error(value)),
    }
}

pub(super) fn bigint_sql(
    col: &ColumnDef,
    signed: bool,
    value: &ColumnValue,
) -> ColumnResult<String> {
    Ok(match bigint_value(col, signed, value)? {
        Big::Signed(v) => v.to_string(),
        Big::Unsigned(v) => v.to_string(),
    })
}

pub(super) fn bigint_json(
    col: &ColumnDef,
    signed: bool,
    value: &ColumnValue,
) -> ColumnResult<Value> {
    Ok(match bigint_value(col, signed, value)? {
        Big::Signed(v) => Value::from(v),
        Big::Unsigned(v) => Value::from(v),
    })
}

#[allow(clippy::cast_precision_loss)]
fn float_value(col: &ColumnDef, value: &ColumnValue) -> ColumnResult<f64> {
    let v = match value {
        // Go through the shortest f32 rendering so 1.1f32 stays 1.1.
        ColumnValue::Float(f) => f
            .to_string()
            .parse::<f64>()
            .map_err(|_| col.cast_error(value))?,
        ColumnValue::Double(d) => *d,
        ColumnValue::Int(i) => *i as f64,
        _ => return Err(col.cast_error(value)),
    };
    if v.is_finite() {
        Ok(v)
    } else {
        Err(col.cast_error(value))
    }
}

pub(super) fn float_sql(col: &ColumnDef, value: &ColumnValue) -> ColumnResult<String> {
    float_value(col, value).map(|v| v.to_string())
}

pub(super) fn float_json(col: &ColumnDef, value: &ColumnValue) -> ColumnResult<Value> {
    let v = float_value(col, value)?;
    serde_json::Number::from_f64(v)
        .map(Value::Number)
        .ok_or_else(|| col.cast_error(value))
}

/// Returns true for `[+-]digits[.digits]` with at least one digit.
fn is_decimal_literal(s: &str) -> bool {
    let unsigned = s.strip_prefix(['-', '+']).unwrap_or(s);
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let all_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
    !(int_part.is_empty() && frac_part.is_empty())
        && all_digits(int_part)
        && all_digits(frac_part)
}

fn decimal_text(col: &ColumnDef, value: &ColumnValue) -> ColumnResult<String> {
    match value {
        ColumnValue::Decimal(s) | ColumnValue::String(s) if is_decimal_literal(s) => Ok(s.clone()),
        ColumnValue::Int(v) => Ok(v.to_string()),
        ColumnValue::UInt(v) => Ok(v.to_string()),
        _ => Err(col.cast_error(value)),
    }
}

pub(super) fn decimal_sql(col: &ColumnDef, value: &ColumnValue) -> ColumnResult<String> {
    decimal_text(col, value)
}

pub(super) fn decimal_json(
    col: &ColumnDef,
    value: &ColumnValue,
    config: &OutputConfig,
) -> ColumnResult<Value> {
    let text = decimal_text(col, value)?;
    if config.decimal_as_string {
        return Ok(Value::String(text));
    }
    text.parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| col.cast_error(value))
}

#[allow(clippy::cast_sign_loss)]
fn bit_value(col: &ColumnDef, value: &ColumnValue) -> ColumnResult<u64> {
    match value {
        ColumnValue::Bytes(bytes) if bytes.len() <= 8 => Ok(bytes
            .iter()
            .fold(0_u64, |acc, &b| (acc << 8) | u64::from(b))),
        ColumnValue::Int(v) => Ok(*v as u64),
        ColumnValue::UInt(v) => Ok(*v),
        _ => Err(col.cast_error(value)),
    }
}

pub(super) fn bit_sql(col: &ColumnDef, value: &ColumnValue) -> ColumnResult<String> {
    bit_value(col, value).map(|bits| format!("b'{bits:b}'"))
}

pub(super) fn bit_json(
    col: &ColumnDef,
    column_length: Option<u64>,
    value: &ColumnValue,
) -> ColumnResult<Value> {
    let bits = bit_value(col, value)?;
    if column_length == Some(1) {
        Ok(Value::Bool(bits != 0))
    } else {
        Ok(Value::from(bits))
    }
}
