//! String, binary and JSON column codecs.

use std::borrow::Cow;
use std::fmt::Write as _;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::Value;

use super::{ColumnDef, BINARY_CHARSET};
use crate::config::{BinaryEncoding, OutputConfig};
use crate::error::ColumnResult;
use crate::value::ColumnValue;

/// Quotes `s` as a MySQL string literal.
pub(crate) fn quote_sql(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\0' => out.push_str("\\0"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{1a}' => out.push_str("\\Z"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

fn to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(out, "{b:02x}");
    }
    out
}

fn is_binary(charset: Option<&str>) -> bool {
    charset == Some(BINARY_CHARSET)
}

/// Decodes raw text bytes according to the column charset.
fn decode_text<'a>(charset: Option<&str>, bytes: &'a [u8]) -> Option<Cow<'a, str>> {
    match charset {
        Some("latin1") => Some(Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect())),
        Some("ascii") if !bytes.is_ascii() => None,
        _ => std::str::from_utf8(bytes).ok().map(Cow::Borrowed),
    }
}

fn text<'a>(
    col: &ColumnDef,
    charset: Option<&str>,
    value: &'a ColumnValue,
) -> ColumnResult<Cow<'a, str>> {
    match value {
        ColumnValue::String(s) => Ok(Cow::Borrowed(s)),
        ColumnValue::Bytes(b) => decode_text(charset, b).ok_or_else(|| col.cast_error(value)),
        _ => Err(col.cast_error(value)),
    }
}

fn binary<'a>(col: &ColumnDef, value: &'a ColumnValue) -> ColumnResult<&'a [u8]> {
    match value {
        ColumnValue::Bytes(b) => Ok(b),
        ColumnValue::String(s) => Ok(s.as_bytes()),
        _ => Err(col.cast_error(value)),
    }
}

pub(super) fn string_sql(
    col: &ColumnDef,
    charset: Option<&str>,
    value: &ColumnValue,
) -> ColumnResult<String> {
    if is_binary(charset) {
        let bytes = binary(col, value)?;
        return Ok(format!("x'{}'", to_hex(bytes)));
    }
    text(col, charset, value).map(|s| quote_sql(&s))
}

pub(super) fn string_json(
    col: &ColumnDef,
    charset: Option<&str>,
    value: &ColumnValue,
    config: &OutputConfig,
) -> ColumnResult<Value> {
    if is_binary(charset) {
        let bytes = binary(col, value)?;
        let encoded = match config.binary_encoding {
            BinaryEncoding::Base64 => STANDARD.encode(bytes),
            BinaryEncoding::Hex => to_hex(bytes),
        };
        return Ok(Value::String(encoded));
    }
    text(col, charset, value).map(|s| Value::String(s.into_owned()))
}

fn json_document(col: &ColumnDef, value: &ColumnValue) -> ColumnResult<Value> {
    match value {
        ColumnValue::Json(v) => Ok(v.clone()),
        ColumnValue::String(s) => serde_json::from_str(s).map_err(|_| col.cast_error(value)),
        ColumnValue::Bytes(b) => serde_json::from_slice(b).map_err(|_| col.cast_error(value)),
        _ => Err(col.cast_error(value)),
    }
}

pub(super) fn json_sql(col: &ColumnDef, value: &ColumnValue) -> ColumnResult<String> {
    json_document(col, value).map(|doc| quote_sql(&doc.to_string()))
}

pub(super) fn json_json(col: &ColumnDef, value: &ColumnValue) -> ColumnResult<Value> {
    json_document(col, value)
}
