//! Canonicalization of MySQL type names.
//!
//! MySQL exposes the same column type under several spellings (`INTEGER`,
//! `INT4`, `int`) and leaves the size class of `TEXT`/`BLOB` to the declared
//! length. [`canonicalize`] folds all of that into the closed vocabulary
//! understood by [`ColumnDef::build`](crate::column::ColumnDef::build).
//!
//! Rules, in order:
//!
//! 1. BYTE flag: character types become their binary counterpart.
//! 2. Long-string flag: `varchar`, `varbinary` and `binary` widen to the
//!    medium size class.
//! 3. Synonyms fold to one canonical name.
//! 4. `text` and `blob` with a known length pick a `tiny`/`medium`/`long`
//!    prefix from the length.
//! 5. Anything else passes through unchanged.

use std::borrow::Cow;

use crate::error::{ColumnError, ColumnResult};

const TEXT_CLASSES: [&str; 4] = ["tinytext", "text", "mediumtext", "longtext"];
const BLOB_CLASSES: [&str; 4] = ["tinyblob", "blob", "mediumblob", "longblob"];

/// Returns the canonical type name for a raw MySQL type name.
///
/// The input is matched case-insensitively. Unrecognized names are returned
/// unchanged (lowercased) and validated later by the column factory.
///
/// # Errors
///
/// Returns [`ColumnError::UnknownByteType`] if `byte_flag` is set on a type
/// that has no binary counterpart.
pub fn canonicalize(
    raw_type: &str,
    long_string_flag: bool,
    column_length: Option<u64>,
    byte_flag: bool,
) -> ColumnResult<Cow<'_, str>> {
    let lowered: Cow<'_, str> = if raw_type.bytes().any(|b| b.is_ascii_uppercase()) {
        Cow::Owned(raw_type.to_ascii_lowercase())
    } else {
        Cow::Borrowed(raw_type)
    };

    match fold(&lowered, long_string_flag, column_length, byte_flag)? {
        Some(canonical) => Ok(Cow::Borrowed(canonical)),
        None => Ok(lowered),
    }
}

/// Applies the rewrite rules; `None` means the name is already canonical.
fn fold(
    ty: &str,
    long_string_flag: bool,
    column_length: Option<u64>,
    byte_flag: bool,
) -> ColumnResult<Option<&'static str>> {
    let byte_type = if byte_flag {
        Some(char_to_byte_type(ty)?)
    } else {
        None
    };
    let ty = match byte_type {
        Some(binary) => binary,
        None => ty,
    };

    if long_string_flag {
        match ty {
            "varchar" => return Ok(Some("mediumtext")),
            "varbinary" => return Ok(Some("mediumblob")),
            "binary" => return Ok(Some("mediumtext")),
            _ => {}
        }
    }

    let folded = match ty {
        "character" | "nchar" => Some("char"),
        "text" => column_length.map(|len| size_class(&TEXT_CLASSES, len)),
        "blob" => column_length.map(|len| size_class(&BLOB_CLASSES, len)),
        "nvarchar" | "varying" => Some("varchar"),
        "bool" | "boolean" | "int1" => Some("tinyint"),
        "int2" => Some("smallint"),
        "int3" | "middleint" => Some("mediumint"),
        "int4" | "integer" => Some("int"),
        "int8" | "serial" => Some("bigint"),
        "float4" => Some("float"),
        "real" | "float8" => Some("double"),
        "numeric" | "fixed" => Some("decimal"),
        "long" => Some("mediumtext"),
        _ => None,
    };
    Ok(folded.or(byte_type))
}

fn char_to_byte_type(ty: &str) -> ColumnResult<&'static str> {
    match ty {
        "char" | "character" => Ok("binary"),
        "varchar" | "varying" => Ok("varbinary"),
        "tinytext" => Ok("tinyblob"),
        "text" => Ok("blob"),
        "mediumtext" | "long" => Ok("mediumblob"),
        "longtext" => Ok("longblob"),
        _ => Err(ColumnError::UnknownByteType {
            type_name: ty.to_string(),
        }),
    }
}

/// Picks the size class whose exclusive upper bound first exceeds `len`.
fn size_class(classes: &[&'static str; 4], len: u64) -> &'static str {
    if len < (1 << 8) {
        classes[0]
    } else if len < (1 << 16) {
        classes[1]
    } else if len < (1 << 24) {
        classes[2]
    } else {
        classes[3]
    }
}
