//! Column definitions and their value codecs.
//!
//! A [`ColumnDef`] describes one column of a replicated MySQL table: its
//! name, ordinal position, canonical type (as a [`TypeTag`]) and the
//! type-specific metadata held in [`ColumnKind`]. Every kind knows how to
//! render a decoded [`ColumnValue`] two ways:
//!
//! - [`ColumnDef::to_sql_literal`]: a literal that can be embedded in a
//!   replayed SQL statement.
//! - [`ColumnDef::to_json_value`]: a JSON value for the producer layer,
//!   shaped by an [`OutputConfig`].
//!
//! # Example
//!
//! ```rust
//! use laminar_columns::canonical::canonicalize;
//! use laminar_columns::column::ColumnDef;
//! use laminar_columns::config::OutputConfig;
//! use laminar_columns::value::ColumnValue;
//!
//! let ty = canonicalize("INTEGER", false, None, false).unwrap();
//! let col = ColumnDef::build("id", None, &ty, 0, false, None, None).unwrap();
//!
//! assert_eq!(&*col.type_name().unwrap(), "int");
//! assert_eq!(col.to_sql_literal(&ColumnValue::Int(-1)).unwrap(), "4294967295");
//!
//! let json = col.to_json_value(&ColumnValue::Int(7), &OutputConfig::default()).unwrap();
//! assert_eq!(json, serde_json::json!(7));
//! ```

mod collection;
mod geometry;
mod numeric;
mod string;
pub mod temporal;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::canonical::canonicalize;
use crate::config::OutputConfig;
use crate::error::{ColumnError, ColumnResult};
use crate::intern::intern;
use crate::registry::{TypeTag, TYPE_REGISTRY};
use crate::value::ColumnValue;

/// Charset assigned to every binary string column.
pub const BINARY_CHARSET: &str = "binary";

/// Type-specific metadata of a column.
///
/// The set of kinds is closed: [`ColumnDef::build`] rejects any canonical
/// type that does not map to one of these variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnKind {
    /// `tinyint`, `smallint`, `mediumint`, `int`.
    Int {
        /// Storage width in bits (8, 16, 24 or 32).
        bits: u8,
        /// Whether the column is signed.
        signed: bool,
    },
    /// `bigint`.
    BigInt {
        /// Whether the column is signed.
        signed: bool,
    },
    /// Character and binary strings, `text` and `blob` families.
    String {
        /// Charset name; [`BINARY_CHARSET`] for binary types.
        charset: Option<Arc<str>>,
    },
    /// `geometry` and its subtypes.
    Geometry,
    /// `float` and `double`.
    Float,
    /// `decimal`.
    Decimal,
    /// `date`.
    Date,
    /// `datetime`.
    DateTime {
        /// Declared fractional-second digits.
        column_length: Option<u64>,
    },
    /// `timestamp`.
    Timestamp {
        /// Declared fractional-second digits.
        column_length: Option<u64>,
    },
    /// `time`.
    Time {
        /// Declared fractional-second digits.
        column_length: Option<u64>,
    },
    /// `year`.
    Year,
    /// `enum`.
    Enum {
        /// Declared members, in declaration order.
        values: Vec<String>,
    },
    /// `set`.
    Set {
        /// Declared members, in declaration order.
        values: Vec<String>,
    },
    /// `bit`.
    Bit {
        /// Declared width in bits.
        column_length: Option<u64>,
    },
    /// `json`.
    Json,
}

impl ColumnKind {
    /// Maps a canonical type name to its kind, or `None` if unsupported.
    fn from_canonical(
        type_name: &str,
        charset: Option<&str>,
        signed: bool,
        enum_values: Option<&[String]>,
        column_length: Option<u64>,
    ) -> Option<Self> {
        let values = || enum_values.map(<[String]>::to_vec).unwrap_or_default();
        let kind = match type_name {
            "tinyint" => ColumnKind::Int { bits: 8, signed },
            "smallint" => ColumnKind::Int { bits: 16, signed },
            "mediumint" => ColumnKind::Int { bits: 24, signed },
            "int" => ColumnKind::Int { bits: 32, signed },
            "bigint" => ColumnKind::BigInt { signed },
            "tinytext" | "text" | "mediumtext" | "longtext" | "varchar" | "char" => {
                ColumnKind::String {
                    charset: charset.map(intern),
                }
            }
            "tinyblob" | "blob" | "mediumblob" | "longblob" | "binary" | "varbinary" => {
                ColumnKind::String {
                    charset: Some(intern(BINARY_CHARSET)),
                }
            }
            "geometry" | "geometrycollection" | "linestring" | "multilinestring"
            | "multipoint" | "multipolygon" | "polygon" | "point" => ColumnKind::Geometry,
            "float" | "double" => ColumnKind::Float,
            "decimal" => ColumnKind::Decimal,
            "date" => ColumnKind::Date,
            "datetime" => ColumnKind::DateTime { column_length },
            "timestamp" => ColumnKind::Timestamp { column_length },
            "time" => ColumnKind::Time { column_length },
            "year" => ColumnKind::Year,
            "enum" => ColumnKind::Enum { values: values() },
            "set" => ColumnKind::Set { values: values() },
            "bit" => ColumnKind::Bit { column_length },
            "json" => ColumnKind::Json,
            _ => return None,
        };
        Some(kind)
    }
}

/// Schema-time description of one table column.
///
/// The type is fixed at construction; a type change produces a new
/// definition. Name and position may change on `ALTER TABLE`, which callers
/// apply to a clone before publishing the new schema snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    name: Arc<str>,
    position: u16,
    tag: TypeTag,
    kind: ColumnKind,
}

impl ColumnDef {
    /// Builds a column from a canonical type name.
    ///
    /// `type_name` must already be canonical (see
    /// [`canonicalize`]). Name and charset are interned; the type name is
    /// registered in the process-wide [`TYPE_REGISTRY`].
    ///
    /// # Errors
    ///
    /// Returns [`ColumnError::UnsupportedType`] if `type_name` is not a
    /// supported column type, or [`ColumnError::CapacityExceeded`] if the
    /// type registry is full.
    pub fn build(
        name: &str,
        charset: Option<&str>,
        type_name: &str,
        position: u16,
        signed: bool,
        enum_values: Option<&[String]>,
        column_length: Option<u64>,
    ) -> ColumnResult<Self> {
        let Some(kind) =
            ColumnKind::from_canonical(type_name, charset, signed, enum_values, column_length)
        else {
            tracing::warn!(column = name, type_name, "unsupported column type");
            return Err(ColumnError::UnsupportedType {
                type_name: type_name.to_string(),
            });
        };
        let tag = TYPE_REGISTRY.register_or_get(type_name)?;
        tracing::debug!(column = name, type_name, position, %tag, "built column definition");

        Ok(Self {
            name: intern(name),
            position,
            tag,
            kind,
        })
    }

    /// Canonicalizes the descriptor's type and builds the column.
    ///
    /// # Errors
    ///
    /// Propagates canonicalization and [`ColumnDef::build`] errors.
    pub fn from_descriptor(desc: &ColumnDescriptor) -> ColumnResult<Self> {
        let type_name = canonicalize(&desc.type_name, false, desc.column_length, false)?;
        Self::build(
            &desc.name,
            desc.charset.as_deref(),
            &type_name,
            desc.position,
            desc.signed,
            desc.enum_values.as_deref(),
            desc.column_length,
        )
    }

    /// Returns the descriptor this column can be rebuilt from.
    ///
    /// # Errors
    ///
    /// Returns [`ColumnError::UnknownTag`] if the type tag cannot be
    /// resolved.
    pub fn descriptor(&self) -> ColumnResult<ColumnDescriptor> {
        let (signed, enum_values) = match &self.kind {
            ColumnKind::Int { signed, .. } | ColumnKind::BigInt { signed } => (*signed, None),
            ColumnKind::Enum { values } | ColumnKind::Set { values } => {
                (true, Some(values.clone()))
            }
            _ => (true, None),
        };
        Ok(ColumnDescriptor {
            name: self.name.to_string(),
            type_name: self.type_name()?.to_string(),
            charset: self.charset().map(str::to_string),
            signed,
            enum_values,
            column_length: self.column_length(),
            position: self.position,
        })
    }

    /// Column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the column.
    pub fn set_name(&mut self, name: &str) {
        self.name = intern(name);
    }

    /// Zero-based ordinal position within the table.
    #[must_use]
    pub fn position(&self) -> u16 {
        self.position
    }

    /// Moves the column to a new ordinal position.
    pub fn set_position(&mut self, position: u16) {
        self.position = position;
    }

    /// Compact tag of the canonical type name.
    #[must_use]
    pub fn type_tag(&self) -> TypeTag {
        self.tag
    }

    /// Canonical type name, resolved through the type registry.
    ///
    /// # Errors
    ///
    /// Returns [`ColumnError::UnknownTag`] if the tag was not issued by
    /// [`TYPE_REGISTRY`].
    pub fn type_name(&self) -> ColumnResult<Arc<str>> {
        TYPE_REGISTRY.resolve(self.tag)
    }

    /// Type-specific metadata.
    #[must_use]
    pub fn kind(&self) -> &ColumnKind {
        &self.kind
    }

    /// Charset of string columns.
    #[must_use]
    pub fn charset(&self) -> Option<&str> {
        match &self.kind {
            ColumnKind::String { charset } => charset.as_deref(),
            _ => None,
        }
    }

    /// Declared length for kinds that keep one.
    #[must_use]
    pub fn column_length(&self) -> Option<u64> {
        match self.kind {
            ColumnKind::DateTime { column_length }
            | ColumnKind::Timestamp { column_length }
            | ColumnKind::Time { column_length }
            | ColumnKind::Bit { column_length } => column_length,
            _ => None,
        }
    }

    /// Whether integer columns are signed; `true` for other kinds.
    #[must_use]
    pub fn is_signed(&self) -> bool {
        match self.kind {
            ColumnKind::Int { signed, .. } | ColumnKind::BigInt { signed } => signed,
            _ => true,
        }
    }

    /// Declared members of `enum` and `set` columns.
    #[must_use]
    pub fn enum_values(&self) -> Option<&[String]> {
        match &self.kind {
            ColumnKind::Enum { values } | ColumnKind::Set { values } => Some(values),
            _ => None,
        }
    }

    /// Renders `value` as a SQL literal.
    ///
    /// # Errors
    ///
    /// Returns [`ColumnError::Cast`] if the value's shape does not fit the
    /// column type.
    pub fn to_sql_literal(&self, value: &ColumnValue) -> ColumnResult<String> {
        if value.is_null() {
            return Ok("NULL".to_string());
        }
        match &self.kind {
            ColumnKind::Int { bits, signed } => numeric::int_sql(self, *bits, *signed, value),
            ColumnKind::BigInt { signed } => numeric::bigint_sql(self, *signed, value),
            ColumnKind::String { charset } => string::string_sql(self, charset.as_deref(), value),
            ColumnKind::Geometry => geometry::geometry_sql(self, value),
            ColumnKind::Float => numeric::float_sql(self, value),
            ColumnKind::Decimal => numeric::decimal_sql(self, value),
            ColumnKind::Date => temporal::date_sql(self, value),
            ColumnKind::DateTime { column_length } => {
                temporal::datetime_sql(self, false, *column_length, value)
            }
            ColumnKind::Timestamp { column_length } => {
                temporal::datetime_sql(self, true, *column_length, value)
            }
            ColumnKind::Time { column_length } => temporal::time_sql(self, *column_length, value),
            ColumnKind::Year => temporal::year_sql(self, value),
            ColumnKind::Enum { values } => collection::enum_sql(self, values, value),
            ColumnKind::Set { values } => collection::set_sql(self, values, value),
            ColumnKind::Bit { .. } => numeric::bit_sql(self, value),
            ColumnKind::Json => string::json_sql(self, value),
        }
    }

    /// Renders `value` as a JSON value under `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ColumnError::Cast`] if the value's shape does not fit the
    /// column type.
    pub fn to_json_value(
        &self,
        value: &ColumnValue,
        config: &OutputConfig,
    ) -> ColumnResult<serde_json::Value> {
        if value.is_null() {
            return Ok(serde_json::Value::Null);
        }
        match &self.kind {
            ColumnKind::Int { bits, signed } => numeric::int_json(self, *bits, *signed, value),
            ColumnKind::BigInt { signed } => numeric::bigint_json(self, *signed, value),
            ColumnKind::String { charset } => {
                string::string_json(self, charset.as_deref(), value, config)
            }
            ColumnKind::Geometry => geometry::geometry_json(self, value),
            ColumnKind::Float => numeric::float_json(self, value),
            ColumnKind::Decimal => numeric::decimal_json(self, value, config),
            ColumnKind::Date => temporal::date_json(self, value, config),
            ColumnKind::DateTime { column_length } => {
                temporal::datetime_json(self, false, *column_length, value, config)
            }
            ColumnKind::Timestamp { column_length } => {
                temporal::datetime_json(self, true, *column_length, value, config)
            }
            ColumnKind::Time { column_length } => {
                temporal::time_json(self, *column_length, value)
            }
            ColumnKind::Year => temporal::year_json(self, value),
            ColumnKind::Enum { values } => collection::enum_json(self, values, value),
            ColumnKind::Set { values } => collection::set_json(self, values, value),
            ColumnKind::Bit { column_length } => numeric::bit_json(self, *column_length, value),
            ColumnKind::Json => string::json_json(self, value),
        }
    }

    fn cast_error(&self, value: &ColumnValue) -> ColumnError {
        ColumnError::cast(&self.name, value)
    }
}

/// Serializable description of a column, as exchanged with the schema
/// store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name.
    pub name: String,
    /// Type name, canonicalized on load.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Charset for string columns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charset: Option<String>,
    /// Signedness of integer columns.
    #[serde(default = "default_signed")]
    pub signed: bool,
    /// Members of `enum` and `set` columns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    /// Declared length (fractional digits for temporal types).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_length: Option<u64>,
    /// Ordinal position within the table.
    #[serde(default)]
    pub position: u16,
}

fn default_signed() -> bool {
    true
}

impl TryFrom<ColumnDescriptor> for ColumnDef {
    type Error = ColumnError;

    fn try_from(desc: ColumnDescriptor) -> Result<Self, Self::Error> {
        ColumnDef::from_descriptor(&desc)
    }
}

impl Serialize for ColumnDef {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.descriptor()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ColumnDef {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let desc = ColumnDescriptor::deserialize(deserializer)?;
        ColumnDef::from_descriptor(&desc).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUPPORTED: &[&str] = &[
        "tinyint",
        "smallint",
        "mediumint",
        "int",
        "bigint",
        "tinytext",
        "text",
        "mediumtext",
        "longtext",
        "varchar",
        "char",
        "tinyblob",
        "blob",
        "mediumblob",
        "longblob",
        "binary",
        "varbinary",
        "geometry",
        "geometrycollection",
        "linestring",
        "multilinestring",
        "multipoint",
        "multipolygon",
        "polygon",
        "point",
        "float",
        "double",
        "decimal",
        "date",
        "datetime",
        "timestamp",
        "time",
        "year",
        "enum",
        "set",
        "bit",
        "json",
    ];

    fn col(ty: &str) -> ColumnDef {
        ColumnDef::build("c", Some("utf8mb4"), ty, 0, true, None, None).unwrap()
    }

    #[test]
    fn test_every_supported_type_builds() {
        for ty in SUPPORTED {
            let c = col(ty);
            assert_eq!(&*c.type_name().unwrap(), *ty);
        }
    }

    #[test]
    fn test_unsupported_type() {
        for ty in ["uuid", "integer", "INT", "", "vector"] {
            let err = ColumnDef::build("c", None, ty, 0, true, None, None).unwrap_err();
            assert_eq!(
                err,
                ColumnError::UnsupportedType {
                    type_name: ty.to_string()
                }
            );
        }
    }

    #[test]
    fn test_unsupported_type_does_not_register_tag() {
        let _ = ColumnDef::build("c", None, "hyperloglog", 0, true, None, None);
        assert!(TYPE_REGISTRY.lookup("hyperloglog").is_none());
    }

    #[test]
    fn test_same_type_shares_tag() {
        let a = ColumnDef::build("a", None, "mediumint", 0, true, None, None).unwrap();
        let b = ColumnDef::build("b", None, "mediumint", 1, false, None, None).unwrap();
        assert_eq!(a.type_tag(), b.type_tag());
        assert_ne!(a.type_tag(), col("year").type_tag());
    }

    #[test]
    fn test_kind_metadata() {
        let int = ColumnDef::build("n", None, "smallint", 0, false, None, None).unwrap();
        assert_eq!(
            int.kind(),
            &ColumnKind::Int {
                bits: 16,
                signed: false
            }
        );
        assert!(!int.is_signed());

        let blob = ColumnDef::build("b", Some("utf8"), "blob", 0, true, None, None).unwrap();
        assert_eq!(blob.charset(), Some(BINARY_CHARSET));

        let ts = ColumnDef::build("t", None, "timestamp", 0, true, None, Some(6)).unwrap();
        assert_eq!(ts.column_length(), Some(6));

        let values = vec!["a".to_string(), "b".to_string()];
        let e = ColumnDef::build("e", None, "enum", 0, true, Some(&values), None).unwrap();
        assert_eq!(e.enum_values(), Some(values.as_slice()));
    }

    #[test]
    fn test_geometry_ignores_charset() {
        let g = ColumnDef::build("g", Some("utf8"), "point", 0, true, None, Some(10)).unwrap();
        assert_eq!(g.charset(), None);
        assert_eq!(g.column_length(), None);
    }

    #[test]
    fn test_names_are_interned() {
        let a = ColumnDef::build("tenant_id", Some("latin1"), "int", 0, true, None, None).unwrap();
        let b = ColumnDef::build("tenant_id", Some("latin1"), "varchar", 3, true, None, None)
            .unwrap();
        assert!(Arc::ptr_eq(&a.name, &b.name));
    }

    #[test]
    fn test_clone_is_independent() {
        let original = col("varchar");
        let mut renamed = original.clone();
        renamed.set_name("renamed");
        renamed.set_position(4);
        assert_eq!(original.name(), "c");
        assert_eq!(original.position(), 0);
        assert_eq!(renamed.name(), "renamed");
        assert_eq!(renamed.type_tag(), original.type_tag());
    }

    #[test]
    fn test_clone_enum_values_not_shared() {
        let values = vec!["x".to_string()];
        let original = ColumnDef::build("s", None, "set", 0, true, Some(&values), None).unwrap();
        let mut copy = original.clone();
        if let ColumnKind::Set { values } = &mut copy.kind {
            values.push("y".to_string());
        }
        assert_eq!(original.enum_values().unwrap().len(), 1);
    }

    #[test]
    fn test_null_renders_for_every_kind() {
        let cfg = OutputConfig::default();
        for ty in SUPPORTED {
            let c = col(ty);
            assert_eq!(c.to_sql_literal(&ColumnValue::Null).unwrap(), "NULL");
            assert_eq!(
                c.to_json_value(&ColumnValue::Null, &cfg).unwrap(),
                serde_json::Value::Null
            );
        }
    }

    #[test]
    fn test_descriptor_roundtrip() {
        let values = vec!["small".to_string(), "large".to_string()];
        let original =
            ColumnDef::build("size", None, "enum", 2, true, Some(&values), None).unwrap();
        let json = serde_json::to_string(&original).unwrap();
        let restored: ColumnDef = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn test_descriptor_canonicalizes_on_load() {
        let col: ColumnDef = serde_json::from_str(
            r#"{"name": "body", "type": "TEXT", "charset": "utf8mb4", "column_length": 70000}"#,
        )
        .unwrap();
        assert_eq!(&*col.type_name().unwrap(), "mediumtext");
        assert_eq!(col.charset(), Some("utf8mb4"));
        assert!(col.is_signed());
    }

    #[test]
    fn test_descriptor_rejects_unsupported() {
        let err = serde_json::from_str::<ColumnDef>(r#"{"name": "x", "type": "money"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("unsupported column type 'money'"));
    }
}
