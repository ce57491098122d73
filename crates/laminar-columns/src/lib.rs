//! # `LaminarDB` Columns
//!
//! Column type model for the MySQL CDC source: maps binlog type names to
//! compact tags, canonicalizes type-name synonyms, and converts decoded row
//! values into replayable SQL literals and JSON values.
//!
//! ```text
//! type name + metadata ──▶ canonicalize ──▶ ColumnDef::build ──▶ TYPE_REGISTRY
//!                                               │
//! decoded value + OutputConfig ─────────────────┴──▶ to_sql_literal / to_json_value
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

/// Type-name canonicalization (synonyms and size classes)
pub mod canonical;

/// Column definitions, the column factory and per-type value codecs
pub mod column;

/// Output configuration for value codecs
pub mod config;

/// Error types
pub mod error;

/// String interning for column names and charsets
pub mod intern;

/// Type tag registry
pub mod registry;

/// Decoded cell values
pub mod value;

pub use canonical::canonicalize;
pub use column::{ColumnDef, ColumnDescriptor, ColumnKind};
pub use config::{BinaryEncoding, OutputConfig};
pub use error::{ColumnError, ColumnResult};
pub use registry::{TypeRegistry, TypeTag, TYPE_REGISTRY};
pub use value::ColumnValue;
