//! Column error types.
//!
//! Provides [`ColumnError`] for type registration, canonicalization, column
//! construction and value conversion, plus a convenience [`ColumnResult`]
//! alias.
//!
//! Errors split into two classes:
//!
//! - **Schema-time** (`UnsupportedType`, `UnknownByteType`,
//!   `CapacityExceeded`, `UnknownTag`, `InvalidConfig`): the table cannot be
//!   represented and schema construction must stop.
//! - **Value-time** (`Cast`): a single cell could not be converted. The
//!   caller decides whether to skip the row, null the cell, or abort.

use thiserror::Error;

/// Result alias for column operations.
pub type ColumnResult<T> = Result<T, ColumnError>;

/// Errors that can occur while describing or converting columns.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColumnError {
    /// The canonical type name is not one of the supported column kinds.
    #[error("unsupported column type '{type_name}'")]
    UnsupportedType {
        /// The rejected canonical type name.
        type_name: String,
    },

    /// The BYTE flag was set on a type that has no binary counterpart.
    #[error("unknown type with BYTE flag: '{type_name}'")]
    UnknownByteType {
        /// The raw type name that carried the flag.
        type_name: String,
    },

    /// The type tag registry has no free tags left.
    #[error("type registry exhausted: at most {max} distinct types")]
    CapacityExceeded {
        /// Maximum number of tags the registry can hand out.
        max: usize,
    },

    /// A tag was resolved that the registry never issued.
    #[error("unknown type tag {0}")]
    UnknownTag(u8),

    /// A decoded value does not fit the column's declared type.
    #[error("cannot cast value {value} for column '{column}'")]
    Cast {
        /// Name of the column being converted.
        column: String,
        /// Debug rendering of the offending value.
        value: String,
    },

    /// An output configuration value could not be parsed.
    #[error("invalid config key '{key}': {message}")]
    InvalidConfig {
        /// The configuration key.
        key: String,
        /// What was wrong with the value.
        message: String,
    },
}

impl ColumnError {
    /// Builds a [`ColumnError::Cast`] for `column` and the offending value.
    pub fn cast(column: &str, value: &impl std::fmt::Debug) -> Self {
        ColumnError::Cast {
            column: column.to_string(),
            value: format!("{value:?}"),
        }
    }

    /// Returns `true` if the error concerns a single value and the stream
    /// can continue with the next row.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ColumnError::Cast { .. })
    }
}
