//! Output configuration consumed by the value codecs.
//!
//! [`OutputConfig`] is a read-only snapshot of the policy switches that
//! change how decoded values are rendered. It is built by the producer
//! layer, either programmatically or from flat `output.*` properties via
//! [`OutputConfig::from_properties`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{ColumnError, ColumnResult};

/// How binary column values are rendered in JSON output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinaryEncoding {
    /// Standard base64 with padding.
    #[default]
    Base64,
    /// Lowercase hexadecimal.
    Hex,
}

impl std::str::FromStr for BinaryEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "base64" => Ok(BinaryEncoding::Base64),
            "hex" => Ok(BinaryEncoding::Hex),
            other => Err(format!("unknown binary encoding '{other}'")),
        }
    }
}

/// Policy switches applied when converting values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Emit `null` instead of `0000-00-00 00:00:00` for broken dates.
    pub zero_dates_as_null: bool,

    /// Encoding used for binary string columns in JSON.
    pub binary_encoding: BinaryEncoding,

    /// Emit DECIMAL values as JSON strings to keep full precision.
    pub decimal_as_string: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            zero_dates_as_null: false,
            binary_encoding: BinaryEncoding::Base64,
            decimal_as_string: true,
        }
    }
}

impl OutputConfig {
    /// Parses a config from flat `output.*` properties.
    ///
    /// Unknown keys are ignored so the same property map can be shared
    /// with other components.
    ///
    /// # Errors
    ///
    /// Returns [`ColumnError::InvalidConfig`] if a recognised key has an
    /// unparsable value.
    pub fn from_properties(props: &HashMap<String, String>) -> ColumnResult<Self> {
        let mut cfg = Self::default();

        if let Some(v) = props.get("output.zero_dates_as_null") {
            cfg.zero_dates_as_null = parse_bool("output.zero_dates_as_null", v)?;
        }
        if let Some(v) = props.get("output.binary_encoding") {
            cfg.binary_encoding = v.parse().map_err(|message| ColumnError::InvalidConfig {
                key: "output.binary_encoding".into(),
                message,
            })?;
        }
        if let Some(v) = props.get("output.decimal_as_string") {
            cfg.decimal_as_string = parse_bool("output.decimal_as_string", v)?;
        }

        Ok(cfg)
    }
}

fn parse_bool(key: &str, value: &str) -> ColumnResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(ColumnError::InvalidConfig {
            key: key.to_string(),
            message: format!("expected a boolean, got '{other}'"),
        }),
    }
}

/// Description of one recognised configuration key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigKeySpec {
    /// Property key.
    pub key: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// Default value rendered as a string.
    pub default: &'static str,
}

/// Returns the configuration keys understood by [`OutputConfig::from_properties`].
#[must_use]
pub fn config_key_specs() -> Vec<ConfigKeySpec> {
    vec![
        ConfigKeySpec {
            key: "output.zero_dates_as_null",
            description: "Emit null for zero/broken dates instead of 0000-00-00",
            default: "false",
        },
        ConfigKeySpec {
            key: "output.binary_encoding",
            description: "JSON encoding for binary columns (base64/hex)",
            default: "base64",
        },
        ConfigKeySpec {
            key: "output.decimal_as_string",
            description: "Emit DECIMAL values as JSON strings",
            default: "true",
        },
    ]
}
