//! Codec options.

use serde::{Deserialize, Serialize};

use crate::date::{DateCodec, DateFormat};
use crate::error::ConfigError;
use crate::naming::FieldNaming;

/// How enum fields are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EnumPolicy {
    /// Declared variant name, e.g. `"Electronics"`.
    Symbolic,
    /// Declared integer position, e.g. `0`.
    #[default]
    Ordinal,
}

/// What to do when a back-reference points at an object that is already
/// being encoded on the current path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CyclePolicy {
    /// Fail with `EncodeError::CyclicReference`.
    #[default]
    Fail,
    /// Drop the back-reference field.
    OmitEdge,
    /// Follow back-references while fewer than `n` repeated objects are on
    /// the path, then drop the field. `DepthLimit(0)` behaves like `OmitEdge`.
    DepthLimit(u32),
}

/// Encoding and decoding options.
///
/// In configuration text the keys are camelCase:
///
/// ```
/// use jsoncmp_codec::{CyclePolicy, EncodingConfig, EnumPolicy};
///
/// let config = EncodingConfig::from_json(
///     r#"{"omitNulls": true, "enumPolicy": "symbolic",
///         "datePattern": "dd.MM.yyyy", "cyclePolicy": {"depthLimit": 1}}"#,
/// ).unwrap();
/// assert!(config.omit_nulls);
/// assert_eq!(config.enum_policy, EnumPolicy::Symbolic);
/// assert_eq!(config.cycle_policy, CyclePolicy::DepthLimit(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct EncodingConfig {
    /// Drop fields whose value is null instead of writing `null`.
    pub omit_nulls: bool,
    pub enum_policy: EnumPolicy,
    #[serde(rename = "datePattern")]
    pub date_format: DateFormat,
    pub field_naming: FieldNaming,
    pub cycle_policy: CyclePolicy,
    /// Deepest object/array nesting the encoder will produce.
    pub max_depth: usize,
    /// Match JSON keys to declared fields ignoring case when decoding.
    pub decode_case_insensitive: bool,
    /// Accept integer ordinals for enum fields when decoding.
    pub accept_enum_ordinals: bool,
    pub pretty_print: bool,
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            omit_nulls: false,
            enum_policy: EnumPolicy::Ordinal,
            date_format: DateFormat::Iso8601,
            field_naming: FieldNaming::Verbatim,
            cycle_policy: CyclePolicy::Fail,
            max_depth: 64,
            decode_case_insensitive: true,
            accept_enum_ordinals: true,
            pretty_print: false,
        }
    }
}

impl EncodingConfig {
    /// Load options from JSON text and validate them.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.compile().map(|_| ())
    }

    pub(crate) fn compile(&self) -> Result<DateCodec, ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroMaxDepth);
        }
        DateCodec::new(&self.date_format)
    }
}
