//! Configurable conversion between typed object graphs and JSON.
//!
//! Types implement [`Encode`] and [`Decode`]; an [`EncodingConfig`] decides
//! how nulls, enums, timestamps, field names and reference cycles are
//! rendered. The entry points are [`to_string`] / [`from_str`] for text and
//! [`to_value`] / [`from_value`] for [`Value`] trees.
//!
//! ```
//! use jsoncmp_codec::{from_str, to_string, Decode, Decoder, DecodeError,
//!     Encode, Encoder, EncodeError, EncodingConfig, FieldNaming};
//! use jsoncmp_value::Value;
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Tag {
//!     name: String,
//!     note: Option<String>,
//! }
//!
//! impl Encode for Tag {
//!     fn encode(&self, enc: &mut Encoder<'_>) -> Result<Value, EncodeError> {
//!         enc.object(|obj| {
//!             obj.field("Name", &self.name)?;
//!             obj.field("Note", &self.note)
//!         })
//!     }
//! }
//!
//! impl Decode for Tag {
//!     fn decode(value: &Value, dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
//!         let obj = dec.object(value)?;
//!         Ok(Tag { name: obj.field(dec, "Name")?, note: obj.field(dec, "Note")? })
//!     }
//! }
//!
//! let config = EncodingConfig {
//!     omit_nulls: true,
//!     field_naming: FieldNaming::LowerCamel,
//!     ..EncodingConfig::default()
//! };
//! let tag = Tag { name: "sale".into(), note: None };
//! let text = to_string(&tag, &config).unwrap();
//! assert_eq!(text, r#"{"name":"sale"}"#);
//! assert_eq!(from_str::<Tag>(&text, &config).unwrap(), tag);
//! ```

pub mod config;
pub mod date;
pub mod decode;
pub mod encode;
pub mod enums;
pub mod error;
pub mod naming;

pub use config::{CyclePolicy, EncodingConfig, EnumPolicy};
pub use date::{DateFormat, DatePattern};
pub use decode::{Decode, Decoder, ObjectReader};
pub use encode::{Encode, Encoder, ObjectWriter};
pub use enums::EnumRepr;
pub use error::{ConfigError, DecodeError, EncodeError, FieldPath, PathSegment};
pub use naming::FieldNaming;

use jsoncmp_value::Value;

/// Encode `value` into a [`Value`] tree.
pub fn to_value<T: Encode + ?Sized>(value: &T, config: &EncodingConfig) -> Result<Value, EncodeError> {
    let mut enc = Encoder::new(config)?;
    let tree = enc.encode(value);
    if let Err(e) = &tree {
        tracing::debug!(error = %e, "encode failed");
    }
    tree
}

/// Encode `value` to JSON text, indented when `config.pretty_print` is set.
///
/// Output is a pure function of the graph and the configuration: encoding the
/// same graph twice gives identical bytes.
pub fn to_string<T: Encode + ?Sized>(value: &T, config: &EncodingConfig) -> Result<String, EncodeError> {
    let tree = to_value(value, config)?;
    let text = jsoncmp_value::write(&tree, config.pretty_print);
    tracing::debug!(
        type_name = std::any::type_name::<T>(),
        bytes = text.len(),
        enum_policy = ?config.enum_policy,
        cycle_policy = ?config.cycle_policy,
        omit_nulls = config.omit_nulls,
        "encoded"
    );
    Ok(text)
}

/// Decode a [`Value`] tree into `T`.
pub fn from_value<T: Decode>(value: &Value, config: &EncodingConfig) -> Result<T, DecodeError> {
    let mut dec = Decoder::new(config)?;
    let decoded = dec.decode(value);
    match &decoded {
        Ok(_) => tracing::debug!(
            type_name = std::any::type_name::<T>(),
            case_insensitive = config.decode_case_insensitive,
            "decoded"
        ),
        Err(e) => tracing::debug!(error = %e, type_name = std::any::type_name::<T>(), "decode failed"),
    }
    decoded
}

/// Parse JSON text and decode it into `T`.
pub fn from_str<T: Decode>(text: &str, config: &EncodingConfig) -> Result<T, DecodeError> {
    let tree = jsoncmp_value::parse(text).inspect_err(|e| {
        tracing::debug!(error = %e, bytes = text.len(), "parse failed");
    })?;
    from_value(&tree, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsoncmp_value::Map;

    #[test]
    fn pretty_print_switch() {
        let tree: Value = [("a", Value::from(1)), ("b", Value::from(vec![Value::Null]))]
            .into_iter()
            .collect();
        let compact = to_string(&tree, &EncodingConfig::default()).unwrap();
        assert_eq!(compact, r#"{"a":1,"b":[null]}"#);
        let pretty = EncodingConfig {
            pretty_print: true,
            ..EncodingConfig::default()
        };
        assert_eq!(
            to_string(&tree, &pretty).unwrap(),
            "{\n  \"a\": 1,\n  \"b\": [\n    null\n  ]\n}"
        );
    }

    #[test]
    fn map_keys_are_data() {
        let mut map = Map::new();
        map.insert("Warranty Years".to_string(), Value::from(2));
        let config = EncodingConfig {
            field_naming: FieldNaming::LowerCamel,
            ..EncodingConfig::default()
        };
        assert_eq!(to_string(&map, &config).unwrap(), r#"{"Warranty Years":2}"#);
        assert_eq!(from_str::<Map>(r#"{"Warranty Years":2}"#, &config).unwrap(), map);
    }

    #[test]
    fn config_errors_surface_from_both_directions() {
        let config = EncodingConfig {
            date_format: DateFormat::Pattern("qq".into()),
            ..EncodingConfig::default()
        };
        assert!(matches!(
            to_value(&1, &config),
            Err(EncodeError::Config(ConfigError::InvalidDatePattern { .. }))
        ));
        assert!(matches!(
            from_str::<i32>("1", &config),
            Err(DecodeError::Config(ConfigError::InvalidDatePattern { .. }))
        ));
    }
}
