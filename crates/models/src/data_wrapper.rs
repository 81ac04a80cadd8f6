use chrono::NaiveDateTime;
use jsoncmp_codec::{Decode, DecodeError, Decoder, Encode, EncodeError, Encoder};
use jsoncmp_value::Value;

use crate::person::PersonRef;
use crate::product::Product;

pub const DEFAULT_VERSION: &str = "1.0";

/// Aggregate root: everything one document carries.
#[derive(Debug, Clone, PartialEq)]
pub struct DataWrapper {
    pub persons: Vec<PersonRef>,
    pub products: Vec<Product>,
    pub generated_at: NaiveDateTime,
    pub version: String,
}

impl Default for DataWrapper {
    fn default() -> Self {
        Self {
            persons: Vec::new(),
            products: Vec::new(),
            generated_at: NaiveDateTime::default(),
            version: DEFAULT_VERSION.to_string(),
        }
    }
}

impl Encode for DataWrapper {
    fn encode(&self, enc: &mut Encoder<'_>) -> Result<Value, EncodeError> {
        enc.object(|obj| {
            obj.field("Persons", &self.persons)?;
            obj.field("Products", &self.products)?;
            obj.field("GeneratedAt", &self.generated_at)?;
            obj.field("Version", &self.version)
        })
    }
}

impl Decode for DataWrapper {
    fn decode(value: &Value, dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        let obj = dec.object(value)?;
        Ok(DataWrapper {
            persons: obj.field(dec, "Persons")?,
            products: obj.field(dec, "Products")?,
            generated_at: obj.field(dec, "GeneratedAt")?,
            version: obj.field_or_else(dec, "Version", || DEFAULT_VERSION.to_string())?,
        })
    }
}
