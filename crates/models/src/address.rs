use std::fmt;

use jsoncmp_codec::{Decode, DecodeError, Decoder, Encode, EncodeError, Encoder};
use jsoncmp_value::Value;

/// Postal address, owned by the person it belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub country: String,
    pub postal_code: Option<String>,
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.street, self.city, self.country)
    }
}

impl Encode for Address {
    fn encode(&self, enc: &mut Encoder<'_>) -> Result<Value, EncodeError> {
        enc.object(|obj| {
            obj.field("Street", &self.street)?;
            obj.field("City", &self.city)?;
            obj.field("Country", &self.country)?;
            obj.field("PostalCode", &self.postal_code)
        })
    }
}

impl Decode for Address {
    fn decode(value: &Value, dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        let obj = dec.object(value)?;
        Ok(Address {
            street: obj.field(dec, "Street")?,
            city: obj.field(dec, "City")?,
            country: obj.field(dec, "Country")?,
            postal_code: obj.field(dec, "PostalCode")?,
        })
    }
}
