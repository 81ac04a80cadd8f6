//! [`Value`] trees back to typed objects.
//!
//! Decoding is lenient about shape and strict about types: unknown keys are
//! ignored, missing or null fields take the type's default, but a present
//! value of the wrong kind fails with the path of the offending field.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDateTime;
use jsoncmp_value::{Decimal, Map, Value, ValueKind};

use crate::config::EncodingConfig;
use crate::date::DateCodec;
use crate::enums::{is_declared, ordinal_of, EnumRepr};
use crate::error::{DecodeError, FieldPath};
use crate::naming::keys_match_ignore_case;

pub trait Decode: Sized {
    fn decode(value: &Value, dec: &mut Decoder<'_>) -> Result<Self, DecodeError>;
}

pub struct Decoder<'c> {
    config: &'c EncodingConfig,
    dates: DateCodec,
    path: FieldPath,
}

impl<'c> Decoder<'c> {
    pub fn new(config: &'c EncodingConfig) -> Result<Self, DecodeError> {
        let dates = config.compile()?;
        Ok(Self {
            config,
            dates,
            path: FieldPath::new(),
        })
    }

    pub fn config(&self) -> &EncodingConfig {
        self.config
    }

    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    pub fn decode<T: Decode>(&mut self, value: &Value) -> Result<T, DecodeError> {
        self.path.clear();
        T::decode(value, self)
    }

    /// View `value` as an object, or fail with a type mismatch.
    pub fn object<'v>(&self, value: &'v Value) -> Result<ObjectReader<'v>, DecodeError> {
        value
            .as_object()
            .map(|members| ObjectReader { members })
            .ok_or_else(|| self.mismatch(ValueKind::Object, value))
    }

    pub fn mismatch(&self, expected: ValueKind, found: &Value) -> DecodeError {
        DecodeError::TypeMismatch {
            path: self.path.clone(),
            expected,
            actual: found.kind(),
        }
    }

    pub fn timestamp(&self, value: &Value) -> Result<NaiveDateTime, DecodeError> {
        let text = value
            .as_str()
            .ok_or_else(|| self.mismatch(ValueKind::String, value))?;
        self.dates
            .parse(text)
            .ok_or_else(|| DecodeError::InvalidTimestamp {
                path: self.path.clone(),
                text: text.to_string(),
                format: self.dates.describe().to_string(),
            })
    }

    /// Accepts the symbolic name, and the declared ordinal when
    /// `accept_enum_ordinals` is set.
    pub fn enum_value<E: EnumRepr>(&self, value: &Value) -> Result<E, DecodeError> {
        let ordinal = match value {
            Value::String(name) => ordinal_of::<E>(name, self.config.decode_case_insensitive),
            Value::Number(n) if self.config.accept_enum_ordinals => {
                n.as_i64().filter(|o| is_declared::<E>(*o))
            }
            Value::Number(_) => None,
            other => return Err(self.mismatch(ValueKind::String, other)),
        };
        ordinal
            .and_then(E::from_ordinal)
            .ok_or_else(|| DecodeError::UnknownEnumValue {
                path: self.path.clone(),
                type_name: E::TYPE_NAME,
                value: value.to_string(),
            })
    }
}

/// Declared-field access to one JSON object.
pub struct ObjectReader<'v> {
    members: &'v Map,
}

impl<'v> ObjectReader<'v> {
    /// The member for declared field `name`, matched under the naming policy
    /// and, when enabled, ignoring case.
    pub fn lookup(&self, dec: &Decoder<'_>, name: &str) -> Option<&'v Value> {
        let key = dec.config.field_naming.apply(name);
        if let Some(value) = self.members.get(key.as_str()) {
            return Some(value);
        }
        if !dec.config.decode_case_insensitive {
            return None;
        }
        self.members
            .iter()
            .find(|(k, _)| keys_match_ignore_case(k, &key))
            .map(|(_, v)| v)
    }

    /// Decode a declared field; missing and null both give `T::default()`.
    pub fn field<T: Decode + Default>(&self, dec: &mut Decoder<'_>, name: &str) -> Result<T, DecodeError> {
        self.field_or_else(dec, name, T::default)
    }

    pub fn field_or_else<T, F>(&self, dec: &mut Decoder<'_>, name: &str, default: F) -> Result<T, DecodeError>
    where
        T: Decode,
        F: FnOnce() -> T,
    {
        match self.lookup(dec, name) {
            None | Some(Value::Null) => Ok(default()),
            Some(value) => {
                dec.path.push_key(name);
                let decoded = T::decode(value, dec);
                dec.path.pop();
                decoded
            }
        }
    }
}

impl Decode for bool {
    fn decode(value: &Value, dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        value
            .as_bool()
            .ok_or_else(|| dec.mismatch(ValueKind::Bool, value))
    }
}

macro_rules! decode_int {
    ($($t:ty),*) => {
        $(
            impl Decode for $t {
                fn decode(value: &Value, dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
                    let n = value
                        .as_number()
                        .ok_or_else(|| dec.mismatch(ValueKind::Number, value))?;
                    n.as_i64()
                        .and_then(|i| <$t>::try_from(i).ok())
                        .or_else(|| n.as_u64().and_then(|u| <$t>::try_from(u).ok()))
                        .ok_or_else(|| DecodeError::NumberOutOfRange {
                            path: dec.path.clone(),
                            value: n.to_string(),
                            target: stringify!($t),
                        })
                }
            }
        )*
    };
}

decode_int!(i32, i64, u32, u64, usize);

impl Decode for f64 {
    fn decode(value: &Value, dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        let n = value
            .as_number()
            .ok_or_else(|| dec.mismatch(ValueKind::Number, value))?;
        n.as_f64()
            .filter(|f| f.is_finite())
            .ok_or_else(|| DecodeError::NumberOutOfRange {
                path: dec.path.clone(),
                value: n.to_string(),
                target: "f64",
            })
    }
}

impl Decode for Decimal {
    fn decode(value: &Value, dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        let n = value
            .as_number()
            .ok_or_else(|| dec.mismatch(ValueKind::Number, value))?;
        n.as_decimal().ok_or_else(|| DecodeError::NumberOutOfRange {
            path: dec.path.clone(),
            value: n.to_string(),
            target: "Decimal",
        })
    }
}

impl Decode for String {
    fn decode(value: &Value, dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| dec.mismatch(ValueKind::String, value))
    }
}

impl Decode for NaiveDateTime {
    fn decode(value: &Value, dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        dec.timestamp(value)
    }
}

impl Decode for Value {
    fn decode(value: &Value, _: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        Ok(value.clone())
    }
}

impl Decode for Map {
    fn decode(value: &Value, dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        value
            .as_object()
            .cloned()
            .ok_or_else(|| dec.mismatch(ValueKind::Object, value))
    }
}

impl<T: Decode> Decode for Option<T> {
    fn decode(value: &Value, dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        if value.is_null() {
            return Ok(None);
        }
        T::decode(value, dec).map(Some)
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode(value: &Value, dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        let items = value
            .as_array()
            .ok_or_else(|| dec.mismatch(ValueKind::Array, value))?;
        let mut out = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            dec.path.push_index(i);
            let decoded = T::decode(item, dec);
            dec.path.pop();
            out.push(decoded?);
        }
        Ok(out)
    }
}

impl<T: Decode> Decode for Box<T> {
    fn decode(value: &Value, dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        T::decode(value, dec).map(Box::new)
    }
}

impl<T: Decode> Decode for Rc<RefCell<T>> {
    fn decode(value: &Value, dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        T::decode(value, dec).map(|t| Rc::new(RefCell::new(t)))
    }
}
