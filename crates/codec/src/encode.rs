//! Typed objects to [`Value`] trees.
//!
//! Types describe themselves through [`Encode`]; the encoder applies the
//! configured policies while they do. Struct types build their object through
//! [`Encoder::object`] so that field naming, null omission and depth checks
//! happen in one place.
//!
//! Back-references are followed through [`ObjectWriter::back_reference`].
//! The encoder keeps the identities of the objects on the current path (the
//! visiting stack) and consults the cycle policy whenever a back-reference
//! points at one of them. Identity is the object's address, never its
//! contents: two equal people are still two people.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDateTime;
use jsoncmp_value::{Decimal, Map, Number, Value};

use crate::config::{CyclePolicy, EncodingConfig, EnumPolicy};
use crate::date::DateCodec;
use crate::enums::EnumRepr;
use crate::error::{ConfigError, EncodeError, FieldPath};

pub trait Encode {
    fn encode(&self, enc: &mut Encoder<'_>) -> Result<Value, EncodeError>;
}

pub struct Encoder<'c> {
    config: &'c EncodingConfig,
    dates: DateCodec,
    path: FieldPath,
    visiting: Vec<usize>,
    /// Entries of `visiting` that repeat an earlier entry.
    repeats: usize,
    depth: usize,
}

impl<'c> Encoder<'c> {
    pub fn new(config: &'c EncodingConfig) -> Result<Self, EncodeError> {
        let dates = config.compile()?;
        Ok(Self {
            config,
            dates,
            path: FieldPath::new(),
            visiting: Vec::new(),
            repeats: 0,
            depth: 0,
        })
    }

    pub fn config(&self) -> &EncodingConfig {
        self.config
    }

    /// Location of the field being encoded.
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// Encode a root value. Traversal state from an earlier call is discarded.
    pub fn encode<T: Encode + ?Sized>(&mut self, value: &T) -> Result<Value, EncodeError> {
        self.path.clear();
        self.visiting.clear();
        self.repeats = 0;
        self.depth = 0;
        value.encode(self)
    }

    /// Build an object. Members are emitted in the order `build` writes them.
    pub fn object<F>(&mut self, build: F) -> Result<Value, EncodeError>
    where
        F: FnOnce(&mut ObjectWriter<'_, 'c>) -> Result<(), EncodeError>,
    {
        self.enter()?;
        let mut writer = ObjectWriter {
            enc: &mut *self,
            members: Map::new(),
        };
        let result = build(&mut writer);
        let members = writer.members;
        self.depth -= 1;
        result.map(|()| Value::Object(members))
    }

    /// Run `body` with `identity` pushed on the visiting stack.
    ///
    /// Types that can be the target of a back-reference wrap their encoding in
    /// this so that a later reference to them is recognised as a cycle.
    pub fn tracked<F>(&mut self, identity: usize, body: F) -> Result<Value, EncodeError>
    where
        F: FnOnce(&mut Self) -> Result<Value, EncodeError>,
    {
        let repeat = self.visiting.contains(&identity);
        self.visiting.push(identity);
        if repeat {
            self.repeats += 1;
        }
        let result = body(self);
        self.visiting.pop();
        if repeat {
            self.repeats -= 1;
        }
        result
    }

    pub fn timestamp(&self, ts: &NaiveDateTime) -> Result<Value, EncodeError> {
        self.dates.format(ts).map(Value::String).ok_or_else(|| {
            EncodeError::Config(ConfigError::InvalidDatePattern {
                pattern: self.dates.describe().to_string(),
                reason: format!("cannot format {ts}"),
            })
        })
    }

    pub fn enum_value<E: EnumRepr>(&self, value: &E) -> Result<Value, EncodeError> {
        match self.config.enum_policy {
            EnumPolicy::Ordinal => Ok(Value::from(value.ordinal())),
            EnumPolicy::Symbolic => value.name().map(Value::from).ok_or_else(|| {
                EncodeError::UnrepresentableEnum {
                    path: self.path.clone(),
                    type_name: E::TYPE_NAME,
                    ordinal: value.ordinal(),
                }
            }),
        }
    }

    fn enter(&mut self) -> Result<(), EncodeError> {
        if self.depth >= self.config.max_depth {
            return Err(EncodeError::DepthExceeded {
                path: self.path.clone(),
                max: self.config.max_depth,
            });
        }
        self.depth += 1;
        Ok(())
    }

    /// Whether a back-reference to `identity` should be followed.
    fn admits(&self, identity: usize) -> Result<bool, EncodeError> {
        if !self.visiting.contains(&identity) {
            return Ok(true);
        }
        match self.config.cycle_policy {
            CyclePolicy::Fail => Err(EncodeError::CyclicReference {
                path: self.path.clone(),
            }),
            CyclePolicy::OmitEdge => Ok(false),
            CyclePolicy::DepthLimit(n) => Ok(self.repeats < n as usize),
        }
    }
}

/// Member sink handed to [`Encoder::object`] builders.
pub struct ObjectWriter<'a, 'c> {
    enc: &'a mut Encoder<'c>,
    members: Map,
}

impl<'a, 'c> ObjectWriter<'a, 'c> {
    pub fn encoder(&mut self) -> &mut Encoder<'c> {
        self.enc
    }

    /// Write a declared field. `name` is the declared name; the naming policy
    /// decides the key.
    pub fn field<T: Encode + ?Sized>(&mut self, name: &str, value: &T) -> Result<(), EncodeError> {
        self.enc.path.push_key(name);
        let encoded = value.encode(self.enc);
        self.enc.path.pop();
        self.insert(name, encoded?);
        Ok(())
    }

    /// Write a non-owning reference field, applying the cycle policy.
    pub fn back_reference<T: Encode>(
        &mut self,
        name: &str,
        target: Option<&Rc<RefCell<T>>>,
    ) -> Result<(), EncodeError> {
        let Some(cell) = target else {
            self.insert(name, Value::Null);
            return Ok(());
        };
        let identity = RefCell::as_ptr(cell) as usize;
        self.enc.path.push_key(name);
        let result = match self.enc.admits(identity) {
            Ok(true) => match cell.try_borrow() {
                Ok(target) => target.encode(self.enc).map(Some),
                Err(_) => Err(EncodeError::Borrowed {
                    path: self.enc.path.clone(),
                }),
            },
            Ok(false) => Ok(None),
            Err(e) => Err(e),
        };
        self.enc.path.pop();
        match result? {
            Some(value) => self.insert(name, value),
            None => tracing::trace!(field = name, path = %self.enc.path, "back-reference omitted"),
        }
        Ok(())
    }

    fn insert(&mut self, name: &str, value: Value) {
        let config = self.enc.config;
        if value.is_null() && config.omit_nulls {
            return;
        }
        self.members.insert(config.field_naming.apply(name), value);
    }
}

impl Encode for bool {
    fn encode(&self, _: &mut Encoder<'_>) -> Result<Value, EncodeError> {
        Ok(Value::Bool(*self))
    }
}

macro_rules! encode_int {
    ($($t:ty),*) => {
        $(
            impl Encode for $t {
                fn encode(&self, _: &mut Encoder<'_>) -> Result<Value, EncodeError> {
                    Ok(Value::from(*self))
                }
            }
        )*
    };
}

encode_int!(i32, i64, u32, u64, usize);

impl Encode for f64 {
    fn encode(&self, enc: &mut Encoder<'_>) -> Result<Value, EncodeError> {
        Number::from_f64(*self)
            .map(Value::Number)
            .ok_or_else(|| EncodeError::NonFiniteNumber {
                path: enc.path.clone(),
            })
    }
}

impl Encode for Decimal {
    fn encode(&self, _: &mut Encoder<'_>) -> Result<Value, EncodeError> {
        Ok(Value::from(*self))
    }
}

impl Encode for str {
    fn encode(&self, _: &mut Encoder<'_>) -> Result<Value, EncodeError> {
        Ok(Value::String(self.to_string()))
    }
}

impl Encode for String {
    fn encode(&self, _: &mut Encoder<'_>) -> Result<Value, EncodeError> {
        Ok(Value::String(self.clone()))
    }
}

impl Encode for NaiveDateTime {
    fn encode(&self, enc: &mut Encoder<'_>) -> Result<Value, EncodeError> {
        enc.timestamp(self)
    }
}

/// Free-form values pass through untouched.
impl Encode for Value {
    fn encode(&self, _: &mut Encoder<'_>) -> Result<Value, EncodeError> {
        Ok(self.clone())
    }
}

/// Map keys are data, not field names: no naming policy is applied.
impl Encode for Map {
    fn encode(&self, _: &mut Encoder<'_>) -> Result<Value, EncodeError> {
        Ok(Value::Object(self.clone()))
    }
}

impl<T: Encode> Encode for Option<T> {
    fn encode(&self, enc: &mut Encoder<'_>) -> Result<Value, EncodeError> {
        match self {
            Some(v) => v.encode(enc),
            None => Ok(Value::Null),
        }
    }
}

impl<T: Encode> Encode for [T] {
    fn encode(&self, enc: &mut Encoder<'_>) -> Result<Value, EncodeError> {
        enc.enter()?;
        let mut items = Vec::with_capacity(self.len());
        let mut failure = None;
        for (i, item) in self.iter().enumerate() {
            enc.path.push_index(i);
            let encoded = item.encode(enc);
            enc.path.pop();
            match encoded {
                Ok(v) => items.push(v),
                Err(e) => {
                    failure = Some(e);
                    break;
                }
            }
        }
        enc.depth -= 1;
        match failure {
            Some(e) => Err(e),
            None => Ok(Value::Array(items)),
        }
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode(&self, enc: &mut Encoder<'_>) -> Result<Value, EncodeError> {
        self.as_slice().encode(enc)
    }
}

impl<T: Encode + ?Sized> Encode for &T {
    fn encode(&self, enc: &mut Encoder<'_>) -> Result<Value, EncodeError> {
        (**self).encode(enc)
    }
}

impl<T: Encode + ?Sized> Encode for Box<T> {
    fn encode(&self, enc: &mut Encoder<'_>) -> Result<Value, EncodeError> {
        (**self).encode(enc)
    }
}

impl<T: Encode> Encode for Rc<RefCell<T>> {
    fn encode(&self, enc: &mut Encoder<'_>) -> Result<Value, EncodeError> {
        let inner = self.try_borrow().map_err(|_| EncodeError::Borrowed {
            path: enc.path.clone(),
        })?;
        inner.encode(enc)
    }
}
