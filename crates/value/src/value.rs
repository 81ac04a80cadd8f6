//! The in-memory JSON tree shared by the parser, the writer and the typed
//! codec.

use std::fmt;

use indexmap::IndexMap;

use crate::decimal::Decimal;
use crate::number::Number;

/// Object members in insertion order. Keys are unique.
pub type Map = IndexMap<String, Value>;

/// A JSON value. Trees are acyclic by construction: every child is owned by
/// its parent.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Value>),
    Object(Map),
}

/// The tag of a [`Value`], used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "boolean",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        })
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().and_then(Number::as_i64)
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().and_then(Number::as_f64)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Member of an object by exact key, or element of an array by index text.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(obj) => obj.get(key),
            Value::Array(arr) => key.parse::<usize>().ok().and_then(|i| arr.get(i)),
            _ => None,
        }
    }

    /// Resolve an RFC 6901 JSON Pointer such as `/tags/0`.
    ///
    /// The empty pointer is the value itself. `~1` and `~0` unescape to `/`
    /// and `~`. Array steps must be canonical indices (no leading zeros).
    pub fn pointer(&self, pointer: &str) -> Option<&Value> {
        if pointer.is_empty() {
            return Some(self);
        }
        let rest = pointer.strip_prefix('/')?;
        rest.split('/').try_fold(self, |node, raw| {
            let step = unescape_pointer_step(raw);
            match node {
                Value::Object(obj) => obj.get(step.as_str()),
                Value::Array(arr) => {
                    if step.len() > 1 && step.starts_with('0') {
                        return None;
                    }
                    step.parse::<usize>().ok().and_then(|i| arr.get(i))
                }
                _ => None,
            }
        })
    }
}

fn unescape_pointer_step(step: &str) -> String {
    if !step.contains('~') {
        return step.to_string();
    }
    // `~1` first so that `~01` becomes `~1`, not `/`.
    step.replace("~1", "/").replace("~0", "~")
}

impl fmt::Display for Value {
    /// Compact JSON text. Use `{:#}` for the indented form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::writer::write(self, f.alternate()))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Value::Number(d.into())
    }
}

macro_rules! value_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Number(v.into())
                }
            }
        )*
    };
}

value_from_int!(i32, i64, u32, u64, usize);

impl From<Vec<Value>> for Value {
    fn from(arr: Vec<Value>) -> Self {
        Value::Array(arr)
    }
}

impl From<Map> for Value {
    fn from(obj: Map) -> Self {
        Value::Object(obj)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Object(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Value {
        let tags = Value::Array(vec!["new".into(), "sale".into()]);
        [
            ("name", Value::from("Dynamic Product")),
            ("available", Value::from(true)),
            ("tags", tags),
            ("a/b", Value::from(1)),
            ("m~n", Value::from(2)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn kinds() {
        assert_eq!(Value::Null.kind(), ValueKind::Null);
        assert_eq!(Value::from(1).kind(), ValueKind::Number);
        assert_eq!(sample().kind(), ValueKind::Object);
        assert_eq!(ValueKind::Bool.to_string(), "boolean");
    }

    #[test]
    fn pointer_lookup() {
        let v = sample();
        assert_eq!(v.pointer(""), Some(&v));
        assert_eq!(v.pointer("/tags/0").and_then(Value::as_str), Some("new"));
        assert_eq!(v.pointer("/a~1b").and_then(Value::as_i64), Some(1));
        assert_eq!(v.pointer("/m~0n").and_then(Value::as_i64), Some(2));
        assert_eq!(v.pointer("/tags/2"), None);
        assert_eq!(v.pointer("/tags/01"), None);
        assert_eq!(v.pointer("tags"), None);
        assert_eq!(v.pointer("/name/x"), None);
    }

    #[test]
    fn get_by_key_and_index() {
        let v = sample();
        assert_eq!(v.get("available").and_then(Value::as_bool), Some(true));
        let tags = v.get("tags").unwrap();
        assert_eq!(tags.get("1").and_then(Value::as_str), Some("sale"));
        assert!(Value::Null.get("x").is_none());
    }

    #[test]
    fn option_maps_to_null() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::String("x".into()));
    }
}
