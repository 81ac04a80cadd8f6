//! The JSON value model used by the jsoncmp codec.
//!
//! The codec never talks to JSON text directly. Typed objects are turned into
//! a [`Value`] tree, and the tree is written or parsed here:
//!
//! ```
//! use jsoncmp_value::{parse, to_string, Value};
//!
//! let v = parse(r#"{"price": 49.99, "tags": ["new"]}"#).unwrap();
//! assert_eq!(v.pointer("/tags/0").and_then(Value::as_str), Some("new"));
//! assert_eq!(to_string(&v), r#"{"price":49.99,"tags":["new"]}"#);
//! ```

pub mod decimal;
pub mod error;
pub mod escape;
pub mod number;
pub mod parser;
pub mod value;
pub mod writer;

pub use decimal::Decimal;
pub use error::{Expected, NumberError, SyntaxError};
pub use number::Number;
pub use parser::{parse, JsonParser, MAX_NESTING};
pub use value::{Map, Value, ValueKind};
pub use writer::{to_string, to_string_pretty, write, JsonWriter};
