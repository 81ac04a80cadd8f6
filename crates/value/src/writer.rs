//! JSON text output.
//!
//! Output is deterministic: object members are written in insertion order
//! and numbers are written from their stored lexeme. The pretty form indents
//! by two spaces and separates keys with `": "`.

use crate::escape::write_quoted;
use crate::value::{Map, Value};

const INDENT: &str = "  ";

pub struct JsonWriter {
    out: String,
    pretty: bool,
    depth: usize,
}

impl JsonWriter {
    pub fn new(pretty: bool) -> Self {
        Self {
            out: String::new(),
            pretty,
            depth: 0,
        }
    }

    pub fn write(&mut self, value: &Value) -> String {
        self.out.clear();
        self.depth = 0;
        self.write_any(value);
        std::mem::take(&mut self.out)
    }

    fn write_any(&mut self, value: &Value) {
        match value {
            Value::Null => self.out.push_str("null"),
            Value::Bool(true) => self.out.push_str("true"),
            Value::Bool(false) => self.out.push_str("false"),
            Value::Number(n) => self.out.push_str(n.as_str()),
            Value::String(s) => write_quoted(&mut self.out, s),
            Value::Array(arr) => self.write_arr(arr),
            Value::Object(obj) => self.write_obj(obj),
        }
    }

    fn write_arr(&mut self, arr: &[Value]) {
        if arr.is_empty() {
            self.out.push_str("[]");
            return;
        }
        self.out.push('[');
        self.depth += 1;
        for (i, item) in arr.iter().enumerate() {
            if i > 0 {
                self.out.push(',');
            }
            self.newline();
            self.write_any(item);
        }
        self.depth -= 1;
        self.newline();
        self.out.push(']');
    }

    fn write_obj(&mut self, obj: &Map) {
        if obj.is_empty() {
            self.out.push_str("{}");
            return;
        }
        self.out.push('{');
        self.depth += 1;
        for (i, (key, val)) in obj.iter().enumerate() {
            if i > 0 {
                self.out.push(',');
            }
            self.newline();
            write_quoted(&mut self.out, key);
            self.out.push(':');
            if self.pretty {
                self.out.push(' ');
            }
            self.write_any(val);
        }
        self.depth -= 1;
        self.newline();
        self.out.push('}');
    }

    fn newline(&mut self) {
        if !self.pretty {
            return;
        }
        self.out.push('\n');
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
    }
}

/// Serialize `value`, compact or indented.
pub fn write(value: &Value, pretty: bool) -> String {
    JsonWriter::new(pretty).write(value)
}

pub fn to_string(value: &Value) -> String {
    write(value, false)
}

pub fn to_string_pretty(value: &Value) -> String {
    write(value, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::number::Number;

    fn person() -> Value {
        [
            ("Id", Value::from(1)),
            ("Name", Value::from("Test Person")),
            ("Salary", Value::Number("5000.00".parse::<Number>().unwrap())),
            ("Skills", Value::Array(vec!["C#".into(), "SQL".into()])),
            ("Address", Value::Null),
            ("Tags", Value::Array(vec![])),
            ("Meta", Value::Object(Map::new())),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn compact_output() {
        assert_eq!(
            to_string(&person()),
            r#"{"Id":1,"Name":"Test Person","Salary":5000.00,"Skills":["C#","SQL"],"Address":null,"Tags":[],"Meta":{}}"#
        );
    }

    #[test]
    fn pretty_output() {
        let expected = "{\n  \"Id\": 1,\n  \"Name\": \"Test Person\",\n  \"Salary\": 5000.00,\n  \"Skills\": [\n    \"C#\",\n    \"SQL\"\n  ],\n  \"Address\": null,\n  \"Tags\": [],\n  \"Meta\": {}\n}";
        assert_eq!(to_string_pretty(&person()), expected);
    }

    #[test]
    fn scalars() {
        assert_eq!(to_string(&Value::Null), "null");
        assert_eq!(to_string(&Value::Bool(false)), "false");
        assert_eq!(to_string(&Value::from("a\"b")), r#""a\"b""#);
    }

    #[test]
    fn display_matches_writer() {
        let v = person();
        assert_eq!(v.to_string(), to_string(&v));
        assert_eq!(format!("{v:#}"), to_string_pretty(&v));
    }

    #[test]
    fn output_is_stable_across_calls() {
        let v = person();
        let mut w = JsonWriter::new(true);
        assert_eq!(w.write(&v), w.write(&v));
    }
}
