//! Strict RFC 8259 parser.
//!
//! Every failure is a [`SyntaxError`] carrying the byte offset and what was
//! expected there. There is no recovery: the caller fixes the text and parses
//! again.

use crate::error::{Expected, SyntaxError};
use crate::number::{scan_number, Number};
use crate::value::{Map, Value};

/// Containers nested deeper than this are rejected.
pub const MAX_NESTING: usize = 512;

pub struct JsonParser<'a> {
    data: &'a [u8],
    x: usize,
    depth: usize,
}

impl<'a> JsonParser<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            data: text.as_bytes(),
            x: 0,
            depth: 0,
        }
    }

    /// Parse exactly one value surrounded by optional whitespace.
    pub fn parse(mut self) -> Result<Value, SyntaxError> {
        let value = self.read_any()?;
        self.skip_whitespace();
        if self.x != self.data.len() {
            return Err(self.error(Expected::EndOfInput));
        }
        Ok(value)
    }

    fn error(&self, expected: Expected) -> SyntaxError {
        SyntaxError::new(self.x, expected)
    }

    fn peek(&self) -> Option<u8> {
        self.data.get(self.x).copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek() {
            self.x += 1;
        }
    }

    fn read_any(&mut self) -> Result<Value, SyntaxError> {
        self.skip_whitespace();
        match self.peek() {
            Some(b'"') => Ok(Value::String(self.read_str()?)),
            Some(b'[') => self.read_arr(),
            Some(b'{') => self.read_obj(),
            Some(b't') => self.read_literal("true", Value::Bool(true)),
            Some(b'f') => self.read_literal("false", Value::Bool(false)),
            Some(b'n') => self.read_literal("null", Value::Null),
            Some(b'-' | b'0'..=b'9') => self.read_num(),
            _ => Err(self.error(Expected::Value)),
        }
    }

    fn read_literal(&mut self, lit: &'static str, value: Value) -> Result<Value, SyntaxError> {
        if !self.data[self.x..].starts_with(lit.as_bytes()) {
            return Err(self.error(Expected::Literal(lit)));
        }
        self.x += lit.len();
        Ok(value)
    }

    fn read_num(&mut self) -> Result<Value, SyntaxError> {
        let start = self.x;
        let end = scan_number(self.data, start)
            .map_err(|at| SyntaxError::new(at, Expected::Digit))?;
        self.x = end;
        // `scan_number` only accepts ASCII, so the slice is valid UTF-8.
        let lexeme = std::str::from_utf8(&self.data[start..end])
            .map_err(|_| SyntaxError::new(start, Expected::Digit))?;
        let number =
            Number::from_lexeme(lexeme).map_err(|_| SyntaxError::new(start, Expected::Digit))?;
        Ok(Value::Number(number))
    }

    fn read_str(&mut self) -> Result<String, SyntaxError> {
        let open = self.x;
        self.x += 1;
        let body_start = self.x;
        let mut has_escape = false;
        loop {
            match self.peek() {
                None => {
                    return Err(SyntaxError::new(self.data.len(), Expected::ClosingQuote))
                }
                Some(b'"') => break,
                Some(b'\\') => {
                    has_escape = true;
                    self.x += 2;
                }
                Some(b) if b < 0x20 => return Err(self.error(Expected::UnescapedChar)),
                Some(_) => self.x += 1,
            }
        }
        let body = &self.data[body_start..self.x];
        self.x += 1;
        if !has_escape {
            return std::str::from_utf8(body)
                .map(str::to_string)
                .map_err(|_| SyntaxError::new(open, Expected::UnescapedChar));
        }
        // Escapes (including surrogate pairs) are resolved by serde_json.
        serde_json::from_slice::<String>(&self.data[open..self.x])
            .map_err(|_| SyntaxError::new(open, Expected::Escape))
    }

    fn enter(&mut self) -> Result<(), SyntaxError> {
        self.depth += 1;
        if self.depth > MAX_NESTING {
            return Err(self.error(Expected::NestingWithinLimit));
        }
        Ok(())
    }

    fn read_arr(&mut self) -> Result<Value, SyntaxError> {
        self.enter()?;
        self.x += 1;
        let mut arr = Vec::new();
        self.skip_whitespace();
        if self.peek() == Some(b']') {
            self.x += 1;
            self.depth -= 1;
            return Ok(Value::Array(arr));
        }
        loop {
            arr.push(self.read_any()?);
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.x += 1,
                Some(b']') => {
                    self.x += 1;
                    self.depth -= 1;
                    return Ok(Value::Array(arr));
                }
                _ => return Err(self.error(Expected::ArrayCommaOrEnd)),
            }
        }
    }

    fn read_obj(&mut self) -> Result<Value, SyntaxError> {
        self.enter()?;
        self.x += 1;
        let mut obj = Map::new();
        self.skip_whitespace();
        if self.peek() == Some(b'}') {
            self.x += 1;
            self.depth -= 1;
            return Ok(Value::Object(obj));
        }
        loop {
            self.skip_whitespace();
            if self.peek() != Some(b'"') {
                return Err(self.error(Expected::ObjectKey));
            }
            let key = self.read_str()?;
            self.skip_whitespace();
            if self.peek() != Some(b':') {
                return Err(self.error(Expected::Colon));
            }
            self.x += 1;
            let val = self.read_any()?;
            obj.insert(key, val);
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.x += 1,
                Some(b'}') => {
                    self.x += 1;
                    self.depth -= 1;
                    return Ok(Value::Object(obj));
                }
                _ => return Err(self.error(Expected::ObjectCommaOrEnd)),
            }
        }
    }
}

/// Parse JSON text into a [`Value`].
pub fn parse(text: &str) -> Result<Value, SyntaxError> {
    JsonParser::new(text).parse()
}
