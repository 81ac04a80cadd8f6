//! Codec error types and the field paths they carry.

use std::fmt;

use jsoncmp_value::{SyntaxError, ValueKind};
use thiserror::Error;

/// One step from the root to a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Location of a field inside the object graph, rendered as
/// `Persons[0].Address.City`. The empty path renders as `<root>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub(crate) fn push_key(&mut self, key: &str) {
        self.segments.push(PathSegment::Key(key.to_string()));
    }

    pub(crate) fn push_index(&mut self, index: usize) {
        self.segments.push(PathSegment::Index(index));
    }

    pub(crate) fn pop(&mut self) {
        self.segments.pop();
    }

    pub(crate) fn clear(&mut self) {
        self.segments.clear();
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return f.write_str("<root>");
        }
        for (i, segment) in self.segments().iter().enumerate() {
            match segment {
                PathSegment::Key(key) if i == 0 => f.write_str(key)?,
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

/// Invalid option or option combination.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid date pattern {pattern:?}: {reason}")]
    InvalidDatePattern { pattern: String, reason: String },

    #[error("max depth must be at least 1")]
    ZeroMaxDepth,

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("cyclic reference at {path}")]
    CyclicReference { path: FieldPath },

    #[error("{type_name} ordinal {ordinal} has no symbolic name (at {path})")]
    UnrepresentableEnum {
        path: FieldPath,
        type_name: &'static str,
        ordinal: i64,
    },

    #[error("maximum depth {max} exceeded at {path}")]
    DepthExceeded { path: FieldPath, max: usize },

    #[error("non-finite number at {path}")]
    NonFiniteNumber { path: FieldPath },

    #[error("value at {path} is mutably borrowed")]
    Borrowed { path: FieldPath },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error("type mismatch at {path}: expected {expected}, found {actual}")]
    TypeMismatch {
        path: FieldPath,
        expected: ValueKind,
        actual: ValueKind,
    },

    #[error("unknown {type_name} value {value} at {path}")]
    UnknownEnumValue {
        path: FieldPath,
        type_name: &'static str,
        value: String,
    },

    #[error("number {value} at {path} does not fit {target}")]
    NumberOutOfRange {
        path: FieldPath,
        value: String,
        target: &'static str,
    },

    #[error("timestamp {text:?} at {path} does not match {format}")]
    InvalidTimestamp {
        path: FieldPath,
        text: String,
        format: String,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
