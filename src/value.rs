//! Typed values produced by the line parser
//!
//! Every parameter value is a homogeneous sequence of one primitive type.
//! Scalars are simply sequences of length one.

use serde::Serialize;
use serde::ser::{SerializeSeq, Serializer};
use smallvec::{SmallVec, smallvec};
use std::fmt;

/// Element storage for a value. Nearly every value is a scalar or a short
/// list, so up to four elements are kept inline.
pub type Elements<T> = SmallVec<[T; 4]>;

/// The primitive type shared by all elements of a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Boolean,
    Integer,
    Float,
    String,
}

impl ValueType {
    /// Single-letter tag used by the dictionary listing (`<B>`, `<I>`, `<F>`, `<S>`)
    pub fn tag(self) -> char {
        match self {
            ValueType::Boolean => 'B',
            ValueType::Integer => 'I',
            ValueType::Float => 'F',
            ValueType::String => 'S',
        }
    }

    /// Human-readable type name
    pub fn name(self) -> &'static str {
        match self {
            ValueType::Boolean => "boolean",
            ValueType::Integer => "integer",
            ValueType::Float => "float",
            ValueType::String => "string",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single classified element, before it is folded into a [`Value`]
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Scalar {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl Scalar {
    pub(crate) fn value_type(&self) -> ValueType {
        match self {
            Scalar::Boolean(_) => ValueType::Boolean,
            Scalar::Integer(_) => ValueType::Integer,
            Scalar::Float(_) => ValueType::Float,
            Scalar::String(_) => ValueType::String,
        }
    }
}

/// A homogeneous, non-empty sequence of primitive values.
///
/// Serializes with its type as the tag, e.g. `{"integer": [1, 2]}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Value {
    Boolean(Elements<bool>),
    Integer(Elements<i64>),
    Float(Elements<f64>),
    String(Elements<String>),
}

impl Value {
    /// Returns the element type of this value
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Boolean(_) => ValueType::Boolean,
            Value::Integer(_) => ValueType::Integer,
            Value::Float(_) => ValueType::Float,
            Value::String(_) => ValueType::String,
        }
    }

    /// Returns the number of elements
    pub fn len(&self) -> usize {
        match self {
            Value::Boolean(v) => v.len(),
            Value::Integer(v) => v.len(),
            Value::Float(v) => v.len(),
            Value::String(v) => v.len(),
        }
    }

    /// Returns true if the value holds no elements.
    ///
    /// Values built by the parser always hold at least one element.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends an element of the same type, handing it back on a type mismatch
    pub(crate) fn try_push(&mut self, scalar: Scalar) -> Result<(), Scalar> {
        match (self, scalar) {
            (Value::Boolean(v), Scalar::Boolean(b)) => v.push(b),
            (Value::Integer(v), Scalar::Integer(i)) => v.push(i),
            (Value::Float(v), Scalar::Float(x)) => v.push(x),
            (Value::String(v), Scalar::String(s)) => v.push(s),
            (_, other) => return Err(other),
        }
        Ok(())
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Boolean(b) => Value::Boolean(smallvec![b]),
            Scalar::Integer(i) => Value::Integer(smallvec![i]),
            Scalar::Float(x) => Value::Float(smallvec![x]),
            Scalar::String(s) => Value::String(smallvec![s]),
        }
    }
}

/// A parsed parameter value together with the raw text it was parsed from
#[derive(Debug, Clone, PartialEq)]
pub struct TypedValue {
    value: Value,
    raw: String,
}

impl TypedValue {
    /// Creates a typed value from its elements and the raw value text
    pub fn new(value: Value, raw: impl Into<String>) -> Self {
        Self {
            value,
            raw: raw.into(),
        }
    }

    /// Returns the underlying elements
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Consumes the typed value, returning the underlying elements
    pub fn into_value(self) -> Value {
        self.value
    }

    /// Returns the trimmed value text as written, quotes and brackets included
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn value_type(&self) -> ValueType {
        self.value.value_type()
    }

    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Returns true if the value was written with more than one element
    pub fn is_array(&self) -> bool {
        self.len() > 1
    }

    /// Returns all elements if this is a boolean value
    pub fn as_bools(&self) -> Option<&[bool]> {
        if let Value::Boolean(v) = &self.value {
            Some(v.as_slice())
        } else {
            None
        }
    }

    /// Returns the element if this is a single boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self.as_bools()? {
            [b] => Some(*b),
            _ => None,
        }
    }

    /// Returns all elements if this is an integer value
    pub fn as_integers(&self) -> Option<&[i64]> {
        if let Value::Integer(v) = &self.value {
            Some(v.as_slice())
        } else {
            None
        }
    }

    /// Returns the element if this is a single integer
    pub fn as_integer(&self) -> Option<i64> {
        match self.as_integers()? {
            [i] => Some(*i),
            _ => None,
        }
    }

    /// Returns all elements if this is a float value
    pub fn as_floats(&self) -> Option<&[f64]> {
        if let Value::Float(v) = &self.value {
            Some(v.as_slice())
        } else {
            None
        }
    }

    /// Returns the element if this is a single float
    pub fn as_float(&self) -> Option<f64> {
        match self.as_floats()? {
            [x] => Some(*x),
            _ => None,
        }
    }

    /// Returns all elements if this is a string value
    pub fn as_strings(&self) -> Option<&[String]> {
        if let Value::String(v) = &self.value {
            Some(v.as_slice())
        } else {
            None
        }
    }

    /// Returns the element if this is a single string
    pub fn as_str(&self) -> Option<&str> {
        match self.as_strings()? {
            [s] => Some(s.as_str()),
            _ => None,
        }
    }
}

/// Formats a float so that it always carries a decimal point and therefore
/// reads back as a float.
pub(crate) fn format_float(x: f64) -> String {
    let text = x.to_string();
    if x.is_finite() && !text.contains('.') {
        format!("{}.0", text)
    } else {
        text
    }
}

fn write_joined<T>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
    mut write_item: impl FnMut(&mut fmt::Formatter<'_>, &T) -> fmt::Result,
) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write_item(f, item)?;
    }
    Ok(())
}

/// Canonical rendering: strings quoted, booleans as `TRUE`/`FALSE`, and
/// brackets only around values with more than one element.
impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bracketed = self.is_array();
        if bracketed {
            f.write_str("[")?;
        }
        match &self.value {
            Value::Boolean(v) => write_joined(f, v, |f, b| {
                f.write_str(if *b { "TRUE" } else { "FALSE" })
            })?,
            Value::Integer(v) => write_joined(f, v, |f, i| write!(f, "{}", i))?,
            Value::Float(v) => write_joined(f, v, |f, x| f.write_str(&format_float(*x)))?,
            Value::String(v) => write_joined(f, v, |f, s| write!(f, "\"{}\"", s))?,
        }
        if bracketed {
            f.write_str("]")?;
        }
        Ok(())
    }
}

fn serialize_elements<T, S>(items: &[T], serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    match items {
        [single] => single.serialize(serializer),
        _ => {
            let mut seq = serializer.serialize_seq(Some(items.len()))?;
            for item in items {
                seq.serialize_element(item)?;
            }
            seq.end()
        }
    }
}

/// Single-element values serialize as plain scalars, longer ones as sequences
impl Serialize for TypedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.value {
            Value::Boolean(v) => serialize_elements(v, serializer),
            Value::Integer(v) => serialize_elements(v, serializer),
            Value::Float(v) => serialize_elements(v, serializer),
            Value::String(v) => serialize_elements(v, serializer),
        }
    }
}
