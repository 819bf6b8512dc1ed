//! Line parser for the YConf format
//!
//! A line is `<indentation><name>: <value>`. The parser validates the
//! indentation, splits the line on its first colon and classifies the value
//! text. Values are tried in this order, first match wins:
//!
//! 1. String: enclosed in double quotes (`"..."`, at least one character inside)
//! 2. Array: enclosed in square brackets, elements separated by commas
//! 3. Boolean: contains `TRUE` or `FALSE` anywhere in the text
//! 4. Float: contains a decimal point and parses as a floating-point number
//! 5. Integer: parses as an integer, subject to [`IntegerGating`]
//!
//! Array elements go through the same rules except that they cannot be
//! arrays themselves and always accept bare integers.

use crate::error::LineError;
use crate::value::{Scalar, TypedValue, Value};

/// Controls when a top-level scalar may be read as an integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegerGating {
    /// The integer form also requires a decimal point, exactly like the float
    /// form. Text containing a decimal point never parses as an integer, so
    /// top-level integers are unrecognized and only array elements can be
    /// integers.
    #[default]
    RequireDecimalPoint,
    /// Digit-only text such as `1986` is read as an integer.
    AllowBareIntegers,
}

/// One parsed parameter line
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Number of leading indentation characters, each TAB counting as one
    pub indent: usize,
    /// Parameter name, trimmed, never empty
    pub name: String,
    /// Parsed value, `None` for header lines and unrecognized values
    pub value: Option<TypedValue>,
}

/// Parses individual lines into [`Record`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct LineParser {
    integer_gating: IntegerGating,
}

impl LineParser {
    /// Creates a line parser with the given integer gating
    pub fn new(integer_gating: IntegerGating) -> Self {
        Self { integer_gating }
    }

    /// Returns the integer gating applied to top-level scalars
    pub fn integer_gating(&self) -> IntegerGating {
        self.integer_gating
    }

    /// Parses one line of text (without its line terminator).
    ///
    /// Returns `None` for blank lines, comments and rejected lines. Every
    /// problem found along the way is appended to `issues`; a returned record
    /// may still come with an issue when its array value had to be truncated
    /// or its value was not recognized.
    pub fn parse_line(&self, line: &str, issues: &mut Vec<LineError>) -> Option<Record> {
        if line.trim().is_empty() {
            return None;
        }

        let (indent, content) = match split_indentation(line) {
            Ok(split) => split,
            Err(error) => {
                issues.push(error);
                return None;
            }
        };

        if content.starts_with('#') {
            return None;
        }

        let colon = match content.find(':') {
            Some(0) => {
                issues.push(LineError::MissingName);
                return None;
            }
            Some(position) => position,
            None => {
                issues.push(LineError::MissingColon);
                return None;
            }
        };

        let name = content[..colon].trim();
        if name.is_empty() {
            issues.push(LineError::MissingName);
            return None;
        }

        let raw = content[colon + 1..].trim();
        let value = if raw.is_empty() {
            None
        } else {
            self.parse_value(raw, issues)
        };

        Some(Record {
            indent,
            name: name.to_string(),
            value,
        })
    }

    /// Classifies trimmed value text.
    ///
    /// Returns `None` when the text is an empty array or matches no form; the
    /// latter also records [`LineError::UnrecognizedValue`].
    pub fn parse_value(&self, raw: &str, issues: &mut Vec<LineError>) -> Option<TypedValue> {
        let value = if let Some(text) = parse_string(raw) {
            Some(Value::from(Scalar::String(text.to_string())))
        } else if let Some(content) = array_content(raw) {
            parse_array(content, issues)
        } else if let Some(flag) = parse_boolean(raw) {
            Some(Value::from(Scalar::Boolean(flag)))
        } else if let Some(number) = parse_float(raw) {
            Some(Value::from(Scalar::Float(number)))
        } else if let Some(number) = self.parse_integer(raw) {
            Some(Value::from(Scalar::Integer(number)))
        } else {
            issues.push(LineError::UnrecognizedValue {
                raw: raw.to_string(),
            });
            None
        };

        value.map(|value| TypedValue::new(value, raw))
    }

    fn parse_integer(&self, raw: &str) -> Option<i64> {
        if self.integer_gating == IntegerGating::RequireDecimalPoint && !raw.contains('.') {
            return None;
        }
        raw.parse().ok()
    }
}

/// Splits a line into its indentation width and the remaining content.
///
/// Leading spaces are stripped first, then leading TABs. Spaces left over
/// after the TABs, or TABs following spaces, are rejected.
fn split_indentation(line: &str) -> Result<(usize, &str), LineError> {
    let after_spaces = line.trim_start_matches(' ');
    let content = after_spaces.trim_start_matches('\t');

    let spaces = line.len() - after_spaces.len();
    let tabs = after_spaces.len() - content.len();

    if content.starts_with(' ') || (spaces > 0 && tabs > 0) {
        return Err(LineError::MixedIndentation);
    }

    Ok((spaces + tabs, content))
}

fn parse_string(raw: &str) -> Option<&str> {
    if raw.len() > 2 && raw.starts_with('"') && raw.ends_with('"') {
        Some(&raw[1..raw.len() - 1])
    } else {
        None
    }
}

fn array_content(raw: &str) -> Option<&str> {
    raw.strip_prefix('[')?.strip_suffix(']')
}

// Substring match: `TRUEISH` is true.
fn parse_boolean(raw: &str) -> Option<bool> {
    if raw.contains("TRUE") {
        Some(true)
    } else if raw.contains("FALSE") {
        Some(false)
    } else {
        None
    }
}

// Out-of-range magnitudes such as `1.0e400` are rejected, not rounded to infinity.
fn parse_float(raw: &str) -> Option<f64> {
    if raw.contains('.') {
        raw.parse().ok().filter(|x: &f64| x.is_finite())
    } else {
        None
    }
}

fn classify_element(element: &str) -> Option<Scalar> {
    if let Some(text) = parse_string(element) {
        Some(Scalar::String(text.to_string()))
    } else if let Some(flag) = parse_boolean(element) {
        Some(Scalar::Boolean(flag))
    } else if let Some(number) = parse_float(element) {
        Some(Scalar::Float(number))
    } else {
        element.parse().ok().map(Scalar::Integer)
    }
}

/// Parses the text between the brackets of an array.
///
/// The first element fixes the array type. Parsing stops at the first element
/// that is unrecognized or of another type, keeping everything before it.
fn parse_array(content: &str, issues: &mut Vec<LineError>) -> Option<Value> {
    let content = content.trim();
    if content.is_empty() {
        return None;
    }
    // A single trailing comma is tolerated.
    let content = content.strip_suffix(',').unwrap_or(content);

    let mut value: Option<Value> = None;
    for element in content.split(',').map(str::trim) {
        let Some(scalar) = classify_element(element) else {
            issues.push(LineError::UnrecognizedElement {
                element: element.to_string(),
            });
            break;
        };

        if let Some(array) = &mut value {
            if let Err(rejected) = array.try_push(scalar) {
                issues.push(LineError::InconsistentArrayTypes {
                    expected: array.value_type(),
                    found: rejected.value_type(),
                });
                break;
            }
        } else {
            value = Some(Value::from(scalar));
        }
    }

    value
}
