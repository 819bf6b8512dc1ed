//! Error types and diagnostics for YConf parsing
//!
//! Nothing that goes wrong inside a line ever aborts a parse. Each problem is
//! reported as a [`Diagnostic`] and only the offending line (or the trailing
//! part of an array) is dropped. The only fallible surface is reading the
//! lines in the first place, see [`YconfError`].

use crate::value::ValueType;
use serde::Serialize;
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Broad class of a line-level problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorCategory {
    /// The line cannot be split into indentation, name and value; it is dropped.
    Structural,
    /// A value or array element has no recognizable syntax.
    ValueSyntax,
    /// An array element disagrees with the type of the elements before it.
    TypeHomogeneity,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorCategory::Structural => "structural",
            ErrorCategory::ValueSyntax => "value-syntax",
            ErrorCategory::TypeHomogeneity => "type-homogeneity",
        })
    }
}

/// Problems detected while parsing a single line
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LineError {
    /// Leading whitespace mixes TABs and spaces
    #[error("mixed TAB/space indentation")]
    MixedIndentation,

    /// No `:` separates the parameter name from its value
    #[error("missing colon separator")]
    MissingColon,

    /// Nothing but whitespace precedes the colon
    #[error("missing parameter name before colon")]
    MissingName,

    /// The value matches none of the recognized forms
    #[error("unrecognized value syntax '{raw}'")]
    UnrecognizedValue { raw: String },

    /// An array element matches none of the recognized forms
    #[error("unrecognized array element '{element}', array truncated")]
    UnrecognizedElement { element: String },

    /// An array element has a different type than the first element
    #[error("array entries have inconsistent types: expected {expected}, found {found}")]
    InconsistentArrayTypes {
        expected: ValueType,
        found: ValueType,
    },
}

impl LineError {
    /// Returns the category this problem belongs to
    pub fn category(&self) -> ErrorCategory {
        match self {
            LineError::MixedIndentation | LineError::MissingColon | LineError::MissingName => {
                ErrorCategory::Structural
            }
            LineError::UnrecognizedValue { .. } | LineError::UnrecognizedElement { .. } => {
                ErrorCategory::ValueSyntax
            }
            LineError::InconsistentArrayTypes { .. } => ErrorCategory::TypeHomogeneity,
        }
    }

    /// Returns true if the whole line was rejected
    pub fn rejects_line(&self) -> bool {
        self.category() == ErrorCategory::Structural
    }
}

/// A line-level problem together with where it happened
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error("line {line}: {error}")]
pub struct Diagnostic {
    /// Line number (1-based)
    pub line: usize,
    /// What went wrong
    pub error: LineError,
    /// The offending source line as read
    pub text: String,
}

impl Diagnostic {
    pub fn new(line: usize, error: LineError, text: impl Into<String>) -> Self {
        Self {
            line,
            error,
            text: text.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        self.error.category()
    }

    /// Formats the diagnostic on one line, quoting the source text
    pub fn format_compact(&self) -> String {
        let near = self.text.trim();
        if near.is_empty() {
            format!("{} at line {}", self.error, self.line)
        } else {
            format!("{} at line {} (near '{}')", self.error, self.line, near)
        }
    }
}

/// Receiver for diagnostics produced during a parse
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Errors raised while obtaining the lines to parse
#[derive(Debug, Error)]
pub enum YconfError {
    /// The configuration source could not be opened
    #[error("cannot open configuration source '{}': {source}", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading from an opened source failed
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
