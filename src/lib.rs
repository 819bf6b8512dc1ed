//! # YConf Rust Parser
//!
//! A parser for YConf, a small hierarchical configuration format where nesting
//! is expressed by indentation, producing a flat dictionary of dotted paths.
//!
//! ## Overview
//!
//! A YConf document is a sequence of `name: value` lines:
//!
//! ```text
//! glossary:
//!     title:  "example glossary"
//!     GlossDiv:
//!         title: "S"
//!         GlossSeeAlso: ["GML", "XML"]
//!         ratings: [4.5, 5.0, 4.8]
//!         published: TRUE
//! ```
//!
//! A line without a value opens a section for the more deeply indented lines
//! that follow it. Every line with a value becomes one dictionary entry keyed
//! by its dotted path, e.g. `glossary.GlossDiv.title`.
//!
//! ## Key Features
//!
//! - **Typed values**: strings, booleans, floats and integers, as scalars or
//!   homogeneous single-line arrays
//! - **Forgiving parsing**: malformed lines are reported as diagnostics and
//!   skipped, the rest of the document is still parsed
//! - **Ordered output**: entries keep their source order
//! - **Serde integration**: the resulting dictionary serializes as a flat map
//!
//! ## Basic Usage
//!
//! ```rust
//! use yconf::parse_str;
//!
//! let text = "\
//! glossary:
//!     title:  \"example glossary\"
//!     GlossDiv:
//!         ratings: [4.5, 5.0, 4.8]
//!         published: TRUE
//! ";
//!
//! let output = parse_str(text);
//! let config = &output.config;
//! assert_eq!(config.get_str("glossary.title"), Some("example glossary"));
//! assert_eq!(config.get_bool("glossary.GlossDiv.published"), Some(true));
//! assert_eq!(
//!     config["glossary.GlossDiv.ratings"].as_floats(),
//!     Some(&[4.5, 5.0, 4.8][..])
//! );
//! assert!(output.diagnostics.is_empty());
//! ```
//!
//! ## Value Syntax
//!
//! | Form | Example | Type |
//! |------|---------|------|
//! | Double-quoted text | `"example"` | string |
//! | Contains `TRUE` / `FALSE` | `TRUE` | boolean |
//! | Number with a decimal point | `4.5` | float |
//! | Bracketed list | `[1, 2, 3]` | array of the first element's type |
//!
//! Bare integers such as `1986` are only recognized inside arrays unless
//! [`IntegerGating::AllowBareIntegers`] is configured:
//!
//! ```rust
//! use yconf::{ConfigParser, IntegerGating, ParserConfig};
//!
//! let strict = ConfigParser::new().parse_str("year: 1986");
//! assert!(strict.config.is_empty());
//! assert_eq!(strict.diagnostics.len(), 1);
//!
//! let config = ParserConfig::new().with_integer_gating(IntegerGating::AllowBareIntegers);
//! let relaxed = ConfigParser::with_config(config).parse_str("year: 1986");
//! assert_eq!(relaxed.config.get_integer("year"), Some(1986));
//! ```
//!
//! ## Error Handling
//!
//! Problems inside a line never abort a parse. They are collected as
//! [`Diagnostic`]s and also emitted as `tracing` warnings:
//!
//! ```rust
//! use yconf::{parse_str, ErrorCategory, LineError};
//!
//! let output = parse_str("a: [1, 2, 3.5]\nno colon here\nb: TRUE");
//! assert_eq!(output.config.len(), 2);
//! assert_eq!(output.config["a"].as_integers(), Some(&[1, 2][..]));
//!
//! let categories: Vec<_> = output.diagnostics.iter().map(|d| d.category()).collect();
//! assert_eq!(categories, vec![ErrorCategory::TypeHomogeneity, ErrorCategory::Structural]);
//! assert_eq!(output.diagnostics[1].error, LineError::MissingColon);
//! ```
//!
//! Reading a file is the only fallible step:
//!
//! ```rust
//! use yconf::{parse_file, YconfError};
//!
//! match parse_file("does/not/exist.conf") {
//!     Err(YconfError::SourceUnavailable { path, .. }) => {
//!         assert!(path.ends_with("exist.conf"));
//!     }
//!     other => panic!("expected SourceUnavailable, got {:?}", other),
//! }
//! ```

pub mod dict;
pub mod error;
pub mod line_parser;
pub mod parser;
pub mod value;


use std::io::BufRead;
use std::path::Path;

// Re-export main types
pub use dict::ConfigDict;
pub use error::{Diagnostic, DiagnosticSink, ErrorCategory, LineError, YconfError};
pub use line_parser::{IntegerGating, LineParser, Record};
pub use parser::{ConfigParser, DuplicatePathBehavior, ParseOutput, ParserConfig};
pub use value::{Elements, TypedValue, Value, ValueType};

/// Parses a document held in memory with the default configuration
pub fn parse_str(text: &str) -> ParseOutput {
    ConfigParser::new().parse_str(text)
}

/// Parses an ordered sequence of lines with the default configuration
pub fn parse_lines<I, S>(lines: I) -> ParseOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    ConfigParser::new().parse_lines(lines)
}

/// Parses every line of a reader with the default configuration
pub fn parse_reader<R: BufRead>(reader: R) -> Result<ParseOutput, YconfError> {
    ConfigParser::new().parse_reader(reader)
}

/// Opens and parses a configuration file with the default configuration
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<ParseOutput, YconfError> {
    ConfigParser::new().parse_file(path)
}
