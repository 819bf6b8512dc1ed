//! Hierarchy builder for YConf documents
//!
//! This module turns an ordered sequence of lines into a [`ConfigDict`]. Each
//! line is handed to the [`LineParser`]; the resulting records are nested by
//! indentation using an explicit ancestry stack, and every record carrying a
//! value is stored under its full dotted path.

use crate::dict::ConfigDict;
use crate::error::{Diagnostic, DiagnosticSink, YconfError};
use crate::line_parser::{IntegerGating, LineParser, Record};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Behavior when the same dotted path is produced twice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePathBehavior {
    /// Use the last value. The entry keeps its original position.
    #[default]
    Override,
    /// Keep the first value and ignore later ones
    KeepFirst,
}

/// Configuration options for the parser
#[derive(Debug, Clone, Default)]
pub struct ParserConfig {
    /// When top-level scalars may be read as integers
    pub integer_gating: IntegerGating,
    /// Behavior when duplicate paths are encountered
    pub duplicate_paths: DuplicatePathBehavior,
}

impl ParserConfig {
    /// Creates a new parser configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the integer gating for top-level scalars
    pub fn with_integer_gating(mut self, gating: IntegerGating) -> Self {
        self.integer_gating = gating;
        self
    }

    /// Sets the duplicate path behavior
    pub fn with_duplicate_paths(mut self, behavior: DuplicatePathBehavior) -> Self {
        self.duplicate_paths = behavior;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frame {
    indent: usize,
    /// Bytes this frame appended to the path, separator included
    segment_len: usize,
}

/// Currently open ancestors of the line being parsed and their joined path
#[derive(Debug, Default)]
pub(crate) struct AncestryStack {
    frames: Vec<Frame>,
    path: String,
}

impl AncestryStack {
    /// Pops every frame whose indentation is at least `indent`.
    ///
    /// Afterwards the top frame, if any, is the nearest ancestor with a
    /// strictly smaller indentation. Returns the number of popped frames.
    pub(crate) fn rewind(&mut self, indent: usize) -> usize {
        let mut popped = 0;
        while let Some(&top) = self.frames.last() {
            if top.indent < indent {
                break;
            }
            self.frames.pop();
            self.path.truncate(self.path.len() - top.segment_len);
            popped += 1;
        }
        popped
    }

    /// Opens a new segment below the current top frame
    pub(crate) fn push(&mut self, indent: usize, name: &str) {
        let segment_len = if self.frames.is_empty() {
            name.len()
        } else {
            self.path.push('.');
            name.len() + 1
        };
        self.path.push_str(name);
        self.frames.push(Frame {
            indent,
            segment_len,
        });
    }

    pub(crate) fn path(&self) -> &str {
        &self.path
    }

    pub(crate) fn depth(&self) -> usize {
        self.frames.len()
    }
}

/// Result of parsing a whole document
#[derive(Debug, Clone, Default)]
pub struct ParseOutput {
    /// Every parameter that carried a value, keyed by dotted path
    pub config: ConfigDict,
    /// Problems found along the way, in line order
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutput {
    /// Returns true if any line produced a diagnostic
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// YConf parser.
///
/// The parser itself holds no per-document state; every call starts from an
/// empty ancestry stack, so one parser can be reused for any number of
/// documents.
#[derive(Debug, Clone, Default)]
pub struct ConfigParser {
    config: ParserConfig,
    line_parser: LineParser,
}

impl ConfigParser {
    /// Creates a parser with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with the given configuration
    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            line_parser: LineParser::new(config.integer_gating),
            config,
        }
    }

    /// Returns the parser configuration
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Returns the line parser used for individual lines
    pub fn line_parser(&self) -> &LineParser {
        &self.line_parser
    }

    /// Parses a whole document held in memory, split on `\n` or `\r\n`
    pub fn parse_str(&self, text: &str) -> ParseOutput {
        self.parse_lines(text.lines())
    }

    /// Parses every line of a buffered reader.
    ///
    /// A read failure ends the parse with [`YconfError::Io`]; nothing read
    /// before it is returned.
    pub fn parse_reader<R: BufRead>(&self, reader: R) -> Result<ParseOutput, YconfError> {
        let mut read_error = None;
        let lines = reader
            .lines()
            .map_while(|line| line.map_err(|error| read_error = Some(error)).ok());
        let output = self.parse_lines(lines);

        match read_error {
            Some(error) => Err(YconfError::Io(error)),
            None => Ok(output),
        }
    }

    /// Opens and parses a configuration file
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<ParseOutput, YconfError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| YconfError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "reading configuration file");
        self.parse_reader(BufReader::new(file))
    }

    /// Parses lines and collects the diagnostics alongside the dictionary
    pub fn parse_lines<I, S>(&self, lines: I) -> ParseOutput
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut diagnostics = Vec::new();
        let config = self.parse_lines_with_sink(lines, &mut diagnostics);
        ParseOutput {
            config,
            diagnostics,
        }
    }

    /// Parses lines, handing every diagnostic to `sink` as it is found
    pub fn parse_lines_with_sink<I, S>(&self, lines: I, sink: &mut dyn DiagnosticSink) -> ConfigDict
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = ConfigDict::new();
        let mut stack = AncestryStack::default();
        let mut issues = Vec::new();
        let mut reported = 0usize;

        for (index, line) in lines.into_iter().enumerate() {
            let line = line.as_ref();
            let line_number = index + 1;

            let record = self.line_parser.parse_line(line, &mut issues);
            for error in issues.drain(..) {
                tracing::warn!(
                    line = line_number,
                    category = %error.category(),
                    error = %error,
                    "configuration line problem"
                );
                sink.report(Diagnostic::new(line_number, error, line));
                reported += 1;
            }

            let Some(Record {
                indent,
                name,
                value,
            }) = record
            else {
                continue;
            };

            let popped = stack.rewind(indent);
            stack.push(indent, &name);
            tracing::trace!(
                line = line_number,
                indent,
                popped,
                depth = stack.depth(),
                path = stack.path(),
                "entered parameter"
            );

            if let Some(value) = value {
                tracing::trace!(
                    path = stack.path(),
                    value_type = %value.value_type(),
                    "storing value"
                );
                if !config.insert(stack.path(), value, self.config.duplicate_paths) {
                    tracing::debug!(
                        line = line_number,
                        path = stack.path(),
                        "duplicate path ignored"
                    );
                }
            }
        }

        tracing::debug!(
            entries = config.len(),
            diagnostics = reported,
            "parsed configuration"
        );
        config
    }
}
