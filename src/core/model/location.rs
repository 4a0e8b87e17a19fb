//! Source positions attached to every location-bearing entity.

use std::fmt;

use serde::{Deserialize, Serialize};
use swc_common::{SourceMap, Span};

use crate::error::{AnalysisError, AnalysisResult};

/// 1-based line and column of a node's first character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Key used for maps indexed by call site (e.g. `"12:5"`).
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Start and end positions of a lexical body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpan {
    pub start: Location,
    pub end: Location,
}

/// Converts swc spans into [`Location`]s for one file.
///
/// A dummy span means the parser produced a synthetic node; identity and
/// scope computations cannot proceed without a position, so that is fatal.
pub struct Locator<'a> {
    source_map: &'a SourceMap,
    file: &'a str,
}

impl<'a> Locator<'a> {
    pub fn new(source_map: &'a SourceMap, file: &'a str) -> Self {
        Self { source_map, file }
    }

    pub fn locate(&self, span: Span, node: &'static str) -> AnalysisResult<Location> {
        if span.is_dummy() {
            return Err(AnalysisError::MissingLocation {
                node,
                file: self.file.to_string(),
            });
        }
        let loc = self.source_map.lookup_char_pos(span.lo);
        Ok(Location::new(loc.line, loc.col_display + 1))
    }

    pub fn locate_span(&self, span: Span, node: &'static str) -> AnalysisResult<SourceSpan> {
        let start = self.locate(span, node)?;
        let end = self.source_map.lookup_char_pos(span.hi);
        Ok(SourceSpan {
            start,
            end: Location::new(end.line, end.col_display + 1),
        })
    }
}
