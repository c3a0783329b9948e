//! Line-by-line search for tagged declarations in one source text.

use crate::decl::{import_function, matches_search_term};
use crate::error::ParseError;
use crate::model::FunctionDecl;

/// A tagged declaration that could not be imported.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanFailure {
    pub file: String,
    /// Line of the declaration (the one after the tag), 1-based.
    pub line: usize,
    pub error: ParseError,
}

/// Outcome of scanning one or more sources, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanReport {
    pub functions: Vec<FunctionDecl>,
    pub failures: Vec<ScanFailure>,
}

impl ScanReport {
    /// Append another report, keeping order.
    pub fn merge(&mut self, other: ScanReport) {
        self.functions.extend(other.functions);
        self.failures.extend(other.failures);
    }
}

/// Find every line of `text` that starts with `tag` (after optional spaces or
/// tabs) and import the declaration behind it.
///
/// Imported declarations are located at `file` and the line after the tag.
/// A declaration that fails to import is logged, recorded in
/// [`ScanReport::failures`] and skipped; scanning always continues.
pub fn scan_source(text: &str, file: &str, tag: &str) -> ScanReport {
    let mut report = ScanReport::default();
    let mut offset = 0;
    for (index, line) in text.split_inclusive('\n').enumerate() {
        let tail = &text[offset..];
        offset += line.len();

        let indent = line.bytes().take_while(|b| matches!(b, b' ' | b'\t')).count();
        let candidate = &tail[indent..];
        if !matches_search_term(candidate, tag) {
            continue;
        }

        let decl_line = index + 2;
        match import_function(candidate, tag) {
            Ok((decl, _)) => {
                tracing::debug!(file, line = decl_line, name = decl.name(), "imported command");
                report.functions.push(decl.located(file, decl_line));
            }
            Err(error) => {
                tracing::warn!("{file}:{decl_line}: skipping declaration: {error}");
                report.failures.push(ScanFailure {
                    file: file.to_string(),
                    line: decl_line,
                    error,
                });
            }
        }
    }
    report
}
