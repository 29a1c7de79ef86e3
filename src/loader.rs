//! Trace loader: turns a transitions log into a [`Trace`].
//!
//! One log record per line, free-form text allowed before the identifier,
//! blank lines skipped. Any line that cannot be resolved to a known
//! transition aborts the load; a corrupt log must never produce a partial
//! verdict.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::trace::Trace;
use crate::transition::Transition;

/// Identifier token grammar: one letter followed by one or two digits.
static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z][0-9]{1,2}").expect("identifier pattern is valid"));

/// Why a transitions log could not be loaded.
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("failed to read transitions log {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: no transition identifier in {text:?}")]
    MalformedLine { line: usize, text: String },
    #[error("line {line}: unknown transition {token:?}")]
    UnknownTransition { line: usize, token: String },
}

/// Reads a transitions log from disk.
pub fn load_trace(path: &Path) -> Result<Trace, TraceError> {
    let file = File::open(path).map_err(|source| TraceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let trace = parse_lines(BufReader::new(file), path)?;
    tracing::debug!(
        path = %path.display(),
        transitions = trace.len(),
        "transitions log loaded"
    );
    Ok(trace)
}

/// Parses log lines into a trace. `path` is only used for error reporting.
pub fn parse_lines(reader: impl BufRead, path: &Path) -> Result<Trace, TraceError> {
    let mut trace = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| TraceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }
        trace.push(extract_transition(&line, index + 1)?);
    }
    Ok(trace.into())
}

/// Finds the transition a log line references: the first identifier token
/// that names a known transition. Prefix text is discarded.
fn extract_transition(line: &str, number: usize) -> Result<Transition, TraceError> {
    let mut first_token = None;
    for candidate in IDENTIFIER.find_iter(line) {
        if let Some(t) = Transition::from_token(candidate.as_str()) {
            return Ok(t);
        }
        first_token.get_or_insert(candidate.as_str());
    }
    match first_token {
        Some(token) => Err(TraceError::UnknownTransition {
            line: number,
            token: token.to_string(),
        }),
        None => Err(TraceError::MalformedLine {
            line: number,
            text: line.to_string(),
        }),
    }
}
