//! SQL script segmenter.
//!
//! Splits a multi-statement SQL/PL-SQL script into individually executable
//! statements. Two delimiter conventions are recognized:
//! - regular SQL, terminated by a semicolon at the end of a line
//! - Oracle PL/SQL blocks (anonymous `DECLARE`/`BEGIN` blocks and named
//!   `CREATE [OR REPLACE] PROCEDURE/FUNCTION/PACKAGE/TRIGGER/TYPE` units),
//!   terminated by a line containing only `/`
//!
//! The scan is line-oriented and heuristic: block comments, single-quoted
//! string literals and "inside a PL/SQL block" are tracked per line without a
//! full SQL tokenizer. The segmenter only segments; it never validates SQL,
//! and any text produces some statement list.

use crate::Result;
use once_cell::sync::Lazy;
use regex::{Regex, RegexSet};
use std::path::Path;

/// Pattern table for lines that open a PL/SQL block. Extend the vocabulary
/// here; the scan loop itself never hard-codes keywords.
const BLOCK_START_PATTERNS: &[&str] = &[
    r"(?i)^\s*DECLARE\b",
    r"(?i)^\s*BEGIN\b",
    r"(?i)^\s*CREATE\s+(?:OR\s+REPLACE\s+)?(?:PROCEDURE|FUNCTION|PACKAGE|TRIGGER|TYPE)\b",
];

static PLSQL_BLOCK_START: Lazy<RegexSet> =
    Lazy::new(|| RegexSet::new(BLOCK_START_PATTERNS).expect("invalid block-start pattern"));

/// A `/` alone on a line (surrounding whitespace allowed) ends a PL/SQL block.
static SLASH_DELIMITER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*/\s*$").expect("invalid slash pattern"));

/// Anchored at end of text, not end of line: only a `--` comment on the last
/// line of an accumulated statement is stripped before the emptiness check.
static TRAILING_LINE_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"--[^\n]*$").expect("invalid comment pattern"));

/// An immutable, parsed SQL script: a source identifier plus the ordered
/// statements extracted from it, trimmed and stripped of trailing delimiters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedScript {
    source_name: String,
    statements: Vec<String>,
}

impl ParsedScript {
    fn new(source_name: impl Into<String>, statements: Vec<String>) -> Self {
        Self {
            source_name: source_name.into(),
            statements,
        }
    }

    /// Source identifier (file path or caller-chosen name), for diagnostics.
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// The statements in source order.
    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    /// True if the script contains no executable statements.
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Number of statements in the script.
    pub fn len(&self) -> usize {
        self.statements.len()
    }
}

/// Whether the scan is currently inside a single-quoted string literal.
///
/// Advanced once per line: a line with an odd count of unescaped quotes
/// toggles the state, where a quote directly following another quote is the
/// SQL `''` escape and does not count. This is a deliberate per-line
/// approximation; a literal spanning lines whose per-line parity cancels out
/// is not tracked correctly, and that limit is part of the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuoteState {
    Outside,
    Inside,
}

impl QuoteState {
    fn advance(self, line: &str) -> Self {
        let mut unescaped_quotes: u32 = 0;
        let mut prev_was_quote = false;

        for c in line.chars() {
            if c == '\'' && !prev_was_quote {
                unescaped_quotes += 1;
            }
            prev_was_quote = c == '\'';
        }

        if unescaped_quotes % 2 == 1 {
            self.toggled()
        } else {
            self
        }
    }

    fn toggled(self) -> Self {
        match self {
            QuoteState::Outside => QuoteState::Inside,
            QuoteState::Inside => QuoteState::Outside,
        }
    }
}

/// State carried across the line-by-line pass.
#[derive(Debug)]
struct ScanState {
    accumulator: String,
    in_plsql_block: bool,
    in_block_comment: bool,
    quote: QuoteState,
}

impl ScanState {
    fn new() -> Self {
        Self {
            accumulator: String::new(),
            in_plsql_block: false,
            in_block_comment: false,
            quote: QuoteState::Outside,
        }
    }

    fn append_line(&mut self, line: &str) {
        if !self.accumulator.is_empty() {
            self.accumulator.push('\n');
        }
        self.accumulator.push_str(line);
    }
}

/// Parses a SQL script file into individual statements.
///
/// Reads the whole file into memory and delegates to [`parse_content`], using
/// the path as the source name. Fails only if the file cannot be read.
pub fn parse(path: impl AsRef<Path>) -> Result<ParsedScript> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    Ok(parse_content(&content, &path.display().to_string()))
}

/// Parses already-loaded script content into individual statements.
///
/// Total over all inputs: blank content yields an empty statement list, and
/// malformed SQL still yields some segmentation (validation happens at
/// execution time, not here).
pub fn parse_content(content: &str, source_name: &str) -> ParsedScript {
    if content.trim().is_empty() {
        return ParsedScript::new(source_name, Vec::new());
    }
    ParsedScript::new(source_name, split_statements(content))
}

fn split_statements(content: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut state = ScanState::new();

    for line in content.lines() {
        let trimmed = line.trim();

        // Block comment spans. Same-line heuristic: the flag persists across
        // lines until a line containing the closer appears.
        if state.quote == QuoteState::Outside {
            if trimmed.contains("/*") && !trimmed.contains("*/") {
                state.in_block_comment = true;
            }
            if state.in_block_comment && trimmed.contains("*/") {
                state.in_block_comment = false;
            }
        }

        // Pure comment lines between statements never become statement text.
        if state.accumulator.is_empty() && is_comment_line(trimmed) {
            continue;
        }

        if !state.in_plsql_block && !state.in_block_comment && is_block_start(trimmed) {
            state.in_plsql_block = true;
        }

        // A lone slash ends the block; the delimiter line itself is dropped.
        if state.in_plsql_block && SLASH_DELIMITER.is_match(line) {
            emit(&mut statements, state.accumulator.trim());
            state.accumulator.clear();
            state.in_plsql_block = false;
            continue;
        }

        state.append_line(line);
        state.quote = state.quote.advance(line);

        // Semicolon terminates only in plain-SQL mode, outside comments and
        // string literals.
        if !state.in_plsql_block
            && !state.in_block_comment
            && state.quote == QuoteState::Outside
            && trimmed.ends_with(';')
        {
            let statement = strip_one_semicolon(state.accumulator.trim());
            emit(&mut statements, statement);
            state.accumulator.clear();
        }
    }

    // A final statement with no terminating delimiter is flushed as-is rather
    // than dropped.
    let remaining = state.accumulator.trim();
    if !remaining.is_empty() && is_executable(remaining) {
        let cleaned = strip_one_semicolon(remaining);
        if !cleaned.is_empty() {
            statements.push(cleaned.to_string());
        }
    }

    statements
}

fn emit(statements: &mut Vec<String>, candidate: &str) {
    if !candidate.is_empty() && is_executable(candidate) {
        statements.push(candidate.to_string());
    }
}

fn strip_one_semicolon(statement: &str) -> &str {
    statement.strip_suffix(';').map_or(statement, str::trim)
}

fn is_block_start(line: &str) -> bool {
    PLSQL_BLOCK_START.is_match(line)
}

fn is_comment_line(line: &str) -> bool {
    line.is_empty() || line.starts_with("--") || line.starts_with("/*")
}

/// A statement consisting only of comments and whitespace is not executable.
fn is_executable(statement: &str) -> bool {
    let trimmed = statement.trim_start();
    if trimmed.starts_with("--") {
        return false;
    }
    let without_trailing_comment = TRAILING_LINE_COMMENT.replace_all(trimmed, "");
    !without_trailing_comment.trim().is_empty()
}
