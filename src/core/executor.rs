//! Statement execution loop.
//!
//! The segmenter produces statements; this module runs them, in order,
//! against whatever implements [`StatementExecutor`]. Each statement is
//! independent from the loop's point of view: there is no transactional
//! grouping and no retry, and a failure aborts the remainder of the script.

use crate::core::segmenter::ParsedScript;
use crate::db::formatter;
use crate::models::result::ExecutionResult;
use crate::Result;

/// Tabular result of a query, already rendered to display strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// True when the fetch stopped at the row cap before the result set ended.
    pub truncated: bool,
}

/// Outcome of executing one statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementOutcome {
    /// The statement returned rows.
    Rows(RowSet),
    /// The statement affected rows (DML).
    RowsAffected(u64),
    /// The statement completed without a row count (DDL, anonymous blocks).
    Done,
}

impl StatementOutcome {
    /// User-facing message for this outcome.
    pub fn message(&self) -> String {
        match self {
            StatementOutcome::Rows(rows) => formatter::format_row_set(rows),
            StatementOutcome::RowsAffected(count) => format!("Rows affected: {count}"),
            StatementOutcome::Done => "Statement executed".to_string(),
        }
    }
}

/// The seam between segmentation and the database: executes one statement
/// string against an open connection.
pub trait StatementExecutor {
    fn execute(&mut self, statement: &str) -> Result<StatementOutcome>;
}

/// Executes every statement of a parsed script in source order and collects
/// one message per statement.
pub fn run_script(
    script: &ParsedScript,
    executor: &mut dyn StatementExecutor,
) -> Result<ExecutionResult> {
    tracing::info!(
        "Executing script {} ({} statements)",
        script.source_name(),
        script.len()
    );

    let mut messages = Vec::with_capacity(script.len());
    for (index, statement) in script.statements().iter().enumerate() {
        tracing::debug!("Statement {}/{}: {}", index + 1, script.len(), statement);
        let outcome = executor.execute(statement)?;
        messages.push(outcome.message());
    }

    Ok(ExecutionResult::success(messages.join("\n")))
}
