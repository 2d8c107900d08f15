//! Integration tests for the script execution loop.
//!
//! These run real script files through the segmenter and a fake
//! [`StatementExecutor`], verifying ordering, abort-on-failure, and the
//! aggregated per-statement messages.

use dbutil::core::executor::{run_script, RowSet, StatementExecutor, StatementOutcome};
use dbutil::core::segmenter;
use dbutil::{Error, Result};
use std::io::Write;
use tempfile::TempDir;

/// Scripted executor: answers each statement with the next queued outcome
/// and records everything it was asked to run.
struct ScriptedExecutor {
    outcomes: Vec<Result<StatementOutcome>>,
    executed: Vec<String>,
}

impl ScriptedExecutor {
    fn new(outcomes: Vec<Result<StatementOutcome>>) -> Self {
        Self {
            outcomes,
            executed: Vec::new(),
        }
    }
}

impl StatementExecutor for ScriptedExecutor {
    fn execute(&mut self, statement: &str) -> Result<StatementOutcome> {
        self.executed.push(statement.to_string());
        if self.outcomes.is_empty() {
            Ok(StatementOutcome::Done)
        } else {
            self.outcomes.remove(0)
        }
    }
}

fn write_script(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

// ========== FILE TO EXECUTION ROUND TRIP ==========

#[test]
fn test_script_file_runs_every_statement_in_order() {
    let dir = TempDir::new().unwrap();
    let path = write_script(
        &dir,
        "seed.sql",
        "INSERT INTO t VALUES (1);\nINSERT INTO t VALUES (2);\nCOMMIT;\n",
    );

    let parsed = segmenter::parse(&path).unwrap();
    let mut db = ScriptedExecutor::new(vec![
        Ok(StatementOutcome::RowsAffected(1)),
        Ok(StatementOutcome::RowsAffected(1)),
        Ok(StatementOutcome::Done),
    ]);

    let result = run_script(&parsed, &mut db).unwrap();

    assert_eq!(
        db.executed,
        vec![
            "INSERT INTO t VALUES (1)",
            "INSERT INTO t VALUES (2)",
            "COMMIT"
        ]
    );
    assert!(result.is_success());
    assert_eq!(
        result.message(),
        "Rows affected: 1\nRows affected: 1\nStatement executed"
    );
}

#[test]
fn test_plsql_block_reaches_executor_as_one_statement() {
    let dir = TempDir::new().unwrap();
    let path = write_script(
        &dir,
        "block.sql",
        "BEGIN\n  UPDATE t SET n = n + 1;\n  COMMIT;\nEND;\n/\n",
    );

    let parsed = segmenter::parse(&path).unwrap();
    let mut db = ScriptedExecutor::new(vec![Ok(StatementOutcome::Done)]);
    run_script(&parsed, &mut db).unwrap();

    assert_eq!(db.executed.len(), 1);
    assert_eq!(db.executed[0], "BEGIN\n  UPDATE t SET n = n + 1;\n  COMMIT;\nEND;");
}

#[test]
fn test_query_outcome_is_rendered_in_message() {
    let dir = TempDir::new().unwrap();
    let path = write_script(&dir, "q.sql", "SELECT id, name FROM t;\n");

    let parsed = segmenter::parse(&path).unwrap();
    let rows = RowSet {
        columns: vec!["ID".to_string(), "NAME".to_string()],
        rows: vec![vec!["1".to_string(), "Alice".to_string()]],
        truncated: false,
    };
    let mut db = ScriptedExecutor::new(vec![Ok(StatementOutcome::Rows(rows))]);

    let result = run_script(&parsed, &mut db).unwrap();

    let message = result.message();
    assert!(message.contains("ID"));
    assert!(message.contains("NAME"));
    assert!(message.contains("Alice"));
}

// ========== FAILURE HANDLING ==========

#[test]
fn test_failure_stops_the_script_midway() {
    let dir = TempDir::new().unwrap();
    let path = write_script(
        &dir,
        "partial.sql",
        "DELETE FROM a;\nDELETE FROM nonexistent;\nDELETE FROM c;\n",
    );

    let parsed = segmenter::parse(&path).unwrap();
    let mut db = ScriptedExecutor::new(vec![
        Ok(StatementOutcome::RowsAffected(3)),
        Err(Error::other("ORA-00942: table or view does not exist")),
    ]);

    let result = run_script(&parsed, &mut db);

    assert!(result.is_err());
    // The failing statement was attempted; the one after it was not.
    assert_eq!(
        db.executed,
        vec!["DELETE FROM a", "DELETE FROM nonexistent"]
    );
}

#[test]
fn test_error_message_carries_database_detail() {
    let parsed = segmenter::parse_content("DROP TABLE missing;", "drop.sql");
    let mut db = ScriptedExecutor::new(vec![Err(Error::other(
        "ORA-00942: table or view does not exist",
    ))]);

    let err = run_script(&parsed, &mut db).unwrap_err();
    assert!(err.to_string().contains("ORA-00942"));
}

// ========== EMPTY AND COMMENT-ONLY SCRIPTS ==========

#[test]
fn test_comment_only_script_executes_nothing() {
    let dir = TempDir::new().unwrap();
    let path = write_script(&dir, "noop.sql", "-- nothing to do here\n");

    let parsed = segmenter::parse(&path).unwrap();
    let mut db = ScriptedExecutor::new(vec![]);
    let result = run_script(&parsed, &mut db).unwrap();

    assert!(db.executed.is_empty());
    assert!(result.is_success());
    assert_eq!(result.message(), "");
}
